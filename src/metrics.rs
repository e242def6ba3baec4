// src/metrics.rs
//! Prometheus exposition for the analyzer counters (see `analysis` and `source`).

use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::config::AnalyzerConfig;

pub const ENV_METRICS_ENABLED: &str = "METRICS_ENABLED";

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

static GLOBAL: OnceCell<Metrics> = OnceCell::new();

impl Metrics {
    /// Install the Prometheus recorder and publish the static config gauges.
    pub fn init(cfg: &AnalyzerConfig) -> anyhow::Result<Self> {
        // Use default buckets to avoid API differences across crate versions.
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;

        gauge!("analyzer_batch_size").set(cfg.batch_size as f64);
        gauge!("analyzer_max_comments").set(cfg.max_comments as f64);

        Ok(Self { handle })
    }

    /// Process-wide recorder; installed on first call. `None` if another
    /// recorder already owns the process.
    pub fn global(cfg: &AnalyzerConfig) -> Option<&'static Metrics> {
        match GLOBAL.get_or_try_init(|| Self::init(cfg)) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!(error = %e, "metrics recorder unavailable");
                None
            }
        }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// `/metrics` is mounted only when METRICS_ENABLED=1.
pub fn metrics_enabled() -> bool {
    std::env::var(ENV_METRICS_ENABLED)
        .ok()
        .is_some_and(|v| v.trim() == "1")
}
