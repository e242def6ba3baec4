// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod analysis;
pub mod api;
pub mod comment;
pub mod config;
pub mod error;
pub mod metrics;
pub mod sentiment;
pub mod source;

// ---- Re-exports for stable public API ----
pub use crate::analysis::{top_comments, AnalysisDetails, AnalysisResult, AnalysisSummary};
pub use crate::api::router;
pub use crate::comment::{AnalyzedComment, Comment};
pub use crate::config::AnalyzerConfig;
pub use crate::error::AnalysisError;
pub use crate::sentiment::{Category, SentimentAnalyzer, SentimentDetails, SentimentResult};

use axum::Router;
use tracing::info;

/// Build the full in-process app: resolved config, API routes and, when
/// METRICS_ENABLED=1, the `/metrics` endpoint.
pub async fn app() -> anyhow::Result<Router> {
    let cfg = AnalyzerConfig::load_default()?;
    info!(
        batch_size = cfg.batch_size,
        max_comments = cfg.max_comments,
        "analyzer config loaded"
    );

    let mut router = api::create_router(cfg);
    if crate::metrics::metrics_enabled() {
        if let Some(m) = crate::metrics::Metrics::global(&cfg) {
            router = router.merge(m.router());
        }
    }
    Ok(router)
}
