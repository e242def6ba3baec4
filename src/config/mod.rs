// src/config/mod.rs
//! Analyzer runtime configuration.
//!
//! Load order:
//! 1) $ANALYZER_CONFIG_PATH (must exist when set)
//! 2) config/analyzer.toml
//! 3) config/analyzer.json
//! 4) built-in defaults
//!
//! Afterwards `ANALYZER_BATCH_SIZE` / `ANALYZER_MAX_COMMENTS` override the file.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";
pub const ENV_BATCH_SIZE: &str = "ANALYZER_BATCH_SIZE";
pub const ENV_MAX_COMMENTS: &str = "ANALYZER_MAX_COMMENTS";

pub const DEFAULT_TOML_PATH: &str = "config/analyzer.toml";
pub const DEFAULT_JSON_PATH: &str = "config/analyzer.json";

fn default_batch_size() -> usize {
    5
}
fn default_max_comments() -> usize {
    50
}
fn default_yield() -> bool {
    true
}
fn default_top_count() -> usize {
    3
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Comments scored per scheduling slice before yielding.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Cap applied by `collect_comments`.
    #[serde(default = "default_max_comments")]
    pub max_comments: usize,
    /// Yield to the runtime between slices. Off only for benchmarks.
    #[serde(default = "default_yield")]
    pub yield_between_batches: bool,
    /// Default `count` for top-comment queries.
    #[serde(default = "default_top_count")]
    pub top_count: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_comments: default_max_comments(),
            yield_between_batches: default_yield(),
            top_count: default_top_count(),
        }
    }
}

impl AnalyzerConfig {
    /// Load from an explicit path. TOML or JSON, picked by extension.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading analyzer config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = match ext.as_str() {
            "json" => Self::from_json_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AnalyzerConfig = toml::from_str(s).context("parsing analyzer TOML")?;
        Ok(cfg.sanitized())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: AnalyzerConfig = serde_json::from_str(s).context("parsing analyzer JSON")?;
        Ok(cfg.sanitized())
    }

    /// Resolve using env var + fallbacks, then apply env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else if Path::new(DEFAULT_TOML_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_TOML_PATH))?
        } else if Path::new(DEFAULT_JSON_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_JSON_PATH))?
        } else {
            Self::default()
        };

        if let Some(n) = parse_usize_env(std::env::var(ENV_BATCH_SIZE).ok()) {
            cfg.batch_size = n;
        }
        if let Some(n) = parse_usize_env(std::env::var(ENV_MAX_COMMENTS).ok()) {
            cfg.max_comments = n;
        }
        Ok(cfg.sanitized())
    }

    /// Zero sizes would stall batching or drop every comment; fall back to defaults.
    fn sanitized(mut self) -> Self {
        if self.batch_size == 0 {
            self.batch_size = default_batch_size();
        }
        if self.max_comments == 0 {
            self.max_comments = default_max_comments();
        }
        self
    }
}

fn parse_usize_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = AnalyzerConfig::from_toml_str("batch_size = 8").unwrap();
        assert_eq!(cfg.batch_size, 8);
        assert_eq!(cfg.max_comments, 50);
        assert!(cfg.yield_between_batches);
        assert_eq!(cfg.top_count, 3);
    }

    #[test]
    fn zero_sizes_are_sanitized() {
        let cfg = AnalyzerConfig::from_json_str(r#"{"batch_size":0,"max_comments":0}"#).unwrap();
        assert_eq!(cfg, AnalyzerConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(AnalyzerConfig::from_toml_str("batch_size = \"many\"").is_err());
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        // Izoluj CWD do temp složky, aby nerušil reálný config/ v repu
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_BATCH_SIZE);
        env::remove_var(ENV_MAX_COMMENTS);

        // no files → defaults
        assert_eq!(
            AnalyzerConfig::load_default().unwrap(),
            AnalyzerConfig::default()
        );

        // config/analyzer.toml is picked up
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        fs::write(tmp.path().join(DEFAULT_TOML_PATH), "max_comments = 20").unwrap();
        assert_eq!(AnalyzerConfig::load_default().unwrap().max_comments, 20);

        // env path wins over fallbacks
        let p_json = tmp.path().join("custom.json");
        fs::write(&p_json, r#"{"batch_size": 2}"#).unwrap();
        env::set_var(ENV_CONFIG_PATH, p_json.display().to_string());
        let cfg = AnalyzerConfig::load_default().unwrap();
        assert_eq!(cfg.batch_size, 2);
        assert_eq!(cfg.max_comments, 50);

        // scalar env overrides beat the file
        env::set_var(ENV_BATCH_SIZE, "7");
        assert_eq!(AnalyzerConfig::load_default().unwrap().batch_size, 7);

        // missing env path is an error
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
        assert!(AnalyzerConfig::load_default().is_err());

        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_BATCH_SIZE);
        env::set_current_dir(&old).unwrap();
    }
}
