//! Configuration management for the recommendation service.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `CATALOG_PATH` - Optional. Agent catalog JSON. Defaults to the bundled catalog.
//! - `OPENROUTER_API_KEY` - Optional. Enables semantic analysis when set.
//! - `ANALYZER_ENABLED` - Optional. Set to `false` to force heuristic-only scoring.
//! - `ANALYZER_MODEL` - Optional. Defaults to `google/gemini-2.0-flash-001`.
//! - `ANALYZER_TIMEOUT_SECS` - Optional. Defaults to `5`.
//! - `DEFAULT_TOP_N` - Optional. Defaults to `3`.
//! - `RANKING_JITTER` - Optional. Exploration noise in `[0, 0.5]`. Defaults to `0` (off).
//! - `RANKING_SEED` - Optional. Seed for the jitter when a request carries none.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::recommend::{RecommenderSettings, DEFAULT_TOP_N, MAX_JITTER};
use crate::util::env_var_bool;

pub const DEFAULT_ANALYZER_MODEL: &str = "google/gemini-2.0-flash-001";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Semantic analyzer configuration.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// OpenRouter API key; `None` disables analysis
    pub api_key: Option<String>,

    /// Chat model identifier (OpenRouter format)
    pub model: String,

    /// Upper bound on one analysis call
    pub timeout: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_ANALYZER_MODEL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl AnalyzerConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Catalog document; `None` uses the bundled catalog
    pub catalog_path: Option<PathBuf>,

    pub analyzer: AnalyzerConfig,

    /// Result count when a request does not specify one
    pub default_top_n: usize,

    /// Opt-in ranking jitter (0 = deterministic)
    pub ranking_jitter: f64,

    pub ranking_seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when a variable is set but unparsable
    /// or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = parse_env("PORT", 3000u16)?;

        let catalog_path = std::env::var("CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .filter(|_| env_var_bool("ANALYZER_ENABLED", true));

        let timeout_secs = parse_env("ANALYZER_TIMEOUT_SECS", 5u64)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "ANALYZER_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let analyzer = AnalyzerConfig {
            api_key,
            model: std::env::var("ANALYZER_MODEL")
                .unwrap_or_else(|_| DEFAULT_ANALYZER_MODEL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        let default_top_n = parse_env("DEFAULT_TOP_N", DEFAULT_TOP_N)?;
        if default_top_n == 0 {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_TOP_N".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let ranking_jitter = parse_env("RANKING_JITTER", 0.0f64)?;
        validate_jitter(ranking_jitter)?;

        let ranking_seed = match std::env::var("RANKING_SEED") {
            Ok(raw) => Some(raw.trim().parse().map_err(|e| {
                ConfigError::InvalidValue("RANKING_SEED".to_string(), format!("{}", e))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            host,
            port,
            catalog_path,
            analyzer,
            default_top_n,
            ranking_jitter,
            ranking_seed,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(catalog_path: Option<PathBuf>, analyzer_api_key: Option<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            catalog_path,
            analyzer: AnalyzerConfig {
                api_key: analyzer_api_key,
                ..AnalyzerConfig::default()
            },
            default_top_n: DEFAULT_TOP_N,
            ranking_jitter: 0.0,
            ranking_seed: None,
        }
    }

    /// Engine tunables derived from this config.
    pub fn recommender_settings(&self) -> RecommenderSettings {
        RecommenderSettings {
            analyzer_timeout: self.analyzer.timeout,
            default_top_n: self.default_top_n,
            jitter: self.ranking_jitter,
            jitter_seed: self.ranking_seed,
        }
    }
}

fn parse_env<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}

fn validate_jitter(jitter: f64) -> Result<(), ConfigError> {
    if (0.0..=MAX_JITTER).contains(&jitter) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(
            "RANKING_JITTER".to_string(),
            format!("{} is outside [0, {}]", jitter, MAX_JITTER),
        ))
    }
}
