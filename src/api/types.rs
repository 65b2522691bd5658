//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::recommend::TaskRequest;

/// Body of `POST /api/recommend`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    /// Description, language and complexity
    #[serde(flatten)]
    pub task: TaskRequest,

    /// Number of recommendations (default from config, must be positive)
    #[serde(default)]
    pub top_n: Option<i64>,

    /// Jitter seed; ignored unless ranking jitter is enabled
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Root banner.
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Number of agents in the catalog
    pub catalog_size: usize,

    /// Whether requests may be enriched by semantic analysis
    pub analyzer_enabled: bool,
}
