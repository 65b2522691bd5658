//! HTTP API for the recommendation service.
//!
//! ## Endpoints
//!
//! - `GET /` - Service banner
//! - `GET /api/health` - Health check
//! - `GET /api/agents` - List the agent catalog
//! - `POST /api/recommend` - Rank agents for a task description
//! - `POST /recommend` - Same handler, kept for clients of the original path

mod routes;
pub mod types;

pub use routes::{router, serve, AppState};
pub use types::*;
