//! Recommendation engine.
//!
//! ```text
//! TaskRequest ──► analyzer (optional, bounded) ──► score (per agent)
//!                                                     │
//!                      Recommendation list ◄── explain ◄── rank
//! ```
//!
//! - `scoring`: pure per-agent score with an itemised breakdown
//! - `ranking`: orders the catalog, breaks ties on agent id, truncates
//! - `explain`: turns a breakdown into a sentence
//! - `engine`: ties the pieces together for one request

mod engine;
mod explain;
mod ranking;
mod scoring;
mod types;

pub use engine::{RecommendOutcome, Recommender, RecommenderSettings};
pub use explain::explain;
pub use ranking::{
    rank, validate_top_n, Jitter, RankError, RankedAgent, Ranking, DEFAULT_TOP_N, MAX_JITTER,
};
pub use scoring::{
    score, ScoredAgent, COMPLEXITY_POINTS, FEATURE_MATCH_POINTS, LANGUAGE_MATCH_POINTS,
    TASK_TYPE_MATCH_POINTS,
};
pub use types::{Complexity, Recommendation, ScoreBreakdown, TaskRequest};
