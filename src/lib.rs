//! # Agent Recommender
//!
//! Ranks AI coding assistants for a task description and explains each pick.
//!
//! ## Architecture
//!
//! ```text
//!        ┌──────────────────────────────────┐
//!        │           HTTP API               │
//!        │     POST /api/recommend          │
//!        └────────────────┬─────────────────┘
//!                         │
//!                         ▼
//!        ┌──────────────────────────────────┐      ┌──────────────────┐
//!        │          Recommender             │─────►│ SemanticAnalyzer │
//!        │  score ─► rank ─► explain        │      │ (LLM, optional)  │
//!        └────────────────┬─────────────────┘      └──────────────────┘
//!                         │
//!                         ▼
//!                ┌─────────────────┐
//!                │ Catalog (static)│
//!                └─────────────────┘
//! ```
//!
//! ## Request Flow
//! 1. Receive a task (description, language, complexity)
//! 2. Ask the analyzer for a task type and key features, bounded by a timeout
//! 3. Score every catalog entry, rank, keep the top N
//! 4. Explain each pick and return the list
//!
//! ## Modules
//! - `catalog`: Agent profiles loaded once at startup
//! - `analyzer`: Optional semantic analysis of the task
//! - `recommend`: Scoring, ranking and explanations
//! - `llm`: Chat-completion client used by the analyzer
//! - `api`: HTTP surface

pub mod analyzer;
pub mod api;
pub mod catalog;
pub mod config;
pub mod llm;
pub mod recommend;
pub mod util;

pub use catalog::{AgentProfile, Catalog};
pub use config::Config;
pub use recommend::{Recommendation, Recommender, TaskRequest};
