//! Ranking across the whole catalog.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use thiserror::Error;

use crate::analyzer::SemanticAnalysis;
use crate::catalog::AgentProfile;

use super::scoring::{score, total};
use super::types::{ScoreBreakdown, TaskRequest};

/// Number of recommendations returned when the caller does not ask for a count.
pub const DEFAULT_TOP_N: usize = 3;

/// Largest exploration jitter accepted.
pub const MAX_JITTER: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("top_n must be a positive integer, got {0}")]
    InvalidTopN(i64),
}

/// Validate a caller-supplied result count.
pub fn validate_top_n(top_n: i64) -> Result<usize, RankError> {
    match usize::try_from(top_n) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RankError::InvalidTopN(top_n)),
    }
}

/// Seeded exploration noise, off unless explicitly requested.
///
/// Each scored entry gets `uniform(0, magnitude)` added before rounding. Entries
/// draw in catalog order, so a given seed always reproduces the same ordering.
#[derive(Debug, Clone)]
pub struct Jitter {
    magnitude: f64,
    seed: u64,
    rng: StdRng,
}

impl Jitter {
    /// Returns `None` when `magnitude` is zero (or not a positive number).
    pub fn new(magnitude: f64, seed: u64) -> Option<Self> {
        if magnitude.is_nan() || magnitude <= 0.0 {
            return None;
        }
        Some(Self {
            magnitude: magnitude.min(MAX_JITTER),
            seed,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn sample(&mut self) -> f64 {
        self.rng.gen_range(0.0..=self.magnitude)
    }
}

/// One ranked catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedAgent<'a> {
    pub agent: &'a AgentProfile,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Ranking output.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<'a> {
    /// Best first, at most `top_n` long
    pub entries: Vec<RankedAgent<'a>>,
    /// Catalog entries left out because they could not be scored
    pub skipped: usize,
}

/// Score every agent, order best first and keep the top `top_n`.
///
/// Equal scores are ordered by agent id ascending. Malformed profiles are
/// skipped and counted rather than failing the whole ranking.
pub fn rank<'a>(
    task: &TaskRequest,
    catalog: &'a [AgentProfile],
    analysis: Option<&SemanticAnalysis>,
    top_n: usize,
    mut jitter: Option<&mut Jitter>,
) -> Result<Ranking<'a>, RankError> {
    if top_n == 0 {
        return Err(RankError::InvalidTopN(0));
    }

    let mut skipped = 0;
    let mut entries = Vec::with_capacity(catalog.len());
    for agent in catalog {
        if let Err(e) = agent.validate() {
            tracing::warn!("Skipping catalog entry during ranking: {}", e);
            skipped += 1;
            continue;
        }

        let mut scored = score(task, agent, analysis);
        if let Some(jitter) = jitter.as_deref_mut() {
            scored.breakdown.jitter = jitter.sample();
            scored.score = total(&scored.breakdown);
        }

        entries.push(RankedAgent {
            agent,
            score: scored.score,
            breakdown: scored.breakdown,
        });
    }

    entries.sort_by(compare_ranked);
    entries.truncate(top_n);

    Ok(Ranking { entries, skipped })
}

fn compare_ranked(a: &RankedAgent<'_>, b: &RankedAgent<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.breakdown.tie_break_key.cmp(&b.breakdown.tie_break_key))
}
