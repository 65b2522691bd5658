//! Request-level orchestration: analysis, ranking, explanation.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::analyzer::{analyze_with_timeout, SemanticAnalysis, SemanticAnalyzer};
use crate::catalog::Catalog;

use super::explain::explain;
use super::ranking::{rank, Jitter, RankError, DEFAULT_TOP_N};
use super::types::{Recommendation, TaskRequest};

/// Tunables for a [`Recommender`].
#[derive(Debug, Clone)]
pub struct RecommenderSettings {
    /// Upper bound on the analyzer call
    pub analyzer_timeout: Duration,
    /// Result count when the caller does not pass one
    pub default_top_n: usize,
    /// Exploration jitter magnitude; `0.0` disables it
    pub jitter: f64,
    /// Seed used for jitter when the request does not carry one
    pub jitter_seed: Option<u64>,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            analyzer_timeout: Duration::from_secs(5),
            default_top_n: DEFAULT_TOP_N,
            jitter: 0.0,
            jitter_seed: None,
        }
    }
}

/// Everything produced for one request.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendOutcome {
    pub recommendations: Vec<Recommendation>,
    /// The analysis used for scoring, if the analyzer produced one
    pub analysis: Option<SemanticAnalysis>,
    /// Catalog entries that could not be scored
    pub skipped_entries: usize,
    pub warnings: Vec<String>,
    /// Jitter seed, present only when jitter was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Stateless recommendation service over a shared, read-only catalog.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    analyzer: Arc<dyn SemanticAnalyzer>,
    settings: RecommenderSettings,
}

impl Recommender {
    pub fn new(
        catalog: Arc<Catalog>,
        analyzer: Arc<dyn SemanticAnalyzer>,
        settings: RecommenderSettings,
    ) -> Self {
        Self {
            catalog,
            analyzer,
            settings,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn analyzer_enabled(&self) -> bool {
        self.analyzer.is_enabled()
    }

    /// Recommend agents for `task`.
    ///
    /// `top_n` falls back to the configured default. `seed` only matters when
    /// jitter is enabled. Only an invalid `top_n` fails; analyzer trouble
    /// degrades to heuristic scoring.
    pub async fn recommend(
        &self,
        task: &TaskRequest,
        top_n: Option<i64>,
        seed: Option<u64>,
    ) -> Result<RecommendOutcome, RankError> {
        let top_n = match top_n {
            Some(n) => super::validate_top_n(n)?,
            None => self.settings.default_top_n,
        };

        let analysis =
            analyze_with_timeout(self.analyzer.as_ref(), task, self.settings.analyzer_timeout)
                .await;

        let mut jitter = Jitter::new(
            self.settings.jitter,
            seed.or(self.settings.jitter_seed)
                .unwrap_or_else(rand::random::<u64>),
        );
        if let Some(jitter) = &jitter {
            tracing::debug!("Ranking with jitter seed {}", jitter.seed());
        }

        let ranking = rank(
            task,
            self.catalog.all(),
            analysis.as_ref(),
            top_n,
            jitter.as_mut(),
        )?;

        let warnings = outcome_warnings(
            ranking.skipped,
            self.analyzer.is_enabled() && analysis.is_none(),
        );

        let recommendations = ranking
            .entries
            .iter()
            .map(|entry| Recommendation {
                id: entry.agent.id.clone(),
                name: entry.agent.name.clone(),
                score: entry.score,
                explanation: explain(entry.agent, task, &entry.breakdown),
            })
            .collect();

        Ok(RecommendOutcome {
            recommendations,
            analysis,
            skipped_entries: ranking.skipped,
            warnings,
            seed: jitter.map(|j| j.seed()),
        })
    }
}

/// Caller-facing notes about degraded ranking.
///
/// `Catalog` rejects malformed profiles at load time, so `skipped` is only
/// non-zero when the ranked slice bypassed catalog validation.
fn outcome_warnings(skipped: usize, analysis_unavailable: bool) -> Vec<String> {
    let mut warnings = Vec::new();
    if skipped > 0 {
        let message = format!(
            "{} catalog entries could not be scored and were skipped",
            skipped
        );
        tracing::warn!("{}", message);
        warnings.push(message);
    }
    if analysis_unavailable {
        warnings.push(
            "Semantic analysis unavailable; ranked on language and complexity only".to_string(),
        );
    }
    warnings
}
