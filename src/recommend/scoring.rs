//! Per-agent scoring.
//!
//! Every rule is additive and non-negative, so more evidence can only raise a
//! score. All string comparisons are case-insensitive.

use crate::analyzer::SemanticAnalysis;
use crate::catalog::AgentProfile;
use crate::util::round2;

use super::types::{ScoreBreakdown, TaskRequest};

pub const LANGUAGE_MATCH_POINTS: f64 = 3.0;
pub const COMPLEXITY_POINTS: f64 = 2.0;
pub const FEATURE_MATCH_POINTS: f64 = 1.5;
pub const TASK_TYPE_MATCH_POINTS: f64 = 2.0;

/// An agent's score together with the evidence behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAgent {
    /// Rounded to two decimals
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Score one agent for one task.
///
/// Pure: the same inputs always give the same result.
pub fn score(
    task: &TaskRequest,
    agent: &AgentProfile,
    analysis: Option<&SemanticAnalysis>,
) -> ScoredAgent {
    let language_match = task
        .language()
        .map(|language| agent.supports_language(language))
        .unwrap_or(false);

    let complexity_bonus = COMPLEXITY_POINTS * task.complexity.weight();

    let (feature_matches, matched_task_type) = match analysis {
        Some(analysis) => (
            matching_features(agent, analysis),
            matching_task_type(agent, analysis),
        ),
        None => (Vec::new(), None),
    };

    let breakdown = ScoreBreakdown {
        language_match,
        complexity_bonus,
        feature_matches,
        task_type_match: matched_task_type.is_some(),
        matched_task_type,
        jitter: 0.0,
        tie_break_key: agent.id.clone(),
    };

    ScoredAgent {
        score: total(&breakdown),
        breakdown,
    }
}

/// Sum of the breakdown's contributions, rounded to two decimals.
pub fn total(breakdown: &ScoreBreakdown) -> f64 {
    let mut sum = breakdown.complexity_bonus;
    if breakdown.language_match {
        sum += LANGUAGE_MATCH_POINTS;
    }
    sum += FEATURE_MATCH_POINTS * breakdown.feature_matches.len() as f64;
    if breakdown.task_type_match {
        sum += TASK_TYPE_MATCH_POINTS;
    }
    sum += breakdown.jitter;
    round2(sum)
}

/// Recommended features with at least one word contained in one of the agent's
/// strengths. Each phrase counts once no matter how many of its words match.
fn matching_features(agent: &AgentProfile, analysis: &SemanticAnalysis) -> Vec<String> {
    let strengths: Vec<String> = agent.strengths.iter().map(|s| s.to_lowercase()).collect();

    analysis
        .recommended_features
        .iter()
        .filter(|phrase| {
            let phrase = phrase.to_lowercase();
            phrase
                .split_whitespace()
                .any(|word| strengths.iter().any(|s| s.contains(word)))
        })
        .cloned()
        .collect()
}

/// The analysis task type, if any of the agent's best-for labels occurs in it.
fn matching_task_type(agent: &AgentProfile, analysis: &SemanticAnalysis) -> Option<String> {
    let task_type = analysis.task_type.trim();
    if task_type.is_empty() {
        return None;
    }
    let lowered = task_type.to_lowercase();

    agent
        .best_for
        .iter()
        .map(|label| label.trim().to_lowercase())
        .any(|label| !label.is_empty() && lowered.contains(&label))
        .then(|| task_type.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::Complexity;

    fn agent_a() -> AgentProfile {
        AgentProfile::new("A", "Agent A")
            .with_languages(["Python"])
            .with_strengths(["testing"])
            .with_best_for(["debugging"])
    }

    fn agent_b() -> AgentProfile {
        AgentProfile::new("B", "Agent B")
            .with_languages(["Go"])
            .with_strengths(["concurrency"])
            .with_best_for(["backend"])
    }

    fn bug_fix() -> TaskRequest {
        TaskRequest::new("fix a bug")
            .with_language("Python")
            .with_complexity(Complexity::High)
    }

    fn debugging_analysis() -> SemanticAnalysis {
        SemanticAnalysis {
            task_type: "debugging".to_string(),
            recommended_features: vec!["testing support".to_string()],
            required_skills: vec![],
        }
    }

    #[test]
    fn heuristic_only_scores() {
        let a = score(&bug_fix(), &agent_a(), None);
        let b = score(&bug_fix(), &agent_b(), None);
        assert_eq!(a.score, 6.0);
        assert_eq!(b.score, 3.0);
        assert!(a.breakdown.language_match);
        assert!(!b.breakdown.language_match);
        assert!(a.breakdown.feature_matches.is_empty());
        assert!(!a.breakdown.task_type_match);
    }

    #[test]
    fn analysis_adds_feature_and_task_type_points() {
        let analysis = debugging_analysis();
        let a = score(&bug_fix(), &agent_a(), Some(&analysis));
        assert_eq!(a.score, 9.5);
        assert_eq!(a.breakdown.feature_matches, vec!["testing support"]);
        assert_eq!(a.breakdown.matched_task_type.as_deref(), Some("debugging"));

        let b = score(&bug_fix(), &agent_b(), Some(&analysis));
        assert_eq!(b.score, 3.0);
    }

    #[test]
    fn complexity_weights() {
        let agent = agent_b();
        let low = TaskRequest::new("x").with_complexity(Complexity::Low);
        let medium = TaskRequest::new("x");
        let high = TaskRequest::new("x").with_complexity(Complexity::High);
        assert_eq!(score(&low, &agent, None).score, 1.0);
        assert_eq!(score(&medium, &agent, None).score, 2.0);
        assert_eq!(score(&high, &agent, None).score, 3.0);
    }

    #[test]
    fn matching_language_adds_exactly_three() {
        let agent = agent_a();
        let without = TaskRequest::new("x");
        let with = TaskRequest::new("x").with_language("PYTHON");
        let delta = score(&with, &agent, None).score - score(&without, &agent, None).score;
        assert_eq!(delta, LANGUAGE_MATCH_POINTS);
    }

    #[test]
    fn blank_language_never_matches() {
        let agent = AgentProfile::new("e", "Empty").with_languages([""]);
        let task = TaskRequest::new("x").with_language("");
        assert!(!score(&task, &agent, None).breakdown.language_match);
    }

    #[test]
    fn feature_phrase_counts_once() {
        let agent = agent_a().with_strengths(["testing", "test automation"]);
        let analysis = SemanticAnalysis {
            task_type: String::new(),
            recommended_features: vec![
                "testing test automation".to_string(),
                "Automation".to_string(),
                "deployment".to_string(),
            ],
            required_skills: vec![],
        };
        let scored = score(&TaskRequest::new("x"), &agent, Some(&analysis));
        assert_eq!(
            scored.breakdown.feature_matches,
            vec!["testing test automation", "Automation"]
        );
        assert_eq!(scored.score, 2.0 + 2.0 * FEATURE_MATCH_POINTS);
    }

    #[test]
    fn task_type_match_is_substring_of_task_type() {
        let agent = agent_b().with_best_for(["web", ""]);
        let analysis = SemanticAnalysis {
            task_type: "Web_Development".to_string(),
            ..Default::default()
        };
        let scored = score(&TaskRequest::new("x"), &agent, Some(&analysis));
        assert!(scored.breakdown.task_type_match);

        let analysis = SemanticAnalysis {
            task_type: "data_analysis".to_string(),
            ..Default::default()
        };
        let scored = score(&TaskRequest::new("x"), &agent, Some(&analysis));
        assert!(!scored.breakdown.task_type_match);
    }

    #[test]
    fn scoring_is_idempotent() {
        let analysis = debugging_analysis();
        let first = score(&bug_fix(), &agent_a(), Some(&analysis));
        let second = score(&bug_fix(), &agent_a(), Some(&analysis));
        assert_eq!(first, second);
    }

    #[test]
    fn more_evidence_never_lowers_score() {
        let analysis = debugging_analysis();
        for agent in [agent_a(), agent_b()] {
            let without = score(&bug_fix(), &agent, None).score;
            let with = score(&bug_fix(), &agent, Some(&analysis)).score;
            assert!(with >= without);
        }
    }
}
