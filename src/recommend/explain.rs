//! Human-readable justification for a recommendation.

use crate::catalog::AgentProfile;

use super::types::{Complexity, ScoreBreakdown, TaskRequest};

/// Most matched features cited in one explanation.
const MAX_CITED_FEATURES: usize = 2;

/// Build the justification sentence for one ranked agent.
///
/// Clauses appear in a fixed order: language support, task-type fit (or the
/// agent's usual specialities), complex-task handling, matched features.
pub fn explain(agent: &AgentProfile, task: &TaskRequest, breakdown: &ScoreBreakdown) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if breakdown.language_match {
        if let Some(language) = task.language() {
            reasons.push(format!("supports {}", language));
        }
    }

    match breakdown.matched_task_type.as_deref() {
        Some(task_type) if breakdown.task_type_match => {
            reasons.push(format!("is ideal for {} tasks", task_type.replace('_', " ")));
        }
        _ => {
            let specialities: Vec<String> = agent
                .best_for
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.replace('_', " "))
                .collect();
            if !specialities.is_empty() {
                reasons.push(format!("excels at {}", specialities.join(", ")));
            }
        }
    }

    if task.complexity == Complexity::High {
        reasons.push("handles complex tasks well".to_string());
    }

    if !breakdown.feature_matches.is_empty() {
        let cited: Vec<&str> = breakdown
            .feature_matches
            .iter()
            .take(MAX_CITED_FEATURES)
            .map(String::as_str)
            .collect();
        reasons.push(format!("offers {}", cited.join(" and ")));
    }

    if reasons.is_empty() {
        reasons.push("is a well-rounded coding assistant".to_string());
    }

    format!("Recommended because it {}.", join_clauses(&reasons))
}

/// "a", "a and b", "a, b, and c".
fn join_clauses(clauses: &[String]) -> String {
    match clauses {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
