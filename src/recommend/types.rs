//! Request and result types shared by scoring, ranking and explanation.

use serde::{Deserialize, Serialize};

/// How demanding the caller says the task is.
///
/// Parsing never fails: unrecognised labels fall back to [`Complexity::Medium`],
/// which carries the neutral weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

impl Complexity {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => Complexity::Low,
            "high" => Complexity::High,
            _ => Complexity::Medium,
        }
    }

    /// Multiplier applied to the complexity bonus.
    pub fn weight(&self) -> f64 {
        match self {
            Complexity::Low => 0.5,
            Complexity::Medium => 1.0,
            Complexity::High => 1.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl From<String> for Complexity {
    fn from(label: String) -> Self {
        Complexity::from_label(&label)
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller's description of work that needs an assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub description: String,
    /// Empty or missing means "unspecified"
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub complexity: Complexity,
}

impl TaskRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            language: None,
            complexity: Complexity::default(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    /// The requested language, or `None` when blank or absent.
    pub fn language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// Itemised contributions behind one agent's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub language_match: bool,
    pub complexity_bonus: f64,
    /// Recommended-feature phrases that matched a strength, in analysis order
    pub feature_matches: Vec<String>,
    pub task_type_match: bool,
    /// The analysis task type, kept when it matched so explanations can cite it
    pub matched_task_type: Option<String>,
    /// Opt-in exploration noise; zero unless jitter is enabled
    pub jitter: f64,
    /// Secondary sort key for equal scores (the agent id)
    pub tie_break_key: String,
}

/// Final, caller-facing recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_parsing_is_lenient() {
        assert_eq!(Complexity::from_label("LOW"), Complexity::Low);
        assert_eq!(Complexity::from_label(" high "), Complexity::High);
        assert_eq!(Complexity::from_label("extreme"), Complexity::Medium);
        assert_eq!(Complexity::from_label(""), Complexity::Medium);
    }

    #[test]
    fn task_request_deserializes_with_defaults() {
        let task: TaskRequest = serde_json::from_str(r#"{"description": "fix a bug"}"#).unwrap();
        assert_eq!(task.complexity, Complexity::Medium);
        assert_eq!(task.language(), None);

        let task: TaskRequest = serde_json::from_str(
            r#"{"description": "x", "language": "  ", "complexity": "Nightmare"}"#,
        )
        .unwrap();
        assert_eq!(task.language(), None);
        assert_eq!(task.complexity, Complexity::Medium);

        let task: TaskRequest = serde_json::from_str(
            r#"{"description": "x", "language": "Rust", "complexity": "HIGH"}"#,
        )
        .unwrap();
        assert_eq!(task.language(), Some("Rust"));
        assert_eq!(task.complexity, Complexity::High);
    }
}
