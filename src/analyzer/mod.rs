//! Semantic task analysis.
//!
//! The analyzer is an external, probabilistic collaborator: it classifies the
//! task and names the features that matter. Every failure mode collapses to
//! `None` at this boundary, so scoring only ever sees a well-formed
//! [`SemanticAnalysis`] or nothing.

mod llm;

pub use llm::LlmAnalyzer;
pub(crate) use llm::EXAMPLE_TASK_TYPES;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

use crate::recommend::{Complexity, TaskRequest};
use crate::util::sanitize_phrases;

/// Structured interpretation of a task.
///
/// A missing or `null` field reads as empty; the other fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticAnalysis {
    #[serde(default, alias = "taskType", deserialize_with = "null_as_default")]
    pub task_type: String,
    #[serde(
        default,
        alias = "recommendedFeatures",
        deserialize_with = "null_as_default"
    )]
    pub recommended_features: Vec<String>,
    #[serde(default, alias = "requiredSkills", deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SemanticAnalysis {
    /// True when the analysis carries no usable signal.
    pub fn is_empty(&self) -> bool {
        self.task_type.trim().is_empty()
            && self.recommended_features.is_empty()
            && self.required_skills.is_empty()
    }

    fn sanitized(self) -> Self {
        Self {
            task_type: self.task_type.trim().to_string(),
            recommended_features: sanitize_phrases(self.recommended_features),
            required_skills: sanitize_phrases(self.required_skills),
        }
    }
}

/// Source of semantic analyses.
///
/// Implementations must swallow their own failures and return `None`.
#[async_trait]
pub trait SemanticAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        description: &str,
        language: Option<&str>,
        complexity: Complexity,
    ) -> Option<SemanticAnalysis>;

    /// Whether calls can ever produce an analysis.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Analyzer used when no reasoning service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAnalyzer;

#[async_trait]
impl SemanticAnalyzer for DisabledAnalyzer {
    async fn analyze(
        &self,
        _description: &str,
        _language: Option<&str>,
        _complexity: Complexity,
    ) -> Option<SemanticAnalysis> {
        None
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Run the analyzer for `task`, giving up after `timeout`.
///
/// Dropping the returned future cancels the in-flight analyzer call.
pub async fn analyze_with_timeout(
    analyzer: &dyn SemanticAnalyzer,
    task: &TaskRequest,
    timeout: Duration,
) -> Option<SemanticAnalysis> {
    if !analyzer.is_enabled() {
        return None;
    }

    let call = analyzer.analyze(&task.description, task.language(), task.complexity);
    match tokio::time::timeout(timeout, call).await {
        Ok(Some(analysis)) => Some(analysis),
        Ok(None) => {
            tracing::debug!("Semantic analysis unavailable; using heuristic scoring only");
            None
        }
        Err(_) => {
            tracing::warn!(
                "Semantic analysis timed out after {:?}; using heuristic scoring only",
                timeout
            );
            None
        }
    }
}

fn json_object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid"))
}

/// Extract an analysis from free-form model output.
///
/// Takes the span from the first `{` to the last `}`; prose or code fences
/// around it are ignored. Returns `None` when there is no such span, when it is
/// not a JSON object of the expected shape, or when it carries no signal.
pub fn parse_analysis(text: &str) -> Option<SemanticAnalysis> {
    let candidate = json_object_pattern().find(text)?.as_str();
    let analysis: SemanticAnalysis = match serde_json::from_str(candidate) {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::debug!("Discarding malformed analysis payload: {}", e);
            return None;
        }
    };

    let analysis = analysis.sanitized();
    if analysis.is_empty() {
        return None;
    }
    Some(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAnalyzer(Option<SemanticAnalysis>);

    #[async_trait]
    impl SemanticAnalyzer for FixedAnalyzer {
        async fn analyze(
            &self,
            _description: &str,
            _language: Option<&str>,
            _complexity: Complexity,
        ) -> Option<SemanticAnalysis> {
            self.0.clone()
        }
    }

    struct HangingAnalyzer;

    #[async_trait]
    impl SemanticAnalyzer for HangingAnalyzer {
        async fn analyze(
            &self,
            _description: &str,
            _language: Option<&str>,
            _complexity: Complexity,
        ) -> Option<SemanticAnalysis> {
            std::future::pending::<()>().await;
            None
        }
    }

    fn debugging_analysis() -> SemanticAnalysis {
        SemanticAnalysis {
            task_type: "debugging".to_string(),
            recommended_features: vec!["testing support".to_string()],
            required_skills: vec![],
        }
    }

    #[test]
    fn parse_tolerates_surrounding_text() {
        let text = "Sure! Here is the analysis:\n```json\n{\n  \"required_skills\": [\"python\"],\n  \"task_type\": \"debugging\",\n  \"recommended_features\": [\"testing support\", \" \"]\n}\n```\nHope this helps.";
        let analysis = parse_analysis(text).unwrap();
        assert_eq!(analysis.task_type, "debugging");
        assert_eq!(analysis.recommended_features, vec!["testing support"]);
        assert_eq!(analysis.required_skills, vec!["python"]);
    }

    #[test]
    fn parse_accepts_camel_case_fields() {
        let analysis =
            parse_analysis(r#"{"taskType": "web_development", "recommendedFeatures": ["IDE integration"]}"#)
                .unwrap();
        assert_eq!(analysis.task_type, "web_development");
        assert_eq!(analysis.recommended_features, vec!["IDE integration"]);
    }

    #[test]
    fn null_field_keeps_the_rest_of_the_payload() {
        let analysis = parse_analysis(
            r#"{"task_type": null, "recommended_features": ["testing support"], "required_skills": null}"#,
        )
        .unwrap();
        assert_eq!(analysis.task_type, "");
        assert_eq!(analysis.recommended_features, vec!["testing support"]);
        assert!(analysis.required_skills.is_empty());

        let analysis =
            parse_analysis(r#"{"task_type": "debugging", "recommended_features": null}"#).unwrap();
        assert_eq!(analysis.task_type, "debugging");
        assert!(analysis.recommended_features.is_empty());

        assert_eq!(parse_analysis(r#"{"task_type": null}"#), None);
    }

    #[test]
    fn parse_rejects_missing_or_malformed_payload() {
        assert_eq!(parse_analysis("I cannot help with that."), None);
        assert_eq!(parse_analysis("{not json at all}"), None);
        assert_eq!(parse_analysis(r#"{"task_type": 42}"#), None);
        assert_eq!(parse_analysis("{}"), None);
        assert_eq!(parse_analysis(r#"{"task_type": "  ", "recommended_features": []}"#), None);
    }

    #[tokio::test]
    async fn timeout_degrades_to_none() {
        let task = TaskRequest::new("fix a bug");
        let result =
            analyze_with_timeout(&HangingAnalyzer, &task, Duration::from_millis(20)).await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn passes_through_successful_analysis() {
        let analyzer = FixedAnalyzer(Some(debugging_analysis()));
        let task = TaskRequest::new("fix a bug");
        let result = analyze_with_timeout(&analyzer, &task, Duration::from_secs(1)).await;
        assert_eq!(result, Some(debugging_analysis()));
    }

    #[test]
    fn disabled_analyzer_is_never_called() {
        let task = TaskRequest::new("fix a bug");
        let result = tokio_test::block_on(analyze_with_timeout(
            &DisabledAnalyzer,
            &task,
            Duration::from_secs(1),
        ));
        assert_eq!(result, None);
        assert!(!DisabledAnalyzer.is_enabled());
    }
}
