//! LLM-backed semantic analyzer.

use async_trait::async_trait;
use std::sync::Arc;

use super::{parse_analysis, SemanticAnalysis, SemanticAnalyzer};
use crate::llm::{ChatMessage, ChatOptions, ChatResponse, LlmClient, LlmError};
use crate::recommend::Complexity;

/// Task types the prompt offers the model as examples. Catalog `best_for`
/// labels use the same snake_case vocabulary.
pub(crate) const EXAMPLE_TASK_TYPES: &[&str] =
    &["web_development", "data_analysis", "learning", "debugging"];

/// Asks a chat model to classify the task and list the features it needs.
pub struct LlmAnalyzer {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl LlmAnalyzer {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Prompt asking for a single JSON object.
    fn build_prompt(description: &str, language: Option<&str>, complexity: Complexity) -> String {
        format!(
            r#"Analyze the following coding task and determine the most suitable type of AI coding assistant.

Task: {}
Language: {}
Complexity: {}

Consider the following aspects of the task:
1. Required technical skills and programming languages
2. Complexity level and scope
3. Whether it's a new project, debugging, refactoring, or learning
4. Need for IDE integration, collaboration features, or cloud capabilities

Return a JSON object with the following structure:
{{
    "required_skills": ["list", "of", "relevant", "skills"],
    "task_type": "e.g., {}, etc.",
    "recommended_features": ["list", "of", "important", "features"]
}}"#,
            description,
            language.unwrap_or("Not specified"),
            complexity,
            EXAMPLE_TASK_TYPES.join(", ")
        )
    }
}

#[async_trait]
impl SemanticAnalyzer for LlmAnalyzer {
    async fn analyze(
        &self,
        description: &str,
        language: Option<&str>,
        complexity: Complexity,
    ) -> Option<SemanticAnalysis> {
        let messages = vec![
            ChatMessage::system("You are a precise coding task analyzer. Respond only with JSON."),
            ChatMessage::user(Self::build_prompt(description, language, complexity)),
        ];
        let options = ChatOptions {
            temperature: Some(0.0),
            max_tokens: Some(512),
        };

        let response = match self
            .client
            .chat_completion_with_options(&self.model, &messages, options)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                match e.downcast_ref::<LlmError>() {
                    Some(llm_error) => tracing::warn!(
                        "Error analyzing task with {} ({}): {}",
                        self.model,
                        llm_error.kind,
                        llm_error.message
                    ),
                    None => tracing::warn!("Error analyzing task with {}: {}", self.model, e),
                }
                return None;
            }
        };

        log_response_metadata(&self.model, &response);
        let content = response.content.unwrap_or_default();
        let analysis = parse_analysis(&content);
        match &analysis {
            Some(a) => tracing::debug!(
                "Task analysis: type='{}', {} features, {} skills",
                a.task_type,
                a.recommended_features.len(),
                a.required_skills.len()
            ),
            None => tracing::warn!(
                "Analyzer response from {} had no usable JSON payload",
                self.model
            ),
        }
        analysis
    }
}

fn log_response_metadata(requested_model: &str, response: &ChatResponse) {
    let model = response.model.as_deref().unwrap_or(requested_model);
    match &response.usage {
        Some(usage) => tracing::debug!(
            "Analyzer reply from {}: finish_reason={:?}, tokens={} ({} prompt + {} completion)",
            model,
            response.finish_reason,
            usage.total_tokens,
            usage.prompt_tokens,
            usage.completion_tokens
        ),
        None => tracing::debug!(
            "Analyzer reply from {}: finish_reason={:?}",
            model,
            response.finish_reason
        ),
    }
    if response.finish_reason.as_deref() == Some("length") {
        tracing::warn!(
            "Analyzer reply from {} was cut off at the token limit; the JSON payload may be incomplete",
            model
        );
    }
}
