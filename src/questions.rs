//! Question generation stage.
//!
//! Asks Gemini for a list of clarifying questions about a topic, requested
//! in a small JSON envelope so the reply can be parsed deterministically.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FactsError, Result};
use crate::gemini::GeminiClient;

/// Produces the ordered list of questions to research for a topic.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<Vec<String>>;
}

/// Question generator backed by the Gemini API.
pub struct GeminiQuestionGenerator {
    client: GeminiClient,
    question_count: usize,
}

impl GeminiQuestionGenerator {
    pub fn new(client: GeminiClient, question_count: usize) -> Self {
        Self {
            client,
            question_count,
        }
    }
}

#[async_trait]
impl QuestionGenerator for GeminiQuestionGenerator {
    async fn generate(&self, topic: &str) -> Result<Vec<String>> {
        let prompt = format!(
            "Generate {count} questions one might ask about the topic: \"{topic}\" \
             when learning about it or preparing for a debate. Output the questions \
             in this json format: {{ \"questions\": [ \"question1\", \"question2\", ... ] }}",
            count = self.question_count,
        );

        let raw = self.client.generate(&prompt).await?;
        let questions = parse_question_list(&raw)?;
        debug!(topic, count = questions.len(), "generated questions");
        Ok(questions)
    }
}

#[derive(Deserialize)]
struct QuestionList {
    questions: Vec<String>,
}

/// Parse a model reply into an ordered question list.
///
/// The model frequently wraps its JSON in markdown code fences; those are
/// stripped before parsing. Empty output is an error — the documented
/// remediation is to try a simpler topic.
pub fn parse_question_list(raw: &str) -> Result<Vec<String>> {
    let cleaned = strip_code_fences(raw);

    let list: QuestionList = serde_json::from_str(cleaned)
        .map_err(|e| FactsError::Parse(format!("Invalid question list: {}", e)))?;

    let questions: Vec<String> = list
        .questions
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();

    if questions.is_empty() {
        return Err(FactsError::Parse(
            "Model returned no questions".to_string(),
        ));
    }

    Ok(questions)
}

/// Strip a surrounding markdown code fence (with or without a `json`
/// language tag) from a model reply.
fn strip_code_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```") {
        // Drop the fence line, including any language tag on it.
        s = match rest.split_once('\n') {
            Some((_, body)) => body,
            None => rest,
        };
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let raw = r#"{ "questions": ["What is a dog?", "Where do dogs come from?"] }"#;
        let questions = parse_question_list(raw).unwrap();
        assert_eq!(questions, vec!["What is a dog?", "Where do dogs come from?"]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{ \"questions\": [\"Q1\", \"Q2\"] }\n```";
        let questions = parse_question_list(raw).unwrap();
        assert_eq!(questions, vec!["Q1", "Q2"]);
    }

    #[test]
    fn test_parse_fenced_without_language_tag() {
        let raw = "```\n{ \"questions\": [\"Q1\"] }\n```";
        assert_eq!(parse_question_list(raw).unwrap(), vec!["Q1"]);
    }

    #[test]
    fn test_parse_preserves_order() {
        let raw = r#"{ "questions": ["third", "first", "second"] }"#;
        let questions = parse_question_list(raw).unwrap();
        assert_eq!(questions, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_empty_list_is_error() {
        let raw = r#"{ "questions": [] }"#;
        assert!(matches!(
            parse_question_list(raw).unwrap_err(),
            FactsError::Parse(_)
        ));
    }

    #[test]
    fn test_blank_entries_filtered() {
        let raw = r#"{ "questions": ["  ", "real question"] }"#;
        assert_eq!(parse_question_list(raw).unwrap(), vec!["real question"]);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = parse_question_list("not json at all").unwrap_err();
        assert!(matches!(err, FactsError::Parse(_)));
    }
}
