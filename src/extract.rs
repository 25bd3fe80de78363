//! Fact extraction stage.
//!
//! Feeds each gathered answer back through Gemini with a prompt asking for
//! a JSON array of `{title, content, citation}` objects, then parses the
//! reply into [`Fact`] records.

use async_trait::async_trait;
use tracing::warn;

use crate::error::{FactsError, Result};
use crate::gemini::GeminiClient;
use crate::models::{Fact, GatheredAnswer};

/// Extracts structured facts from one gathered answer.
#[async_trait]
pub trait FactExtractor: Send + Sync {
    async fn extract(&self, answer: &GatheredAnswer) -> Result<Vec<Fact>>;
}

/// Fact extractor backed by the Gemini API.
///
/// Model replies are not always valid JSON on the first try, so the
/// extractor re-asks up to `attempts` times before giving up on an answer.
pub struct GeminiFactExtractor {
    client: GeminiClient,
    attempts: u32,
}

impl GeminiFactExtractor {
    pub fn new(client: GeminiClient, attempts: u32) -> Self {
        Self { client, attempts }
    }

    fn build_prompt(answer: &GatheredAnswer) -> String {
        let sources = if answer.sources.is_empty() {
            "No sources available".to_string()
        } else {
            answer.sources.join("\n")
        };

        format!(
            "You are a fact extractor. Extract as many facts as possible from this \
             answer and its sources.\n\n\
             Question: {question}\n\
             Answer: {answer}\n\
             Sources: {sources}\n\n\
             Return a JSON array of facts exactly like this example, with no other text:\n\
             [\n    {{\n        \"title\": \"Clear Concise Title\",\n        \
             \"content\": \"Detailed fact statement\",\n        \
             \"citation\": \"URL from the provided sources, or an empty string if none\"\n    }}\n]",
            question = answer.question,
            answer = answer.answer,
            sources = sources,
        )
    }
}

#[async_trait]
impl FactExtractor for GeminiFactExtractor {
    async fn extract(&self, answer: &GatheredAnswer) -> Result<Vec<Fact>> {
        let prompt = Self::build_prompt(answer);

        let mut last_err = None;

        for attempt in 1..=self.attempts {
            let raw = self.client.generate(&prompt).await?;
            match parse_fact_array(&raw) {
                Ok(facts) => return Ok(facts),
                Err(e) => {
                    warn!(attempt, error = %e, "could not parse facts from reply");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            FactsError::Parse("Fact extraction produced no output".to_string())
        }))
    }
}

/// Parse a model reply into fact records.
///
/// The reply is trimmed to the outermost `[` .. `]` first, since models
/// like to wrap the array in prose or code fences. An empty array is an
/// error so the caller can distinguish "nothing usable" from success.
pub fn parse_fact_array(raw: &str) -> Result<Vec<Fact>> {
    let trimmed = trim_to_json_array(raw)
        .ok_or_else(|| FactsError::Parse("No JSON array in fact reply".to_string()))?;

    let facts: Vec<Fact> = serde_json::from_str(trimmed)
        .map_err(|e| FactsError::Parse(format!("Invalid JSON format: {}", e)))?;

    if facts.is_empty() {
        return Err(FactsError::Parse("Fact reply was an empty array".to_string()));
    }

    Ok(facts)
}

/// Slice a reply down to the outermost `[` .. `]` pair, if any.
fn trim_to_json_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let raw = r#"[{"title": "T", "content": "C", "citation": "https://example.com"}]"#;
        let facts = parse_fact_array(raw).unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].title, "T");
        assert_eq!(facts[0].citation, "https://example.com");
    }

    #[test]
    fn test_parse_array_wrapped_in_prose() {
        let raw = "Here are the facts:\n```json\n[{\"title\": \"T\", \"content\": \"C\", \"citation\": \"\"}]\n```\nHope that helps!";
        let facts = parse_fact_array(raw).unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].citation, "");
    }

    #[test]
    fn test_parse_missing_citation_defaults_empty() {
        let raw = r#"[{"title": "T", "content": "C"}]"#;
        let facts = parse_fact_array(raw).unwrap();
        assert_eq!(facts[0].citation, "");
    }

    #[test]
    fn test_empty_array_is_error() {
        assert!(matches!(
            parse_fact_array("[]").unwrap_err(),
            FactsError::Parse(_)
        ));
    }

    #[test]
    fn test_no_array_is_error() {
        let err = parse_fact_array("I could not extract any facts.").unwrap_err();
        assert!(matches!(err, FactsError::Parse(_)));
    }

    #[test]
    fn test_prompt_lists_sources() {
        let answer = GatheredAnswer {
            question: "Q".to_string(),
            answer: "A".to_string(),
            sources: vec!["https://a".to_string(), "https://b".to_string()],
        };
        let prompt = GeminiFactExtractor::build_prompt(&answer);
        assert!(prompt.contains("https://a\nhttps://b"));
    }

    #[test]
    fn test_prompt_without_sources() {
        let answer = GatheredAnswer {
            question: "Q".to_string(),
            answer: "A".to_string(),
            sources: vec![],
        };
        let prompt = GeminiFactExtractor::build_prompt(&answer);
        assert!(prompt.contains("No sources available"));
    }
}
