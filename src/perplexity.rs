//! Perplexity chat-completions client.
//!
//! Calls `POST https://api.perplexity.ai/chat/completions` with bearer
//! authentication and returns the answer text together with the citation
//! URLs the search-augmented model attaches to its reply.

use std::time::Duration;
use tracing::{debug, warn};

use crate::config::PerplexityConfig;
use crate::error::{FactsError, Result};

const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

/// One completion from Perplexity: the answer text plus source URLs.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub citations: Vec<String>,
}

/// HTTP client for the Perplexity API.
#[derive(Clone)]
pub struct PerplexityClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl PerplexityClient {
    pub fn new(api_key: impl Into<String>, config: &PerplexityConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FactsError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: PERPLEXITY_BASE_URL.to_string(),
            model: config.model.clone(),
        })
    }

    /// Override the base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Send a single-message chat completion and return the answer with
    /// its citations.
    pub async fn query(&self, prompt: &str) -> Result<Completion> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let start = std::time::Instant::now();

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Perplexity request failed");
                FactsError::Network(e.to_string())
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            let text = response.text().await.unwrap_or_default();
            return Err(FactsError::RateLimited(format!("Perplexity: {}", text)));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %text, "Perplexity API error");
            return Err(FactsError::Api(format!("Perplexity {}: {}", status, text)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FactsError::Parse(e.to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Perplexity chat completion"
        );

        parse_completion(&json)
    }
}

/// Extract the answer text and citation URLs from a Perplexity response.
///
/// Citations may be plain URL strings or objects with a `url` field,
/// depending on the model; both forms are normalized to strings.
fn parse_completion(json: &serde_json::Value) -> Result<Completion> {
    let text = json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            FactsError::Parse("Perplexity response missing choices[0].message.content".to_string())
        })?
        .to_string();

    let citations = json
        .get("citations")
        .and_then(|c| c.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|source| match source {
                    serde_json::Value::String(url) => Some(url.clone()),
                    serde_json::Value::Object(obj) => obj
                        .get("url")
                        .and_then(|u| u.as_str())
                        .map(|u| u.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Completion { text, citations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PerplexityConfig;

    #[test]
    fn test_client_builder() {
        let client = PerplexityClient::new("pplx-test", &PerplexityConfig::default())
            .unwrap()
            .with_base_url("https://proxy.example.com");

        assert_eq!(client.api_key, "pplx-test");
        assert_eq!(client.base_url, "https://proxy.example.com");
        assert_eq!(client.model, "sonar");
    }

    #[test]
    fn test_parse_completion_string_citations() {
        let json = serde_json::json!({
            "choices": [{ "message": { "content": "Dogs are domesticated wolves." } }],
            "citations": ["https://example.com/a", "https://example.com/b"],
        });

        let completion = parse_completion(&json).unwrap();
        assert_eq!(completion.text, "Dogs are domesticated wolves.");
        assert_eq!(
            completion.citations,
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_parse_completion_object_citations() {
        let json = serde_json::json!({
            "choices": [{ "message": { "content": "answer" } }],
            "citations": [
                { "url": "https://example.com/c", "title": "C" },
                { "title": "no url, skipped" },
            ],
        });

        let completion = parse_completion(&json).unwrap();
        assert_eq!(completion.citations, vec!["https://example.com/c"]);
    }

    #[test]
    fn test_parse_completion_missing_content() {
        let json = serde_json::json!({ "choices": [] });
        let err = parse_completion(&json).unwrap_err();
        assert!(matches!(err, FactsError::Parse(_)));
    }

    #[test]
    fn test_parse_completion_no_citations_field() {
        let json = serde_json::json!({
            "choices": [{ "message": { "content": "answer" } }],
        });

        let completion = parse_completion(&json).unwrap();
        assert!(completion.citations.is_empty());
    }
}
