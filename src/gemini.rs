//! Gemini text-generation client.
//!
//! Calls the `generateContent` endpoint of the Google Generative Language
//! API. Unlike Perplexity, Gemini does not attach source citations to its
//! replies, so this client returns plain text.

use std::time::Duration;
use tracing::{debug, warn};

use crate::config::GeminiConfig;
use crate::error::{FactsError, Result};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the Gemini API.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, config: &GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FactsError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            model: config.model.clone(),
        })
    }

    /// Override the base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Generate text for a single prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let start = std::time::Instant::now();

        let response = self
            .http
            .post(format!(
                "{}/models/{}:generateContent?key={}",
                self.base_url, self.model, self.api_key
            ))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                FactsError::Network(e.to_string())
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            let text = response.text().await.unwrap_or_default();
            return Err(FactsError::RateLimited(format!("Gemini: {}", text)));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %text, "Gemini API error");
            return Err(FactsError::Api(format!("Gemini {}: {}", status, text)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FactsError::Parse(e.to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generation"
        );

        parse_generation(&json)
    }
}

/// Extract the generated text from a Gemini response.
///
/// The reply may be split across multiple `parts`; they are concatenated
/// in order.
fn parse_generation(json: &serde_json::Value) -> Result<String> {
    let parts = json
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| {
            FactsError::Parse("Gemini response missing candidates[0].content.parts".to_string())
        })?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        return Err(FactsError::Parse(
            "Gemini response contained no text parts".to_string(),
        ));
    }

    Ok(text)
}
