//! Answer gathering stage.
//!
//! Sends each generated question to the search-augmented Perplexity model
//! and pairs the answer text with the citation URLs the provider returns.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::models::GatheredAnswer;
use crate::perplexity::PerplexityClient;

/// Gathers one answer (with sources) for a question.
#[async_trait]
pub trait AnswerGatherer: Send + Sync {
    async fn gather(&self, question: &str) -> Result<GatheredAnswer>;
}

/// Answer gatherer backed by the Perplexity API.
pub struct PerplexityAnswerGatherer {
    client: PerplexityClient,
}

impl PerplexityAnswerGatherer {
    pub fn new(client: PerplexityClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnswerGatherer for PerplexityAnswerGatherer {
    async fn gather(&self, question: &str) -> Result<GatheredAnswer> {
        let completion = self.client.query(question).await?;
        debug!(
            question,
            sources = completion.citations.len(),
            "gathered answer"
        );
        Ok(GatheredAnswer {
            question: question.to_string(),
            answer: completion.text,
            sources: completion.citations,
        })
    }
}
