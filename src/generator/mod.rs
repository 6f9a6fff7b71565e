//! Remote idea generator.
//!
//! Turns a topic and optional style into exactly three scored ideas with a
//! single call to the completion service. The transport only moves bytes;
//! status handling, envelope parsing and schema validation all live here so
//! they behave the same for every backend.

pub mod gemini;
pub mod prompt;
pub mod response;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::GenerateError;
use crate::types::{Idea, HYPE_SCORE_MAX, HYPE_SCORE_MIN};

pub use gemini::GeminiTransport;
pub use prompt::GenerateContentRequest;

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Formal contract for the completion backend.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Sends one request. Errors only for failures below HTTP; any status
    /// code, including errors, comes back as a [`RawResponse`].
    async fn send(&self, request: &GenerateContentRequest) -> Result<RawResponse, GenerateError>;
}

/// Rejects empty and whitespace-only topics, returning the trimmed topic.
pub fn validate_topic(topic: &str) -> Result<&str, GenerateError> {
    let topic = topic.trim();
    if topic.is_empty() {
        Err(GenerateError::Validation)
    } else {
        Ok(topic)
    }
}

pub struct IdeaGenerator {
    transport: Arc<dyn CompletionTransport>,
    rng: Mutex<StdRng>,
}

impl IdeaGenerator {
    pub fn new(transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            transport,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic hype scores for a given seed.
    pub fn with_seed(transport: Arc<dyn CompletionTransport>, seed: u64) -> Self {
        Self {
            transport,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate exactly three ideas. One attempt, no retries.
    #[instrument(skip(self))]
    pub async fn generate(
        &self,
        topic: &str,
        style: Option<&str>,
    ) -> Result<Vec<Idea>, GenerateError> {
        let topic = validate_topic(topic)?;
        let request = prompt::build_request(topic, style);

        let response = self.transport.send(&request).await?;
        if !response.is_success() {
            warn!("Generation service answered HTTP {}", response.status);
            return Err(GenerateError::RemoteService {
                status: response.status,
            });
        }

        let drafts = response::extract_payload(&response.body)
            .and_then(|payload| response::parse_ideas(&payload))
            .inspect_err(|e| {
                if let GenerateError::MalformedResponse { detail } = e {
                    warn!("Rejected model output: {}", detail);
                }
            })?;

        let mut rng = self.rng.lock().await;
        let ideas: Vec<Idea> = drafts
            .into_iter()
            .map(|draft| {
                let score = rng.gen_range(HYPE_SCORE_MIN..=HYPE_SCORE_MAX);
                debug!("Assigned hype score {} to {}", score, draft.coin_name);
                draft.with_hype_score(score)
            })
            .collect();

        info!("Generated {} ideas for topic '{}'", ideas.len(), topic);
        Ok(ideas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_topic() {
        assert!(matches!(validate_topic(""), Err(GenerateError::Validation)));
        assert!(matches!(validate_topic(" \t\n"), Err(GenerateError::Validation)));
        assert_eq!(validate_topic("  Space Cats ").unwrap(), "Space Cats");
    }

    #[test]
    fn test_raw_response_success_range() {
        let ok = RawResponse { status: 200, body: String::new() };
        let no_content = RawResponse { status: 204, body: String::new() };
        let redirect = RawResponse { status: 302, body: String::new() };
        assert!(ok.is_success());
        assert!(no_content.is_success());
        assert!(!redirect.is_success());
    }
}
