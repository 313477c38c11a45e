//! Single-attempt generation with a static fallback.

use std::sync::Arc;

use crate::models::InsightResult;

use super::sanitize::clean_response;

pub const MAX_TOKENS: u32 = 500;
pub const TEMPERATURE: f32 = 0.7;

pub const SHOW_FALLBACK: &str =
    "This is a great show with good stories and characters that many people love to watch.";
pub const EPISODE_FALLBACK: &str =
    "This episode has a good story and interesting characters that fans will enjoy.";

/// Failures of one backend call. Never leaves the [`GenerationClient`].
#[derive(thiserror::Error, Debug)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response had no content")]
    EmptyContent,
}

/// A text-completion backend
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Issues one completion request and returns the raw generated text
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerationError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Picks the static fallback by subject kind
pub fn fallback_insight(prompt: &str) -> &'static str {
    if prompt.to_lowercase().contains("episode") {
        EPISODE_FALLBACK
    } else {
        SHOW_FALLBACK
    }
}

/// Wraps the generative backend and absorbs every failure of a call.
///
/// Without a backend (no credential configured) every prompt gets the static
/// fallback.
#[derive(Clone, Default)]
pub struct GenerationClient {
    backend: Option<Arc<dyn GenerativeBackend>>,
}

impl GenerationClient {
    pub fn new(backend: Option<Arc<dyn GenerativeBackend>>) -> Self {
        Self { backend }
    }

    /// Client with no backend; always answers with the fallback sentence
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn generate(&self, prompt: &str) -> InsightResult {
        let Some(backend) = &self.backend else {
            tracing::debug!("No generative backend configured, using fallback insight");
            return InsightResult::fallback(fallback_insight(prompt));
        };

        let raw = match backend.complete(prompt, MAX_TOKENS, TEMPERATURE).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    backend = backend.name(),
                    "Insight generation failed, using fallback insight"
                );
                return InsightResult::fallback(fallback_insight(prompt));
            }
        };

        match clean_response(Some(&raw)) {
            Some(text) if !text.is_empty() => {
                tracing::info!(
                    backend = backend.name(),
                    chars = text.chars().count(),
                    "Insight generated"
                );
                InsightResult::generated(text)
            }
            _ => {
                tracing::warn!(
                    backend = backend.name(),
                    raw_chars = raw.chars().count(),
                    "Generated text was empty after cleaning, using fallback insight"
                );
                InsightResult::fallback(fallback_insight(prompt))
            }
        }
    }
}
