use serde::{Deserialize, Serialize};

/// Where an insight's text came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InsightOrigin {
    /// Produced by the generative backend
    #[serde(rename = "ai")]
    Generated,
    /// Static templated text
    #[serde(rename = "fallback")]
    Fallback,
}

/// A generated (or fallback) insight about a show or episode.
///
/// `text` is never empty. Produced fresh per request, never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightResult {
    #[serde(rename = "insight")]
    pub text: String,
    #[serde(rename = "source")]
    pub origin: InsightOrigin,
}

impl InsightResult {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: InsightOrigin::Generated,
        }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: InsightOrigin::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == InsightOrigin::Fallback
    }
}
