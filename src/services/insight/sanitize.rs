//! Post-processing of raw generated text.

use regex::Regex;
use std::sync::LazyLock;

/// Closing delimiter some reasoning models put after their private deliberation
pub const REASONING_CLOSE_TAG: &str = "</think>";

/// A leading "...insight...:" preamble. A quoted title ending right before a
/// colon takes priority, so `about 'Parasyte: The Grey':` is consumed whole;
/// otherwise the preamble ends at the first colon after the word.
static INSIGHT_PREAMBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^.*?\binsight\b(?:.*?'[^']*'|[^:\n]*):\s*")
        .expect("preamble pattern is valid")
});

/// Drops everything up to and including the last reasoning close tag
pub fn strip_reasoning_trace(text: &str) -> &str {
    match text.rsplit_once(REASONING_CLOSE_TAG) {
        Some((_, answer)) => answer.trim(),
        None => text,
    }
}

/// Cleans raw model output into presentable insight text.
///
/// `None` stays `None`. Preambles are stripped until none is left, which keeps
/// the function idempotent; each pass only removes through the first
/// qualifying colon.
pub fn clean_response(raw: Option<&str>) -> Option<String> {
    let mut text = strip_reasoning_trace(raw?).trim();

    while let Some(preamble) = INSIGHT_PREAMBLE.find(text) {
        text = text[preamble.end()..].trim();
    }

    Some(text.to_string())
}
