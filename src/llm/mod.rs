//! LLM completion integration for suggestion generation

pub mod openai;

pub use openai::OpenAiCompletion;

use crate::error::{DomainScoutError, Result};
use async_trait::async_trait;
use regex::Regex;

/// Core trait for completion providers
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run the suggestion prompt for a niche and return the raw completion text
    async fn complete(&self, niche: &str) -> Result<String>;

    /// Get provider name
    fn name(&self) -> &'static str;

    /// Check if provider is configured and ready
    fn is_ready(&self) -> bool;
}

/// Build the suggestion prompt for a niche.
///
/// The niche is embedded verbatim; the prompt asks for a short,
/// non-repeating list of names, one per line.
pub fn build_suggestion_prompt(niche: &str, count: usize) -> String {
    format!(
        "Generate short and relevant domain names for a website related to {niche}. \
Only output {count} names, focus on names that convey {niche} themes or concepts. \
Only output domain names and nothing else, one per line, \
and make sure you don't repeat any result.",
        niche = niche,
        count = count,
    )
}

/// Parse completion text into an ordered suggestion list.
///
/// Splits on line breaks, strips a leading numeric enumeration marker
/// ("1. ", "12.", ...), trims whitespace, and discards empty lines.
/// Provider output order is preserved; it reflects model ranking.
pub fn parse_suggestion_lines(content: &str) -> Result<Vec<String>> {
    let enumeration = Regex::new(r"^\d+\.\s*")
        .map_err(|e| DomainScoutError::internal(e.to_string()))?;

    let suggestions = content
        .lines()
        .map(|line| enumeration.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    Ok(suggestions)
}
