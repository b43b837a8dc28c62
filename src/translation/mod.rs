/// Translation entries, the remote fetch collaborator, and the memoizing cache.
pub mod cache;
pub mod deepseek;
pub mod mock;
mod seed;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cache::TranslationCache;

/// Errors returned by a [`TranslationFetcher`].
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("no response from API")]
    EmptyResponse,
}

/// Remote translation collaborator.
///
/// Returns the provider's raw reply text; turning it into a
/// [`TranslationEntry`] (including the degraded fallback) is the cache's job.
pub trait TranslationFetcher: Send + Sync {
    fn fetch<'a>(&'a self, word: &'a str) -> BoxFuture<'a, Result<String, FetchError>>;
}

/// A cached translation.
///
/// `terminal == false` marks the placeholder shown while a fetch is in
/// flight; it is never stored past the fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub meaning: String,
    pub examples: String,
    pub grammar: String,
    pub level: String,
    pub terminal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Structured shape the provider is asked to answer with.
#[derive(Deserialize)]
struct ReplyFields {
    meaning: Option<String>,
    examples: Option<String>,
    grammar: Option<String>,
    level: Option<String>,
}

impl TranslationEntry {
    /// Terminal success entry.
    pub fn new(meaning: &str, examples: &str, grammar: &str, level: &str) -> Self {
        Self {
            meaning: meaning.to_string(),
            examples: examples.to_string(),
            grammar: grammar.to_string(),
            level: level.to_string(),
            terminal: true,
            error: None,
        }
    }

    /// In-flight placeholder.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            terminal: false,
            ..Self::new("Loading...", "Please wait...", "Loading...", "Loading...")
        }
    }

    /// Terminal error entry, cached like any other result.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new(
                "Translation Error",
                "Unable to get translation",
                "Error",
                "Error",
            )
        }
    }

    /// Build a terminal entry from provider reply text.
    ///
    /// Replies that are not the expected JSON object degrade to an entry
    /// carrying the raw text as the meaning.
    #[must_use]
    pub fn from_reply(reply: &str) -> Self {
        match serde_json::from_str::<ReplyFields>(strip_code_fence(reply)) {
            Ok(fields) => Self {
                meaning: fields
                    .meaning
                    .unwrap_or_else(|| "Translation not available".to_string()),
                examples: fields
                    .examples
                    .unwrap_or_else(|| "Examples not available".to_string()),
                grammar: fields
                    .grammar
                    .unwrap_or_else(|| "Grammar info not available".to_string()),
                level: fields
                    .level
                    .unwrap_or_else(|| "Level not available".to_string()),
                terminal: true,
                error: None,
            },
            Err(e) => {
                tracing::debug!("Provider reply is not structured ({e}), using raw text");
                Self::new(
                    reply,
                    "See translation above",
                    "Information available in translation",
                    "See translation above",
                )
            }
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Strip a surrounding Markdown code fence (```json ... ```), if present.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    // Drop the info string ("json") on the opening line.
    match body.split_once('\n') {
        Some((info, rest)) if !info.contains('{') => rest.trim(),
        _ => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reply_structured() {
        let reply = r#"{"meaning": "Cat", "examples": "Кот спит.", "grammar": "Noun (masculine)", "level": "A1"}"#;
        let entry = TranslationEntry::from_reply(reply);
        assert_eq!(entry.meaning, "Cat");
        assert_eq!(entry.level, "A1");
        assert!(entry.terminal);
        assert!(!entry.is_error());
    }

    #[test]
    fn test_from_reply_missing_fields() {
        let entry = TranslationEntry::from_reply(r#"{"meaning": "Cat"}"#);
        assert_eq!(entry.meaning, "Cat");
        assert_eq!(entry.examples, "Examples not available");
        assert_eq!(entry.grammar, "Grammar info not available");
        assert_eq!(entry.level, "Level not available");
    }

    #[test]
    fn test_from_reply_code_fence() {
        let reply = "```json\n{\"meaning\": \"Dog\", \"level\": \"A1\"}\n```";
        let entry = TranslationEntry::from_reply(reply);
        assert_eq!(entry.meaning, "Dog");
    }

    #[test]
    fn test_from_reply_degrades_to_raw_text() {
        let entry = TranslationEntry::from_reply("It means 'cat'.");
        assert_eq!(entry.meaning, "It means 'cat'.");
        assert_eq!(entry.examples, "See translation above");
        assert!(entry.terminal, "parse failure is still terminal");
        assert!(!entry.is_error(), "parse failure is not an error");
    }

    #[test]
    fn test_pending_and_failed() {
        let pending = TranslationEntry::pending();
        assert!(!pending.terminal);
        assert_eq!(pending.meaning, "Loading...");

        let failed = TranslationEntry::failed("API Error: 500");
        assert!(failed.terminal);
        assert_eq!(failed.error.as_deref(), Some("API Error: 500"));
        assert_eq!(failed.meaning, "Translation Error");
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - unauthorized");
        assert_eq!(
            FetchError::MissingApiKey("DEEPSEEK_API_KEY".to_string()).to_string(),
            "API key not set (expected in $DEEPSEEK_API_KEY)"
        );
    }
}
