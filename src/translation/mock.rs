/// Mock translation fetcher for testing and offline runs.
///
/// Produces a deterministic structured reply per word, optionally after a
/// delay, and records how often each word was fetched.
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::{FetchError, TranslationFetcher};

#[derive(Default)]
pub struct MockFetcher {
    delay: Option<Duration>,
    failing: HashSet<String>,
    replies: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// Delay every reply by `delay` (Tokio time, so paused clocks apply).
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail fetches for `word` with a 500 status.
    #[must_use]
    pub fn failing_on(mut self, word: &str) -> Self {
        self.failing.insert(word.to_lowercase());
        self
    }

    /// Reply to `word` with `reply` verbatim instead of the generated JSON.
    #[must_use]
    pub fn replying(mut self, word: &str, reply: &str) -> Self {
        self.replies.insert(word.to_lowercase(), reply.to_string());
        self
    }

    /// Total number of fetches issued.
    pub fn calls(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    /// Number of fetches issued for `word` (case-insensitive).
    pub fn calls_for(&self, word: &str) -> usize {
        let word = word.to_lowercase();
        self.calls
            .lock()
            .map(|c| c.iter().filter(|w| w.to_lowercase() == word).count())
            .unwrap_or_default()
    }

    fn reply_for(&self, word: &str) -> Result<String, FetchError> {
        let key = word.to_lowercase();
        if self.failing.contains(&key) {
            return Err(FetchError::Status {
                status: 500,
                body: format!("mock failure for {word}"),
            });
        }
        if let Some(reply) = self.replies.get(&key) {
            return Ok(reply.clone());
        }
        Ok(serde_json::json!({
            "meaning": format!("meaning of {key}"),
            "examples": format!("{key} - example"),
            "grammar": "Noun",
            "level": "A2",
        })
        .to_string())
    }
}

impl TranslationFetcher for MockFetcher {
    fn fetch<'a>(&'a self, word: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(word.to_string());
        }

        async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply_for(word)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::TranslationEntry;

    #[tokio::test]
    async fn test_mock_reply_is_structured() {
        let fetcher = MockFetcher::default();
        let reply = fetcher.fetch("Кот").await.unwrap();
        let entry = TranslationEntry::from_reply(&reply);
        assert_eq!(entry.meaning, "meaning of кот");
        assert_eq!(entry.level, "A2");
    }

    #[tokio::test]
    async fn test_mock_failure_and_counts() {
        let fetcher = MockFetcher::default().failing_on("плохое");
        assert!(fetcher.fetch("плохое").await.is_err());
        assert!(fetcher.fetch("хорошее").await.is_ok());
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(fetcher.calls_for("ПЛОХОЕ"), 1);
    }
}
