/// Remote translation provider over an OpenAI-style chat-completions API.
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FetchError, TranslationFetcher};
use crate::config::TranslationConfig;

const SYSTEM_PROMPT: &str =
    "You are a helpful Russian language assistant. Always respond with valid JSON.";

// ── Wire types ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

// ── Fetcher ──────────────────────────────────────────────────────────

pub struct DeepSeekFetcher {
    client: reqwest::Client,
    config: TranslationConfig,
    api_key: Option<String>,
}

impl DeepSeekFetcher {
    /// Build a fetcher, reading the API key from `config.api_key_env`.
    ///
    /// A missing key is not an error here; every fetch then fails with
    /// [`FetchError::MissingApiKey`] and the failure is cached per word.
    pub fn new(config: TranslationConfig) -> Result<Self, FetchError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty());
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(
        config: TranslationConfig,
        api_key: Option<String>,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("russian-hover/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    async fn request(&self, word: &str) -> Result<String, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FetchError::MissingApiKey(self.config.api_key_env.clone()))?;

        let prompt = build_prompt(word);
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            stream: false,
            temperature: self.config.temperature,
        };

        debug!("Requesting translation for {word:?} from {}", self.config.api_url);
        let resp = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        extract_reply(&text)
    }
}

impl TranslationFetcher for DeepSeekFetcher {
    fn fetch<'a>(&'a self, word: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        self.request(word).boxed()
    }
}

fn build_prompt(word: &str) -> String {
    format!(
        r#"You are a Russian language expert. Please provide a detailed translation and analysis for the Russian word: '{word}'

Please respond in the following JSON format:
{{
    "meaning": "English translation and explanation",
    "examples": "2-3 example sentences using this word",
    "grammar": "Grammatical information (part of speech, gender, etc.)",
    "level": "CEFR level (A1, A2, B1, B2, C1, C2)"
}}

Keep responses concise but informative."#
    )
}

/// Message text of the first choice.
///
/// A body that is not a chat-completions object at all is handed back
/// verbatim, so the cache can still show it as a degraded entry.
fn extract_reply(body: &str) -> Result<String, FetchError> {
    let Ok(parsed) = serde_json::from_str::<ChatResponse>(body) else {
        return Ok(body.to_string());
    };
    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or(FetchError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reply_first_choice() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "{\"meaning\": \"Cat\"}"}}]}"#;
        assert_eq!(extract_reply(body).unwrap(), r#"{"meaning": "Cat"}"#);
    }

    #[test]
    fn test_extract_reply_no_choices() {
        let body = r#"{"choices": []}"#;
        assert!(matches!(extract_reply(body), Err(FetchError::EmptyResponse)));
    }

    #[test]
    fn test_extract_reply_not_json() {
        assert_eq!(extract_reply("plain text").unwrap(), "plain text");
    }

    #[test]
    fn test_prompt_mentions_word_and_fields() {
        let prompt = build_prompt("кошка");
        assert!(prompt.contains("'кошка'"));
        for field in ["meaning", "examples", "grammar", "level"] {
            assert!(prompt.contains(field), "prompt should ask for {field}");
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "deepseek-chat",
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            stream: false,
            temperature: 0.3,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["stream"], false);
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let fetcher = DeepSeekFetcher::with_api_key(TranslationConfig::default(), None).unwrap();
        let err = fetcher.fetch("кот").await.unwrap_err();
        assert!(matches!(err, FetchError::MissingApiKey(_)));
    }
}
