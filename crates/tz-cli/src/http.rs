//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use tz_engine::{GenerationError, PromptMessage, TextGenerator};

const TEMPERATURE: f64 = 0.7;
/// Longest error body kept in a [`GenerationError::Status`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking text generator backed by a chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: Client,
    api_url: String,
    model: String,
    api_key: String,
}

impl HttpGenerator {
    /// Create a client with a per-request timeout.
    pub fn new(api_url: &str, model: &str, api_key: &str, timeout_secs: u64) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        debug!(api_url, model, timeout_secs, "HTTP generator ready");
        Ok(Self {
            client,
            api_url: api_url.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

fn transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Transport(e.to_string())
    }
}

fn status_error(status: u16, mut body: String) -> GenerationError {
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    GenerationError::Status { status, body }
}

fn first_content(response: ChatResponse) -> Result<String, GenerationError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

impl TextGenerator for HttpGenerator {
    fn generate(
        &self,
        messages: &[PromptMessage],
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages,
            max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "chat completion request rejected");
            let body = response.text().unwrap_or_default();
            return Err(status_error(status.as_u16(), body));
        }

        let parsed: ChatResponse = response.json().map_err(transport_error)?;
        first_content(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let messages = [
            PromptMessage::system("You are TZ."),
            PromptMessage::user("Say hello."),
        ];
        let body = ChatRequest {
            model: "deepseek-chat",
            messages: &messages,
            max_tokens: 500,
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Say hello.");
    }

    #[test]
    fn content_extraction() {
        let ok: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Signal...received."}}]}"#,
        )
        .unwrap();
        assert_eq!(first_content(ok).unwrap(), "Signal...received.");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(first_content(empty), Err(GenerationError::EmptyResponse)));

        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(matches!(first_content(blank), Err(GenerationError::EmptyResponse)));
    }

    #[test]
    fn rejected_status_keeps_short_body() {
        let err = status_error(401, r#"{"error":"invalid key"}"#.to_string());
        assert!(matches!(
            err,
            GenerationError::Status { status: 401, ref body } if body == r#"{"error":"invalid key"}"#
        ));
    }

    #[test]
    fn rejected_status_truncates_long_body_on_char_boundary() {
        // 'é' is two bytes, so byte MAX_ERROR_BODY falls inside a character.
        let body = format!("x{}", "é".repeat(MAX_ERROR_BODY));
        let GenerationError::Status { status, body } = status_error(500, body) else {
            panic!("expected a status error");
        };
        assert_eq!(status, 500);
        assert_eq!(body.len(), MAX_ERROR_BODY - 1);
        assert!(body.starts_with('x'));
    }
}
