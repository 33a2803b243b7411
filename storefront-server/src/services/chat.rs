//! Chat-completion provider client
//!
//! Messages are forwarded as-is (content may be plain text or a list of
//! content parts such as `image_url`), with the caller's own API key.
//! Provider-reported errors map to `ChatProviderRejected` (400); transport
//! failures, unparsable bodies and empty answers map to
//! `ChatProviderUnavailable` (500).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::Config;
use crate::utils::{AppError, AppResult, ErrorCode};

/// One chat message; `content` is passed through untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Value,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

/// Assistant reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

/// Send `messages` to the configured provider and return the first choice
pub async fn complete(
    http: &reqwest::Client,
    config: &Config,
    api_key: &str,
    messages: &[ChatMessage],
) -> AppResult<ReplyMessage> {
    let request = CompletionRequest {
        model: &config.chat_model,
        messages,
        max_tokens: config.chat_max_tokens,
    };

    let response = http
        .post(&config.chat_api_url)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| unavailable(format!("Chat provider call failed: {e}")))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| unavailable(format!("Failed to read chat provider response: {e}")))?;

    let parsed: CompletionResponse = serde_json::from_slice(&body).map_err(|e| {
        unavailable(format!(
            "Failed to parse chat provider response (HTTP {status}): {e}"
        ))
    })?;

    if let Some(error) = parsed.error {
        tracing::warn!(status = %status, error = %error.message, "Chat provider rejected request");
        return Err(AppError::with_message(
            ErrorCode::ChatProviderRejected,
            error.message,
        ));
    }

    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| unavailable("Chat provider returned no answer"))
}

fn unavailable(msg: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::ChatProviderUnavailable, msg)
}

/// Mask a stored API key for display: first 3 and last 4 characters
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
