//! OpenAI-compatible chat-completion client for the review backend.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::TriageError;
use crate::review::prompts::ChatMessage;

/// Fixed model identifier for review requests.
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";

/// Fixed output-token ceiling for review requests.
pub const MAX_OUTPUT_TOKENS: i32 = 4096;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Chat-completion request body.
#[derive(Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: i32,
}

/// One choice of a chat-completion response. The backend may return a
/// choice without a usable message, so both levels are optional.
#[derive(Deserialize, Debug)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

/// Message payload of a response choice.
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion response body. Only `choices` is consulted.
#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// Client for the hosted chat-completion endpoint.
pub struct ReviewClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ReviewClient {
    /// Creates a client with the fixed model and a bounded request timeout.
    ///
    /// `base_url` falls back to [`DEFAULT_BASE_URL`] when `None`.
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TriageError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// Builds the full API URL.
    fn api_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/v1/chat/completions")
    }

    /// Sends one chat-completion request and extracts the first choice's
    /// content.
    ///
    /// Returns `Ok(None)` when the response carries no usable choice, which
    /// typically means the serialized context exceeded a backend size limit.
    /// Transport failures and non-success statuses are returned as errors.
    pub async fn send_chat(&self, messages: Vec<ChatMessage>) -> Result<Option<String>> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let url = self.api_url();
        info!(url = %url, model = %self.model, "Sending review request");
        debug!(
            message_count = request.messages.len(),
            max_tokens = request.max_tokens,
            "Built chat-completion request payload"
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| TriageError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(
                TriageError::ApiRequestFailed(format!("HTTP {status}: {error_text}")).into(),
            );
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| TriageError::InvalidResponseFormat(e.to_string()))?;

        debug!(
            choice_count = chat_response.choices.len(),
            "Received chat-completion response"
        );

        Ok(chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }
}
