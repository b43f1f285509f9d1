//! REST client for an OpenAI-compatible chat-completions endpoint.
//!
//! Only the single call the estimator needs is wrapped: one system + user
//! message pair in, the first choice's reply text out.

use std::time::Duration;

use serde::Deserialize;

/// Sampling temperature for estimation requests. Kept low so the reply is
/// stable, parseable JSON rather than prose.
pub const TEMPERATURE: f64 = 0.2;

/// Reply length cap; a JSON estimate fits comfortably.
pub const MAX_TOKENS: u32 = 300;

/// HTTP client for a chat-completions backend.
pub struct ChatApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Errors from the chat-completions layer.
#[derive(Debug, thiserror::Error)]
pub enum ChatApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Chat API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx reply carried no choices to read a message from.
    #[error("Chat API reply contained no choices")]
    EmptyReply,
}

impl ChatApi {
    /// Create a new client.
    ///
    /// * `base_url` - e.g. `https://api.openai.com/v1` (no trailing slash).
    /// * `timeout` - hard cap on the whole request, connect included; an
    ///   expired timeout surfaces as [`ChatApiError::Request`].
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Request one completion and return the reply text, trimmed.
    ///
    /// Sends a `POST /chat/completions` request with the given model and
    /// system + user messages.
    pub async fn complete(
        &self,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, ChatApiError> {
        let body = serde_json::json!({
            "model": model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: ChatCompletionResponse = Self::parse_response(response).await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ChatApiError::EmptyReply)?;

        Ok(content.trim().to_string())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ChatApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ChatApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ChatApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ChatApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
