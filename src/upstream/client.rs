use std::future::Future;

use reqwest::Client;
use tracing::{debug, warn};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ErrorEnvelope, Message};
use crate::config::ApiKey;

const API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// Attribution header OpenRouter shows in its dashboards.
const APP_TITLE: &str = "lookout";
const MAX_ERROR_SNIPPET: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Network(#[from] reqwest::Error),
}

impl UpstreamError {
    /// HTTP status reported by the provider, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Api { status, .. } => Some(*status),
            UpstreamError::Network(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// One-shot chat completion against an online-enabled model.
/// Implemented by `OpenRouterClient` for production; mock implementations used in tests.
pub trait CompletionClient {
    fn complete(
        &self,
        model: &str,
        query: &str,
    ) -> impl Future<Output = Result<String, UpstreamError>> + Send;
}

#[derive(Clone)]
pub struct OpenRouterClient {
    http: Client,
    api_key: ApiKey,
    url: String,
}

impl OpenRouterClient {
    pub fn new(http: Client, api_key: ApiKey) -> Self {
        Self {
            http,
            api_key,
            url: API_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_url(http: Client, url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey::new("test-key"),
            url: url.to_string(),
        }
    }
}

impl CompletionClient for OpenRouterClient {
    async fn complete(&self, model: &str, query: &str) -> Result<String, UpstreamError> {
        let request = ChatCompletionRequest {
            model,
            messages: vec![Message::user(query)],
        };

        debug_assert!(
            self.url.starts_with("https://") || cfg!(test),
            "API key must only be sent over HTTPS"
        );

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(body) = serde_json::from_str::<ErrorEnvelope>(&text)
                && let Some(err) = &body.error
            {
                let message = err.message();
                warn!(status = %status, error = %message, "upstream API error");
                return Err(UpstreamError::Api {
                    status: status.as_u16(),
                    message,
                });
            }
            let snippet = &text[..text.floor_char_boundary(MAX_ERROR_SNIPPET)];
            warn!(status = %status, "upstream API error (no structured body)");
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: format!("HTTP {status}: {snippet}"),
            });
        }

        let body: ChatCompletionResponse = response.json().await?;

        if let Some(err) = &body.error {
            let message = err.message();
            warn!(error = %message, "upstream API error in 200 response");
            return Err(UpstreamError::Api {
                status: err.status().unwrap_or(status.as_u16()),
                message,
            });
        }

        let text = body.into_text();
        if text.is_empty() {
            warn!(model, "upstream returned an empty answer");
        }
        debug!(model, chars = text.len(), "completion received");
        Ok(text)
    }
}
