//! The search operation shared by both transports: validation, model
//! resolution, and a single upstream completion.

mod validate;

pub use validate::{ValidationError, validate};

use schemars::JsonSchema;
use serde_json::Value;
use tracing::info;

use crate::upstream::{CompletionClient, OpenRouterClient, UpstreamError};

// Built by `validate`; the derived schema is what the MCP tool advertises.
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct SearchRequest {
    /// What to search the web for, phrased as a question or keywords
    pub query: String,
    /// Model identifier to answer with (e.g. "perplexity/sonar-pro", "openai/gpt-4o:online"). Defaults to the server's configured model.
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

pub struct SearchService<C = OpenRouterClient> {
    client: C,
    default_model: String,
}

impl<C: CompletionClient> SearchService<C> {
    pub fn new(client: C, default_model: impl Into<String>) -> Self {
        Self {
            client,
            default_model: default_model.into(),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    pub fn resolve_model<'a>(&'a self, request: &'a SearchRequest) -> &'a str {
        request.model.as_deref().unwrap_or(&self.default_model)
    }

    /// Validates a raw transport payload, then searches.
    pub async fn search_raw(&self, raw: &Value) -> Result<SearchResult, SearchError> {
        let request = validate(raw)?;
        Ok(self.search(&request).await?)
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult, UpstreamError> {
        let model = self.resolve_model(request);
        info!(query = %request.query, model, "search");
        let text = self.client.complete(model, &request.query).await?;
        Ok(SearchResult { text })
    }
}
