//! Chat-completion client for the online-enabled model provider.

mod client;
mod types;

pub use client::{CompletionClient, OpenRouterClient, UpstreamError};
