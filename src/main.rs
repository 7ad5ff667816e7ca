mod config;
mod http;
mod search;
mod shutdown;
mod tools;
mod upstream;

pub const USER_AGENT: &str = concat!("lookout/", env!("CARGO_PKG_VERSION"));

use std::sync::Arc;

use config::{Config, Transport};
use search::SearchService;
use tools::WebSearchServer;
use tracing::info;
use upstream::OpenRouterClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the MCP stream; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lookout=info".parse()?),
        )
        .init();

    let config = Config::load().inspect_err(|e| tracing::error!("{e}"))?;
    info!(
        transport = ?config.transport,
        mode = ?config.mode,
        model = %config.default_model,
        "starting lookout"
    );

    let http_client = reqwest::Client::builder().build()?;
    let client = OpenRouterClient::new(http_client, config.api_key.clone());
    let search = Arc::new(SearchService::new(client, config.default_model.clone()));

    match config.transport {
        Transport::Tool => WebSearchServer::new(search).serve_stdio().await?,
        Transport::Http => http::serve(search, config.listen_port).await?,
    }

    Ok(())
}
