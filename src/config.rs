//! Startup configuration and transport selection.
//!
//! Everything here is read once in `main` and handed to the adapters as an
//! immutable value; nothing downstream reads the process environment.

use clap::{Parser, ValueEnum};

pub const DEFAULT_MODEL: &str = "perplexity/sonar";
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variables set by hosting platforms. Their presence means we are
/// deployed as a web service rather than spawned by an agent host.
const PLATFORM_MARKERS: &[&str] = &[
    "RAILWAY_ENVIRONMENT",
    "RENDER",
    "FLY_APP_NAME",
    "DYNO",
    "K_SERVICE",
    "VERCEL",
    "KOYEB_APP_NAME",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENROUTER_API_KEY not set. Get one at https://openrouter.ai/keys")]
    ApiKeyNotSet,

    #[error("invalid port {0:?}: expected an integer between 0 and 65535")]
    InvalidPort(String),
}

#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    #[default]
    Auto,
    #[value(alias = "mcp")]
    Tool,
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// MCP over stdio.
    Tool,
    Http,
}

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// OpenRouter API key (required)
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used when a request does not name one
    #[arg(long, env = "OPENROUTER_MODEL")]
    pub model: Option<String>,

    /// HTTP listen port; setting it also selects the HTTP transport in auto mode
    #[arg(long, env = "PORT")]
    pub port: Option<String>,

    /// Transport to serve: auto, tool (alias: mcp), or http
    #[arg(long, env = "LOOKOUT_MODE", value_enum, default_value_t = Mode::Auto)]
    pub mode: Mode,
}

/// Inputs to transport selection, captured from the environment at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeSignals {
    pub mode: Mode,
    pub port_assigned: bool,
    pub deployment_platform: bool,
}

pub fn select_transport(signals: &ModeSignals) -> Transport {
    match signals.mode {
        Mode::Tool => Transport::Tool,
        Mode::Http => Transport::Http,
        Mode::Auto if signals.port_assigned || signals.deployment_platform => Transport::Http,
        Mode::Auto => Transport::Tool,
    }
}

/// First known platform marker reported present by `is_set`.
pub fn deployment_platform(is_set: impl Fn(&str) -> bool) -> Option<&'static str> {
    PLATFORM_MARKERS.iter().copied().find(|key| is_set(key))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub default_model: String,
    pub listen_port: u16,
    pub mode: Mode,
    pub transport: Transport,
}

impl Config {
    /// Parses flags and environment. Exits with usage on malformed flags.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = Cli::parse();
        let platform = deployment_platform(|key| std::env::var_os(key).is_some());
        if let Some(marker) = platform {
            tracing::debug!(marker, "deployment platform detected");
        }
        Self::resolve(cli, platform.is_some())
    }

    pub fn resolve(cli: Cli, deployment_platform: bool) -> Result<Self, ConfigError> {
        let api_key = non_blank(cli.api_key).ok_or(ConfigError::ApiKeyNotSet)?;
        let default_model = non_blank(cli.model).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let port = non_blank(cli.port);
        let listen_port = match &port {
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(p.clone()))?,
            None => DEFAULT_PORT,
        };

        let transport = select_transport(&ModeSignals {
            mode: cli.mode,
            port_assigned: port.is_some(),
            deployment_platform,
        });

        Ok(Self {
            api_key: ApiKey::new(api_key),
            default_model,
            listen_port,
            mode: cli.mode,
            transport,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
