mod errors;
mod params;

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::stdio,
};
use serde_json::Value;
use tracing::{info, warn};

use errors::{search_to_mcp_error, unknown_tool};

use crate::search::SearchService;
use crate::upstream::CompletionClient;

pub const TOOL_NAME: &str = "web_search";
const TOOL_DESCRIPTION: &str = "Search the web using a language model with live online access. Returns the model's answer as text, often with inline citations. Use this for current events, recent releases, documentation lookups, and factual questions that need up-to-date information.";

/// MCP server handler exposing the single `web_search` tool.
pub struct WebSearchServer<C> {
    search: Arc<SearchService<C>>,
    tool: Tool,
}

impl<C> WebSearchServer<C>
where
    C: CompletionClient + Send + Sync + 'static,
{
    pub fn new(search: Arc<SearchService<C>>) -> Self {
        let tool = Tool::new(
            TOOL_NAME,
            TOOL_DESCRIPTION,
            params::input_schema(search.default_model()),
        );
        Self { search, tool }
    }

    async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        if name != TOOL_NAME {
            warn!(tool = name, "call to unknown tool");
            return Err(unknown_tool(name));
        }

        info!("tool:web_search");

        // Missing arguments are reported as a missing query.
        let raw = Value::Object(arguments.unwrap_or_default());
        let result = self
            .search
            .search_raw(&raw)
            .await
            .map_err(search_to_mcp_error)?;

        info!(chars = result.text.len(), "web_search complete");
        Ok(CallToolResult::success(vec![Content::text(result.text)]))
    }

    /// Serves MCP on stdin/stdout until the peer disconnects or a termination
    /// signal arrives.
    pub async fn serve_stdio(self) -> Result<(), Box<dyn std::error::Error>> {
        let service = self
            .serve(stdio())
            .await
            .inspect_err(|e| tracing::error!("failed to start server: {e}"))?;
        info!("MCP session established");

        // Dropping the running service on a signal cancels it; in-flight calls are abandoned.
        tokio::select! {
            quit = service.waiting() => {
                let reason = quit?;
                info!(?reason, "peer closed the session");
            }
            () = crate::shutdown::signal() => {
                info!("termination signal received");
            }
        }

        info!("MCP session closed");
        Ok(())
    }
}

impl<C> ServerHandler for WebSearchServer<C>
where
    C: CompletionClient + Send + Sync + 'static,
{
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "lookout".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "lookout provides one tool, web_search, which answers a query with an online-enabled language model."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: vec![self.tool.clone()],
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(&request.name, request.arguments).await
    }
}
