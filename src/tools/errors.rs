use rmcp::ErrorData as McpError;
use rmcp::model::ErrorCode;
use tracing::error;

use crate::search::SearchError;

pub(super) fn unknown_tool(name: &str) -> McpError {
    McpError::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("unknown tool: {name}"),
        None,
    )
}

pub(super) fn search_to_mcp_error(e: SearchError) -> McpError {
    match &e {
        SearchError::Invalid(reason) => {
            McpError::invalid_params(format!("invalid arguments: {reason}"), None)
        }
        SearchError::Upstream(upstream) => {
            error!(error = %upstream, status = upstream.status(), "web_search failed");
            McpError::internal_error(format!("search failed: {upstream}"), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::validate;
    use crate::upstream::UpstreamError;

    #[test]
    fn unknown_tool_is_method_not_found() {
        let err = unknown_tool("fetch");
        assert_eq!(err.code, ErrorCode(-32601));
        assert!(err.message.contains("fetch"));
    }

    #[test]
    fn validation_error_is_invalid_params_with_reason() {
        let invalid = validate(&serde_json::json!({})).unwrap_err();
        let err = search_to_mcp_error(SearchError::Invalid(invalid));
        assert_eq!(err.code, ErrorCode(-32602));
        assert!(err.message.contains("query is required"), "got: {}", err.message);
    }

    #[test]
    fn upstream_error_is_internal_error_with_message() {
        let err = search_to_mcp_error(SearchError::Upstream(UpstreamError::Api {
            status: 401,
            message: "bad key".into(),
        }));
        assert_eq!(err.code, ErrorCode(-32603));
        assert!(err.message.contains("bad key"), "got: {}", err.message);
    }
}
