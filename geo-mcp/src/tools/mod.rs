//! Tools module for GEO MCP server

use geo_client::{GeoClient, GeoError};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::model::*;
use serde::Serialize;
use serde_json::json;
use std::borrow::Cow;
use std::sync::Arc;

pub mod details;
pub mod search;

/// GEO MCP Server
#[derive(Clone)]
pub struct GeoServer {
    pub(crate) client: Arc<GeoClient>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl GeoServer {
    pub fn new(client: Arc<GeoClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

/// Serialize an operation result verbatim as the tool response
pub(crate) fn json_response<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let body = serde_json::to_string_pretty(value).map_err(|e| ErrorData {
        code: ErrorCode(-32603),
        message: Cow::from(format!("Failed to serialize response: {}", e)),
        data: None,
    })?;
    Ok(CallToolResult::success(vec![Content::text(body)]))
}

/// Return an operation failure as a structured `{"error": ...}` response
///
/// Remote failures are part of the tool's output contract, not protocol
/// errors; no failure of the upstream API tears down the server.
pub(crate) fn error_response(error: GeoError) -> Result<CallToolResult, ErrorData> {
    json_response(&json!({ "error": error.to_string() }))
}
