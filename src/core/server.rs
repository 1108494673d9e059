//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol on top of the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools live in a [`ToolRegistry`] that is shared by every connection and
//! can change while the server runs (`add_tool` / `delete_tool`). `tools/list`
//! renders the current registry snapshot and `tools/call` goes through the
//! [`ToolDispatcher`]. Every initialized session gets a forwarder that sends
//! `notifications/tools/list_changed` whenever the registry changes, no
//! matter which session changed it.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::{NotificationContext, RequestContext},
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{
    CallContext, PeerEventSink, ToolArguments, ToolCall, ToolDispatcher, ToolError, ToolOutput,
    ToolRegistry, build_tool_registry, forward_list_changes,
};

/// The main MCP server handler.
///
/// Clones share the same registry, so a tool defined over one connection is
/// callable from every other connection.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatcher over the live tool registry.
    dispatcher: ToolDispatcher,

    /// Source of session ids for `list_changed` forwarders.
    sessions: Arc<AtomicU64>,
}

impl McpServer {
    /// Create a new MCP server with the built-in tools enabled by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let registry = build_tool_registry(&config.tools)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server over an existing registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: ToolDispatcher::new(registry),
            sessions: Arc::default(),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The live tool registry.
    pub fn registry(&self) -> &ToolRegistry {
        self.dispatcher.registry()
    }

    /// Current tools as MCP Tool models.
    pub fn tool_models(&self) -> Vec<Tool> {
        self.registry().list().iter().map(|d| d.to_tool()).collect()
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_models()
            .into_iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// There is no session stream over stateless HTTP, so handler events are
    /// dropped. Rejected calls and internal failures come back as `Err` with
    /// their JSON-RPC error code; handler failures come back as a tool result
    /// with `isError` set.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, McpError> {
        let result = match ToolArguments::from_value(arguments) {
            Ok(arguments) => {
                self.dispatcher
                    .dispatch(ToolCall::new(name, arguments), &CallContext::detached())
                    .await
            }
            Err(e) => Err(e),
        };

        let result = to_call_result(name, result)?;
        serde_json::to_value(&result).map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}

/// Map a dispatch outcome onto the MCP result/error split.
///
/// Lookup and validation failures are protocol errors (invalid params).
/// Handler failures are tool results flagged as errors, carrying the
/// handler's message.
fn to_call_result(
    tool: &str,
    result: std::result::Result<ToolOutput, ToolError>,
) -> std::result::Result<CallToolResult, McpError> {
    match result {
        Ok(output) => Ok(CallToolResult {
            content: vec![Content::text(output.text)],
            structured_content: output.data,
            is_error: Some(false),
            meta: None,
        }),
        Err(e) if e.is_rejection() => {
            let data = match &e {
                ToolError::MissingParameter(parameter)
                | ToolError::TypeMismatch { parameter, .. } => {
                    json!({ "tool": tool, "parameter": parameter })
                }
                _ => json!({ "tool": tool }),
            };
            Err(McpError::invalid_params(e.to_string(), Some(data)))
        }
        Err(ToolError::ExecutionFailed(msg)) => Ok(CallToolResult::error(vec![Content::text(msg)])),
        Err(e) => Err(McpError::internal_error(e.to_string(), None)),
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tools can be added with add_tool and removed with delete_tool while the server runs."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_logging()
                .enable_tools()
                .enable_tool_list_changed()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_models(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let name = request.name.to_string();
        info!("Calling tool: {}", name);

        let ctx = CallContext::new(Arc::new(PeerEventSink::new(
            context.peer.clone(),
            name.clone(),
        )));
        let call = ToolCall::new(name.clone(), ToolArguments::from_object(request.arguments));
        let result = self.dispatcher.dispatch(call, &ctx).await;

        to_call_result(&name, result)
    }

    async fn on_initialized(&self, context: NotificationContext<RoleServer>) {
        let session_id = self.sessions.fetch_add(1, Ordering::Relaxed) + 1;
        info!(session_id, "Session initialized, watching tool list");
        let _forwarder =
            forward_list_changes(self.registry().subscribe(), context.peer, session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ToolsConfig;

    fn test_server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_server_creation_fails_on_bad_config() {
        let config = Config {
            tools: ToolsConfig {
                greeting_endpoint: Some("::".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(McpServer::new(config).is_err());
    }

    #[test]
    fn test_list_tools_json() {
        let tools = test_server().list_tools();
        let hello = tools
            .iter()
            .find(|t| t["name"] == "hello_world")
            .expect("hello_world listed");
        assert_eq!(hello["description"], "Say hello to someone");
        assert_eq!(hello["inputSchema"]["required"], json!(["name"]));
    }

    #[test]
    fn test_success_maps_to_tool_result() {
        let result = to_call_result(
            "t",
            Ok(ToolOutput::text("done").with_data(json!({ "k": 1 }))),
        )
        .unwrap();
        assert_eq!(text_of(&result), "done");
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content, Some(json!({ "k": 1 })));
    }

    #[test]
    fn test_rejection_maps_to_invalid_params() {
        let err = to_call_result("greet", Err(ToolError::missing_parameter("name"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("name"));
        assert_eq!(err.data, Some(json!({ "tool": "greet", "parameter": "name" })));
    }

    #[test]
    fn test_handler_failure_maps_to_error_result() {
        let result = to_call_result("t", Err(ToolError::execution_failed("backend down"))).unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "backend down");
    }

    #[test]
    fn test_internal_failure_maps_to_internal_error() {
        let err = to_call_result("t", Err(ToolError::internal("snapshot poisoned"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("snapshot poisoned"));
    }

    #[tokio::test]
    async fn test_call_tool_shares_registry_across_clones() {
        let server = test_server();
        let other = server.clone();

        server
            .call_tool(
                "add_tool",
                json!({ "operationName": "echo", "paramList": "{\"msg\": false}" }),
            )
            .await
            .unwrap();

        let names: Vec<_> = other
            .list_tools()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert!(names.contains(&"echo".to_string()));

        let result = other.call_tool("echo", json!({ "msg": "hi" })).await.unwrap();
        assert_eq!(result["isError"], false);
        assert!(
            result["content"][0]["text"]
                .as_str()
                .unwrap()
                .contains("executed successfully")
        );
    }

    #[tokio::test]
    async fn test_definition_on_one_connection_reaches_other_sessions() {
        use crate::domains::tools::ListChangedSink;
        use std::time::Duration;
        use tokio::sync::mpsc;

        struct ChannelSession(mpsc::UnboundedSender<()>);

        #[async_trait::async_trait]
        impl ListChangedSink for ChannelSession {
            async fn tool_list_changed(&self) -> std::result::Result<(), String> {
                self.0.send(()).map_err(|e| e.to_string())
            }
        }

        let server = test_server();
        let other = server.clone();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _forwarder =
            forward_list_changes(other.registry().subscribe(), ChannelSession(tx), 2);

        server
            .call_tool(
                "add_tool",
                json!({ "operationName": "echo", "paramList": "{}" }),
            )
            .await
            .unwrap();
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("list_changed not delivered")
            .unwrap();

        server
            .call_tool("delete_tool", json!({ "operationName": "echo" }))
            .await
            .unwrap();
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("list_changed not delivered")
            .unwrap();

        server
            .call_tool("hello_world", json!({ "name": "Ada" }))
            .await
            .unwrap();
        assert!(
            tokio::time::timeout(Duration::from_millis(50), rx.recv())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let err = test_server().call_tool("nope", json!({})).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("Unknown tool: nope"));
    }

    #[tokio::test]
    async fn test_call_with_non_object_arguments() {
        let err = test_server()
            .call_tool("hello_world", json!("Ada"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("arguments"));
    }
}
