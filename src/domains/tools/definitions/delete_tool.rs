//! Revoke-tool meta tool.
//!
//! Removes a tool from the registry. Removing a tool that does not exist
//! succeeds as well, so the call is safe to retry.

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use crate::domains::tools::{
    CallContext, ParamContract, ParamSpec, ToolArguments, ToolEntry, ToolError, ToolHandler,
    ToolOutput, ToolRegistry,
};

/// Revoke-tool meta tool - removes a tool from the registry it was called through.
pub struct DeleteToolTool {
    registry: ToolRegistry,
}

impl DeleteToolTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "delete_tool";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Remove a tool by name. Succeeds even if the tool does not exist.";

    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn contract() -> ParamContract {
        ParamContract::new(vec![
            ParamSpec::required("operationName").with_description("Name of the tool to remove"),
        ])
        .unwrap_or_default()
    }

    /// Create the registry entry for this tool.
    pub fn entry(registry: ToolRegistry) -> Result<ToolEntry, ToolError> {
        ToolEntry::new(
            Self::NAME,
            Self::DESCRIPTION,
            Self::contract(),
            Self::new(registry),
        )
    }
}

#[async_trait]
impl ToolHandler for DeleteToolTool {
    #[instrument(skip_all)]
    async fn call(&self, args: &ToolArguments, _ctx: &CallContext) -> Result<ToolOutput, ToolError> {
        let name = args.require_str("operationName")?;
        let removed = self.registry.revoke(name);

        Ok(
            ToolOutput::text(format!("Tool {} removed successfully!", name))
                .with_data(json!({ "tool": name, "removed": removed })),
        )
    }
}
