//! Handler behind every tool defined at runtime through `add_tool`.

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domains::tools::{
    CallContext, ParamContract, ToolArguments, ToolError, ToolHandler, ToolOutput,
};

/// Fixed response text of a runtime-defined tool.
pub const DYNAMIC_RESPONSE: &str = "this answer is from your rust mcp server";

/// Generic handler of a runtime-defined tool.
///
/// Keeps its own copy of the contract taken from the definition and checks
/// every call against it, regardless of what the dispatcher already
/// validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicToolHandler {
    name: String,
    contract: ParamContract,
}

impl DynamicToolHandler {
    pub fn new(name: impl Into<String>, contract: &ParamContract) -> Self {
        Self {
            name: name.into(),
            contract: contract.clone(),
        }
    }

    pub fn contract(&self) -> &ParamContract {
        &self.contract
    }
}

#[async_trait]
impl ToolHandler for DynamicToolHandler {
    async fn call(&self, args: &ToolArguments, ctx: &CallContext) -> Result<ToolOutput, ToolError> {
        self.contract.validate(args)?;

        info!("Dynamic tool {} executed", self.name);
        ctx.notify_event("invoked", json!({ "tool": self.name }))
            .await;

        Ok(ToolOutput::text(format!(
            "Tool {} executed successfully! Response: {}",
            self.name, DYNAMIC_RESPONSE
        )))
    }
}
