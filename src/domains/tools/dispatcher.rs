//! Tool Dispatcher - resolves, validates and runs a single call.

use tracing::{info, instrument, warn};

use super::arguments::ToolArguments;
use super::error::ToolError;
use super::handler::{CallContext, ToolOutput};
use super::registry::ToolRegistry;

/// One inbound tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: ToolArguments,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: ToolArguments) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Runs calls against a [`ToolRegistry`].
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    registry: ToolRegistry,
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch a call.
    ///
    /// Fails with [`ToolError::UnknownOperation`] if no tool of that name is
    /// registered, or with the contract's validation error if the arguments
    /// do not satisfy it; in both cases the handler is not invoked. Otherwise
    /// the handler's result is returned as-is. The handler runs against the
    /// entry resolved at the start of the call, even if that entry is
    /// replaced or revoked before it finishes.
    #[instrument(skip_all, fields(tool = %call.name))]
    pub async fn dispatch(
        &self,
        call: ToolCall,
        ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let entry = match self.registry.lookup(&call.name) {
            Ok(entry) => entry,
            Err(_) => {
                warn!("Unknown tool requested: {}", call.name);
                return Err(ToolError::unknown_operation(call.name));
            }
        };

        if let Err(e) = entry.contract().validate(&call.arguments) {
            warn!("Rejected call to {}: {}", call.name, e);
            return Err(e);
        }

        let result = entry.handler().call(&call.arguments, ctx).await;
        match &result {
            Ok(_) => info!("Tool {} executed", call.name),
            Err(e) => warn!("Tool {} failed: {}", call.name, e),
        }
        result
    }
}
