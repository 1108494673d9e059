//! Hello world tool definition.
//!
//! A tool that greets someone by name.

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::domains::tools::{
    CallContext, ParamContract, ParamSpec, ToolArguments, ToolEntry, ToolError, ToolHandler,
    ToolOutput,
};

/// Hello world tool - greets the given name.
pub struct HelloWorldTool;

impl HelloWorldTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hello_world";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Say hello to someone";

    /// Build the greeting text.
    pub fn execute(name: &str) -> ToolOutput {
        ToolOutput::text(format!(
            "Hello, {}!, This is from your rust mcp server",
            name
        ))
    }

    pub fn contract() -> ParamContract {
        ParamContract::new(vec![
            ParamSpec::required("name").with_description("Name of the person to greet"),
        ])
        .unwrap_or_default()
    }

    /// Create the registry entry for this tool.
    pub fn entry() -> Result<ToolEntry, ToolError> {
        ToolEntry::new(Self::NAME, Self::DESCRIPTION, Self::contract(), Self)
    }
}

#[async_trait]
impl ToolHandler for HelloWorldTool {
    #[instrument(skip_all)]
    async fn call(
        &self,
        args: &ToolArguments,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let name = args.require_str("name")?;
        info!("Hello tool called for '{}'", name);
        Ok(Self::execute(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_text() {
        let output = HelloWorldTool::execute("Vi_error");
        assert_eq!(
            output.text,
            "Hello, Vi_error!, This is from your rust mcp server"
        );
    }

    #[test]
    fn test_contract_requires_name() {
        let contract = HelloWorldTool::contract();
        assert_eq!(contract.required_names().collect::<Vec<_>>(), vec!["name"]);
    }

    #[tokio::test]
    async fn test_handler_reads_name() {
        let args = ToolArguments::new().with("name", "Ada");
        let output = HelloWorldTool
            .call(&args, &CallContext::detached())
            .await
            .unwrap();
        assert!(output.text.contains("Ada"));
    }
}
