//! Define-tool meta tool.
//!
//! Registers a new tool (or replaces an existing one) from a name, a
//! description and a JSON parameter list of the form
//! `{"param": <required: bool>, ...}`.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use super::dynamic::DynamicToolHandler;
use crate::domains::tools::{
    CallContext, ParamContract, ParamSpec, ToolArguments, ToolEntry, ToolError, ToolHandler,
    ToolOutput, ToolRegistry,
};

/// Define-tool meta tool - adds a tool to the registry it was called through.
pub struct AddToolTool {
    registry: ToolRegistry,
}

impl AddToolTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_tool";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Define a new tool at runtime. paramList is a JSON object mapping each parameter name to whether it is required, e.g. {\"param1\": true, \"param2\": false}.";

    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn contract() -> ParamContract {
        ParamContract::new(vec![
            ParamSpec::required("operationName").with_description("Name of the tool to define"),
            ParamSpec::optional("description").with_description("Description of the tool"),
            ParamSpec::required("paramList")
                .with_description("JSON object mapping parameter names to a required flag"),
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

    /// Parse a serialized parameter list into a contract.
    pub fn parse_param_list(raw: &str) -> Result<ParamContract, ToolError> {
        let parsed: Value = serde_json::from_str(raw).map_err(|e| {
            ToolError::invalid_specification(format!("failed to parse paramList: {}", e))
        })?;
        let Value::Object(flags) = parsed else {
            return Err(ToolError::invalid_specification(
                "paramList must be a JSON object",
            ));
        };
        ParamContract::new(Self::specs_from_flags(flags)?)
    }

    fn specs_from_flags(flags: Map<String, Value>) -> Result<Vec<ParamSpec>, ToolError> {
        flags
            .into_iter()
            .map(|(name, flag)| match flag {
                Value::Bool(true) => Ok(ParamSpec::required(name)),
                Value::Bool(false) => Ok(ParamSpec::optional(name)),
                _ => Err(ToolError::invalid_specification(format!(
                    "required flag of '{}' must be a boolean",
                    name
                ))),
            })
            .collect()
    }
}

#[async_trait]
impl ToolHandler for AddToolTool {
    #[instrument(skip_all)]
    async fn call(&self, args: &ToolArguments, _ctx: &CallContext) -> Result<ToolOutput, ToolError> {
        let name = args.require_str("operationName")?;
        let description = args.optional_str("description")?.unwrap_or_default();
        let contract = Self::parse_param_list(args.require_str("paramList")?)?;

        let handler = DynamicToolHandler::new(name, &contract);
        let parameters = serde_json::to_value(contract.params())
            .map_err(|e| ToolError::internal(e.to_string()))?;
        let entry = ToolEntry::new(name, description, contract, handler)?;

        let replaced = self.registry.register(entry).is_some();
        info!(
            "Tool {} defined ({})",
            name,
            if replaced { "replaced" } else { "new" }
        );

        Ok(ToolOutput::text(format!(
            "Tool {} with description '{}' and parameters added successfully!",
            name, description
        ))
        .with_data(json!({
            "tool": name,
            "replaced": replaced,
            "parameters": parameters,
        })))
    }
}
