//! Registry bootstrap - the tools available when the server starts.
//!
//! Builds a [`ToolRegistry`] holding the built-in tools enabled by the
//! configuration. Everything registered later comes from `add_tool` calls.

use reqwest::Url;
use tracing::info;

use super::ToolRegistry;
use super::definitions::{AddToolTool, DeleteToolTool, HelloRestTool, HelloWorldTool};
use crate::core::config::ToolsConfig;
use crate::core::{Error, Result};

/// Build the registry with all built-in tools.
pub fn build_tool_registry(config: &ToolsConfig) -> Result<ToolRegistry> {
    let registry = ToolRegistry::new();

    registry.register(HelloWorldTool::entry()?);

    if let Some(endpoint) = &config.greeting_endpoint {
        let url = Url::parse(endpoint)
            .map_err(|e| Error::config(format!("invalid greeting endpoint '{}': {}", endpoint, e)))?;
        let tool = HelloRestTool::new(url, config.greeting_timeout())
            .map_err(|e| Error::config(format!("failed to build greeting client: {}", e)))?;
        info!("Greeting forwarding enabled: {}", tool.endpoint());
        registry.register(tool.into_entry()?);
    }

    if config.enable_meta_tools {
        registry.register(AddToolTool::entry(registry.clone())?);
        registry.register(DeleteToolTool::entry(registry.clone())?);
    }

    info!("Tool registry ready with {} tools", registry.len());
    Ok(registry)
}
