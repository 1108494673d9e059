//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use std::time::Duration;

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tools domain configuration.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the built-in tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// REST endpoint the `hello_rest` tool forwards to.
    /// `hello_rest` is only registered when this is set.
    pub greeting_endpoint: Option<String>,

    /// Timeout for greeting backend requests, in seconds.
    pub greeting_timeout_secs: u64,

    /// Whether `add_tool` and `delete_tool` are registered at startup.
    pub enable_meta_tools: bool,
}

impl ToolsConfig {
    pub fn greeting_timeout(&self) -> Duration {
        Duration::from_secs(self.greeting_timeout_secs)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            greeting_endpoint: None,
            greeting_timeout_secs: 10,
            enable_meta_tools: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "dynamic-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(endpoint) = std::env::var("MCP_GREETING_ENDPOINT") {
            info!("Greeting endpoint loaded from environment: {}", endpoint);
            config.tools.greeting_endpoint = Some(endpoint);
        }

        if let Ok(timeout) = std::env::var("MCP_GREETING_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.tools.greeting_timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid MCP_GREETING_TIMEOUT_SECS '{}', using {}s",
                    timeout, config.tools.greeting_timeout_secs
                ),
            }
        }

        if let Ok(enabled) = std::env::var("MCP_ENABLE_META_TOOLS") {
            config.tools.enable_meta_tools = enabled.to_lowercase() != "false" && enabled != "0";
            if !config.tools.enable_meta_tools {
                warn!("add_tool/delete_tool disabled: the tool set is fixed at startup");
            }
        }

        config
    }
}
