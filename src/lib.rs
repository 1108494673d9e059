//! Dynamic MCP Server Library
//!
//! An MCP server whose tool set is not fixed at compile time: tools are held
//! in a shared registry that clients can extend and shrink at runtime through
//! the `add_tool` and `delete_tool` meta tools.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Parameter contracts, the tool registry, the dispatcher and
//!     the built-in tools
//!
//! # Example
//!
//! ```rust,no_run
//! use dynamic_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
