//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are named operations with a parameter contract that MCP clients can
//! call. The set of tools is not fixed: `add_tool` and `delete_tool` change it
//! while the server is running.
//!
//! ## Architecture
//!
//! - `contract.rs` - Parameter contracts and argument validation
//! - `arguments.rs` - Typed access to call arguments
//! - `handler.rs` - Handler trait, call context and tool output
//! - `registry.rs` - The live tool registry (snapshot-swap)
//! - `dispatcher.rs` - Lookup, validation and invocation of one call
//! - `notify.rs` - Events pushed from handlers to the calling session
//! - `bootstrap.rs` - Registry populated with the built-in tools
//! - `definitions/` - Built-in tool implementations (one file per tool)
//! - `error.rs` - Tool-specific error types

mod arguments;
mod bootstrap;
mod contract;
pub mod definitions;
mod dispatcher;
mod error;
mod handler;
pub mod notify;
mod registry;

pub use arguments::ToolArguments;
pub use bootstrap::build_tool_registry;
pub use contract::{ParamContract, ParamSpec};
pub use dispatcher::{ToolCall, ToolDispatcher};
pub use error::ToolError;
pub use handler::{CallContext, ToolHandler, ToolOutput};
pub use notify::{
    EventSink, ListChangedSink, NoopSink, PeerEventSink, SessionEvent, forward_list_changes,
};
pub use registry::{ToolDescriptor, ToolEntry, ToolRegistry};
