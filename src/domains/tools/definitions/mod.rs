//! Tool definitions module.
//!
//! This module exports the built-in tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod add_tool;
pub mod delete_tool;
pub mod dynamic;
pub mod hello_rest;
pub mod hello_world;

pub use add_tool::AddToolTool;
pub use delete_tool::DeleteToolTool;
pub use dynamic::DynamicToolHandler;
pub use hello_rest::HelloRestTool;
pub use hello_world::HelloWorldTool;
