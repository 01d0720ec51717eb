//! Tool system and built-in search tools

pub mod base;
pub mod builtin;
pub mod registry;

pub use base::{Tool, ToolCall, ToolDefinition, ToolExample, ToolExecutor, ToolResult};
pub use registry::{ToolFactory, ToolRegistry};
