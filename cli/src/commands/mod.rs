//! CLI command implementations

pub mod search;
pub mod tools;

pub use search::search_command;
pub use tools::tools_command;
