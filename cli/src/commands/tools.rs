//! Tools listing command

use crate::output::render_tools;
use anyhow::Result;
use filescope_core::tools::ToolRegistry;
use tracing::info;

/// Show available tools
pub async fn tools_command(as_json: bool) -> Result<()> {
    info!("Listing available tools");

    let registry = ToolRegistry::default();
    let definitions: Vec<(String, String)> = registry
        .list_tools()
        .into_iter()
        .filter_map(|name| registry.get_tool_info(name))
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .collect();

    println!("{}", render_tools(&definitions, as_json)?);
    Ok(())
}
