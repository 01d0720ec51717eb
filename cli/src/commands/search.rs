//! Search commands, executed through the tool layer

use crate::config::CliConfigLoader;
use crate::output::print_result;
use anyhow::{Context, Result};
use filescope_core::tools::{ToolCall, ToolRegistry};
use filescope_core::FileSearch;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Open the project, run one tool call and print its result.
///
/// Returns whether the tool reported success.
pub async fn search_command(
    config_loader: CliConfigLoader,
    root: Option<PathBuf>,
    call: ToolCall,
    as_json: bool,
) -> Result<bool> {
    let config = config_loader.load().await?;
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    info!("Opening project at {}", root.display());
    let search = {
        let task_root = root.clone();
        tokio::task::spawn_blocking(move || FileSearch::open(&task_root, config))
            .await
            .context("Indexing task failed")?
            .with_context(|| format!("Failed to open project at {}", root.display()))?
    };

    let executor = ToolRegistry::default().create_executor_with_all(Arc::new(search));
    debug!("Executing {} with {}", call.name, call.parameters);
    let result = executor.execute(call).await?;
    if let Some(duration) = result.duration_ms {
        debug!("Tool finished in {} ms", duration);
    }

    print_result(&result, as_json)?;
    Ok(result.success)
}
