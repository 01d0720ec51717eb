//! # filescope CLI
//!
//! Command-line interface for filescope - project-aware file search.
//!
//! ## Usage
//!
//! - `filescope find App.kt` - Resolve a partial path
//! - `filescope grep TODO --include '*.kt'` - Search file contents
//! - `filescope glob '**/*.rs' --path src` - Find files by pattern
//! - `filescope ls src/main` - List a directory
//! - `filescope read main.rs --offset 10 --limit 20` - Read lines of a file
//! - `filescope tools` - Show available tools
//!
//! Every search command runs through the same tool layer an agent would
//! use; `--json` prints the structured result instead of text.

use anyhow::Result;
use clap::{Parser, Subcommand};
use filescope_core::tools::ToolCall;
use serde_json::json;
use std::path::PathBuf;

mod commands;
mod config;
mod output;

use commands::{search_command, tools_command};
use config::CliConfigLoader;

/// filescope - project-aware file search and path resolution
#[derive(Parser)]
#[command(name = "filescope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve, list and search files in a project and its libraries")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project root (default: current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Library root searched after the project (repeatable)
    #[arg(long = "library", global = true)]
    libraries: Vec<PathBuf>,

    /// Maximum number of files returned by searches
    #[arg(long, global = true)]
    max_results: Option<usize>,

    /// Do not apply the project's .gitignore rules
    #[arg(long, global = true)]
    no_gitignore: bool,

    /// Print structured JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a (partial) path to a file or directory
    Find {
        path: String,

        /// Resolve a directory instead of a file
        #[arg(long)]
        dir: bool,
    },

    /// Search file contents with a regular expression
    Grep {
        pattern: String,

        /// Directory or file to search
        #[arg(long)]
        path: Option<String>,

        /// Only report files matching this glob
        #[arg(long)]
        include: Option<String>,

        /// Match case exactly
        #[arg(long)]
        case_sensitive: bool,
    },

    /// Find files whose path matches a glob
    Glob {
        pattern: String,

        /// Directory to search
        #[arg(long)]
        path: Option<String>,
    },

    /// List the children of a directory
    Ls {
        path: Option<String>,

        /// Glob of child names to leave out (repeatable)
        #[arg(long)]
        ignore: Vec<String>,
    },

    /// Read lines from a file
    Read {
        path: String,

        /// 0-based first line
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum number of lines
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show available tools
    Tools,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new().with_library_overrides(cli.libraries.clone());

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(max_results) = cli.max_results {
        loader = loader.with_max_results_override(max_results);
    }

    if cli.no_gitignore {
        loader = loader.with_gitignore_disabled();
    }

    loader
}

/// The tool call a search command maps to
fn tool_call(command: Commands) -> Option<ToolCall> {
    let call = match command {
        Commands::Find { path, dir } => {
            ToolCall::new("find_file", json!({ "path": path, "directory": dir }))
        }
        Commands::Grep {
            pattern,
            path,
            include,
            case_sensitive,
        } => ToolCall::new(
            "search_content",
            json!({
                "pattern": pattern,
                "path": path,
                "include_pattern": include,
                "case_sensitive": case_sensitive,
            }),
        ),
        Commands::Glob { pattern, path } => {
            ToolCall::new("glob_search", json!({ "pattern": pattern, "path": path }))
        }
        Commands::Ls { path, ignore } => ToolCall::new(
            "list_directory",
            json!({ "path": path.unwrap_or_else(|| ".".to_string()), "ignore": ignore }),
        ),
        Commands::Read {
            path,
            offset,
            limit,
        } => ToolCall::new(
            "read_file",
            json!({ "path": path, "offset": offset, "limit": limit }),
        ),
        Commands::Tools => return None,
    };
    Some(call)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays parseable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config_loader = build_config_loader(&cli);
    let as_json = cli.json;
    let root = cli.root.clone();

    match tool_call(cli.command) {
        Some(call) => {
            let success = search_command(config_loader, root, call, as_json).await?;
            if !success {
                std::process::exit(1);
            }
            Ok(())
        }
        None => tools_command(as_json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_commands_map_to_tools() {
        let cli = Cli::parse_from(["filescope", "grep", "TODO", "--include", "*.rs"]);
        let call = tool_call(cli.command).unwrap();
        assert_eq!(call.name, "search_content");
        assert_eq!(call.parameters["include_pattern"], "*.rs");
        assert!(call.parameters["path"].is_null());

        let cli = Cli::parse_from(["filescope", "ls", "--ignore", "*.md", "--json"]);
        assert!(cli.json);
        let call = tool_call(cli.command).unwrap();
        assert_eq!(call.name, "list_directory");
        assert_eq!(call.parameters["path"], ".");

        let cli = Cli::parse_from(["filescope", "tools"]);
        assert!(tool_call(cli.command).is_none());
    }

    #[test]
    fn test_global_flags_build_loader() {
        let cli = Cli::parse_from([
            "filescope",
            "find",
            "App.kt",
            "--library",
            "/opt/a",
            "--library",
            "/opt/b",
            "--max-results",
            "5",
        ]);
        assert_eq!(cli.libraries.len(), 2);
        assert_eq!(cli.max_results, Some(5));
        let _loader = build_config_loader(&cli);
    }
}
