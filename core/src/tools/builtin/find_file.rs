//! Path resolution tool

use crate::error::Result;
use crate::impl_tool_factory;
use crate::search::{FileSearch, SearchResult};
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Resolves partial or misspelled paths to project entries
pub struct FindFileTool {
    search: Arc<FileSearch>,
}

impl FindFileTool {
    pub fn new(search: Arc<FileSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for FindFileTool {
    fn name(&self) -> &str {
        "find_file"
    }

    fn description(&self) -> &str {
        "Resolve a path to a file or directory in the project or its libraries\n\
         * Accepts project-relative, absolute or partial paths (`main/App.kt`, `App.kt`)\n\
         * Paths inside archives use `lib.jar!/pkg/Type.class`\n\
         * When several entries match equally well, all candidates are listed\n\
         * Returned paths are shortened and can be passed to the other tools"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path or partial path to resolve"
                },
                "directory": {
                    "type": "boolean",
                    "description": "Resolve a directory instead of a file (default: false)",
                    "default": false
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let path: String = call.get_parameter("path")?;
        let directory: bool = call.get_parameter_or("directory", false);

        let result = self.search.find_by_path(&path, directory);
        let data = serde_json::to_value(&result)?;

        let tool_result = match &result {
            SearchResult::Found {
                shortened_path,
                is_in_project,
                ..
            } => {
                let origin = if *is_in_project { "project" } else { "library" };
                ToolResult::success(&call.id, &format!("{} ({})", shortened_path, origin))
            }
            SearchResult::Multiple {
                shortened_paths, ..
            } => ToolResult::success(
                &call.id,
                &format!(
                    "'{}' matches {} entries:\n{}",
                    path,
                    shortened_paths.len(),
                    shortened_paths.join("\n")
                ),
            ),
            SearchResult::NotFound { reason } => {
                ToolResult::error(&call.id, &format!("'{}' not found: {}", path, reason))
            }
        };
        Ok(tool_result.with_data(data))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![
            ToolExample {
                description: "Resolve a file by its name".to_string(),
                parameters: json!({"path": "App.kt"}),
                expected_result: "The shortened path of the single matching file".to_string(),
            },
            ToolExample {
                description: "Resolve a directory".to_string(),
                parameters: json!({"path": "src/main", "directory": true}),
                expected_result: "The directory's shortened path".to_string(),
            },
        ]
    }
}

impl_tool_factory!(
    FindFileToolFactory,
    FindFileTool,
    "find_file",
    "Resolve partial paths to project or library entries"
);
