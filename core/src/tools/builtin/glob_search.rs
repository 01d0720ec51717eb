//! Glob-based file search tool

use super::describe_search;
use crate::error::Result;
use crate::impl_tool_factory;
use crate::search::{FileSearch, GlobQuery};
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Finds files by name or path pattern
pub struct GlobSearchTool {
    search: Arc<FileSearch>,
}

impl GlobSearchTool {
    pub fn new(search: Arc<FileSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for GlobSearchTool {
    fn name(&self) -> &str {
        "glob_search"
    }

    fn description(&self) -> &str {
        "Find files whose path matches a glob pattern\n\
         * Supports *, ?, [abc], {foo,bar} and **\n\
         * Patterns without `/` match file names at any depth\n\
         * Patterns are matched against paths relative to `path` (default: project root)\n\
         * Library files are included after project files when searching everywhere\n\
         \n\
         Common glob patterns:\n\
         * `*.rs` - All Rust files\n\
         * `src/**/*.rs` - Rust files below src\n\
         * `**/*.{js,ts}` - JavaScript and TypeScript files"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Glob pattern. Use / as path separator on all platforms."
                },
                "path": {
                    "type": "string",
                    "description": "Directory to search (default: everywhere)"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of files to return",
                    "minimum": 0
                }
            },
            "required": ["pattern"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let pattern: String = call.get_parameter("pattern")?;
        let max_results = call
            .get_optional_parameter("max_results")?
            .unwrap_or(self.search.config().max_results);

        let mut query = GlobQuery::new(pattern).with_max_results(max_results);
        if let Some(path) = call.get_optional_parameter::<String>("path")? {
            query = query.with_path(path);
        }

        let result = self.search.search_by_glob(&query);
        Ok(ToolResult::success(&call.id, &describe_search(&result))
            .with_data(serde_json::to_value(&result)?))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample {
            description: "Find every Rust file below src".to_string(),
            parameters: json!({"pattern": "**/*.rs", "path": "src"}),
            expected_result: "Matching files, most recently modified first".to_string(),
        }]
    }
}

impl_tool_factory!(
    GlobSearchToolFactory,
    GlobSearchTool,
    "glob_search",
    "Find files by glob pattern"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::open_project;

    #[tokio::test]
    async fn test_glob_in_directory() {
        let (_temp_dir, search) = open_project();
        let tool = GlobSearchTool::new(search);

        let result = tool
            .execute(ToolCall::new("glob_search", json!({"pattern": "*.rs", "path": "net"})))
            .await
            .unwrap();
        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["search_path"], "src/net");
        assert_eq!(data["search_path_corrected"], true);
        assert_eq!(data["entries"].as_array().unwrap().len(), 2);
        assert!(result.content.contains("(path corrected)"));
    }

    #[tokio::test]
    async fn test_glob_limit() {
        let (_temp_dir, search) = open_project();
        let tool = GlobSearchTool::new(search);

        let result = tool
            .execute(ToolCall::new("glob_search", json!({"pattern": "**/*.rs", "max_results": 1})))
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["entries"].as_array().unwrap().len(), 1);
        assert_eq!(data["limit_reached"], false);
    }

    #[tokio::test]
    async fn test_glob_without_matches() {
        let (_temp_dir, search) = open_project();
        let tool = GlobSearchTool::new(search);

        let result = tool
            .execute(ToolCall::new("glob_search", json!({"pattern": "*.kt"})))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.content, "No files found");
    }
}
