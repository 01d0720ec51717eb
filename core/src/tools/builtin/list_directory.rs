//! Directory listing tool

use crate::error::Result;
use crate::impl_tool_factory;
use crate::search::FileSearch;
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Lists one level of a project, library or archive directory
pub struct ListDirectoryTool {
    search: Arc<FileSearch>,
}

impl ListDirectoryTool {
    pub fn new(search: Arc<FileSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "List the immediate children of a directory\n\
         * Directories come first and end with `/`\n\
         * Partial paths are resolved; the corrected path is reported\n\
         * Archives (`.jar`, `.zip`) can be listed like directories"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Directory to list (default: project root)",
                    "default": "."
                },
                "ignore": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Glob patterns of child names to leave out"
                }
            }
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let path: String = call.get_parameter_or("path", ".".to_string());
        let ignore: Option<Vec<String>> = call.get_optional_parameter("ignore")?;

        let listing = self.search.list_directory(&path, ignore.as_deref());
        let data = serde_json::to_value(&listing)?;

        if !listing.found {
            return Ok(ToolResult::error(
                &call.id,
                &format!("Directory '{}' not found or ambiguous", path),
            )
            .with_data(data));
        }

        let mut content = String::new();
        if let Some(corrected) = &listing.corrected_path {
            content.push_str(&format!("{}:\n", corrected));
        }
        let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        if names.is_empty() {
            content.push_str("(empty)");
        } else {
            content.push_str(&names.join("\n"));
        }

        Ok(ToolResult::success(&call.id, &content).with_data(data))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample {
            description: "List the source directory without test files".to_string(),
            parameters: json!({"path": "src", "ignore": ["*_test.rs"]}),
            expected_result: "Child names, directories first".to_string(),
        }]
    }
}

impl_tool_factory!(
    ListDirectoryToolFactory,
    ListDirectoryTool,
    "list_directory",
    "List the children of a directory"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::open_project;

    #[tokio::test]
    async fn test_list_root() {
        let (_temp_dir, search) = open_project();
        let tool = ListDirectoryTool::new(search);

        let result = tool
            .execute(ToolCall::new("list_directory", json!({"ignore": ["*.md"]})))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.content, "docs/\nsrc/");
    }

    #[tokio::test]
    async fn test_list_corrected_path() {
        let (_temp_dir, search) = open_project();
        let tool = ListDirectoryTool::new(search);

        let result = tool
            .execute(ToolCall::new("list_directory", json!({"path": "net"})))
            .await
            .unwrap();
        assert_eq!(result.content, "src/net:\nclient.rs\nmod.rs");
        assert_eq!(result.data.unwrap()["corrected_path"], "src/net");
    }

    #[tokio::test]
    async fn test_list_missing_directory() {
        let (_temp_dir, search) = open_project();
        let tool = ListDirectoryTool::new(search);

        let result = tool
            .execute(ToolCall::new("list_directory", json!({"path": "nonexistent/dir"})))
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.data.unwrap()["found"], false);
    }

    #[tokio::test]
    async fn test_list_empty_directory() {
        let (temp_dir, search) = open_project();
        std::fs::create_dir(temp_dir.path().join("docs/empty")).unwrap();
        let tool = ListDirectoryTool::new(search);

        let result = tool
            .execute(ToolCall::new("list_directory", json!({"path": "docs/empty"})))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.content, "(empty)");
    }
}
