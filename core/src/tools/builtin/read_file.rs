//! File reading tool

use crate::error::Result;
use crate::impl_tool_factory;
use crate::search::FileSearch;
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Reads a window of lines from a resolved file
pub struct ReadFileTool {
    search: Arc<FileSearch>,
}

impl ReadFileTool {
    pub fn new(search: Arc<FileSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read lines from a file in the project, a library or an archive\n\
         * Partial paths are resolved the same way as `find_file`\n\
         * `offset` is the 0-based first line; `limit` caps the number of lines\n\
         * Very long lines are cut and marked `... [truncated]`"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File to read"
                },
                "offset": {
                    "type": "integer",
                    "description": "0-based line to start from (default: 0)",
                    "minimum": 0
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of lines to return",
                    "minimum": 0
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let path: String = call.get_parameter("path")?;
        let offset: usize = call.get_optional_parameter("offset")?.unwrap_or(0);
        let limit: Option<usize> = call.get_optional_parameter("limit")?;

        let content = match self.search.read_file(&path, offset, limit) {
            Ok(content) => content,
            Err(e) => return Ok(ToolResult::error(&call.id, &e.to_string())),
        };

        let mut text = format!(
            "{} (lines {}-{} of {})",
            content.shortened_path,
            content.offset + 1,
            content.offset + content.lines.len(),
            content.total_lines
        );
        for (index, line) in content.lines.iter().enumerate() {
            text.push_str(&format!("\n{:>6}\t{}", content.offset + index + 1, line));
        }

        Ok(ToolResult::success(&call.id, &text).with_data(serde_json::to_value(&content)?))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample {
            description: "Read the first 50 lines of a file".to_string(),
            parameters: json!({"path": "src/main.rs", "limit": 50}),
            expected_result: "Numbered lines of the file".to_string(),
        }]
    }
}

impl_tool_factory!(
    ReadFileToolFactory,
    ReadFileTool,
    "read_file",
    "Read lines from a file"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::open_project;

    #[tokio::test]
    async fn test_read_window() {
        let (_temp_dir, search) = open_project();
        let tool = ReadFileTool::new(search);

        let result = tool
            .execute(ToolCall::new(
                "read_file",
                json!({"path": "main.rs", "offset": 1, "limit": 1}),
            ))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(
            result.content,
            "src/main.rs (lines 2-2 of 3)\n     2\t    // TODO: start"
        );
        let data = result.data.unwrap();
        assert_eq!(data["path_corrected"], true);
        assert_eq!(data["total_lines"], 3);
    }

    #[tokio::test]
    async fn test_read_ambiguous_file() {
        let (_temp_dir, search) = open_project();
        let tool = ReadFileTool::new(search);

        let result = tool
            .execute(ToolCall::new("read_file", json!({"path": "mod.rs"})))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.content.contains("docs/mod.rs"));
    }
}
