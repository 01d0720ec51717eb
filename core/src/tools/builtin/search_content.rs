//! Regex search over file contents

use super::describe_search;
use crate::error::Result;
use crate::impl_tool_factory;
use crate::search::{ContentQuery, FileSearch};
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Greps project files first, then library files
pub struct SearchContentTool {
    search: Arc<FileSearch>,
}

impl SearchContentTool {
    pub fn new(search: Arc<FileSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for SearchContentTool {
    fn name(&self) -> &str {
        "search_content"
    }

    fn description(&self) -> &str {
        "Search file contents with a regular expression\n\
         * Case-insensitive unless `case_sensitive` is true\n\
         * `path` may name a directory (search below it) or a single file (returns matching lines)\n\
         * `include_pattern` restricts matches to files matching a glob such as `*.rs`\n\
         * Project files are listed first, newest first; library files fill any remaining room"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Regular expression to search for"
                },
                "path": {
                    "type": "string",
                    "description": "Directory or file to search (default: everywhere)"
                },
                "include_pattern": {
                    "type": "string",
                    "description": "Glob that matching files must satisfy, e.g. `*.kt`"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of files to return",
                    "minimum": 0
                },
                "case_sensitive": {
                    "type": "boolean",
                    "description": "Match case exactly (default: false)",
                    "default": false
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

        let mut query = ContentQuery::new(pattern)
            .with_max_results(max_results)
            .with_case_sensitive(call.get_parameter_or("case_sensitive", false));
        if let Some(path) = call.get_optional_parameter::<String>("path")? {
            query = query.with_path(path);
        }
        if let Some(include) = call.get_optional_parameter::<String>("include_pattern")? {
            query = query.with_include(include);
        }

        let result = self.search.search_content(&query)?;
        Ok(ToolResult::success(&call.id, &describe_search(&result))
            .with_data(serde_json::to_value(&result)?))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![
            ToolExample {
                description: "Find TODO comments in Kotlin sources".to_string(),
                parameters: json!({"pattern": "TODO", "include_pattern": "*.kt"}),
                expected_result: "Files containing TODO, project files first".to_string(),
            },
            ToolExample {
                description: "Show matching lines of one file".to_string(),
                parameters: json!({"pattern": "fn \\w+", "path": "src/main.rs"}),
                expected_result: "Each matching line with its 1-based line number".to_string(),
            },
        ]
    }
}

impl_tool_factory!(
    SearchContentToolFactory,
    SearchContentTool,
    "search_content",
    "Search file contents with a regular expression"
);
