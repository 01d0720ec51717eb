//! Terminal and JSON rendering of tool results

use anyhow::Result;
use colored::Colorize;
use filescope_core::tools::ToolResult;
use serde_json::json;

/// Render a tool result for stdout
pub fn render_result(result: &ToolResult, as_json: bool) -> Result<String> {
    if as_json {
        let value = match &result.data {
            Some(data) if result.success => data.clone(),
            Some(data) => json!({ "error": result.content, "data": data }),
            None => json!({ "error": result.content }),
        };
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    if !result.success {
        return Ok(result.content.red().to_string());
    }

    let mut lines = result.content.lines();
    let Some(first) = lines.next() else {
        return Ok(String::new());
    };
    let mut text = first.bold().to_string();
    for line in lines {
        text.push('\n');
        text.push_str(line);
    }
    Ok(text)
}

/// Print a tool result; failures go to stderr
pub fn print_result(result: &ToolResult, as_json: bool) -> Result<()> {
    let text = render_result(result, as_json)?;
    if result.success || as_json {
        println!("{}", text);
    } else {
        eprintln!("{}", text);
    }
    Ok(())
}

/// Render the list of available tools
pub fn render_tools(definitions: &[(String, String)], as_json: bool) -> Result<String> {
    if as_json {
        let tools: Vec<serde_json::Value> = definitions
            .iter()
            .map(|(name, description)| json!({ "name": name, "description": description }))
            .collect();
        return Ok(serde_json::to_string_pretty(&tools)?);
    }

    let mut text = "Available tools\n".bold().to_string();
    for (name, description) in definitions {
        text.push_str(&format!("\n  {:<16} {}", name.cyan(), description));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_render_success_text() {
        plain();
        let result = ToolResult::success("1", "Found 2 files:\na.rs\nb.rs");
        assert_eq!(
            render_result(&result, false).unwrap(),
            "Found 2 files:\na.rs\nb.rs"
        );
    }

    #[test]
    fn test_render_json_prefers_data() {
        let result = ToolResult::success("1", "ignored").with_data(json!({"kind": "found"}));
        let rendered = render_result(&result, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["kind"], "found");

        let failure = ToolResult::error("2", "boom");
        let rendered = render_result(&failure, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["error"], "Error: boom");
    }

    #[test]
    fn test_render_tools() {
        plain();
        let tools = vec![("read_file".to_string(), "Read lines".to_string())];
        let text = render_tools(&tools, false).unwrap();
        assert!(text.contains("read_file"));
        assert!(text.contains("Read lines"));
    }
}
