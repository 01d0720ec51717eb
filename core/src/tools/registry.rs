//! Tool registry for managing available tools

use crate::search::FileSearch;
use crate::tools::{Tool, ToolExecutor};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for managing tool creation and registration
pub struct ToolRegistry {
    factories: HashMap<String, Box<dyn ToolFactory>>,
}

/// Factory trait for creating tools bound to a project search
pub trait ToolFactory: Send + Sync {
    /// Create a new instance of the tool
    fn create(&self, search: Arc<FileSearch>) -> Box<dyn Tool>;

    /// Get the name of the tool this factory creates
    fn tool_name(&self) -> &str;

    /// Get the description of the tool this factory creates
    fn tool_description(&self) -> &str;
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a tool factory
    pub fn register_factory(&mut self, factory: Box<dyn ToolFactory>) {
        self.factories.insert(factory.tool_name().to_string(), factory);
    }

    /// Create a tool by name
    pub fn create_tool(&self, name: &str, search: Arc<FileSearch>) -> Option<Box<dyn Tool>> {
        self.factories.get(name).map(|factory| factory.create(search))
    }

    /// List all available tool names, sorted
    pub fn list_tools(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get tool information
    pub fn get_tool_info(&self, name: &str) -> Option<(&str, &str)> {
        self.factories
            .get(name)
            .map(|factory| (factory.tool_name(), factory.tool_description()))
    }

    /// Create a tool executor with the specified tools
    pub fn create_executor(&self, tool_names: &[String], search: Arc<FileSearch>) -> ToolExecutor {
        let mut executor = ToolExecutor::new();

        for name in tool_names {
            if let Some(tool) = self.create_tool(name, Arc::clone(&search)) {
                executor.register_tool(tool);
            }
        }

        executor
    }

    /// Create a tool executor with all available tools
    pub fn create_executor_with_all(&self, search: Arc<FileSearch>) -> ToolExecutor {
        let mut executor = ToolExecutor::new();

        for factory in self.factories.values() {
            executor.register_tool(factory.create(Arc::clone(&search)));
        }

        executor
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        registry.register_factory(Box::new(crate::tools::builtin::FindFileToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::SearchContentToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::GlobSearchToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::ListDirectoryToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::ReadFileToolFactory));

        registry
    }
}

/// Macro to help implement tool factories
#[macro_export]
macro_rules! impl_tool_factory {
    ($factory:ident, $tool:ident, $name:expr, $description:expr) => {
        pub struct $factory;

        impl $crate::tools::ToolFactory for $factory {
            fn create(
                &self,
                search: ::std::sync::Arc<$crate::search::FileSearch>,
            ) -> Box<dyn $crate::tools::Tool> {
                Box::new($tool::new(search))
            }

            fn tool_name(&self) -> &str {
                $name
            }

            fn tool_description(&self) -> &str {
                $description
            }
        }
    };
}
