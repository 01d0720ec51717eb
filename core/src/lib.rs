//! # filescope Core
//!
//! Project-aware file search and path resolution.
//!
//! This library resolves partial or ambiguous paths against a project and its
//! libraries, lists directories, and runs bounded content and glob searches
//! that always rank project files ahead of library files. Everything is
//! exposed both as plain functions on [`FileSearch`] and as [`tools`] with
//! JSON parameters.

// Core modules
pub mod config;
pub mod error;
pub mod search;
pub mod tools;
pub mod vfs;

// Re-export commonly used types
pub use config::SearchConfig;
pub use error::{Error, Result};
pub use search::{
    ContentQuery, DirectoryEntry, DirectoryListing, FileContent, FileSearch, GlobMatcher,
    GlobQuery, SearchContentResult, SearchResult,
};
pub use vfs::{Host, LocalHost, PathEntry};

/// Current version of the filescope-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
