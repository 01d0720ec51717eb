//! Glob pattern matching with layered backends
//!
//! A pattern is compiled by the first backend that accepts it: `globset`,
//! then the `glob` crate. When every backend rejects the pattern, a small
//! set of hand-written rules takes over:
//! - `**` matches everything
//! - `dir/file` patterns need `/dir/` in the candidate and `file` to match
//!   the basename (`**/file` and `*/file` match at any depth)
//! - `*.ext` matches by suffix
//! - `prefix{a,b}` matches any expanded alternative
//! - other `*`/`?` patterns become an anchored regex over the basename
//!
//! Patterns without a `/` are always matched against the basename.

use crate::vfs::paths;
use globset::GlobBuilder;
use regex::Regex;
use tracing::debug;

const WILDCARDS: &[char] = &['*', '?', '[', '{'];

/// Whether `text` contains any glob metacharacter
pub fn has_wildcards(text: &str) -> bool {
    text.contains(WILDCARDS)
}

/// Glob engines tried in order when compiling a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobBackend {
    /// `globset` with path-aware `*`
    Globset,
    /// `glob::Pattern` with literal separators
    GlobPattern,
}

impl GlobBackend {
    fn compile(self, pattern: &str) -> Result<Compiled, String> {
        match self {
            GlobBackend::Globset => GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map(|glob| Compiled::Globset(glob.compile_matcher()))
                .map_err(|e| e.to_string()),
            GlobBackend::GlobPattern => glob::Pattern::new(pattern)
                .map(Compiled::GlobPattern)
                .map_err(|e| e.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
enum Compiled {
    Everything,
    Globset(globset::GlobMatcher),
    GlobPattern(glob::Pattern),
    Rules,
}

/// A pattern compiled once and matched against many candidates
#[derive(Debug, Clone)]
pub struct CompiledGlob {
    pattern: String,
    directory_aware: bool,
    compiled: Compiled,
}

impl CompiledGlob {
    /// The source pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match a relative path or bare name
    pub fn is_match(&self, candidate: &str) -> bool {
        let candidate = candidate.replace('\\', "/");
        let subject = if self.directory_aware {
            candidate.as_str()
        } else {
            paths::basename(&candidate)
        };

        match &self.compiled {
            Compiled::Everything => true,
            Compiled::Globset(matcher) => matcher.is_match(subject),
            Compiled::GlobPattern(pattern) => pattern.matches_with(
                subject,
                glob::MatchOptions {
                    case_sensitive: true,
                    require_literal_separator: true,
                    require_literal_leading_dot: false,
                },
            ),
            Compiled::Rules => rules_match(&candidate, &self.pattern),
        }
    }
}

/// Glob matcher with an ordered backend chain
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    backends: Vec<GlobBackend>,
}

impl GlobMatcher {
    /// Matcher using every backend: `globset` first, then `glob`
    pub fn new() -> Self {
        Self::with_backends(vec![GlobBackend::Globset, GlobBackend::GlobPattern])
    }

    /// Matcher with an explicit backend order; an empty list means the
    /// built-in rules only
    pub fn with_backends(backends: Vec<GlobBackend>) -> Self {
        Self { backends }
    }

    /// Compile `pattern` with the first backend that accepts it
    pub fn compile(&self, pattern: &str) -> CompiledGlob {
        let pattern = pattern.trim().replace('\\', "/");
        let directory_aware = pattern.contains('/');

        let compiled = if pattern == "**" {
            Compiled::Everything
        } else {
            self.backends
                .iter()
                .find_map(|backend| match backend.compile(&pattern) {
                    Ok(compiled) => Some(compiled),
                    Err(e) => {
                        debug!("{:?} rejected glob '{}': {}", backend, pattern, e);
                        None
                    }
                })
                .unwrap_or(Compiled::Rules)
        };

        CompiledGlob {
            pattern,
            directory_aware,
            compiled,
        }
    }

    /// Whether `candidate` (a relative path or a name) matches `pattern`
    pub fn matches(&self, candidate: &str, pattern: &str) -> bool {
        self.compile(pattern).is_match(candidate)
    }
}

impl Default for GlobMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// The fallback rules used when no backend can compile a pattern
pub fn rules_match(candidate: &str, pattern: &str) -> bool {
    if pattern == "**" {
        return true;
    }

    let name = paths::basename(candidate);
    match pattern.rsplit_once('/') {
        Some((dir_pattern, file_pattern)) => {
            if dir_pattern == "**" || dir_pattern == "*" {
                return name_matches(name, file_pattern);
            }
            let dir_pattern = dir_pattern.trim_start_matches("**/").trim_matches('/');
            let anchored = format!("/{}", candidate.trim_start_matches('/'));
            anchored.contains(&format!("/{dir_pattern}/")) && name_matches(name, file_pattern)
        }
        None => name_matches(name, pattern),
    }
}

fn name_matches(name: &str, pattern: &str) -> bool {
    if pattern == "*" || pattern == "**" {
        return true;
    }

    if let Some(ext) = pattern.strip_prefix("*.") {
        if !ext.is_empty() && !has_wildcards(ext) {
            return name.ends_with(&format!(".{ext}"));
        }
    }

    if let Some(open) = pattern.find('{') {
        if let Some(close) = pattern[open..].find('}').map(|offset| open + offset) {
            let prefix = &pattern[..open];
            let suffix = &pattern[close + 1..];
            return pattern[open + 1..close]
                .split(',')
                .any(|alternative| name_matches(name, &format!("{prefix}{alternative}{suffix}")));
        }
    }

    if pattern.contains(['*', '?']) {
        return match wildcard_regex(pattern) {
            Ok(regex) => regex.is_match(name),
            Err(e) => {
                debug!("Wildcard pattern '{}' failed to compile: {}", pattern, e);
                false
            }
        };
    }

    name == pattern
}

fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');
    Regex::new(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_cases() {
        let matcher = GlobMatcher::new();
        assert!(matcher.matches("src/index.js", "**/*.js"));
        assert!(!matcher.matches("README.md", "*.kt"));
        assert!(matcher.matches("app.ts", "*.{js,ts}"));
        assert!(matcher.matches("anything/at/all", "**"));
    }

    #[test]
    fn test_name_patterns_match_at_any_depth() {
        let matcher = GlobMatcher::new();
        assert!(matcher.matches("src/deep/lib.rs", "*.rs"));
        assert!(matcher.matches("src/test_utils.py", "test_*.py"));
        assert!(matcher.matches("file1.txt", "file?.txt"));
        assert!(!matcher.matches("file10.txt", "file?.txt"));
    }

    #[test]
    fn test_directory_aware_patterns() {
        let matcher = GlobMatcher::new();
        assert!(matcher.matches("src/main.rs", "src/*.rs"));
        assert!(!matcher.matches("src/nested/main.rs", "src/*.rs"));
        assert!(matcher.matches("src/nested/main.rs", "src/**/*.rs"));
        assert!(!matcher.matches("lib/main.rs", "src/*.rs"));
    }

    #[test]
    fn test_each_backend_handles_the_documented_cases() {
        for backends in [vec![GlobBackend::GlobPattern], vec![]] {
            let matcher = GlobMatcher::with_backends(backends.clone());
            assert!(matcher.matches("src/index.js", "**/*.js"), "{:?}", backends);
            assert!(!matcher.matches("README.md", "*.kt"), "{:?}", backends);
            assert!(matcher.matches("anything/at/all", "**"), "{:?}", backends);
        }

        let rules_only = GlobMatcher::with_backends(vec![]);
        assert!(rules_only.matches("app.ts", "*.{js,ts}"));
        assert!(!rules_only.matches("app.rs", "*.{js,ts}"));
    }

    #[test]
    fn test_fallback_rules() {
        assert!(rules_match("project/src/main/App.kt", "src/*.kt"));
        assert!(!rules_match("project/lib/App.kt", "src/*.kt"));
        assert!(rules_match("a/b/App.kt", "**/App.kt"));
        assert!(rules_match("Build.gradle.kts", "Build.*"));
        assert!(rules_match("config.yaml", "config.{yml,yaml}"));
        assert!(rules_match("a+b.txt", "a+b.*"));
        assert!(!rules_match("aab.txt", "a+b.*"));
    }

    #[test]
    fn test_malformed_pattern_falls_back_to_rules() {
        let matcher = GlobMatcher::new();
        // Unclosed class is rejected by both backends
        assert!(matcher.matches("[abc", "[abc"));
        assert!(!matcher.matches("abc", "[abc"));
    }
}
