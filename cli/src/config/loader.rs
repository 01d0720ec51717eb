//! CLI configuration loader for filescope
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./filescope.json or ./.filescope/config.json
//! 3. Git repository root: <repo_root>/.filescope/config.json
//! 4. User config dir: <config_dir>/filescope/config.json
//! 5. Built-in defaults
//!
//! Library roots from `FILESCOPE_LIBRARY_ROOTS` and `--library` are appended
//! to whatever the file declares.

use anyhow::{anyhow, Context, Result};
use filescope_core::SearchConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding extra library roots (platform path-list syntax)
pub const LIBRARY_ROOTS_ENV: &str = "FILESCOPE_LIBRARY_ROOTS";

const CONFIG_FILE_NAME: &str = "filescope.json";
const CONFIG_DIR_NAME: &str = ".filescope";

/// CLI configuration loader
#[derive(Debug, Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    library_overrides: Vec<PathBuf>,
    max_results_override: Option<usize>,
    disable_gitignore: bool,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Add library roots on top of the configured ones
    pub fn with_library_overrides(mut self, roots: Vec<PathBuf>) -> Self {
        self.library_overrides.extend(roots);
        self
    }

    /// Set max results override
    pub fn with_max_results_override(mut self, max_results: usize) -> Self {
        self.max_results_override = Some(max_results);
        self
    }

    /// Ignore .gitignore rules
    pub fn with_gitignore_disabled(mut self) -> Self {
        self.disable_gitignore = true;
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<SearchConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Environment overrides
        if let Some(roots) = std::env::var_os(LIBRARY_ROOTS_ENV) {
            config.library_roots.extend(std::env::split_paths(&roots));
        }

        // Step 3: Flag overrides
        config
            .library_roots
            .extend(self.library_overrides.iter().cloned());
        if let Some(max_results) = self.max_results_override {
            config.max_results = max_results;
        }
        if self.disable_gitignore {
            config = config.with_gitignore(false);
        }

        config.library_roots = config
            .library_roots
            .iter()
            .map(|root| expand_tilde(root))
            .collect();

        config
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<SearchConfig> {
        // 1. Current working directory
        if let Some(config) = self.try_load_cwd().await? {
            return Ok(config);
        }

        // 2. Git repository root
        if let Some(config) = self.try_load_git_root().await? {
            return Ok(config);
        }

        // 3. User config directory
        if let Some(config) = self.try_load_user_config().await? {
            return Ok(config);
        }

        debug!("No configuration file found; using defaults");
        Ok(SearchConfig::default())
    }

    /// Try loading from current working directory
    async fn try_load_cwd(&self) -> Result<Option<SearchConfig>> {
        let cwd = std::env::current_dir()?;

        let config_json = cwd.join(CONFIG_FILE_NAME);
        if config_json.exists() {
            return Ok(Some(self.load_file(&config_json).await?));
        }

        let dir_config = cwd.join(CONFIG_DIR_NAME).join("config.json");
        if dir_config.exists() {
            return Ok(Some(self.load_file(&dir_config).await?));
        }

        Ok(None)
    }

    /// Try loading from git repository root
    async fn try_load_git_root(&self) -> Result<Option<SearchConfig>> {
        if let Some(git_root) = self.find_git_root()? {
            let config_path = git_root.join(CONFIG_DIR_NAME).join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Try loading from the platform config directory
    async fn try_load_user_config(&self) -> Result<Option<SearchConfig>> {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("filescope").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<SearchConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<SearchConfig> {
        debug!("Loading configuration from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find git repository root
    fn find_git_root(&self) -> Result<Option<PathBuf>> {
        let mut current = std::env::current_dir()?;

        loop {
            if current.join(".git").exists() {
                return Ok(Some(current));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_from_file_override() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.json");
        std::fs::write(&config_path, r#"{"max_results": 7, "respect_gitignore": false}"#).unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(config_path)
            .load()
            .await
            .unwrap();
        assert_eq!(config.max_results, 7);
        assert!(!config.respect_gitignore);
        assert_eq!(config.max_line_length, 2000);
    }

    #[tokio::test]
    async fn test_load_from_directory_override() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.json"), r#"{"max_results": 3}"#).unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(temp_dir.path().to_path_buf())
            .with_max_results_override(11)
            .with_gitignore_disabled()
            .load()
            .await
            .unwrap();
        assert_eq!(config.max_results, 11);
        assert!(!config.respect_gitignore);
    }

    #[tokio::test]
    async fn test_missing_override_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = CliConfigLoader::new()
            .with_config_override(temp_dir.path().join("nope.json"))
            .load()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(&config_path, r#"{"max_line_length": 0}"#).unwrap();

        let result = CliConfigLoader::new()
            .with_config_override(config_path)
            .load()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_library_flags_are_appended_and_expanded() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(&config_path, r#"{"library_roots": ["/opt/libs"]}"#).unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(config_path)
            .with_library_overrides(vec![PathBuf::from("/srv/vendor")])
            .load()
            .await
            .unwrap();
        assert!(config.library_roots.contains(&PathBuf::from("/opt/libs")));
        assert!(config.library_roots.contains(&PathBuf::from("/srv/vendor")));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde(Path::new("/abs/path")), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/libs")), home.join("libs"));
        }
    }
}
