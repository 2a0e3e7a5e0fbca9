//! Scoring model configuration.
//!
//! Published revisions of the readability formula disagree on the exact
//! coefficient values, so the engine never hard-codes a revision outside
//! [`Coefficients::default`]. A deployment pins its model by shipping a
//! config file (or environment overrides) that the loader merges over the
//! defaults.
//!
//! # Supported formats
//!
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! # Config file locations (in order of precedence, highest first):
//! - explicit files passed via [`ModelConfigLoader::with_file`]
//! - `lint-nl.<ext>` in the search directory or any parent
//! - `.lint-nl.<ext>` in the search directory or any parent
//!
//! When multiple files exist in the same directory, all are merged via
//! figment with later extensions overriding earlier. Environment variables
//! prefixed `LINT_NL_` override everything.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisOptions;
use crate::error::{ConfigError, ConfigResult};
use crate::scoring::Coefficients;

/// The configuration for a readability model deployment.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Regression coefficients; defaults to the reference fit.
    pub coefficients: Coefficients,
    /// Analysis tunables (compound adjustment, report verbosity).
    pub analysis: AnalysisOptions,
    /// Free-form identifier of the coefficient revision in use.
    pub model_version: Option<String>,
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Config file base name.
const APP_NAME: &str = "lint-nl";

/// Builder for loading the model configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ModelConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load (for testing or programmatic use).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ModelConfigLoader {
    /// Create a loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader walks up from this directory looking for config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set a boundary marker to stop directory traversal. Default is `.git`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Disable the boundary marker (search all the way to the filesystem
    /// root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load the configuration, merging all discovered sources.
    ///
    /// Precedence (highest to lowest):
    /// 1. `LINT_NL_` environment variables
    /// 2. Explicit files (in order added via `with_file`)
    /// 3. Project config (closest directory with any match)
    /// 4. Default values
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<ModelConfig> {
        tracing::debug!("loading model configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(ModelConfig::default()));

        if let Some(ref root) = self.project_search_root {
            for pc in self.find_project_configs(root) {
                figment = Self::merge_file(figment, &pc);
            }
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }

        figment = figment.merge(Env::prefixed("LINT_NL_").lowercase(true));

        let config: ModelConfig = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(model_version = ?config.model_version, "model configuration loaded");
        Ok(config)
    }

    /// Load the configuration, erroring if no config file is found.
    pub fn load_or_error(self) -> ConfigResult<ModelConfig> {
        let has_project = self
            .project_search_root
            .as_ref()
            .map(|root| !self.find_project_configs(root).is_empty())
            .unwrap_or(false);
        let has_explicit = !self.explicit_files.is_empty();

        if !has_project && !has_explicit {
            return Err(ConfigError::NotFound);
        }

        self.load()
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns all matching files from the closest directory that has any
    /// match, ordered low-to-high precedence: dotfiles before regular files.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();

            for ext in CONFIG_EXTENSIONS {
                let dotfile = dir.join(format!(".{APP_NAME}.{ext}"));
                if dotfile.is_file() {
                    found.push(dotfile);
                }
            }
            for ext in CONFIG_EXTENSIONS {
                let regular = dir.join(format!("{APP_NAME}.{ext}"));
                if regular.is_file() {
                    found.push(regular);
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Check for the boundary marker AFTER checking config files,
            // so a config in the same directory as the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Merge a config file into the figment, detecting format from the
    /// extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables via
    /// `set_var`/`remove_var`.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn default_config_carries_the_reference_fit() {
        let config = ModelConfig::default();
        assert_eq!(config.coefficients, Coefficients::default());
        assert!(config.analysis.compound_frequency_adjustment);
        assert!(config.model_version.is_none());
    }

    #[test]
    fn loader_succeeds_with_defaults_when_nothing_found() {
        let config = ModelConfigLoader::new()
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config, ModelConfig::default());
    }

    #[test]
    fn file_overrides_default_coefficients() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("model.toml");
        fs::write(
            &config_path,
            r#"model_version = "2019-fit"

[coefficients]
constant = -5.16
"#,
        )
        .unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        let config = ModelConfigLoader::new()
            .with_file(&config_path)
            .load()
            .unwrap();

        assert_eq!(config.coefficients.constant, -5.16);
        // Unset weights keep their defaults.
        assert_eq!(config.coefficients.frequency, Coefficients::default().frequency);
        assert_eq!(config.model_version.as_deref(), Some("2019-fit"));
    }

    #[test]
    fn later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base.toml");
        fs::write(&base, "model_version = \"a\"\n").unwrap();
        let over = tmp.path().join("override.toml");
        fs::write(&over, "model_version = \"b\"\n").unwrap();

        let base = Utf8PathBuf::try_from(base).unwrap();
        let over = Utf8PathBuf::try_from(over).unwrap();

        let config = ModelConfigLoader::new()
            .with_file(&base)
            .with_file(&over)
            .load()
            .unwrap();
        assert_eq!(config.model_version.as_deref(), Some("b"));
    }

    #[test]
    fn project_config_discovered_by_walking_up() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        let deep = project.join("texts").join("deep");
        fs::create_dir_all(&deep).unwrap();
        fs::write(project.join(".lint-nl.toml"), "model_version = \"v2\"\n").unwrap();

        let deep = Utf8PathBuf::try_from(deep).unwrap();

        let config = ModelConfigLoader::new()
            .without_boundary_marker()
            .with_project_search(&deep)
            .load()
            .unwrap();
        assert_eq!(config.model_version.as_deref(), Some("v2"));
    }

    #[test]
    fn boundary_marker_stops_the_search() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();

        fs::write(parent.join(".lint-nl.toml"), "model_version = \"far\"\n").unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();

        let config = ModelConfigLoader::new()
            .with_boundary_marker(".git")
            .with_project_search(&work)
            .load()
            .unwrap();
        assert!(config.model_version.is_none());
    }

    #[test]
    fn regular_file_overrides_dotfile() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".lint-nl.toml"), "model_version = \"dot\"\n").unwrap();
        fs::write(tmp.path().join("lint-nl.toml"), "model_version = \"reg\"\n").unwrap();

        let tmp_path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let config = ModelConfigLoader::new()
            .without_boundary_marker()
            .with_project_search(&tmp_path)
            .load()
            .unwrap();
        assert_eq!(config.model_version.as_deref(), Some("reg"));
    }

    #[test]
    fn load_or_error_fails_when_no_config() {
        let result = ModelConfigLoader::new()
            .without_boundary_marker()
            .load_or_error();
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn yaml_config_loads() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("model.yaml");
        fs::write(
            &config_path,
            "coefficients:\n  concrete: 11.72\nanalysis:\n  least_frequent_words: 3\n",
        )
        .unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        let config = ModelConfigLoader::new()
            .with_file(&config_path)
            .load()
            .unwrap();
        assert_eq!(config.coefficients.concrete, 11.72);
        assert_eq!(config.analysis.least_frequent_words, 3);
    }

    #[test]
    #[allow(unsafe_code)]
    fn env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("model.toml");
        fs::write(&config_path, "model_version = \"file\"\n").unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        // SAFETY: Test environment — mutex serializes env access across tests.
        unsafe {
            std::env::set_var("LINT_NL_MODEL_VERSION", "env");
        }

        let config = ModelConfigLoader::new()
            .with_file(&config_path)
            .load()
            .unwrap();
        assert_eq!(config.model_version.as_deref(), Some("env"));

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("LINT_NL_MODEL_VERSION");
        }
    }
}
