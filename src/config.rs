//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/localizator/localizator.toml`
//! 3. Project config: `<project_dir>/.localizator.toml`
//! 4. Environment variables: `LOCALIZATOR_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, DEFAULT_LOCALIZATION};
use crate::domain::DEFAULT_SEPARATOR;

/// Unified configuration for localizator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Folder holding one file per localization
    pub directory: PathBuf,
    /// Extension of localization files, including the leading dot
    pub file_extension: String,
    /// One file holding every localization; enables single-file mode
    pub single_file: Option<PathBuf>,
    pub enable_caching: bool,
    /// Prepended to every lookup path
    pub path_prefix: String,
    /// Path separator, `.` or `/`
    pub separator: char,
    pub default_localization: String,
    /// Never write changes back
    pub read_only: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("localization"),
            file_extension: ".json".to_string(),
            single_file: None,
            enable_caching: true,
            path_prefix: String::new(),
            separator: DEFAULT_SEPARATOR,
            default_localization: DEFAULT_LOCALIZATION.to_string(),
            read_only: false,
        }
    }
}

/// Raw settings for intermediate parsing; `None` means "inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub directory: Option<PathBuf>,
    pub file_extension: Option<String>,
    pub single_file: Option<PathBuf>,
    pub enable_caching: Option<bool>,
    pub path_prefix: Option<String>,
    pub separator: Option<char>,
    pub default_localization: Option<String>,
    pub read_only: Option<bool>,
}

/// Get the XDG config directory for localizator.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "localizator").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("localizator.toml"))
}

/// Get the path to the project config file.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".localizator.toml")
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(raw.as_ref()) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in path fields.
    fn expand_paths(&mut self) {
        self.directory = expand(&self.directory);
        self.single_file = self.single_file.as_deref().map(expand);
    }

    /// Anchor relative path fields at `base`.
    fn anchor_paths(&mut self, base: &Path) {
        if self.directory.is_relative() {
            self.directory = base.join(&self.directory);
        }
        if let Some(file) = self.single_file.as_mut() {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }

    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            directory: overlay
                .directory
                .clone()
                .unwrap_or_else(|| self.directory.clone()),
            file_extension: overlay
                .file_extension
                .clone()
                .unwrap_or_else(|| self.file_extension.clone()),
            single_file: overlay
                .single_file
                .clone()
                .or_else(|| self.single_file.clone()),
            enable_caching: overlay.enable_caching.unwrap_or(self.enable_caching),
            path_prefix: overlay
                .path_prefix
                .clone()
                .unwrap_or_else(|| self.path_prefix.clone()),
            separator: overlay.separator.unwrap_or(self.separator),
            default_localization: overlay
                .default_localization
                .clone()
                .unwrap_or_else(|| self.default_localization.clone()),
            read_only: overlay.read_only.unwrap_or(self.read_only),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// Relative paths are resolved against `project_dir` when given.
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(project) = project_dir {
            let local_path = project_config_path(project);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        if let Some(project) = project_dir {
            current.anchor_paths(project);
        }

        Ok(current)
    }

    /// Apply LOCALIZATOR_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("LOCALIZATOR").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("directory") {
            settings.directory = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("file_extension") {
            settings.file_extension = val;
        }
        if let Ok(val) = config.get_string("single_file") {
            settings.single_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("enable_caching") {
            settings.enable_caching = val;
        }
        if let Ok(val) = config.get_string("path_prefix") {
            settings.path_prefix = val;
        }
        if let Ok(val) = config.get_string("separator") {
            let mut chars = val.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => settings.separator = c,
                _ => {
                    return Err(ApplicationError::Config {
                        message: format!("separator must be a single character: {val:?}"),
                    })
                }
            }
        }
        if let Ok(val) = config.get_string("default_localization") {
            settings.default_localization = val;
        }
        if let Ok(val) = config.get_bool("read_only") {
            settings.read_only = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# localizator configuration
#
# Locations (by precedence, lowest to highest):
#   Global:  ~/.config/localizator/localizator.toml
#   Project: <project_dir>/.localizator.toml
#   Env:     LOCALIZATOR_* environment variables

# Folder with one file per localization (<id><file_extension>)
# directory = "localization"

# Extension of localization files, including the dot
# file_extension = ".json"

# Keep every localization in one file, keyed by id at the top level
# single_file = "strings.json"

# Keep loaded trees in memory
# enable_caching = true

# Prepended to every lookup path
# path_prefix = ""

# Path separator: "." or "/"
# separator = "."

# Localization used when none is given
# default_localization = "default"

# Never write changes back
# read_only = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
