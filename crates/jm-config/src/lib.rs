//! Configuration management for jm.
//!
//! Parses `jm.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `import.jive_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default input size limit in bytes (1 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Default nesting depth limit for lists and quotes.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 16;

/// Largest accepted `converter.max_nesting_depth`.
pub const MAX_NESTING_DEPTH_LIMIT: usize = 64;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "jm.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override input size limit.
    pub max_input_bytes: Option<usize>,
    /// Override nesting depth limit.
    pub max_nesting_depth: Option<usize>,
    /// Override the old forum URL.
    pub jive_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Converter limits.
    pub converter: ConverterConfig,
    /// Forum import settings.
    pub import: ImportConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Converter limits.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Inputs longer than this many bytes are rejected.
    pub max_input_bytes: usize,
    /// Deepest allowed list nesting or quote recursion.
    pub max_nesting_depth: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Forum import settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Base URL of the old Jive forum, stripped from internal links and used
    /// in legacy footers.
    pub jive_url: Option<String>,
}

impl ImportConfig {
    /// Get the validated Jive URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `import.jive_url` is not set.
    pub fn require_jive_url(&self) -> Result<&str, ConfigError> {
        self.jive_url.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "import.jive_url is required (set it in jm.toml or pass --jive-url)".to_owned(),
            )
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`import.jive_url`").
        field: String,
        /// Error message (e.g., "${`JIVE_URL`} not set").
        message: String,
    },
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `jm.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The result is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(max_input_bytes) = settings.max_input_bytes {
            self.converter.max_input_bytes = max_input_bytes;
        }
        if let Some(max_nesting_depth) = settings.max_nesting_depth {
            self.converter.max_nesting_depth = max_nesting_depth;
        }
        if let Some(jive_url) = &settings.jive_url {
            self.import.jive_url = Some(jive_url.clone());
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_converter()?;
        self.validate_import()?;
        Ok(())
    }

    fn validate_converter(&self) -> Result<(), ConfigError> {
        if self.converter.max_input_bytes == 0 {
            return Err(ConfigError::Validation(
                "converter.max_input_bytes must be greater than 0".to_owned(),
            ));
        }

        let depth = self.converter.max_nesting_depth;
        if depth == 0 {
            return Err(ConfigError::Validation(
                "converter.max_nesting_depth must be greater than 0".to_owned(),
            ));
        }
        if depth > MAX_NESTING_DEPTH_LIMIT {
            return Err(ConfigError::Validation(format!(
                "converter.max_nesting_depth cannot exceed {MAX_NESTING_DEPTH_LIMIT}"
            )));
        }

        Ok(())
    }

    fn validate_import(&self) -> Result<(), ConfigError> {
        if let Some(ref jive_url) = self.import.jive_url {
            require_http_url(jive_url, "import.jive_url")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.import.jive_url {
            self.import.jive_url = Some(expand::expand_env(url, "import.jive_url")?);
        }
        Ok(())
    }
}
