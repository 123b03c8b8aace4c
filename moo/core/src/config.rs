//! TOML Configuration File Support
//!
//! Default render options, the share link base URL and an extra template
//! directory can be set in `~/.config/moo/moo.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied with [`ConfigOverrides`])
//! 2. Environment variables (`MOO_COW`, `MOO_WRAP`, `MOO_ACTION`)
//! 3. TOML configuration file
//! 4. Default values
//!
//! # XDG Base Directory Compliance
//!
//! The configuration file is `$XDG_CONFIG_HOME/moo/moo.toml` (typically
//! `~/.config/moo/moo.toml`). `MOO_CONFIG` points somewhere else.
//!
//! # Example Configuration
//!
//! ```toml
//! [defaults]
//! cow = "tux"
//! eyes = "^^"
//! wrap = 60          # or false
//! action = "think"
//!
//! [share]
//! base_url = "https://moo.example"
//!
//! [cows]
//! path = "~/.config/moo/cows"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::balloon::Action;
use crate::compose::{RenderOptions, WrapOption};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "MOO_CONFIG";

/// Share link base used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Wrap as written in TOML: a column or a boolean
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WrapToml {
    /// Wrap column
    Column(i64),
    /// `true` for the default column, `false` for no wrap
    Enabled(bool),
}

impl WrapToml {
    #[allow(clippy::cast_precision_loss)]
    fn to_option(self) -> WrapOption {
        match self {
            Self::Column(column) => WrapOption::Number(column as f64),
            Self::Enabled(true) => WrapOption::Enabled,
            Self::Enabled(false) => WrapOption::Disabled,
        }
    }
}

/// Defaults section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsToml {
    /// Template name
    pub cow: Option<String>,

    /// Mode id or name
    pub mode: Option<String>,

    /// Eyes
    pub eyes: Option<String>,

    /// Tongue
    pub tongue: Option<String>,

    /// Wrap column or `false`
    pub wrap: Option<WrapToml>,

    /// `say` or `think`
    pub action: Option<Action>,
}

/// Share section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareToml {
    /// Site the share links point at
    pub base_url: Option<String>,
}

/// Cows section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CowsToml {
    /// Directory of extra `*.cow` files (`~` is expanded)
    pub path: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MooToml {
    /// Default render options
    pub defaults: DefaultsToml,

    /// Share links
    pub share: ShareToml,

    /// Extra templates
    pub cows: CowsToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration
///
/// Use [`load_config`] to load configuration with proper priority handling.
#[derive(Clone, Debug)]
pub struct MooConfig {
    /// Default template name
    pub cow: Option<String>,

    /// Default mode
    pub mode: Option<String>,

    /// Default eyes
    pub eyes: Option<String>,

    /// Default tongue
    pub tongue: Option<String>,

    /// Default wrap
    pub wrap: WrapOption,

    /// Default action
    pub action: Action,

    /// Share link base URL
    pub base_url: String,

    /// Directory of extra templates
    pub cows_path: Option<PathBuf>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for MooConfig {
    fn default() -> Self {
        Self {
            cow: None,
            mode: None,
            eyes: None,
            tongue: None,
            wrap: WrapOption::Unset,
            action: Action::Say,
            base_url: DEFAULT_BASE_URL.to_string(),
            cows_path: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl MooConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Render options carrying the configured defaults
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            cow: self.cow.clone(),
            mode: self.mode.clone(),
            eyes: self.eyes.clone(),
            tongue: self.tongue.clone(),
            wrap: self.wrap.clone(),
            action: Some(self.action),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "share.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$MOO_CONFIG` if set, otherwise `$XDG_CONFIG_HOME/moo/moo.toml`
/// or `~/.config/moo/moo.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|path| !path.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|p| p.join("moo").join("moo.toml"))
}

/// Load configuration from all sources with proper priority
///
/// Priority order (highest first):
/// 1. CLI arguments (not handled here - caller should apply after)
/// 2. Environment variables
/// 3. TOML configuration file
/// 4. Default values
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed or holds
/// invalid values. A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<MooConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<MooConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration reading environment variables through `env`
///
/// # Errors
///
/// See [`load_config_from_path`].
pub fn load_config_with_env(
    path: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<MooConfig, ConfigError> {
    // Start with defaults
    let mut config = MooConfig::default();

    // Try to load from file
    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: MooToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    config.validate()?;

    // Apply environment variables (overrides file values)
    apply_env_config(&mut config, env);

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut MooConfig, toml: &MooToml) {
    // Render defaults
    if toml.defaults.cow.is_some() {
        config.cow = toml.defaults.cow.clone();
    }
    if toml.defaults.mode.is_some() {
        config.mode = toml.defaults.mode.clone();
    }
    if toml.defaults.eyes.is_some() {
        config.eyes = toml.defaults.eyes.clone();
    }
    if toml.defaults.tongue.is_some() {
        config.tongue = toml.defaults.tongue.clone();
    }
    if let Some(wrap) = toml.defaults.wrap {
        config.wrap = wrap.to_option();
    }
    if let Some(action) = toml.defaults.action {
        config.action = action;
    }

    // Share settings
    if let Some(ref base_url) = toml.share.base_url {
        config.base_url.clone_from(base_url);
    }

    // Template directory
    if let Some(ref path) = toml.cows.path {
        config.cows_path = Some(expand_home(path));
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut MooConfig, env: impl Fn(&str) -> Option<String>) {
    if let Some(cow) = env("MOO_COW").filter(|cow| !cow.is_empty()) {
        config.cow = Some(cow);
        config.source = ConfigSource::Env;
    }

    if let Some(wrap) = env("MOO_WRAP") {
        config.wrap = match wrap.to_lowercase().as_str() {
            "false" | "off" | "no" => WrapOption::Disabled,
            "true" | "on" | "yes" => WrapOption::Enabled,
            _ => WrapOption::Text(wrap),
        };
        config.source = ConfigSource::Env;
    }

    if let Some(action) = env("MOO_ACTION") {
        let parsed = match action.to_lowercase().as_str() {
            "say" => Some(Action::Say),
            "think" => Some(Action::Think),
            _ => None,
        };
        match parsed {
            Some(parsed) => {
                config.action = parsed;
                config.source = ConfigSource::Env;
            }
            None => tracing::warn!(action = %action, "Ignoring unknown MOO_ACTION"),
        }
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => dirs::home_dir().map_or_else(
            || PathBuf::from(path),
            |home| home.join(rest.trim_start_matches('/')),
        ),
        _ => PathBuf::from(path),
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Template name override
    pub cow: Option<String>,

    /// Mode override
    pub mode: Option<String>,

    /// Eyes override
    pub eyes: Option<String>,

    /// Tongue override
    pub tongue: Option<String>,

    /// Wrap override
    pub wrap: Option<WrapOption>,

    /// Action override
    pub action: Option<Action>,

    /// Template directory override
    pub cows_path: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set template name override
    #[must_use]
    pub fn with_cow(mut self, cow: String) -> Self {
        self.cow = Some(cow);
        self
    }

    /// Set mode override
    #[must_use]
    pub fn with_mode(mut self, mode: String) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set eyes override
    #[must_use]
    pub fn with_eyes(mut self, eyes: String) -> Self {
        self.eyes = Some(eyes);
        self
    }

    /// Set tongue override
    #[must_use]
    pub fn with_tongue(mut self, tongue: String) -> Self {
        self.tongue = Some(tongue);
        self
    }

    /// Set wrap override
    #[must_use]
    pub fn with_wrap(mut self, wrap: WrapOption) -> Self {
        self.wrap = Some(wrap);
        self
    }

    /// Set action override
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Set template directory override
    #[must_use]
    pub fn with_cows_path(mut self, path: PathBuf) -> Self {
        self.cows_path = Some(path);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cow.is_none()
            && self.mode.is_none()
            && self.eyes.is_none()
            && self.tongue.is_none()
            && self.wrap.is_none()
            && self.action.is_none()
            && self.cows_path.is_none()
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut MooConfig) {
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref cow) = self.cow {
            config.cow = Some(cow.clone());
        }

        // An explicit face on the command line replaces a configured mode
        if self.mode.is_some() || self.eyes.is_some() || self.tongue.is_some() {
            config.mode.clone_from(&self.mode);
        }
        if let Some(ref eyes) = self.eyes {
            config.eyes = Some(eyes.clone());
        }
        if let Some(ref tongue) = self.tongue {
            config.tongue = Some(tongue.clone());
        }

        if let Some(ref wrap) = self.wrap {
            config.wrap = wrap.clone();
        }
        if let Some(action) = self.action {
            config.action = action;
        }
        if let Some(ref path) = self.cows_path {
            config.cows_path = Some(path.clone());
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
