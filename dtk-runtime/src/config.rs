//! # Runtime Configuration
//!
//! [RuntimeConfig] controls caching, dark mode, the fallback theme, preloading
//! and validation. It can be built programmatically, read from a TOML file or
//! taken from environment variables.
//!
//! ## Environment Variables
//!
//! ```bash
//! export DTK_RUNTIME_CONFIG=/etc/dtk/runtime.toml
//! export DTK_FALLBACK_THEME=default
//! export DTK_PRELOAD_THEMES=default,dark,high-contrast
//! export DTK_DARK_MODE=true
//! export DTK_CACHE=false
//! ```
//!
//! ## Configuration File
//!
//! ```toml
//! [runtime]
//! enable_caching = true
//! enable_dark_mode = true
//! fallback_theme = "default"
//! preload_themes = ["default", "dark"]
//! validate_tokens = false
//! max_alias_depth = 32
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RuntimeError, RuntimeResult};

/// Default limit on alias chain length.
pub const DEFAULT_MAX_ALIAS_DEPTH: usize = 32;

/// Configuration for a [Runtime](crate::Runtime).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Cache resolved token values and class names.
    pub enable_caching: bool,
    /// Allow dark mode and compile dark stylesheets.
    pub enable_dark_mode: bool,
    /// Theme tried once when the requested theme fails to load.
    pub fallback_theme: Option<String>,
    /// Themes loaded in the background when the runtime is created.
    pub preload_themes: Vec<String>,
    /// Validate each theme after loading and log the findings.
    pub validate_tokens: bool,
    /// Maximum alias chain length.
    pub max_alias_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            enable_caching: true,
            enable_dark_mode: true,
            fallback_theme: Some("default".to_string()),
            preload_themes: Vec::new(),
            validate_tokens: false,
            max_alias_depth: DEFAULT_MAX_ALIAS_DEPTH,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    runtime: RuntimeConfig,
}

impl RuntimeConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables or use defaults.
    ///
    /// `DTK_RUNTIME_CONFIG` names a TOML file applied first. Then
    /// `DTK_FALLBACK_THEME`, `DTK_PRELOAD_THEMES`, `DTK_DARK_MODE` and
    /// `DTK_CACHE` override single fields. A config file that fails to load
    /// is logged and skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dtk_runtime::RuntimeConfig;
    ///
    /// let config = RuntimeConfig::from_env_or_default();
    /// ```
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(path) = lookup("DTK_RUNTIME_CONFIG") {
            match Self::from_file(&path) {
                Ok(file_config) => config = file_config,
                Err(e) => log::warn!("Ignoring runtime config {}: {}", path, e),
            }
        }

        if let Some(fallback) = lookup("DTK_FALLBACK_THEME") {
            let fallback = fallback.trim();
            config.fallback_theme = (!fallback.is_empty()).then(|| fallback.to_string());
        }

        if let Some(preload) = lookup("DTK_PRELOAD_THEMES") {
            config.preload_themes = preload
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(value) = lookup("DTK_DARK_MODE").and_then(|v| parse_bool(&v)) {
            config.enable_dark_mode = value;
        }

        if let Some(value) = lookup("DTK_CACHE").and_then(|v| parse_bool(&v)) {
            config.enable_caching = value;
        }

        config
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the `.toml` configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> RuntimeResult<Self> {
        let path = path.as_ref();

        if path.extension().and_then(|s| s.to_str()) != Some("toml") {
            return Err(RuntimeError::config(
                Some(path.to_path_buf()),
                "unsupported configuration file format, use .toml",
            ));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            RuntimeError::Config { details, .. } => {
                RuntimeError::config(Some(path.to_path_buf()), details)
            }
            other => other,
        })
    }

    /// Load configuration from TOML content with a `[runtime]` table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dtk_runtime::RuntimeConfig;
    ///
    /// let config = RuntimeConfig::from_toml(r#"
    /// [runtime]
    /// fallback_theme = "light"
    /// enable_caching = false
    /// "#).unwrap();
    ///
    /// assert_eq!(config.fallback_theme.as_deref(), Some("light"));
    /// assert!(!config.enable_caching);
    /// assert!(config.enable_dark_mode);
    /// ```
    pub fn from_toml(content: &str) -> RuntimeResult<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| RuntimeError::config(None, e.to_string()))?;
        file.runtime.validated()
    }

    fn validated(self) -> RuntimeResult<Self> {
        if self.max_alias_depth == 0 {
            return Err(RuntimeError::config(None, "max_alias_depth must be at least 1"));
        }
        Ok(self)
    }

    /// Set the fallback theme.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dtk_runtime::RuntimeConfig;
    ///
    /// let config = RuntimeConfig::new().with_fallback_theme("light");
    /// assert_eq!(config.fallback_theme.as_deref(), Some("light"));
    /// ```
    pub fn with_fallback_theme(mut self, id: impl Into<String>) -> Self {
        self.fallback_theme = Some(id.into());
        self
    }

    /// Disable the fallback theme.
    pub fn without_fallback(mut self) -> Self {
        self.fallback_theme = None;
        self
    }

    /// Set the themes to preload.
    pub fn with_preload_themes<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preload_themes = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable dark mode.
    pub fn with_dark_mode(mut self, enabled: bool) -> Self {
        self.enable_dark_mode = enabled;
        self
    }

    /// Enable or disable the token and class caches.
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.enable_caching = enabled;
        self
    }

    /// Enable or disable validation after each load.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_tokens = enabled;
        self
    }

    /// Set the alias chain limit. Values below 1 are raised to 1.
    pub fn with_max_alias_depth(mut self, depth: usize) -> Self {
        self.max_alias_depth = depth.max(1);
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
