//! # Tenant Customization
//!
//! A [TenantConfig] controls which themes a tenant may activate and layers
//! the tenant's own values over every theme it loads. Overrides are applied
//! to a copy of the provider's document before compilation, so the compiled
//! stylesheet and token resolution agree.
//!
//! Token overrides use qualified paths, the same form
//! [DesignTokens::entries](dtk_theme::DesignTokens::entries) reports:
//!
//! ```rust
//! use dtk_runtime::{BrandingOverrides, TenantConfig};
//! use dtk_theme::Theme;
//!
//! let config = TenantConfig::new()
//!     .with_blocked_themes(["experimental"])
//!     .with_branding(BrandingOverrides {
//!         primary_color: Some("#e11d48".into()),
//!         ..Default::default()
//!     })
//!     .with_custom_token("primitives.radius.md", "4px");
//!
//! assert!(config.allows("default"));
//! assert!(!config.allows("experimental"));
//!
//! let theme = config.customize(&Theme::new("default", "Default")).unwrap();
//! assert_eq!(theme.tokens.primitives.radius["md"].as_str(), "4px");
//! ```

use std::fs;
use std::path::Path;

use dtk_theme::{Theme, ThemeResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{RuntimeError, RuntimeResult};

/// Brand values a tenant layers over its themes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandingOverrides {
    /// Replaces `semantic.colors.interactive.primary`.
    pub primary_color: Option<String>,
    /// Replaces `semantic.colors.interactive.secondary`.
    pub secondary_color: Option<String>,
    /// Replaces `semantic.colors.interactive.accent`.
    pub accent_color: Option<String>,
    /// Replaces `primitives.typography.font-family-base`.
    pub font_family: Option<String>,
    /// Palette entries added to or replacing `primitives.colors`.
    pub color_palette: IndexMap<String, String>,
    /// Stylesheet text appended after the compiled theme.
    pub custom_css: Option<String>,
}

impl BrandingOverrides {
    /// The token overrides these values stand for, in application order.
    pub fn token_overrides(&self) -> Vec<(String, String)> {
        let mut overrides = Vec::new();
        let slots = [
            (&self.primary_color, "semantic.colors.interactive.primary"),
            (&self.secondary_color, "semantic.colors.interactive.secondary"),
            (&self.accent_color, "semantic.colors.interactive.accent"),
            (&self.font_family, "primitives.typography.font-family-base"),
        ];
        for (value, path) in slots {
            if let Some(value) = value {
                overrides.push((path.to_string(), value.clone()));
            }
        }
        for (name, color) in &self.color_palette {
            overrides.push((format!("primitives.colors.{name}"), color.clone()));
        }
        overrides
    }
}

/// Theme policy and customization for one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenantConfig {
    /// Inactive tenants cannot switch themes.
    pub active: bool,
    /// When non-empty, the only theme ids the tenant may activate.
    pub allowed_themes: Vec<String>,
    /// Theme ids the tenant may never activate. Checked before the allow list.
    pub blocked_themes: Vec<String>,
    /// Qualified token path to value, applied after the branding.
    pub custom_tokens: IndexMap<String, String>,
    /// Brand values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding: Option<BrandingOverrides>,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            active: true,
            allowed_themes: Vec::new(),
            blocked_themes: Vec::new(),
            custom_tokens: IndexMap::new(),
            branding: None,
        }
    }
}

impl TenantConfig {
    /// An active tenant with no restrictions and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a tenant configuration from JSON.
    pub fn from_json(content: &str) -> RuntimeResult<Self> {
        serde_json::from_str(content).map_err(|e| RuntimeError::config(None, e.to_string()))
    }

    /// Load a tenant configuration from a `.json` or `.toml` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RuntimeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let parsed = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            _ => Err("unsupported tenant file format, use .json or .toml".to_string()),
        };
        parsed.map_err(|details| RuntimeError::config(Some(path.to_path_buf()), details))
    }

    /// Restrict the tenant to these theme ids.
    pub fn with_allowed_themes<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_themes = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Forbid these theme ids.
    pub fn with_blocked_themes<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_themes = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Override one token.
    pub fn with_custom_token(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_tokens.insert(path.into(), value.into());
        self
    }

    /// Set the brand values.
    pub fn with_branding(mut self, branding: BrandingOverrides) -> Self {
        self.branding = Some(branding);
        self
    }

    /// Mark the tenant active or inactive.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether the tenant may activate `id`.
    pub fn allows(&self, id: &str) -> bool {
        if self.blocked_themes.iter().any(|blocked| blocked == id) {
            return false;
        }
        self.allowed_themes.is_empty() || self.allowed_themes.iter().any(|allowed| allowed == id)
    }

    /// Whether loading a theme for this tenant changes the document.
    pub fn is_customized(&self) -> bool {
        !self.custom_tokens.is_empty() || self.branding.is_some()
    }

    /// Stylesheet text appended after the compiled theme.
    pub fn custom_css(&self) -> Option<&str> {
        self.branding
            .as_ref()
            .and_then(|branding| branding.custom_css.as_deref())
            .filter(|css| !css.trim().is_empty())
    }

    /// Every token override in application order: branding first, then the
    /// custom tokens, so a custom token wins over a brand value.
    pub fn token_overrides(&self) -> Vec<(String, String)> {
        let mut overrides = self
            .branding
            .as_ref()
            .map(BrandingOverrides::token_overrides)
            .unwrap_or_default();
        overrides.extend(
            self.custom_tokens
                .iter()
                .map(|(path, value)| (path.clone(), value.clone())),
        );
        overrides
    }

    /// A copy of `theme` with every override applied to its light tree.
    pub fn customize(&self, theme: &Theme) -> ThemeResult<Theme> {
        let mut customized = theme.clone();
        for (path, value) in self.token_overrides() {
            customized.tokens.set_token(&path, value.as_str())?;
        }
        Ok(customized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_wins_over_allowed() {
        let config = TenantConfig::new()
            .with_allowed_themes(["default", "dark"])
            .with_blocked_themes(["dark"]);
        assert!(config.allows("default"));
        assert!(!config.allows("dark"));
        assert!(!config.allows("high-contrast"));
        assert!(TenantConfig::new().allows("anything"));
    }

    #[test]
    fn test_custom_tokens_override_branding() {
        let config = TenantConfig::new()
            .with_branding(BrandingOverrides {
                primary_color: Some("#e11d48".into()),
                color_palette: IndexMap::from([("brand-500".to_string(), "#be123c".to_string())]),
                ..Default::default()
            })
            .with_custom_token("semantic.colors.interactive.primary", "primitives.colors.brand-500");

        let paths: Vec<String> = config.token_overrides().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![
                "semantic.colors.interactive.primary",
                "primitives.colors.brand-500",
                "semantic.colors.interactive.primary",
            ]
        );

        let theme = config.customize(&Theme::new("default", "Default")).unwrap();
        let colors = theme.tokens.semantic.colors.as_ref().unwrap();
        assert_eq!(
            colors.interactive.as_ref().unwrap().primary.as_ref().unwrap().as_str(),
            "primitives.colors.brand-500"
        );
        assert_eq!(theme.tokens.primitives.colors["brand-500"].as_str(), "#be123c");
    }

    #[test]
    fn test_customize_rejects_bad_paths() {
        let config = TenantConfig::new().with_custom_token("colors.interactive.primary", "#000");
        assert!(config.customize(&Theme::new("default", "Default")).is_err());
    }

    #[test]
    fn test_parse_json() {
        let config = TenantConfig::from_json(
            r##"{
                "blockedThemes": ["legacy"],
                "customTokens": { "primitives.spacing.md": "12px" },
                "branding": { "fontFamily": "Inter, sans-serif", "customCss": ".logo { width: 4rem; }" }
            }"##,
        )
        .unwrap();
        assert!(config.active);
        assert!(!config.allows("legacy"));
        assert!(config.is_customized());
        assert_eq!(config.custom_css(), Some(".logo { width: 4rem; }"));
        assert_eq!(
            config.token_overrides()[0],
            (
                "primitives.typography.font-family-base".to_string(),
                "Inter, sans-serif".to_string()
            )
        );
    }
}
