//! Theme validation.
//!
//! The validator collects every reference in a theme, light and dark trees
//! alike, and tries to resolve each one. Unresolvable references are errors.
//! Missing required tokens, an enabled dark mode without overrides and
//! malformed hex colors are warnings.

use dtk_theme::{Theme, TokenReference};
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::DEFAULT_MAX_ALIAS_DEPTH;
use crate::resolver::TokenResolver;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The theme is broken.
    Error,
    /// The theme works but is probably not what was intended.
    Warning,
    /// Informational.
    Info,
}

/// What a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// A required token does not resolve.
    MissingToken,
    /// Dark mode is enabled but has no overrides.
    DarkMode,
    /// A color literal is malformed.
    InvalidColor,
}

/// An unresolvable reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidationError {
    /// The reference that failed.
    pub token_path: String,
    /// Why it failed.
    pub error: String,
    /// Always [Severity::Error] for unresolved references.
    pub severity: Severity,
}

/// A non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidationWarning {
    /// Where the finding applies.
    pub token_path: String,
    /// Description.
    pub message: String,
    /// Kind of finding.
    #[serde(rename = "type")]
    pub kind: WarningKind,
}

/// The result of validating one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// The validated theme.
    pub theme_id: String,
    /// Whether there are no errors.
    pub valid: bool,
    /// Unresolvable references.
    pub errors: Vec<TokenValidationError>,
    /// Non-fatal findings.
    pub warnings: Vec<TokenValidationWarning>,
    /// Every distinct reference, in document order.
    pub references: Vec<String>,
    /// How many references resolved.
    pub resolved: usize,
    /// How many references did not.
    pub unresolved: usize,
}

impl ValidationReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Validator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Paths that must resolve.
    pub required_tokens: Vec<String>,
    /// Check color literals.
    pub validate_colors: bool,
    /// Alias chain limit used while resolving.
    pub max_alias_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            required_tokens: vec![
                "colors.background.default".to_string(),
                "colors.text.default".to_string(),
                "colors.interactive.primary".to_string(),
            ],
            validate_colors: true,
            max_alias_depth: DEFAULT_MAX_ALIAS_DEPTH,
        }
    }
}

/// Checks themes for broken references and common mistakes.
#[derive(Debug, Clone, Default)]
pub struct ThemeValidator {
    config: ValidatorConfig,
}

/// Where a reference was seen.
#[derive(Default)]
struct Seen {
    light: bool,
    dark: bool,
}

impl ThemeValidator {
    /// A validator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator with custom settings.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The validator's settings.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a theme.
    pub fn validate(&self, theme: &Theme) -> ValidationReport {
        let resolver = TokenResolver::uncached().with_max_depth(self.config.max_alias_depth);
        let mut report = ValidationReport {
            theme_id: theme.id.clone(),
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            references: Vec::new(),
            resolved: 0,
            unresolved: 0,
        };

        let light = theme.tokens.entries();
        let dark = theme.dark_tokens().map(|t| t.entries()).unwrap_or_default();

        let mut references: IndexMap<&str, Seen> = IndexMap::new();
        for (_, value) in &light {
            if value.is_reference() {
                references.entry(value.path()).or_default().light = true;
            }
        }
        for (_, value) in &dark {
            if value.is_reference() {
                references.entry(value.path()).or_default().dark = true;
            }
        }

        for (path, seen) in &references {
            let reference = TokenReference::from(*path);
            let modes = [(seen.light, false), (seen.dark, true)];
            let failure = modes
                .iter()
                .filter(|(present, _)| *present)
                .find_map(|(_, dark_mode)| resolver.resolve(&reference, theme, *dark_mode).err());

            report.references.push(path.to_string());
            match failure {
                Some(e) => {
                    report.unresolved += 1;
                    report.errors.push(TokenValidationError {
                        token_path: path.to_string(),
                        error: e.to_string(),
                        severity: Severity::Error,
                    });
                }
                None => report.resolved += 1,
            }
        }

        for required in &self.config.required_tokens {
            let reference = TokenReference::from(required.as_str());
            if let Err(e) = resolver.resolve(&reference, theme, false) {
                report.warnings.push(TokenValidationWarning {
                    token_path: required.clone(),
                    message: format!("required token does not resolve: {e}"),
                    kind: WarningKind::MissingToken,
                });
            }
        }

        if theme.supports_dark_mode() && theme.dark_tokens().map_or(true, |t| t.is_empty()) {
            report.warnings.push(TokenValidationWarning {
                token_path: "darkMode.darkTokens".to_string(),
                message: "dark mode is enabled but defines no override tokens".to_string(),
                kind: WarningKind::DarkMode,
            });
        }

        if self.config.validate_colors {
            let entries = light
                .iter()
                .map(|(path, value)| (path.clone(), *value))
                .chain(dark.iter().map(|(path, value)| (format!("darkMode.{path}"), *value)));
            for (path, value) in entries {
                let literal = value.path();
                if literal.starts_with('#') && !is_valid_hex_color(literal) {
                    report.warnings.push(TokenValidationWarning {
                        token_path: path,
                        message: format!("invalid hex color '{literal}', expected #rgb, #rgba, #rrggbb or #rrggbbaa"),
                        kind: WarningKind::InvalidColor,
                    });
                }
            }
        }

        report.valid = report.errors.is_empty();
        report
    }
}

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
pub fn is_valid_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(value: serde_json::Value) -> Theme {
        serde_json::from_value(value).unwrap()
    }

    fn healthy() -> Theme {
        theme(serde_json::json!({
            "id": "default",
            "name": "Default",
            "tokens": {
                "primitives": { "colors": { "blue-500": "#3b82f6", "white": "#fff" } },
                "semantic": {
                    "colors": {
                        "background": { "default": "primitives.colors.white" },
                        "text": { "default": "#111827" },
                        "interactive": { "primary": "primitives.colors.blue-500" }
                    }
                },
                "components": {
                    "button": { "bg": "colors.interactive.primary", "fg": "primitives.colors.white" }
                }
            }
        }))
    }

    #[test]
    fn test_healthy_theme() {
        let report = ThemeValidator::new().validate(&healthy());
        assert!(report.valid);
        assert_eq!(
            report.references,
            vec![
                "primitives.colors.white",
                "primitives.colors.blue-500",
                "colors.interactive.primary",
            ]
        );
        assert_eq!(report.resolved, 3);
        assert_eq!(report.unresolved, 0);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_unresolved_and_cyclic_references() {
        let report = ThemeValidator::new().validate(&theme(serde_json::json!({
            "id": "broken",
            "name": "Broken",
            "tokens": {
                "semantic": { "colors": { "text": { "default": "primitives.colors.missing" } } },
                "components": { "loop": { "a": "loop.b", "b": "loop.a" } }
            }
        })));

        assert!(!report.valid);
        assert_eq!(report.unresolved, 3);
        assert_eq!(report.errors.len(), 3);
        assert!(report.errors.iter().all(|e| e.severity == Severity::Error));
        assert!(report.errors[1].error.contains("cyclic reference"));
    }

    #[test]
    fn test_missing_required_tokens_warn() {
        let report = ThemeValidator::new().validate(&theme(serde_json::json!({
            "id": "bare",
            "name": "Bare",
            "tokens": { "primitives": { "spacing": { "md": "1rem" } } }
        })));

        assert!(report.valid);
        let missing: Vec<_> = report
            .warnings
            .iter()
            .filter(|w| w.kind == WarningKind::MissingToken)
            .map(|w| w.token_path.as_str())
            .collect();
        assert_eq!(
            missing,
            vec!["colors.background.default", "colors.text.default", "colors.interactive.primary"]
        );
    }

    #[test]
    fn test_dark_references_resolve_in_dark_mode() {
        let mut theme = healthy();
        theme.dark_mode = Some(
            serde_json::from_value(serde_json::json!({
                "enabled": true,
                "darkTokens": {
                    "primitives": { "colors": { "slate-900": "#0f172a" } },
                    "semantic": { "colors": { "background": { "default": "primitives.colors.slate-900" } } }
                }
            }))
            .unwrap(),
        );

        let report = ThemeValidator::new().validate(&theme);
        assert!(report.valid);
        assert_eq!(report.references.last().map(String::as_str), Some("primitives.colors.slate-900"));
    }

    #[test]
    fn test_dark_mode_without_overrides_warns() {
        let mut theme = healthy();
        theme.dark_mode = Some(dtk_theme::DarkModeConfig {
            enabled: true,
            ..Default::default()
        });

        let report = ThemeValidator::new().validate(&theme);
        assert!(report.warnings.iter().any(|w| w.kind == WarningKind::DarkMode));
    }

    #[test]
    fn test_invalid_hex_warns() {
        let mut theme = healthy();
        theme
            .tokens
            .primitives
            .colors
            .insert("bad".to_string(), TokenReference::from("#12345"));

        let report = ThemeValidator::new().validate(&theme);
        let warning = report
            .warnings
            .iter()
            .find(|w| w.kind == WarningKind::InvalidColor)
            .unwrap();
        assert_eq!(warning.token_path, "primitives.colors.bad");

        let quiet = ThemeValidator::with_config(ValidatorConfig {
            validate_colors: false,
            ..Default::default()
        })
        .validate(&theme);
        assert!(quiet.warnings.is_empty());
    }

    #[test]
    fn test_hex_rules() {
        assert!(is_valid_hex_color("#fff"));
        assert!(is_valid_hex_color("#ffff"));
        assert!(is_valid_hex_color("#3b82f6"));
        assert!(is_valid_hex_color("#3b82f6cc"));
        assert!(!is_valid_hex_color("#3b82f"));
        assert!(!is_valid_hex_color("#ggg"));
        assert!(!is_valid_hex_color("fff"));
    }

    #[test]
    fn test_report_json() {
        let json = ThemeValidator::new().validate(&healthy()).to_json().unwrap();
        assert!(json.contains("\"themeId\": \"default\""));
        assert!(json.contains("\"unresolved\": 0"));
    }
}
