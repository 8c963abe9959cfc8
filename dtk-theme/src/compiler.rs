//! # Stylesheet Compiler
//!
//! Turns a [Theme] into stylesheet text:
//!
//! - primitive and semantic tokens become custom properties on `:root`
//! - each component becomes a `.component` rule holding its direct tokens
//! - each component group becomes a `.component-group` rule with the group's
//!   tokens flattened underneath it
//!
//! References are emitted as `var(--name)` so the cascade, not the compiler,
//! follows alias chains.
//!
//! ```rust
//! use dtk_theme::{StylesheetCompiler, Theme};
//!
//! let theme = Theme::from_json(r##"{
//!     "id": "default",
//!     "name": "Default",
//!     "tokens": {
//!         "primitives": { "colors": { "blue-500": "#3b82f6" } },
//!         "semantic": { "colors": { "interactive": { "primary": "primitives.colors.blue-500" } } },
//!         "components": { "button": { "primary": { "bg": "colors.interactive.primary" } } }
//!     }
//! }"##).unwrap();
//!
//! let css = StylesheetCompiler::new().compile(&theme).unwrap();
//! assert!(css.contains("--color-blue-500: #3b82f6;"));
//! assert!(css.contains("--color-interactive-primary: var(--color-blue-500);"));
//! assert!(css.contains(".button-primary {"));
//! ```

use std::fmt::Write;

use crate::document::{Theme, TokenNode};
use crate::error::{ThemeError, ThemeResult};
use crate::naming::{class_name, css_variable_name};
use crate::reference::TokenReference;

/// Compiles theme documents into stylesheet text.
#[derive(Debug, Clone)]
pub struct StylesheetCompiler {
    selector: String,
    include_comments: bool,
}

impl Default for StylesheetCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl StylesheetCompiler {
    /// A compiler writing variables to `:root` with header comments.
    pub fn new() -> Self {
        Self {
            selector: ":root".to_string(),
            include_comments: true,
        }
    }

    /// Use a different selector for the variable scope.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Enable or disable comments in the output.
    pub fn with_comments(mut self, include: bool) -> Self {
        self.include_comments = include;
        self
    }

    /// Compile a theme.
    pub fn compile(&self, theme: &Theme) -> ThemeResult<String> {
        if theme.id.trim().is_empty() {
            return Err(ThemeError::compile_error("", "theme has no id"));
        }

        let mut css = String::new();
        self.write(&mut css, theme)
            .map_err(|e| ThemeError::compile_error(&theme.id, e.to_string()))?;

        log::debug!("Compiled theme '{}' ({} bytes)", theme.id, css.len());
        Ok(css)
    }

    fn write(&self, css: &mut String, theme: &Theme) -> std::fmt::Result {
        if self.include_comments {
            writeln!(css, "/* Theme: {} ({}) */", theme.name, theme.id)?;
            if !theme.version.is_empty() {
                writeln!(css, "/* Version: {} */", theme.version)?;
            }
            writeln!(css)?;
        }

        writeln!(css, "{} {{", self.selector)?;
        for (path, value) in theme.tokens.entries() {
            if path.starts_with("components.") {
                continue;
            }
            write_declaration(css, &css_variable_name(&path), value)?;
        }
        writeln!(css, "}}")?;

        for (component, node) in &theme.tokens.components {
            let children = match node {
                TokenNode::Group(children) => children,
                TokenNode::Value(value) => {
                    writeln!(css)?;
                    writeln!(css, ".{} {{", class_name(component, ""))?;
                    write_declaration(css, &format!("--{component}"), value)?;
                    writeln!(css, "}}")?;
                    continue;
                }
            };

            let direct: Vec<_> = children
                .iter()
                .filter_map(|(key, child)| child.as_value().map(|v| (key, v)))
                .collect();
            if !direct.is_empty() {
                writeln!(css)?;
                writeln!(css, ".{} {{", class_name(component, ""))?;
                for (key, value) in direct {
                    write_declaration(css, &format!("--{component}-{key}"), value)?;
                }
                writeln!(css, "}}")?;
            }

            for (variant, child) in children {
                if child.as_group().is_none() {
                    continue;
                }
                writeln!(css)?;
                writeln!(css, ".{} {{", class_name(component, variant))?;
                for (rest, value) in child.leaves() {
                    let name = format!("--{component}-{}", rest.replace('.', "-"));
                    write_declaration(css, &name, value)?;
                }
                writeln!(css, "}}")?;
            }
        }

        Ok(())
    }
}

/// Write `name: value;`, compiling references to `var(...)`. Declarations
/// that would point at themselves are skipped.
fn write_declaration(css: &mut String, name: &str, value: &TokenReference) -> std::fmt::Result {
    if value.is_empty() {
        return Ok(());
    }
    if value.is_reference() {
        let target = css_variable_name(value.path());
        if target == name {
            return Ok(());
        }
        writeln!(css, "  {name}: var({target});")
    } else {
        writeln!(css, "  {name}: {};", value.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme::from_json(
            r##"{
                "id": "default",
                "name": "Default",
                "version": "1.0.0",
                "tokens": {
                    "primitives": { "spacing": { "md": "1rem" } },
                    "semantic": { "spacing": { "md": "primitives.spacing.md" } },
                    "components": {
                        "button": {
                            "bg": "colors.interactive.primary",
                            "primary": { "bg": "#3b82f6", "hover": { "bg": "#2563eb" } }
                        }
                    }
                }
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_header_and_scope() {
        let css = StylesheetCompiler::new().compile(&theme()).unwrap();
        assert!(css.starts_with("/* Theme: Default (default) */\n/* Version: 1.0.0 */\n"));
        assert!(css.contains(":root {\n  --spacing-md: 1rem;\n}"));
    }

    #[test]
    fn test_self_referencing_alias_is_skipped() {
        let css = StylesheetCompiler::new().compile(&theme()).unwrap();
        assert!(!css.contains("var(--spacing-md)"));
    }

    #[test]
    fn test_component_rules() {
        let css = StylesheetCompiler::new()
            .with_comments(false)
            .compile(&theme())
            .unwrap();
        assert!(css.contains(".button {\n  --button-bg: var(--color-interactive-primary);\n}"));
        assert!(css.contains(
            ".button-primary {\n  --button-bg: #3b82f6;\n  --button-hover-bg: #2563eb;\n}"
        ));
    }

    #[test]
    fn test_custom_selector() {
        let css = StylesheetCompiler::new()
            .with_selector(".theme-default")
            .with_comments(false)
            .compile(&theme())
            .unwrap();
        assert!(css.starts_with(".theme-default {"));
    }

    #[test]
    fn test_missing_id_fails() {
        let err = StylesheetCompiler::new().compile(&Theme::default()).unwrap_err();
        assert!(matches!(err, ThemeError::CompileError { .. }));
    }
}
