#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dtk_theme::{InMemoryThemeProvider, Theme, ThemeError, ThemeProvider, ThemeResult};
use serde_json::json;

pub fn theme(value: serde_json::Value) -> Theme {
    serde_json::from_value(value).unwrap()
}

/// Light and dark trees, an alias chain and a component with a variant.
pub fn default_theme() -> Theme {
    theme(json!({
        "id": "default",
        "name": "Default",
        "description": "The default theme",
        "version": "1.0.0",
        "tokens": {
            "primitives": {
                "colors": {
                    "blue-500": "#3b82f6",
                    "blue-700": "#1d4ed8",
                    "white": "#ffffff",
                    "gray-900": "#111827",
                    "slate-900": "#0f172a"
                },
                "spacing": { "md": "1rem" }
            },
            "semantic": {
                "colors": {
                    "background": { "default": "primitives.colors.white" },
                    "text": { "default": "primitives.colors.gray-900" },
                    "interactive": { "primary": "primitives.colors.blue-500" }
                }
            },
            "components": {
                "button": {
                    "bg": "colors.interactive.primary",
                    "primary": { "bg": "primitives.colors.blue-700" }
                }
            }
        },
        "darkMode": {
            "enabled": true,
            "darkTokens": {
                "semantic": {
                    "colors": { "background": { "default": "primitives.colors.slate-900" } }
                }
            }
        }
    }))
}

/// The default theme with a different primary color.
pub fn primary_theme(id: &str, primary: &str) -> Theme {
    theme(json!({
        "id": id,
        "name": id,
        "tokens": {
            "primitives": { "colors": { "white": "#ffffff" } },
            "semantic": {
                "colors": {
                    "background": { "default": "primitives.colors.white" },
                    "text": { "default": "#111827" },
                    "interactive": { "primary": primary }
                }
            }
        }
    }))
}

/// No dark-mode section at all.
pub fn plain_theme() -> Theme {
    primary_theme("plain", "#22c55e")
}

pub fn broken_theme() -> Theme {
    theme(json!({
        "id": "broken",
        "name": "Broken",
        "tokens": {
            "semantic": { "colors": { "text": { "default": "primitives.colors.missing" } } },
            "components": { "loop": { "a": "loop.b", "b": "loop.a" } }
        }
    }))
}

pub fn provider() -> Arc<InMemoryThemeProvider> {
    let provider = Arc::new(InMemoryThemeProvider::new());
    provider.register(default_theme());
    provider.register(plain_theme());
    provider.register(broken_theme());
    provider
}

/// Wraps the in-memory provider and fails compilation on demand.
#[derive(Debug, Default)]
pub struct FlakyProvider {
    pub inner: InMemoryThemeProvider,
    pub fail_compile: AtomicBool,
}

impl FlakyProvider {
    pub fn set_failing(&self, failing: bool) {
        self.fail_compile.store(failing, Ordering::SeqCst);
    }
}

impl ThemeProvider for FlakyProvider {
    fn get_theme(&self, id: &str) -> ThemeResult<Arc<Theme>> {
        self.inner.get_theme(id)
    }

    fn compile_theme(&self, theme: &Theme) -> ThemeResult<String> {
        if self.fail_compile.load(Ordering::SeqCst) {
            return Err(ThemeError::compile_error(&theme.id, "compiler unavailable"));
        }
        self.inner.compile_theme(theme)
    }

    fn get_compiled_css(&self, id: &str) -> ThemeResult<String> {
        self.inner.get_compiled_css(id)
    }

    fn list_themes(&self) -> Vec<Arc<Theme>> {
        self.inner.list_themes()
    }
}
