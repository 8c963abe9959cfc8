#![warn(missing_docs)]

//! # DTK Theme Documents
//!
//! The document side of the dtk design-token engine. This crate defines what
//! a theme looks like and how the engine talks to whatever stores and
//! compiles themes.
//!
//! ## Overview
//!
//! - **[Theme]**: A theme document with layered tokens and an optional dark-mode override tree
//! - **[TokenReference]**: A token value, either a literal or a dotted path to another token
//! - **[TokenNamespace] / [TokenLayer]**: The closed sets of path prefixes
//! - **[ThemeProvider]**: The boundary trait for loading and compiling themes
//! - **[StylesheetCompiler]**: Compiles a theme into custom properties and component classes
//! - **[InMemoryThemeProvider]**: A tenant-aware provider backed by memory
//!
//! ## Quick Start
//!
//! ```rust
//! use dtk_theme::{InMemoryThemeProvider, Theme, ThemeProvider};
//!
//! let provider = InMemoryThemeProvider::new();
//! provider.register(Theme::from_json(r##"{
//!     "id": "default",
//!     "name": "Default",
//!     "tokens": { "primitives": { "colors": { "blue-500": "#3b82f6" } } }
//! }"##).unwrap());
//!
//! let theme = provider.get_theme("default").unwrap();
//! let css = provider.compile_theme(&theme).unwrap();
//! assert!(css.contains("--color-blue-500: #3b82f6;"));
//! ```

/// Contains the stylesheet compiler.
pub mod compiler;
/// Contains the [document::Theme] document model.
pub mod document;
/// Contains the [error::ThemeError] type.
pub mod error;
/// Contains the in-memory theme provider.
pub mod memory;
/// Contains CSS naming helpers.
pub mod naming;
/// Contains token namespaces and layers.
pub mod namespace;
/// Contains the [provider::ThemeProvider] trait.
pub mod provider;
/// Contains the [reference::TokenReference] type.
pub mod reference;

pub use compiler::StylesheetCompiler;
pub use document::{
    BackgroundColors, BorderColors, ColorGroup, ComponentTokens, DarkModeConfig, DesignTokens,
    FeedbackColors, InteractiveColors, PrimitiveTokens, SemanticColors, SemanticTokens, TextColors,
    Theme, TokenMap, TokenNode,
};
pub use error::{ThemeError, ThemeResult};
pub use memory::InMemoryThemeProvider;
pub use naming::{class_name, css_variable_name};
pub use namespace::{TokenLayer, TokenNamespace};
pub use provider::{ThemeKey, ThemeProvider};
pub use reference::{TokenReference, PATH_SEPARATOR};
