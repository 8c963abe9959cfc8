#![warn(missing_docs)]

//! # DTK Runtime
//!
//! Token resolution, caching and runtime theme compilation for dtk.
//!
//! ## Overview
//!
//! - **[TokenResolver]**: Resolves dotted token paths to literal values, following alias chains
//! - **[RuntimeCache]**: Token values, class names and compiled themes behind one lock
//! - **[Runtime]**: Owns the active theme, dark-mode flag and tenant; the query facade
//! - **[CompiledTheme]**: Stylesheet text plus extracted variables and component rules
//! - **[ThemeValidator]**: Reports broken references in a theme
//! - **[RuntimeConfig]**: Caching, dark mode, fallback and preload settings
//! - **[TenantConfig]**: Per-tenant theme policy, branding and token overrides
//! - **[ThemeObserver]**: Hears about theme switches and dark-mode toggles
//!
//! Themes are loaded and compiled through a [dtk_theme::ThemeProvider]; the
//! runtime never touches storage itself.

/// Contains the runtime cache.
pub mod cache;
/// Contains compiled theme artifacts.
pub mod compile;
/// Contains the runtime configuration.
pub mod config;
/// Contains the error types.
pub mod error;
/// Contains theme change events and observers.
pub mod events;
pub mod resolver;
pub mod runtime;
pub mod tenant;
pub mod validator;

pub use cache::{ClassCacheKey, RuntimeCache, TokenCacheKey};
pub use compile::{content_hash, extract_variables, CompiledTheme};
pub use config::{RuntimeConfig, DEFAULT_MAX_ALIAS_DEPTH};
pub use error::{ResolveError, ResolveResult, RuntimeError, RuntimeResult};
pub use events::{ThemeChangeEvent, ThemeChangeKind, ThemeObserver};
pub use resolver::{
    token_info, ResolveScope, ResolvedToken, TokenCategory, TokenInfo, TokenResolver, TokenType,
};
pub use runtime::{PreloadReport, Runtime, SharedRuntime, ThemeInfo};
pub use tenant::{BrandingOverrides, TenantConfig};
pub use validator::{
    is_valid_hex_color, Severity, ThemeValidator, TokenValidationError, TokenValidationWarning,
    ValidationReport, ValidatorConfig, WarningKind,
};
