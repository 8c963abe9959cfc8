#![warn(missing_docs)]

//! Resolve design tokens and serve compiled themes to many concurrent readers.

pub use dtk_runtime as runtime;
pub use dtk_theme as theme;

/// A "prelude" for users of the dtk engine.
///
/// Importing this module brings into scope the types needed to load a theme,
/// resolve tokens against it and fetch its compiled stylesheet.
///
/// ```rust
/// use dtk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::runtime::{
        CompiledTheme, ResolveError, ResolvedToken, Runtime, RuntimeCache, RuntimeConfig,
        RuntimeError, TenantConfig, ThemeChangeEvent, ThemeInfo, ThemeObserver, ThemeValidator,
        TokenResolver, ValidationReport,
    };
    pub use crate::theme::{
        InMemoryThemeProvider, StylesheetCompiler, Theme, ThemeError, ThemeProvider,
        TokenReference,
    };
}
