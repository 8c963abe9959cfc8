//! Resolution and runtime errors.

use std::path::PathBuf;

use dtk_theme::ThemeError;
use thiserror::Error;

/// Errors raised while resolving a token path against a theme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The path has fewer segments than its namespace needs.
    #[error("invalid token path '{path}': {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// The namespace segment after a layer prefix is not known.
    #[error("unknown token namespace '{segment}' in '{path}'")]
    UnknownNamespace {
        /// The full path.
        path: String,
        /// The unknown segment.
        segment: String,
    },

    /// The color group segment is not one of the fixed groups.
    #[error("unknown color group '{segment}' in '{path}'")]
    UnknownColorGroup {
        /// The full path.
        path: String,
        /// The unknown segment.
        segment: String,
    },

    /// The slot segment is not one of the group's slots.
    #[error("unknown {group} color slot '{segment}' in '{path}'")]
    UnknownColorSlot {
        /// The full path.
        path: String,
        /// The color group.
        group: String,
        /// The unknown segment.
        segment: String,
    },

    /// A group without a default slot was addressed without naming a slot.
    #[error("color group '{group}' requires a variant in '{path}'")]
    MissingVariant {
        /// The full path.
        path: String,
        /// The color group.
        group: String,
    },

    /// The path continues past a leaf value.
    #[error("unexpected segment '{segment}' in '{path}'")]
    UnexpectedSegment {
        /// The full path.
        path: String,
        /// The first unexpected segment.
        segment: String,
    },

    /// A required sub-tree is absent from the theme.
    #[error("{message} for '{path}'")]
    MissingBranch {
        /// The full path.
        path: String,
        /// What is missing.
        message: String,
    },

    /// The path is well formed but names no value.
    #[error("token '{path}' not found")]
    TokenNotFound {
        /// The full path.
        path: String,
    },

    /// The component is not defined in any token tree.
    #[error("component '{component}' is not defined (resolving '{path}')")]
    ComponentNotDefined {
        /// The full path.
        path: String,
        /// The component name.
        component: String,
    },

    /// An alias chain loops back onto itself.
    #[error("cyclic reference: {}", chain.join(" -> "))]
    CyclicReference {
        /// The chain of paths, ending with the repeated one.
        chain: Vec<String>,
    },

    /// An alias chain is longer than the configured limit.
    #[error("alias chain for '{path}' exceeds the depth limit of {limit}")]
    DepthExceeded {
        /// The path being resolved when the limit was hit.
        path: String,
        /// The configured limit.
        limit: usize,
    },

    /// A value resolved to a further reference that failed.
    #[error("nested resolution failed: {source}")]
    NestedResolution {
        /// The path whose value held the failing reference.
        path: String,
        /// The failure of the nested reference.
        #[source]
        source: Box<ResolveError>,
    },
}

/// Result type alias for token resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

impl ResolveError {
    /// Create an invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing branch error.
    pub fn missing_branch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingBranch {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a token not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::TokenNotFound { path: path.into() }
    }

    /// The innermost error below any nested-resolution wrappers.
    pub fn root_cause(&self) -> &ResolveError {
        let mut error = self;
        while let Self::NestedResolution { source, .. } = error {
            error = source;
        }
        error
    }

    /// Whether the failure is a cycle or a chain that was too deep.
    pub fn is_cycle(&self) -> bool {
        matches!(
            self.root_cause(),
            Self::CyclicReference { .. } | Self::DepthExceeded { .. }
        )
    }
}

/// Errors raised by the [Runtime](crate::Runtime).
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The provider could not load a theme and no fallback was attempted.
    #[error("failed to load theme '{id}': {source}")]
    ThemeLoad {
        /// The requested theme id.
        id: String,
        /// The provider error.
        #[source]
        source: ThemeError,
    },

    /// Both the requested theme and the fallback failed to load.
    #[error("failed to load theme '{id}' and fallback '{fallback}': {source}")]
    FallbackLoad {
        /// The requested theme id.
        id: String,
        /// The fallback theme id.
        fallback: String,
        /// The fallback's load error.
        #[source]
        source: ThemeError,
    },

    /// The provider failed to compile a theme.
    #[error("failed to compile theme '{id}': {source}")]
    Compile {
        /// The theme id.
        id: String,
        /// The provider error.
        #[source]
        source: ThemeError,
    },

    /// The tenant's policy forbids the theme.
    #[error("tenant '{tenant}' is not allowed to use theme '{id}'")]
    ThemeNotAllowed {
        /// The tenant.
        tenant: String,
        /// The requested theme id.
        id: String,
    },

    /// The tenant is configured but inactive.
    #[error("tenant '{tenant}' is not active")]
    TenantInactive {
        /// The tenant.
        tenant: String,
    },

    /// A tenant override could not be applied to the loaded theme.
    #[error("failed to customize theme '{id}' for tenant '{tenant}': {source}")]
    Customization {
        /// The tenant.
        tenant: String,
        /// The loaded theme id.
        id: String,
        /// What was wrong with the override.
        #[source]
        source: ThemeError,
    },

    /// No theme has been set yet.
    #[error("no theme set")]
    NoThemeSet,

    /// The active theme has no compiled stylesheet.
    #[error("theme '{id}' is not compiled")]
    NotCompiled {
        /// The active theme id.
        id: String,
    },

    /// Dark mode was requested but is disabled in configuration.
    #[error("dark mode is disabled in runtime configuration")]
    DarkModeDisabled,

    /// No compiled rule belongs to the component.
    #[error("no CSS found for component '{component}'")]
    ComponentCssNotFound {
        /// The component name.
        component: String,
    },

    /// Token resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Invalid runtime configuration.
    #[error("invalid runtime configuration {path:?}: {details}")]
    Config {
        /// Where the configuration came from, if a file.
        path: Option<PathBuf>,
        /// What was wrong.
        details: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

impl RuntimeError {
    /// Create a configuration error.
    pub fn config(path: Option<PathBuf>, details: impl Into<String>) -> Self {
        Self::Config {
            path,
            details: details.into(),
        }
    }
}
