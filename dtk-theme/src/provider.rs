//! The theme provider boundary.
//!
//! A [ThemeProvider] owns theme storage and stylesheet compilation. The
//! engine only ever reads themes through it, and treats every call as
//! potentially slow and blocking.

use std::fmt;
use std::sync::Arc;

use crate::document::Theme;
use crate::error::ThemeResult;

/// Identifies a theme, optionally scoped to a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThemeKey {
    /// Owning tenant. `None` for the global namespace.
    pub tenant: Option<String>,
    /// Theme identifier.
    pub id: String,
}

impl ThemeKey {
    /// A key in the global namespace.
    pub fn global(id: impl Into<String>) -> Self {
        Self {
            tenant: None,
            id: id.into(),
        }
    }

    /// A key scoped to `tenant`.
    pub fn for_tenant(tenant: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            tenant: Some(tenant.into()),
            id: id.into(),
        }
    }

    /// Build a key from an optional tenant.
    pub fn new(tenant: Option<&str>, id: impl Into<String>) -> Self {
        Self {
            tenant: tenant.map(str::to_string),
            id: id.into(),
        }
    }
}

impl fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tenant {
            Some(tenant) => write!(f, "{tenant}/{}", self.id),
            None => f.write_str(&self.id),
        }
    }
}

/// Source of theme documents and compiled stylesheets.
pub trait ThemeProvider: Send + Sync {
    /// Load a theme by id.
    fn get_theme(&self, id: &str) -> ThemeResult<Arc<Theme>>;

    /// Load a theme by id for a tenant.
    ///
    /// The default ignores the tenant. Multi-tenant providers override this.
    fn get_tenant_theme(&self, tenant: Option<&str>, id: &str) -> ThemeResult<Arc<Theme>> {
        let _ = tenant;
        self.get_theme(id)
    }

    /// Compile a theme into stylesheet text.
    fn compile_theme(&self, theme: &Theme) -> ThemeResult<String>;

    /// Compile a theme loaded for a tenant.
    ///
    /// The default ignores the tenant. Providers that keep compiled output
    /// override this so tenants sharing a theme id do not collide.
    fn compile_tenant_theme(&self, tenant: Option<&str>, theme: &Theme) -> ThemeResult<String> {
        let _ = tenant;
        self.compile_theme(theme)
    }

    /// Previously compiled stylesheet text for a theme id.
    fn get_compiled_css(&self, id: &str) -> ThemeResult<String>;

    /// Previously compiled stylesheet text for a theme id and tenant.
    fn get_tenant_compiled_css(&self, tenant: Option<&str>, id: &str) -> ThemeResult<String> {
        let _ = tenant;
        self.get_compiled_css(id)
    }

    /// Every theme the provider knows about.
    fn list_themes(&self) -> Vec<Arc<Theme>>;
}

impl<P: ThemeProvider + ?Sized> ThemeProvider for Arc<P> {
    fn get_theme(&self, id: &str) -> ThemeResult<Arc<Theme>> {
        (**self).get_theme(id)
    }

    fn get_tenant_theme(&self, tenant: Option<&str>, id: &str) -> ThemeResult<Arc<Theme>> {
        (**self).get_tenant_theme(tenant, id)
    }

    fn compile_theme(&self, theme: &Theme) -> ThemeResult<String> {
        (**self).compile_theme(theme)
    }

    fn compile_tenant_theme(&self, tenant: Option<&str>, theme: &Theme) -> ThemeResult<String> {
        (**self).compile_tenant_theme(tenant, theme)
    }

    fn get_compiled_css(&self, id: &str) -> ThemeResult<String> {
        (**self).get_compiled_css(id)
    }

    fn get_tenant_compiled_css(&self, tenant: Option<&str>, id: &str) -> ThemeResult<String> {
        (**self).get_tenant_compiled_css(tenant, id)
    }

    fn list_themes(&self) -> Vec<Arc<Theme>> {
        (**self).list_themes()
    }
}
