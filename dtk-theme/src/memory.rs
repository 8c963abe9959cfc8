//! An in-memory, tenant-aware [ThemeProvider].

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::compiler::StylesheetCompiler;
use crate::document::Theme;
use crate::error::{ThemeError, ThemeResult};
use crate::provider::{ThemeKey, ThemeProvider};

/// A theme registry held in memory.
///
/// Themes are registered globally or for a tenant. Tenant lookups fall back
/// to the global registration of the same id. Compiled stylesheets are kept
/// per tenant and follow the same fallback.
///
/// ```rust
/// use dtk_theme::{InMemoryThemeProvider, Theme, ThemeProvider};
///
/// let provider = InMemoryThemeProvider::new();
/// provider.register(Theme::new("default", "Default"));
/// provider.register_for_tenant("acme", Theme::new("default", "Acme"));
///
/// assert_eq!(provider.get_theme("default").unwrap().name, "Default");
/// assert_eq!(provider.get_tenant_theme(Some("acme"), "default").unwrap().name, "Acme");
/// assert_eq!(provider.get_tenant_theme(Some("other"), "default").unwrap().name, "Default");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryThemeProvider {
    themes: RwLock<IndexMap<ThemeKey, Arc<Theme>>>,
    compiled: RwLock<HashMap<ThemeKey, String>>,
    compiler: StylesheetCompiler,
    compile_count: AtomicUsize,
}

impl InMemoryThemeProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty provider using a custom compiler.
    pub fn with_compiler(compiler: StylesheetCompiler) -> Self {
        Self {
            compiler,
            ..Default::default()
        }
    }

    /// Register a theme in the global namespace, replacing any theme with
    /// the same id.
    pub fn register(&self, theme: Theme) -> Option<Arc<Theme>> {
        self.insert(ThemeKey::global(theme.id.clone()), theme)
    }

    /// Register a theme for a tenant.
    pub fn register_for_tenant(&self, tenant: impl Into<String>, theme: Theme) -> Option<Arc<Theme>> {
        self.insert(ThemeKey::for_tenant(tenant, theme.id.clone()), theme)
    }

    /// Load a theme file and register it globally.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> ThemeResult<Arc<Theme>> {
        let theme = Theme::from_file(path)?;
        let key = ThemeKey::global(theme.id.clone());
        self.insert(key.clone(), theme);
        self.lookup(&key)
            .ok_or_else(|| ThemeError::not_found(key.id))
    }

    /// Remove a registration.
    pub fn remove(&self, key: &ThemeKey) -> Option<Arc<Theme>> {
        let mut themes = self.themes.write().unwrap_or_else(PoisonError::into_inner);
        themes.shift_remove(key)
    }

    /// How many times [ThemeProvider::compile_theme] ran.
    pub fn compile_count(&self) -> usize {
        self.compile_count.load(Ordering::Relaxed)
    }

    fn insert(&self, key: ThemeKey, theme: Theme) -> Option<Arc<Theme>> {
        log::debug!("Registering theme '{}'", key);
        let mut themes = self.themes.write().unwrap_or_else(PoisonError::into_inner);
        themes.insert(key, Arc::new(theme))
    }

    fn lookup(&self, key: &ThemeKey) -> Option<Arc<Theme>> {
        let themes = self.themes.read().unwrap_or_else(PoisonError::into_inner);
        themes.get(key).cloned()
    }
}

impl ThemeProvider for InMemoryThemeProvider {
    fn get_theme(&self, id: &str) -> ThemeResult<Arc<Theme>> {
        self.lookup(&ThemeKey::global(id))
            .ok_or_else(|| ThemeError::not_found(id))
    }

    fn get_tenant_theme(&self, tenant: Option<&str>, id: &str) -> ThemeResult<Arc<Theme>> {
        let Some(tenant) = tenant else {
            return self.get_theme(id);
        };
        self.lookup(&ThemeKey::for_tenant(tenant, id))
            .or_else(|| self.lookup(&ThemeKey::global(id)))
            .ok_or_else(|| ThemeError::not_found_for_tenant(tenant, id))
    }

    fn compile_theme(&self, theme: &Theme) -> ThemeResult<String> {
        self.compile_tenant_theme(None, theme)
    }

    fn compile_tenant_theme(&self, tenant: Option<&str>, theme: &Theme) -> ThemeResult<String> {
        self.compile_count.fetch_add(1, Ordering::Relaxed);
        let css = self.compiler.compile(theme)?;
        let mut compiled = self.compiled.write().unwrap_or_else(PoisonError::into_inner);
        compiled.insert(ThemeKey::new(tenant, theme.id.as_str()), css.clone());
        Ok(css)
    }

    fn get_compiled_css(&self, id: &str) -> ThemeResult<String> {
        self.get_tenant_compiled_css(None, id)
    }

    fn get_tenant_compiled_css(&self, tenant: Option<&str>, id: &str) -> ThemeResult<String> {
        let compiled = self.compiled.read().unwrap_or_else(PoisonError::into_inner);
        let global = ThemeKey::global(id);
        tenant
            .and_then(|tenant| compiled.get(&ThemeKey::for_tenant(tenant, id)))
            .or_else(|| compiled.get(&global))
            .cloned()
            .ok_or_else(|| match tenant {
                Some(tenant) => ThemeError::not_found_for_tenant(tenant, id),
                None => ThemeError::not_found(id),
            })
    }

    fn list_themes(&self) -> Vec<Arc<Theme>> {
        let themes = self.themes.read().unwrap_or_else(PoisonError::into_inner);
        themes
            .iter()
            .filter(|(key, _)| key.tenant.is_none())
            .map(|(_, theme)| theme.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_theme() {
        let provider = InMemoryThemeProvider::new();
        let err = provider.get_theme("missing").unwrap_err();
        assert!(err.is_not_found());

        let err = provider.get_tenant_theme(Some("acme"), "missing").unwrap_err();
        assert!(matches!(err, ThemeError::NotFound { tenant: Some(ref t), .. } if t == "acme"));
    }

    #[test]
    fn test_compile_stores_css() {
        let provider = InMemoryThemeProvider::new();
        provider.register(Theme::new("default", "Default"));
        assert!(provider.get_compiled_css("default").is_err());

        let theme = provider.get_theme("default").unwrap();
        let css = provider.compile_theme(&theme).unwrap();
        assert_eq!(provider.get_compiled_css("default").unwrap(), css);
        assert_eq!(provider.compile_count(), 1);
    }

    #[test]
    fn test_compiled_css_is_kept_per_tenant() {
        let provider = InMemoryThemeProvider::new();
        provider.register(Theme::new("default", "Default"));
        provider.register_for_tenant("acme", Theme::new("default", "Acme"));

        let global = provider.get_theme("default").unwrap();
        let acme = provider.get_tenant_theme(Some("acme"), "default").unwrap();
        let global_css = provider.compile_theme(&global).unwrap();
        let acme_css = provider.compile_tenant_theme(Some("acme"), &acme).unwrap();
        assert_ne!(global_css, acme_css);

        assert_eq!(provider.get_compiled_css("default").unwrap(), global_css);
        assert_eq!(
            provider.get_tenant_compiled_css(Some("acme"), "default").unwrap(),
            acme_css
        );
        // tenants without their own output see the global one
        assert_eq!(
            provider.get_tenant_compiled_css(Some("other"), "default").unwrap(),
            global_css
        );
    }

    #[test]
    fn test_list_skips_tenant_registrations() {
        let provider = InMemoryThemeProvider::new();
        provider.register(Theme::new("a", "A"));
        provider.register_for_tenant("acme", Theme::new("b", "B"));
        provider.register(Theme::new("c", "C"));

        let ids: Vec<String> = provider.list_themes().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_register_replaces() {
        let provider = InMemoryThemeProvider::new();
        assert!(provider.register(Theme::new("a", "First")).is_none());
        assert!(provider.register(Theme::new("a", "Second")).is_some());
        assert_eq!(provider.get_theme("a").unwrap().name, "Second");
        assert!(provider.remove(&ThemeKey::global("a")).is_some());
        assert!(provider.get_theme("a").is_err());
    }
}
