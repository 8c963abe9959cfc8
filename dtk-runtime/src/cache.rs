//! The runtime cache.
//!
//! Three maps behind one lock: resolved token values, synthesized class names
//! and compiled themes. Token values and class names are wiped together on
//! every theme switch or dark-mode toggle. Compiled themes survive
//! [RuntimeCache::clear] and are only replaced or pruned explicitly.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dtk_theme::ThemeKey;

use crate::compile::CompiledTheme;

/// Key of a resolved token value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenCacheKey {
    /// Tenant the value was resolved for.
    pub tenant: Option<String>,
    /// Theme the value was resolved against.
    pub theme_id: String,
    /// The token path.
    pub path: String,
    /// Whether dark mode was active.
    pub dark_mode: bool,
}

impl TokenCacheKey {
    /// Build a key.
    pub fn new(tenant: Option<&str>, theme_id: &str, path: &str, dark_mode: bool) -> Self {
        Self {
            tenant: tenant.map(str::to_string),
            theme_id: theme_id.to_string(),
            path: path.to_string(),
            dark_mode,
        }
    }
}

/// Key of a synthesized class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassCacheKey {
    /// Tenant the name was built for.
    pub tenant: Option<String>,
    /// Component name.
    pub component: String,
    /// Variant name.
    pub variant: String,
}

#[derive(Debug, Default)]
struct CacheMaps {
    token_values: HashMap<TokenCacheKey, String>,
    class_names: HashMap<ClassCacheKey, String>,
    compiled: HashMap<ThemeKey, Arc<CompiledTheme>>,
}

/// Process-wide cache shared by the runtime and its resolver.
#[derive(Debug, Default)]
pub struct RuntimeCache {
    maps: RwLock<CacheMaps>,
}

impl RuntimeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheMaps> {
        self.maps.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheMaps> {
        self.maps.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a resolved token value.
    pub fn get_token(&self, key: &TokenCacheKey) -> Option<String> {
        self.read().token_values.get(key).cloned()
    }

    /// Store a resolved token value.
    pub fn set_token(&self, key: TokenCacheKey, value: String) {
        self.write().token_values.insert(key, value);
    }

    /// Get a class name.
    pub fn get_class(&self, tenant: Option<&str>, component: &str, variant: &str) -> Option<String> {
        let key = ClassCacheKey {
            tenant: tenant.map(str::to_string),
            component: component.to_string(),
            variant: variant.to_string(),
        };
        self.read().class_names.get(&key).cloned()
    }

    /// Store a class name.
    pub fn set_class(&self, tenant: Option<&str>, component: &str, variant: &str, class: String) {
        let key = ClassCacheKey {
            tenant: tenant.map(str::to_string),
            component: component.to_string(),
            variant: variant.to_string(),
        };
        self.write().class_names.insert(key, class);
    }

    /// Get a compiled theme.
    pub fn get_compiled(&self, key: &ThemeKey) -> Option<Arc<CompiledTheme>> {
        self.read().compiled.get(key).cloned()
    }

    /// Store a compiled theme, replacing any previous artifact for the key.
    pub fn set_compiled(&self, key: ThemeKey, compiled: Arc<CompiledTheme>) {
        self.write().compiled.insert(key, compiled);
    }

    /// Wipe token values and class names. Compiled themes are kept.
    pub fn clear(&self) {
        let mut maps = self.write();
        log::debug!(
            "Clearing runtime cache ({} token values, {} class names)",
            maps.token_values.len(),
            maps.class_names.len()
        );
        maps.token_values.clear();
        maps.class_names.clear();
    }

    /// Wipe everything, including compiled themes other than `keep`.
    pub fn clear_all_except(&self, keep: Option<&ThemeKey>) {
        let mut maps = self.write();
        maps.token_values.clear();
        maps.class_names.clear();
        maps.compiled.retain(|key, _| Some(key) == keep);
        log::debug!("Cleared runtime cache, {} compiled theme(s) kept", maps.compiled.len());
    }

    /// Swap in a compiled theme and clear token values and class names as
    /// one step.
    pub fn replace_compiled(&self, key: ThemeKey, compiled: Arc<CompiledTheme>) {
        let mut maps = self.write();
        maps.token_values.clear();
        maps.class_names.clear();
        maps.compiled.insert(key, compiled);
    }

    /// Number of cached token values.
    pub fn token_count(&self) -> usize {
        self.read().token_values.len()
    }

    /// Number of cached class names.
    pub fn class_count(&self) -> usize {
        self.read().class_names.len()
    }

    /// Number of compiled themes.
    pub fn compiled_count(&self) -> usize {
        self.read().compiled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(id: &str) -> Arc<CompiledTheme> {
        Arc::new(CompiledTheme::from_css(id, id, ":root {\n  --x: 1px;\n}\n".to_string()))
    }

    #[test]
    fn test_token_keys_include_dark_mode_and_tenant() {
        let cache = RuntimeCache::new();
        cache.set_token(TokenCacheKey::new(None, "default", "colors.text.default", false), "#111".into());

        assert_eq!(
            cache.get_token(&TokenCacheKey::new(None, "default", "colors.text.default", false)),
            Some("#111".to_string())
        );
        assert_eq!(
            cache.get_token(&TokenCacheKey::new(None, "default", "colors.text.default", true)),
            None
        );
        assert_eq!(
            cache.get_token(&TokenCacheKey::new(Some("acme"), "default", "colors.text.default", false)),
            None
        );
    }

    #[test]
    fn test_clear_keeps_compiled() {
        let cache = RuntimeCache::new();
        cache.set_token(TokenCacheKey::new(None, "a", "spacing.md", false), "1rem".into());
        cache.set_class(None, "button", "primary", "button-primary".into());
        cache.set_compiled(ThemeKey::global("a"), compiled("a"));

        cache.clear();

        assert_eq!(cache.token_count(), 0);
        assert_eq!(cache.class_count(), 0);
        assert!(cache.get_compiled(&ThemeKey::global("a")).is_some());
    }

    #[test]
    fn test_clear_all_except_keeps_one_artifact() {
        let cache = RuntimeCache::new();
        cache.set_compiled(ThemeKey::global("a"), compiled("a"));
        cache.set_compiled(ThemeKey::global("b"), compiled("b"));
        cache.set_compiled(ThemeKey::for_tenant("acme", "a"), compiled("a"));

        cache.clear_all_except(Some(&ThemeKey::global("b")));

        assert_eq!(cache.compiled_count(), 1);
        assert!(cache.get_compiled(&ThemeKey::global("b")).is_some());

        cache.clear_all_except(None);
        assert_eq!(cache.compiled_count(), 0);
    }

    #[test]
    fn test_replace_compiled_clears_values() {
        let cache = RuntimeCache::new();
        cache.set_token(TokenCacheKey::new(None, "a", "spacing.md", false), "1rem".into());
        cache.replace_compiled(ThemeKey::global("a"), compiled("a"));
        assert_eq!(cache.token_count(), 0);
        assert_eq!(cache.compiled_count(), 1);
    }
}
