//! # Token Resolution
//!
//! [TokenResolver] turns a [TokenReference] into a literal value by walking a
//! theme's token tree and following alias chains:
//!
//! ```text
//! components.button.bg = "semantic.colors.interactive.primary"
//! semantic.colors.interactive.primary = "primitives.colors.blue-500"
//! primitives.colors.blue-500 = "#3b82f6"
//! ```
//!
//! Literals are returned unchanged without touching the cache or the theme.
//! Resolved references are cached per tenant, theme, path and dark-mode flag.
//!
//! ```rust
//! use dtk_runtime::TokenResolver;
//! use dtk_theme::{Theme, TokenReference};
//!
//! let theme = Theme::from_json(r##"{
//!     "id": "default",
//!     "name": "Default",
//!     "tokens": {
//!         "primitives": { "colors": { "blue-500": "#3b82f6" } },
//!         "semantic": { "colors": { "interactive": { "primary": "primitives.colors.blue-500" } } }
//!     }
//! }"##).unwrap();
//!
//! let resolver = TokenResolver::uncached();
//! let value = resolver
//!     .resolve(&TokenReference::from("colors.interactive.primary"), &theme, false)
//!     .unwrap();
//! assert_eq!(value, "#3b82f6");
//! ```

mod info;
mod navigate;

pub use info::{
    categorize, infer_type_from_path, infer_type_from_value, token_info, TokenCategory, TokenInfo,
    TokenType,
};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dtk_theme::{Theme, TokenLayer, TokenNamespace, TokenReference, PATH_SEPARATOR};
use indexmap::IndexMap;
use serde::Serialize;

use crate::cache::{RuntimeCache, TokenCacheKey};
use crate::config::DEFAULT_MAX_ALIAS_DEPTH;
use crate::error::{ResolveError, ResolveResult};
use navigate::Navigator;

/// The theme, dark-mode flag and tenant a resolution runs against.
#[derive(Debug, Clone, Copy)]
pub struct ResolveScope<'a> {
    /// Theme to resolve against.
    pub theme: &'a Theme,
    /// Whether the dark override tree is consulted.
    pub dark_mode: bool,
    /// Tenant the result is cached for.
    pub tenant: Option<&'a str>,
}

impl<'a> ResolveScope<'a> {
    /// A scope without a tenant.
    pub fn new(theme: &'a Theme, dark_mode: bool) -> Self {
        Self {
            theme,
            dark_mode,
            tenant: None,
        }
    }

    /// Set the tenant.
    pub fn with_tenant(mut self, tenant: Option<&'a str>) -> Self {
        self.tenant = tenant;
        self
    }

    fn with_dark_mode(self, dark_mode: bool) -> Self {
        Self { dark_mode, ..self }
    }
}

/// A resolution result with metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedToken {
    /// The literal value. Empty when resolution failed.
    pub value: String,
    /// The path that was resolved, or the literal itself.
    pub path: String,
    /// Layer of the path.
    pub category: TokenCategory,
    /// Inferred kind of value.
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// The light-mode value, when dark mode was requested and it differs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// The dark-mode value, when it differs from the light value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_value: Option<String>,
    /// Whether `value` is a resolved literal.
    pub resolved: bool,
    /// Why resolution failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Resolves token references against themes.
#[derive(Debug)]
pub struct TokenResolver {
    cache: Option<Arc<RuntimeCache>>,
    max_depth: usize,
    navigations: AtomicU64,
}

impl TokenResolver {
    /// A resolver that caches results in `cache`.
    pub fn new(cache: Arc<RuntimeCache>) -> Self {
        Self {
            cache: Some(cache),
            max_depth: DEFAULT_MAX_ALIAS_DEPTH,
            navigations: AtomicU64::new(0),
        }
    }

    /// A resolver without a cache.
    pub fn uncached() -> Self {
        Self {
            cache: None,
            max_depth: DEFAULT_MAX_ALIAS_DEPTH,
            navigations: AtomicU64::new(0),
        }
    }

    /// Set the alias chain limit. Values below 1 are raised to 1.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// The alias chain limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// How many times a theme tree has been walked. Cache hits and literals
    /// do not count.
    pub fn navigation_count(&self) -> u64 {
        self.navigations.load(Ordering::Relaxed)
    }

    /// Resolve a reference to a literal value.
    pub fn resolve(
        &self,
        reference: &TokenReference,
        theme: &Theme,
        dark_mode: bool,
    ) -> ResolveResult<String> {
        self.resolve_scoped(reference, ResolveScope::new(theme, dark_mode))
    }

    /// Resolve a reference within a scope.
    pub fn resolve_scoped(
        &self,
        reference: &TokenReference,
        scope: ResolveScope<'_>,
    ) -> ResolveResult<String> {
        if !reference.is_reference() {
            return match malformed_path(reference) {
                Some(e) => Err(e),
                None => Ok(reference.as_str().to_string()),
            };
        }
        let mut chain = Vec::new();
        self.resolve_path(reference.path(), scope, &mut chain)
    }

    fn resolve_path(
        &self,
        path: &str,
        scope: ResolveScope<'_>,
        chain: &mut Vec<String>,
    ) -> ResolveResult<String> {
        if chain.iter().any(|seen| seen == path) {
            let mut cycle = chain.clone();
            cycle.push(path.to_string());
            return Err(ResolveError::CyclicReference { chain: cycle });
        }
        if chain.len() >= self.max_depth {
            return Err(ResolveError::DepthExceeded {
                path: path.to_string(),
                limit: self.max_depth,
            });
        }

        let key = self
            .cache
            .as_ref()
            .map(|_| TokenCacheKey::new(scope.tenant, &scope.theme.id, path, scope.dark_mode));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(value) = cache.get_token(key) {
                log::trace!("Token cache hit for '{}' in theme '{}'", path, scope.theme.id);
                return Ok(value);
            }
            log::trace!("Token cache miss for '{}' in theme '{}'", path, scope.theme.id);
        }

        self.navigations.fetch_add(1, Ordering::Relaxed);
        let raw = Navigator::new(scope.theme, scope.dark_mode).navigate(path)?;

        let value = if raw.is_reference() {
            chain.push(path.to_string());
            let nested = self.resolve_path(raw.path(), scope, chain);
            chain.pop();
            nested.map_err(|source| ResolveError::NestedResolution {
                path: path.to_string(),
                source: Box::new(source),
            })?
        } else {
            raw.path().to_string()
        };

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.set_token(key, value.clone());
        }
        Ok(value)
    }

    /// Resolve every reference, failing on the first one that does not
    /// resolve. Results are keyed by the reference as written.
    pub fn resolve_batch<'r, I>(
        &self,
        references: I,
        scope: ResolveScope<'_>,
    ) -> ResolveResult<IndexMap<String, String>>
    where
        I: IntoIterator<Item = &'r TokenReference>,
    {
        let mut results = IndexMap::new();
        for reference in references {
            let value = self.resolve_scoped(reference, scope)?;
            results.insert(reference.as_str().to_string(), value);
        }
        Ok(results)
    }

    /// Resolve a reference and describe the result. Failures are reported in
    /// [ResolvedToken::error] rather than returned.
    pub fn resolve_with_metadata(
        &self,
        reference: &TokenReference,
        scope: ResolveScope<'_>,
    ) -> ResolvedToken {
        if !reference.is_reference() && malformed_path(reference).is_none() {
            return ResolvedToken {
                value: reference.as_str().to_string(),
                path: reference.as_str().to_string(),
                category: TokenCategory::Custom,
                token_type: infer_type_from_value(reference.as_str()),
                fallback: None,
                dark_value: None,
                resolved: true,
                error: None,
            };
        }

        let path = reference.path();
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        let mut token = ResolvedToken {
            value: String::new(),
            path: path.to_string(),
            category: categorize(&segments),
            token_type: infer_type_from_path(&segments),
            fallback: None,
            dark_value: None,
            resolved: false,
            error: None,
        };

        match self.resolve_scoped(reference, scope) {
            Ok(value) => {
                token.value = value;
                token.resolved = true;
            }
            Err(e) => {
                token.error = Some(e.to_string());
                return token;
            }
        }

        if scope.theme.dark_tokens().is_some() {
            let other = self.resolve_scoped(reference, scope.with_dark_mode(!scope.dark_mode));
            match other {
                Ok(other) if other != token.value && scope.dark_mode => {
                    token.fallback = Some(other);
                    token.dark_value = Some(token.value.clone());
                }
                Ok(other) if other != token.value => token.dark_value = Some(other),
                _ => {}
            }
        }

        token
    }

    /// Classify a path without resolving it.
    pub fn token_info(&self, path: &str) -> TokenInfo {
        token_info(path)
    }
}

/// A bare namespace or layer name such as `colors`, or a path under one with
/// an empty segment. These are not literals even though they are not
/// references either.
fn malformed_path(reference: &TokenReference) -> Option<ResolveError> {
    let value = reference.path();
    if value.contains(char::is_whitespace) {
        return None;
    }
    let first = value.split(PATH_SEPARATOR).next()?;
    if TokenNamespace::parse(first).is_none() && TokenLayer::parse(first).is_none() {
        return None;
    }
    let reason = if value.contains(PATH_SEPARATOR) {
        "empty path segment"
    } else {
        "expected at least two segments"
    };
    Some(ResolveError::invalid_path(value, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        serde_json::from_value(serde_json::json!({
            "id": "default",
            "name": "Default",
            "tokens": {
                "primitives": {
                    "colors": { "blue-500": "#3b82f6", "blue-700": "#1d4ed8" }
                },
                "semantic": {
                    "colors": {
                        "text": { "default": "#111827" },
                        "interactive": { "primary": "primitives.colors.blue-500" }
                    }
                },
                "components": {
                    "button": { "bg": "semantic.colors.interactive.primary" },
                    "loop": { "a": "loop.b", "b": "loop.a" },
                    "broken": { "bg": "colors.brand.default" }
                }
            },
            "darkMode": {
                "enabled": true,
                "darkTokens": {
                    "semantic": {
                        "colors": { "interactive": { "primary": "primitives.colors.blue-700" } }
                    }
                }
            }
        }))
        .unwrap()
    }

    fn r(path: &str) -> TokenReference {
        TokenReference::from(path)
    }

    #[test]
    fn test_literal_passthrough_skips_navigation() {
        let resolver = TokenResolver::new(Arc::new(RuntimeCache::new()));
        let theme = theme();
        for literal in ["#fff", "1rem", "0 1px 2px rgba(0,0,0,0.1)", " padded "] {
            assert_eq!(resolver.resolve(&r(literal), &theme, false).unwrap(), literal);
            assert_eq!(resolver.resolve(&r(literal), &theme, true).unwrap(), literal);
        }
        assert_eq!(resolver.navigation_count(), 0);
    }

    #[test]
    fn test_bare_namespace_is_rejected() {
        let resolver = TokenResolver::uncached();
        let theme = theme();
        for path in ["colors", "primitives", "spacing.", "colors..primary"] {
            assert!(matches!(
                resolver.resolve(&r(path), &theme, false),
                Err(ResolveError::InvalidPath { .. })
            ));
        }
        assert_eq!(resolver.resolve(&r("bold"), &theme, false).unwrap(), "bold");

        let token = resolver.resolve_with_metadata(&r("colors"), ResolveScope::new(&theme, false));
        assert!(!token.resolved);
        assert!(token.error.is_some());
    }

    #[test]
    fn test_alias_chain() {
        let resolver = TokenResolver::uncached();
        let theme = theme();
        assert_eq!(resolver.resolve(&r("component.button.bg"), &theme, false).unwrap(), "#3b82f6");
        assert_eq!(resolver.resolve(&r("components.button.bg"), &theme, true).unwrap(), "#1d4ed8");
        assert_eq!(resolver.navigation_count(), 6);
    }

    #[test]
    fn test_cache_serves_second_call() {
        let cache = Arc::new(RuntimeCache::new());
        let resolver = TokenResolver::new(cache.clone());
        let theme = theme();

        let first = resolver.resolve(&r("colors.interactive.primary"), &theme, false).unwrap();
        let navigations = resolver.navigation_count();
        let second = resolver.resolve(&r("colors.interactive.primary"), &theme, false).unwrap();

        assert_eq!(first, second);
        assert_eq!(resolver.navigation_count(), navigations);
        // every link of the chain is cached
        assert_eq!(cache.token_count(), 2);
    }

    #[test]
    fn test_tenant_scopes_cache() {
        let cache = Arc::new(RuntimeCache::new());
        let resolver = TokenResolver::new(cache.clone());
        let theme = theme();
        let scope = ResolveScope::new(&theme, false);

        resolver.resolve_scoped(&r("colors.text.default"), scope).unwrap();
        resolver
            .resolve_scoped(&r("colors.text.default"), scope.with_tenant(Some("acme")))
            .unwrap();
        assert_eq!(resolver.navigation_count(), 2);
        assert_eq!(cache.token_count(), 2);
    }

    #[test]
    fn test_cycle_is_reported() {
        let resolver = TokenResolver::uncached();
        let err = resolver.resolve(&r("loop.a"), &theme(), false).unwrap_err();
        assert!(err.is_cycle());
        assert_eq!(
            err.root_cause(),
            &ResolveError::CyclicReference {
                chain: vec!["loop.a".into(), "loop.b".into(), "loop.a".into()]
            }
        );
    }

    #[test]
    fn test_depth_limit() {
        let resolver = TokenResolver::uncached().with_max_depth(2);
        let err = resolver.resolve(&r("components.button.bg"), &theme(), false).unwrap_err();
        assert!(matches!(err.root_cause(), ResolveError::DepthExceeded { limit: 2, .. }));

        let resolver = TokenResolver::uncached().with_max_depth(3);
        assert!(resolver.resolve(&r("components.button.bg"), &theme(), false).is_ok());
    }

    #[test]
    fn test_nested_failure_is_annotated() {
        let resolver = TokenResolver::uncached();
        let err = resolver.resolve(&r("broken.bg"), &theme(), false).unwrap_err();
        assert!(err.to_string().starts_with("nested resolution failed: "));
        assert!(matches!(
            err.root_cause(),
            ResolveError::UnknownColorGroup { segment, .. } if segment == "brand"
        ));
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cache = Arc::new(RuntimeCache::new());
        let resolver = TokenResolver::new(cache.clone());
        assert!(resolver.resolve(&r("broken.bg"), &theme(), false).is_err());
        assert_eq!(cache.token_count(), 0);
    }

    #[test]
    fn test_batch_fails_fast() {
        let resolver = TokenResolver::uncached();
        let theme = theme();
        let scope = ResolveScope::new(&theme, false);

        let ok = resolver
            .resolve_batch(&[r("colors.text.default"), r("#fff")], scope)
            .unwrap();
        assert_eq!(ok["colors.text.default"], "#111827");
        assert_eq!(ok["#fff"], "#fff");

        let err = resolver
            .resolve_batch(&[r("colors.text.default"), r("colors.nope.x"), r("#fff")], scope)
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnknownColorGroup { .. }));
    }

    #[test]
    fn test_metadata_for_light_request() {
        let resolver = TokenResolver::uncached();
        let theme = theme();
        let token = resolver
            .resolve_with_metadata(&r("colors.interactive.primary"), ResolveScope::new(&theme, false));

        assert!(token.resolved);
        assert_eq!(token.value, "#3b82f6");
        assert_eq!(token.category, TokenCategory::Semantic);
        assert_eq!(token.token_type, TokenType::Color);
        assert_eq!(token.dark_value.as_deref(), Some("#1d4ed8"));
        assert_eq!(token.fallback, None);
        assert_eq!(token.error, None);
    }

    #[test]
    fn test_metadata_for_dark_request() {
        let resolver = TokenResolver::uncached();
        let theme = theme();
        let token = resolver
            .resolve_with_metadata(&r("colors.interactive.primary"), ResolveScope::new(&theme, true));

        assert_eq!(token.value, "#1d4ed8");
        assert_eq!(token.fallback.as_deref(), Some("#3b82f6"));
        assert_eq!(token.dark_value.as_deref(), Some("#1d4ed8"));

        let token = resolver
            .resolve_with_metadata(&r("colors.text.default"), ResolveScope::new(&theme, true));
        assert_eq!(token.fallback, None);
        assert_eq!(token.dark_value, None);
    }

    #[test]
    fn test_metadata_for_failure_and_literal() {
        let resolver = TokenResolver::uncached();
        let theme = theme();

        let token = resolver.resolve_with_metadata(&r("colors.unknown.default"), ResolveScope::new(&theme, false));
        assert!(!token.resolved);
        assert!(token.value.is_empty());
        assert!(token.error.unwrap().contains("unknown"));

        let token = resolver.resolve_with_metadata(&r("2px"), ResolveScope::new(&theme, false));
        assert!(token.resolved);
        assert_eq!(token.category, TokenCategory::Custom);
        assert_eq!(token.token_type, TokenType::Spacing);
    }
}
