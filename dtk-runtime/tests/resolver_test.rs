mod common;

use std::sync::Arc;

use dtk_runtime::{ResolveError, ResolveScope, RuntimeCache, TokenResolver};
use dtk_theme::{Theme, TokenReference};
use serde_json::json;

use common::{default_theme, plain_theme, theme};

fn r(path: &str) -> TokenReference {
    TokenReference::from(path)
}

fn chain_theme(length: usize) -> Theme {
    let mut chain = serde_json::Map::new();
    for i in 0..length {
        chain.insert(format!("t{i}"), json!(format!("chain.t{}", i + 1)));
    }
    chain.insert(format!("t{length}"), json!("#000000"));
    theme(json!({
        "id": "chain",
        "name": "Chain",
        "tokens": { "components": { "chain": chain } }
    }))
}

#[test]
fn test_literals_pass_through_any_theme() {
    let resolver = TokenResolver::new(Arc::new(RuntimeCache::new()));
    let empty = Theme::new("empty", "Empty");

    for theme in [default_theme(), plain_theme(), empty] {
        for literal in ["#3b82f6", "rgb(0, 0, 0)", "1.5", "bold", "calc(1rem + 2px)"] {
            assert_eq!(resolver.resolve(&r(literal), &theme, false).unwrap(), literal);
            assert_eq!(resolver.resolve(&r(literal), &theme, true).unwrap(), literal);
        }
    }
    assert_eq!(resolver.navigation_count(), 0);
}

#[test]
fn test_alias_chain_across_layers() {
    let theme = theme(json!({
        "id": "alias",
        "name": "Alias",
        "tokens": {
            "semantic": { "colors": { "interactive": { "primary": "#3b82f6" } } },
            "components": { "button": { "bg": "semantic.colors.interactive.primary" } }
        }
    }));

    let resolver = TokenResolver::uncached();
    assert_eq!(resolver.resolve(&r("component.button.bg"), &theme, false).unwrap(), "#3b82f6");
    assert_eq!(resolver.resolve(&r("button.bg"), &theme, false).unwrap(), "#3b82f6");
}

#[test]
fn test_unknown_paths_are_rejected() {
    let resolver = TokenResolver::uncached();
    let theme = default_theme();

    assert!(matches!(
        resolver.resolve(&r("colors"), &theme, false),
        Err(ResolveError::InvalidPath { .. })
    ));
    assert!(matches!(
        resolver.resolve_scoped(&r("colors.unknown.default"), ResolveScope::new(&theme, false)),
        Err(ResolveError::UnknownColorGroup { ref segment, .. }) if segment == "unknown"
    ));
    assert!(matches!(
        resolver.resolve(&r("colors.interactive.loud"), &theme, false),
        Err(ResolveError::UnknownColorSlot { ref segment, .. }) if segment == "loud"
    ));
    assert!(matches!(
        resolver.resolve(&r("card.bg"), &theme, false),
        Err(ResolveError::ComponentNotDefined { ref component, .. }) if component == "card"
    ));

    let err = resolver.resolve(&r("colors.unknown.default"), &theme, false).unwrap_err();
    assert!(err.to_string().contains("'unknown'"));
}

#[test]
fn test_dark_mode_without_overrides_matches_light() {
    let resolver = TokenResolver::uncached();
    let theme = plain_theme();

    for path in ["colors.text.default", "colors.background.default", "colors.interactive.primary"] {
        assert_eq!(
            resolver.resolve(&r(path), &theme, true).unwrap(),
            resolver.resolve(&r(path), &theme, false).unwrap()
        );
    }
}

#[test]
fn test_dark_overrides_are_per_slot() {
    let resolver = TokenResolver::uncached();
    let theme = default_theme();

    assert_eq!(resolver.resolve(&r("colors.background.default"), &theme, true).unwrap(), "#0f172a");
    assert_eq!(resolver.resolve(&r("colors.text.default"), &theme, true).unwrap(), "#111827");
    assert_eq!(resolver.resolve(&r("colors.background"), &theme, false).unwrap(), "#ffffff");
}

#[test]
fn test_cache_keys_separate_dark_mode() {
    let cache = Arc::new(RuntimeCache::new());
    let resolver = TokenResolver::new(cache.clone());
    let theme = default_theme();

    let light = resolver.resolve(&r("colors.background.default"), &theme, false).unwrap();
    let dark = resolver.resolve(&r("colors.background.default"), &theme, true).unwrap();
    assert_ne!(light, dark);

    let navigations = resolver.navigation_count();
    assert_eq!(resolver.resolve(&r("colors.background.default"), &theme, false).unwrap(), light);
    assert_eq!(resolver.resolve(&r("colors.background.default"), &theme, true).unwrap(), dark);
    assert_eq!(resolver.navigation_count(), navigations);
}

#[test]
fn test_long_chains_hit_the_depth_limit() {
    let theme = chain_theme(40);

    let err = TokenResolver::uncached()
        .resolve(&r("chain.t0"), &theme, false)
        .unwrap_err();
    assert!(err.is_cycle());
    assert!(matches!(err.root_cause(), ResolveError::DepthExceeded { limit: 32, .. }));

    let resolver = TokenResolver::uncached().with_max_depth(64);
    assert_eq!(resolver.resolve(&r("chain.t0"), &theme, false).unwrap(), "#000000");
}

#[test]
fn test_self_reference_is_a_cycle() {
    let theme = theme(json!({
        "id": "self",
        "name": "Self",
        "tokens": { "semantic": { "spacing": { "md": "spacing.md" } } }
    }));

    let err = TokenResolver::uncached()
        .resolve(&r("spacing.md"), &theme, false)
        .unwrap_err();
    assert_eq!(
        err.root_cause(),
        &ResolveError::CyclicReference {
            chain: vec!["spacing.md".into(), "spacing.md".into()]
        }
    );
}
