//! Walking a theme's token tree for a single path.
//!
//! Navigation returns the raw value stored at a path. Following aliases is
//! the resolver's job.

use std::iter;

use dtk_theme::{
    ColorGroup, DesignTokens, Theme, TokenLayer, TokenMap, TokenNamespace, TokenNode,
    TokenReference, PATH_SEPARATOR,
};

use crate::error::{ResolveError, ResolveResult};

/// Looks up raw values in a theme, consulting the dark override tree first
/// when dark mode is active.
pub(crate) struct Navigator<'a> {
    light: &'a DesignTokens,
    dark: Option<&'a DesignTokens>,
}

impl<'a> Navigator<'a> {
    pub(crate) fn new(theme: &'a Theme, dark_mode: bool) -> Self {
        Self {
            light: &theme.tokens,
            dark: if dark_mode { theme.dark_tokens() } else { None },
        }
    }

    /// Trees in lookup order.
    fn trees(&self) -> impl Iterator<Item = &'a DesignTokens> {
        self.dark.into_iter().chain(iter::once(self.light))
    }

    /// The raw value at `path`.
    pub(crate) fn navigate(&self, path: &str) -> ResolveResult<&'a TokenReference> {
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        if segments.len() < 2 {
            return Err(ResolveError::invalid_path(path, "expected at least two segments"));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ResolveError::invalid_path(path, "empty path segment"));
        }

        match TokenLayer::parse(segments[0]) {
            Some(TokenLayer::Primitive) => match qualified(path, &segments) {
                Ok((namespace, rest)) => self.primitive(path, namespace, rest),
                // radius, effects and breakpoints only exist as primitive maps
                Err(ResolveError::UnknownNamespace { .. })
                    if self.light.primitives.map(segments[1]).is_some() =>
                {
                    self.primitive_map(path, segments[1], &segments[2..])
                }
                Err(e) => Err(e),
            },
            Some(TokenLayer::Semantic) => {
                let (namespace, rest) = qualified(path, &segments)?;
                self.semantic(path, namespace, rest)
            }
            Some(TokenLayer::Component) => {
                if segments.len() < 3 {
                    return Err(ResolveError::invalid_path(
                        path,
                        "expected a component and a token name",
                    ));
                }
                self.component(path, segments[1], &segments[2..])
            }
            None => match TokenNamespace::parse(segments[0]) {
                Some(namespace) => self.unqualified(path, namespace, &segments[1..]),
                None => self.component(path, segments[0], &segments[1..]),
            },
        }
    }

    fn primitive(
        &self,
        path: &str,
        namespace: TokenNamespace,
        rest: &[&str],
    ) -> ResolveResult<&'a TokenReference> {
        let maps: Vec<&TokenMap> = self
            .trees()
            .map(|tree| namespace.primitive_map(&tree.primitives))
            .collect();
        lookup_maps(path, &maps, rest, || {
            format!("no primitive {} tokens available", namespace.as_str())
        })
    }

    fn primitive_map(
        &self,
        path: &str,
        name: &str,
        rest: &[&str],
    ) -> ResolveResult<&'a TokenReference> {
        let maps: Vec<&TokenMap> = self
            .trees()
            .filter_map(|tree| tree.primitives.map(name))
            .collect();
        lookup_maps(path, &maps, rest, || format!("no primitive {name} tokens available"))
    }

    fn semantic(
        &self,
        path: &str,
        namespace: TokenNamespace,
        rest: &[&str],
    ) -> ResolveResult<&'a TokenReference> {
        if namespace == TokenNamespace::Colors {
            return self.colors(path, rest);
        }
        let maps: Vec<&TokenMap> = self
            .trees()
            .filter_map(|tree| namespace.semantic_map(&tree.semantic))
            .collect();
        lookup_maps(path, &maps, rest, || {
            format!("no semantic {} tokens available", namespace.as_str())
        })
    }

    fn unqualified(
        &self,
        path: &str,
        namespace: TokenNamespace,
        rest: &[&str],
    ) -> ResolveResult<&'a TokenReference> {
        if namespace == TokenNamespace::Colors {
            if ColorGroup::parse(rest[0]).is_none() {
                // `colors.blue-500` reaches the palette directly.
                let palette: Vec<&TokenMap> =
                    self.trees().map(|tree| &tree.primitives.colors).collect();
                if let Some(value) = find_in_maps(&palette, rest) {
                    return Ok(value);
                }
            }
            return self.colors(path, rest);
        }

        let mut maps: Vec<&TokenMap> = Vec::new();
        for tree in self.trees() {
            if let Some(map) = namespace.semantic_map(&tree.semantic) {
                maps.push(map);
            }
            maps.push(namespace.primitive_map(&tree.primitives));
        }
        lookup_maps(path, &maps, rest, || {
            format!("no {} tokens available", namespace.as_str())
        })
    }

    fn colors(&self, path: &str, rest: &[&str]) -> ResolveResult<&'a TokenReference> {
        let Some(first) = rest.first() else {
            return Err(ResolveError::invalid_path(path, "empty color token path"));
        };
        let group = ColorGroup::parse(first).ok_or_else(|| ResolveError::UnknownColorGroup {
            path: path.to_string(),
            segment: first.to_string(),
        })?;

        let slot = match rest.get(1) {
            Some(slot) if group.has_slot(slot) => *slot,
            Some(slot) => {
                return Err(ResolveError::UnknownColorSlot {
                    path: path.to_string(),
                    group: group.as_str().to_string(),
                    segment: slot.to_string(),
                })
            }
            None => group.default_slot().ok_or_else(|| ResolveError::MissingVariant {
                path: path.to_string(),
                group: group.as_str().to_string(),
            })?,
        };
        if let Some(extra) = rest.get(2) {
            return Err(ResolveError::UnexpectedSegment {
                path: path.to_string(),
                segment: extra.to_string(),
            });
        }

        let palettes: Vec<_> = self
            .trees()
            .filter_map(|tree| tree.semantic.colors.as_ref())
            .filter(|colors| !colors.is_empty())
            .collect();
        if palettes.is_empty() {
            return Err(ResolveError::missing_branch(path, "no color tokens available"));
        }
        if !palettes.iter().any(|colors| colors.has_group(group)) {
            return Err(ResolveError::missing_branch(
                path,
                format!("no {} colors available", group.as_str()),
            ));
        }

        palettes
            .iter()
            .find_map(|colors| colors.get(group, slot))
            .ok_or_else(|| ResolveError::not_found(path))
    }

    fn component(
        &self,
        path: &str,
        component: &str,
        rest: &[&str],
    ) -> ResolveResult<&'a TokenReference> {
        let mut defined = false;
        let mut outcome = None;

        for tree in self.trees() {
            let Some(node) = tree.components.get(component) else {
                continue;
            };
            defined = true;
            match walk(node, rest) {
                Walk::Value(value) => return Ok(value),
                // keep the first outcome that says more than "missing"
                other => {
                    if matches!(outcome, None | Some(Walk::Missing)) {
                        outcome = Some(other);
                    }
                }
            }
        }

        if !defined {
            return Err(ResolveError::ComponentNotDefined {
                path: path.to_string(),
                component: component.to_string(),
            });
        }

        Err(match outcome {
            Some(Walk::Group) => ResolveError::invalid_path(path, "path names a token group"),
            Some(Walk::PastLeaf(segment)) => ResolveError::UnexpectedSegment {
                path: path.to_string(),
                segment: segment.to_string(),
            },
            _ => ResolveError::not_found(path),
        })
    }
}

enum Walk<'a, 's> {
    Value(&'a TokenReference),
    Group,
    Missing,
    PastLeaf(&'s str),
}

fn walk<'a, 's>(mut node: &'a TokenNode, rest: &[&'s str]) -> Walk<'a, 's> {
    for segment in rest {
        match node {
            TokenNode::Group(children) => match children.get(*segment) {
                Some(child) => node = child,
                None => return Walk::Missing,
            },
            TokenNode::Value(_) => return Walk::PastLeaf(*segment),
        }
    }
    match node {
        TokenNode::Value(value) if !value.is_empty() => Walk::Value(value),
        TokenNode::Value(_) => Walk::Missing,
        TokenNode::Group(_) => Walk::Group,
    }
}

fn qualified<'p>(
    path: &str,
    segments: &'p [&'p str],
) -> ResolveResult<(TokenNamespace, &'p [&'p str])> {
    if segments.len() < 3 {
        return Err(ResolveError::invalid_path(
            path,
            "expected a namespace and a token name after the layer",
        ));
    }
    let namespace = TokenNamespace::parse(segments[1]).ok_or_else(|| {
        ResolveError::UnknownNamespace {
            path: path.to_string(),
            segment: segments[1].to_string(),
        }
    })?;
    Ok((namespace, &segments[2..]))
}

/// Keys tried for the remaining segments: dotted first, then dashed.
fn candidate_keys(rest: &[&str]) -> [String; 2] {
    [rest.join("."), rest.join("-")]
}

fn find_in_maps<'a>(maps: &[&'a TokenMap], rest: &[&str]) -> Option<&'a TokenReference> {
    let keys = candidate_keys(rest);
    maps.iter().find_map(|map| {
        keys.iter()
            .find_map(|key| map.get(key))
            .filter(|value| !value.is_empty())
    })
}

fn lookup_maps<'a>(
    path: &str,
    maps: &[&'a TokenMap],
    rest: &[&str],
    missing: impl FnOnce() -> String,
) -> ResolveResult<&'a TokenReference> {
    if maps.iter().all(|map| map.is_empty()) {
        return Err(ResolveError::missing_branch(path, missing()));
    }
    find_in_maps(maps, rest).ok_or_else(|| ResolveError::not_found(path))
}
