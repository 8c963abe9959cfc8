//! Token namespaces and layers.
//!
//! The first segment of a token path names either a layer (`primitives`,
//! `semantic`, `components`) or a namespace (`colors`, `spacing`, ...). Both
//! are closed sets so every dispatch over them is an exhaustive `match`.

use indexmap::IndexMap;

use crate::document::{PrimitiveTokens, SemanticTokens};
use crate::reference::TokenReference;

/// A token namespace, selected by the first segment of an unqualified path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenNamespace {
    /// `colors`
    Colors,
    /// `spacing`
    Spacing,
    /// `typography`
    Typography,
    /// `border` / `borders`
    Border,
    /// `shadow` / `shadows`
    Shadow,
    /// `animation` / `animations`
    Animation,
    /// `size` / `sizes`
    Size,
    /// `zindex` / `z-index`
    ZIndex,
}

impl TokenNamespace {
    /// Every namespace, in declaration order.
    pub const ALL: [TokenNamespace; 8] = [
        Self::Colors,
        Self::Spacing,
        Self::Typography,
        Self::Border,
        Self::Shadow,
        Self::Animation,
        Self::Size,
        Self::ZIndex,
    ];

    /// Parse a path segment into a namespace.
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "colors" => Some(Self::Colors),
            "spacing" => Some(Self::Spacing),
            "typography" => Some(Self::Typography),
            "border" | "borders" => Some(Self::Border),
            "shadow" | "shadows" => Some(Self::Shadow),
            "animation" | "animations" => Some(Self::Animation),
            "size" | "sizes" => Some(Self::Size),
            "zindex" | "z-index" => Some(Self::ZIndex),
            _ => None,
        }
    }

    /// The canonical path segment for this namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::Spacing => "spacing",
            Self::Typography => "typography",
            Self::Border => "borders",
            Self::Shadow => "shadows",
            Self::Animation => "animation",
            Self::Size => "sizes",
            Self::ZIndex => "z-index",
        }
    }

    /// The prefix used for CSS custom properties in this namespace.
    pub fn css_prefix(&self) -> &'static str {
        match self {
            Self::Colors => "color",
            Self::Spacing => "spacing",
            Self::Typography => "typography",
            Self::Border => "border",
            Self::Shadow => "shadow",
            Self::Animation => "animation",
            Self::Size => "size",
            Self::ZIndex => "z-index",
        }
    }

    /// The primitive map backing this namespace.
    pub fn primitive_map<'a>(
        &self,
        primitives: &'a PrimitiveTokens,
    ) -> &'a IndexMap<String, TokenReference> {
        match self {
            Self::Colors => &primitives.colors,
            Self::Spacing => &primitives.spacing,
            Self::Typography => &primitives.typography,
            Self::Border => &primitives.borders,
            Self::Shadow => &primitives.shadows,
            Self::Animation => &primitives.animation,
            Self::Size => &primitives.sizes,
            Self::ZIndex => &primitives.z_index,
        }
    }

    /// The semantic map backing this namespace, if the semantic layer has a
    /// flat map for it. Semantic colors are structured and return `None`.
    pub fn semantic_map<'a>(
        &self,
        semantic: &'a SemanticTokens,
    ) -> Option<&'a IndexMap<String, TokenReference>> {
        match self {
            Self::Spacing => Some(&semantic.spacing),
            Self::Typography => Some(&semantic.typography),
            Self::Colors
            | Self::Border
            | Self::Shadow
            | Self::Animation
            | Self::Size
            | Self::ZIndex => None,
        }
    }
}

/// A token layer, selected by a qualifying first segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenLayer {
    /// Raw values: `primitives.*`
    Primitive,
    /// Role-based names: `semantic.*`
    Semantic,
    /// Component-specific names: `components.*`
    Component,
}

impl TokenLayer {
    /// Parse a path segment into a layer.
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "primitives" | "primitive" => Some(Self::Primitive),
            "semantic" => Some(Self::Semantic),
            "components" | "component" => Some(Self::Component),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_aliases() {
        assert_eq!(TokenNamespace::parse("borders"), Some(TokenNamespace::Border));
        assert_eq!(TokenNamespace::parse("border"), Some(TokenNamespace::Border));
        assert_eq!(TokenNamespace::parse("z-index"), Some(TokenNamespace::ZIndex));
        assert_eq!(TokenNamespace::parse("zindex"), Some(TokenNamespace::ZIndex));
        assert_eq!(TokenNamespace::parse("button"), None);
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for namespace in TokenNamespace::ALL {
            assert_eq!(TokenNamespace::parse(namespace.as_str()), Some(namespace));
        }
    }
}
