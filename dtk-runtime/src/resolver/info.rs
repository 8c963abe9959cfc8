//! Path classification without a theme.

use std::fmt;

use dtk_theme::{TokenLayer, TokenNamespace, TokenReference, PATH_SEPARATOR};
use serde::Serialize;

/// Which layer a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    /// Raw values.
    Primitive,
    /// Role-based values.
    Semantic,
    /// Component-scoped values.
    Component,
    /// Literals and paths that fit no layer.
    Custom,
}

impl TokenCategory {
    /// Lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::Semantic => "semantic",
            Self::Component => "component",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The inferred kind of a token value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// A color.
    #[serde(rename = "color")]
    Color,
    /// A spacing length.
    #[serde(rename = "spacing")]
    Spacing,
    /// A typography value.
    #[serde(rename = "typography")]
    Typography,
    /// A border value.
    #[serde(rename = "border")]
    Border,
    /// A shadow.
    #[serde(rename = "shadow")]
    Shadow,
    /// A duration or easing.
    #[serde(rename = "animation")]
    Animation,
    /// A size.
    #[serde(rename = "size")]
    Size,
    /// A stacking order.
    #[serde(rename = "z-index")]
    ZIndex,
    /// A reference whose kind is not known from its path.
    #[serde(rename = "reference")]
    Reference,
    /// An uncategorized literal.
    #[serde(rename = "literal")]
    Literal,
}

impl TokenType {
    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Spacing => "spacing",
            Self::Typography => "typography",
            Self::Border => "border",
            Self::Shadow => "shadow",
            Self::Animation => "animation",
            Self::Size => "size",
            Self::ZIndex => "z-index",
            Self::Reference => "reference",
            Self::Literal => "literal",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TokenNamespace> for TokenType {
    fn from(namespace: TokenNamespace) -> Self {
        match namespace {
            TokenNamespace::Colors => Self::Color,
            TokenNamespace::Spacing => Self::Spacing,
            TokenNamespace::Typography => Self::Typography,
            TokenNamespace::Border => Self::Border,
            TokenNamespace::Shadow => Self::Shadow,
            TokenNamespace::Animation => Self::Animation,
            TokenNamespace::Size => Self::Size,
            TokenNamespace::ZIndex => Self::ZIndex,
        }
    }
}

/// What a path looks like, worked out from the string alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    /// The path as given.
    pub path: String,
    /// Layer of the path.
    pub category: TokenCategory,
    /// Kind of value the path names.
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Whether the path has at least two non-empty segments.
    pub valid: bool,
    /// First segment.
    pub segment: String,
    /// Everything after the first segment.
    pub name: String,
}

/// Classify a path without resolving it.
pub fn token_info(path: &str) -> TokenInfo {
    let trimmed = path.trim();
    let segments: Vec<&str> = trimmed.split(PATH_SEPARATOR).collect();
    let valid = segments.len() >= 2 && segments.iter().all(|s| !s.is_empty());

    if segments.len() < 2 {
        return TokenInfo {
            path: path.to_string(),
            category: TokenCategory::Custom,
            token_type: TokenType::Literal,
            valid: false,
            segment: trimmed.to_string(),
            name: String::new(),
        };
    }

    TokenInfo {
        path: path.to_string(),
        category: categorize(&segments),
        token_type: infer_type_from_path(&segments),
        valid,
        segment: segments[0].to_string(),
        name: segments[1..].join("."),
    }
}

/// The layer a split path belongs to.
pub fn categorize(segments: &[&str]) -> TokenCategory {
    let Some(first) = segments.first() else {
        return TokenCategory::Custom;
    };
    match TokenLayer::parse(first) {
        Some(TokenLayer::Primitive) => TokenCategory::Primitive,
        Some(TokenLayer::Semantic) => TokenCategory::Semantic,
        Some(TokenLayer::Component) => TokenCategory::Component,
        None if TokenNamespace::parse(first).is_some() => TokenCategory::Semantic,
        None => TokenCategory::Component,
    }
}

/// The value kind a split path names.
pub fn infer_type_from_path(segments: &[&str]) -> TokenType {
    let namespace_segment = match segments.first().and_then(|s| TokenLayer::parse(s)) {
        Some(TokenLayer::Primitive) | Some(TokenLayer::Semantic) => segments.get(1),
        Some(TokenLayer::Component) => return TokenType::Reference,
        None => segments.first(),
    };

    namespace_segment
        .and_then(|s| TokenNamespace::parse(s))
        .map_or(TokenType::Reference, TokenType::from)
}

/// The value kind a literal looks like.
pub fn infer_type_from_value(value: &str) -> TokenType {
    let value = value.trim();
    if value.starts_with('#') || value.starts_with("hsl") || value.starts_with("rgb") {
        return TokenType::Color;
    }
    if value.ends_with("rem") || value.ends_with("px") || value.ends_with("em") {
        return TokenType::Spacing;
    }
    if TokenReference::from(value).is_reference() {
        return TokenType::Reference;
    }
    TokenType::Literal
}
