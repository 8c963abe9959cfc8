//! # Theme Documents
//!
//! A [Theme] is a read-only document handed to the engine by a
//! [ThemeProvider](crate::ThemeProvider). Its tokens are split into three
//! layers:
//!
//! - **Primitives**: raw values (`primitives.colors.blue-500 = "#3b82f6"`)
//! - **Semantic**: role-based names (`colors.interactive.primary`)
//! - **Components**: per-component trees (`components.button.primary.bg`)
//!
//! An optional dark-mode section carries an override tree of the same shape.
//!
//! ## Example
//!
//! ```rust
//! use dtk_theme::Theme;
//!
//! let theme = Theme::from_json(r##"{
//!     "id": "default",
//!     "name": "Default",
//!     "tokens": {
//!         "primitives": { "colors": { "blue-500": "#3b82f6" } },
//!         "semantic": {
//!             "colors": { "interactive": { "primary": "primitives.colors.blue-500" } }
//!         }
//!     }
//! }"##).unwrap();
//!
//! assert_eq!(theme.id, "default");
//! assert!(!theme.supports_dark_mode());
//! ```

mod colors;
mod component;

pub use colors::{
    BackgroundColors, BorderColors, ColorGroup, FeedbackColors, InteractiveColors, SemanticColors,
    TextColors,
};
pub use component::{ComponentTokens, TokenNode};

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ThemeError, ThemeResult};
use crate::reference::{TokenReference, PATH_SEPARATOR};

/// An ordered map of token names to values.
pub type TokenMap = IndexMap<String, TokenReference>;

/// A theme document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Document version.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Author or owning team.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    /// The token tree.
    #[serde(default)]
    pub tokens: DesignTokens,
    /// Dark-mode configuration and overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<DarkModeConfig>,
}

impl Theme {
    /// Create an empty theme.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a theme from JSON.
    pub fn from_json(content: &str) -> ThemeResult<Self> {
        serde_json::from_str(content).map_err(|e| ThemeError::parse_error("json", e.to_string()))
    }

    /// Parse a theme from TOML.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        toml::from_str(content).map_err(|e| ThemeError::parse_error("toml", e.to_string()))
    }

    /// Load a theme from a `.json` or `.toml` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ThemeError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            _ => Err("unsupported theme file format, use .json or .toml".to_string()),
        };

        parsed.map_err(|details| ThemeError::parse_error(path.display().to_string(), details))
    }

    /// Serialize the theme to pretty-printed JSON.
    pub fn to_json(&self) -> ThemeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ThemeError::Serialization(e.to_string()))
    }

    /// Builder-style setter for the token tree.
    pub fn with_tokens(mut self, tokens: DesignTokens) -> Self {
        self.tokens = tokens;
        self
    }

    /// Builder-style setter for the dark-mode section.
    pub fn with_dark_mode(mut self, dark_mode: DarkModeConfig) -> Self {
        self.dark_mode = Some(dark_mode);
        self
    }

    /// Whether dark mode is enabled for this theme.
    pub fn supports_dark_mode(&self) -> bool {
        self.dark_mode.as_ref().is_some_and(|d| d.enabled)
    }

    /// The dark override tree. Only returned when dark mode is enabled.
    pub fn dark_tokens(&self) -> Option<&DesignTokens> {
        self.dark_mode
            .as_ref()
            .filter(|d| d.enabled)
            .and_then(|d| d.dark_tokens.as_ref())
    }

    /// A theme holding only the dark overrides, used to compile the nested
    /// dark stylesheet. `None` when there are no overrides to compile.
    pub fn dark_variant(&self) -> Option<Theme> {
        let tokens = self.dark_tokens().filter(|t| !t.is_empty())?;
        Some(Theme {
            id: format!("{}-dark", self.id),
            name: format!("{} (Dark)", self.name),
            description: self.description.clone(),
            version: self.version.clone(),
            author: self.author.clone(),
            tokens: tokens.clone(),
            dark_mode: None,
        })
    }
}

/// Dark-mode section of a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DarkModeConfig {
    /// Whether the override tree is consulted at all.
    pub enabled: bool,
    /// Whether dark mode should be active by default.
    #[serde(default)]
    pub default: bool,
    /// How the host applies dark mode (`class`, `media`, `auto`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub strategy: String,
    /// Override tree with the same shape as [Theme::tokens].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_tokens: Option<DesignTokens>,
}

/// The layered token tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignTokens {
    /// Raw values.
    pub primitives: PrimitiveTokens,
    /// Role-based values.
    pub semantic: SemanticTokens,
    /// Per-component trees.
    pub components: ComponentTokens,
}

impl DesignTokens {
    /// Whether the tree carries no values at all.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.semantic.is_empty() && self.components.is_empty()
    }

    /// Every value in the tree as `(qualified path, value)`, in document
    /// order: primitives, then semantic tokens, then components.
    pub fn entries(&self) -> Vec<(String, &TokenReference)> {
        let mut entries = Vec::new();

        for (map_name, map) in self.primitives.maps() {
            for (key, value) in map {
                entries.push((format!("primitives.{map_name}.{key}"), value));
            }
        }

        if let Some(colors) = &self.semantic.colors {
            for (group, slot, value) in colors.entries() {
                entries.push((format!("semantic.colors.{}.{slot}", group.as_str()), value));
            }
        }
        for (key, value) in &self.semantic.spacing {
            entries.push((format!("semantic.spacing.{key}"), value));
        }
        for (key, value) in &self.semantic.typography {
            entries.push((format!("semantic.typography.{key}"), value));
        }

        for (component, node) in &self.components {
            for (rest, value) in node.leaves() {
                let path = if rest.is_empty() {
                    format!("components.{component}")
                } else {
                    format!("components.{component}.{rest}")
                };
                entries.push((path, value));
            }
        }

        entries
    }

    /// Store `value` at a qualified path, in the form produced by
    /// [DesignTokens::entries]. Missing groups and maps are created.
    ///
    /// ```rust
    /// use dtk_theme::DesignTokens;
    ///
    /// let mut tokens = DesignTokens::default();
    /// tokens.set_token("semantic.colors.interactive.primary", "#e11d48").unwrap();
    /// tokens.set_token("components.button.primary.bg", "colors.interactive.primary").unwrap();
    /// assert_eq!(tokens.entries().len(), 2);
    /// assert!(tokens.set_token("semantic.colors.interactive.loud", "#000").is_err());
    /// ```
    pub fn set_token(&mut self, path: &str, value: impl Into<TokenReference>) -> ThemeResult<()> {
        let value = value.into();
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        if segments.len() < 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(ThemeError::invalid_token_path(
                path,
                "expected a layer, a namespace and a token name",
            ));
        }

        match (segments[0], segments[1]) {
            ("primitives", map_name) => {
                let map = self.primitives.map_mut(map_name).ok_or_else(|| {
                    ThemeError::invalid_token_path(path, format!("no primitive map '{map_name}'"))
                })?;
                map.insert(segments[2..].join("."), value);
                Ok(())
            }
            ("semantic", "colors") => {
                let group = ColorGroup::parse(segments[2]).ok_or_else(|| {
                    ThemeError::invalid_token_path(path, format!("unknown color group '{}'", segments[2]))
                })?;
                let slot = match &segments[3..] {
                    [slot] => *slot,
                    _ => return Err(ThemeError::invalid_token_path(path, "expected a color group and a slot")),
                };
                let colors = self.semantic.colors.get_or_insert_with(Default::default);
                if colors.set(group, slot, value) {
                    Ok(())
                } else {
                    Err(ThemeError::invalid_token_path(path, format!("unknown color slot '{slot}'")))
                }
            }
            ("semantic", "spacing") => {
                self.semantic.spacing.insert(segments[2..].join("."), value);
                Ok(())
            }
            ("semantic", "typography") => {
                self.semantic.typography.insert(segments[2..].join("."), value);
                Ok(())
            }
            ("components", component) => {
                let node = self
                    .components
                    .entry(component.to_string())
                    .or_insert_with(|| TokenNode::Group(IndexMap::new()));
                store_node(node, &segments[2..], value)
                    .map_err(|message| ThemeError::invalid_token_path(path, message))
            }
            (layer, namespace) => Err(ThemeError::invalid_token_path(
                path,
                format!("cannot store tokens under '{layer}.{namespace}'"),
            )),
        }
    }
}

fn store_node(node: &mut TokenNode, segments: &[&str], value: TokenReference) -> Result<(), &'static str> {
    match segments.split_first() {
        None => {
            if matches!(node, TokenNode::Group(children) if !children.is_empty()) {
                return Err("path names a token group");
            }
            *node = TokenNode::Value(value);
            Ok(())
        }
        Some((first, rest)) => match node {
            TokenNode::Group(children) => store_node(
                children
                    .entry(first.to_string())
                    .or_insert_with(|| TokenNode::Group(IndexMap::new())),
                rest,
                value,
            ),
            TokenNode::Value(_) => Err("path continues past a token value"),
        },
    }
}

/// Raw values, one ordered map per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveTokens {
    /// Color palette.
    pub colors: TokenMap,
    /// Spacing scale.
    pub spacing: TokenMap,
    /// Corner radii.
    pub radius: TokenMap,
    /// Font families, sizes, weights and line heights.
    pub typography: TokenMap,
    /// Border widths and styles.
    pub borders: TokenMap,
    /// Box shadows.
    pub shadows: TokenMap,
    /// Opacity, blur and other effects.
    pub effects: TokenMap,
    /// Durations and easings.
    pub animation: TokenMap,
    /// Fixed sizes.
    pub sizes: TokenMap,
    /// Stacking order.
    #[serde(rename = "z-index")]
    pub z_index: TokenMap,
    /// Responsive breakpoints.
    pub breakpoints: TokenMap,
}

impl PrimitiveTokens {
    /// Every map with its document key, in declaration order.
    pub fn maps(&self) -> [(&'static str, &TokenMap); 11] {
        [
            ("colors", &self.colors),
            ("spacing", &self.spacing),
            ("radius", &self.radius),
            ("typography", &self.typography),
            ("borders", &self.borders),
            ("shadows", &self.shadows),
            ("effects", &self.effects),
            ("animation", &self.animation),
            ("sizes", &self.sizes),
            ("z-index", &self.z_index),
            ("breakpoints", &self.breakpoints),
        ]
    }

    /// Whether every map is empty.
    pub fn is_empty(&self) -> bool {
        self.maps().iter().all(|(_, map)| map.is_empty())
    }

    /// The map stored under a document key such as `radius` or `z-index`.
    pub fn map(&self, name: &str) -> Option<&TokenMap> {
        self.maps()
            .into_iter()
            .find_map(|(key, map)| (key == name).then_some(map))
    }

    fn map_mut(&mut self, name: &str) -> Option<&mut TokenMap> {
        match name {
            "colors" => Some(&mut self.colors),
            "spacing" => Some(&mut self.spacing),
            "radius" => Some(&mut self.radius),
            "typography" => Some(&mut self.typography),
            "borders" => Some(&mut self.borders),
            "shadows" => Some(&mut self.shadows),
            "effects" => Some(&mut self.effects),
            "animation" => Some(&mut self.animation),
            "sizes" => Some(&mut self.sizes),
            "z-index" => Some(&mut self.z_index),
            "breakpoints" => Some(&mut self.breakpoints),
            _ => None,
        }
    }
}

/// Role-based values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticTokens {
    /// Structured color groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<SemanticColors>,
    /// Spacing roles.
    pub spacing: TokenMap,
    /// Typography roles.
    pub typography: TokenMap,
}

impl SemanticTokens {
    /// Whether no semantic value is defined.
    pub fn is_empty(&self) -> bool {
        self.colors.as_ref().map_or(true, SemanticColors::is_empty)
            && self.spacing.is_empty()
            && self.typography.is_empty()
    }
}
