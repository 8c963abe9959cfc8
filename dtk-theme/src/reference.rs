//! # Token References
//!
//! A token value is either a literal (`#3b82f6`, `1rem`, `0 1px 2px rgba(0,0,0,.1)`)
//! or a reference to another token written as a dotted path
//! (`colors.interactive.primary`, `primitives.colors.blue-500`).
//!
//! ```rust
//! use dtk_theme::TokenReference;
//!
//! assert!(TokenReference::from("colors.interactive.primary").is_reference());
//! assert!(!TokenReference::from("#3b82f6").is_reference());
//! assert!(!TokenReference::from("0.5rem").is_reference());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path separator between token segments.
pub const PATH_SEPARATOR: char = '.';

/// CSS function prefixes that always denote a literal.
const CSS_FUNCTIONS: &[&str] = &[
    "calc(",
    "var(",
    "url(",
    "rgb(",
    "rgba(",
    "hsl(",
    "hsla(",
    "linear-gradient(",
    "radial-gradient(",
    "repeating-linear-gradient(",
    "repeating-radial-gradient(",
    "conic-gradient(",
];

/// A token value as written in a theme document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenReference(String);

impl TokenReference {
    /// Create a token reference from any string value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Whether this value refers to another token instead of being a literal.
    ///
    /// A value is a reference if, once trimmed, it is non-empty, contains no
    /// whitespace, contains at least one `.`, has no empty segments and does
    /// not look like a CSS literal (hex color, CSS function, decimal number
    /// with an optional unit).
    pub fn is_reference(&self) -> bool {
        let value = self.0.trim();

        if value.is_empty() || value.contains(char::is_whitespace) {
            return false;
        }

        if !value.contains(PATH_SEPARATOR) {
            return false;
        }

        if value.starts_with('#') || CSS_FUNCTIONS.iter().any(|f| value.starts_with(f)) {
            return false;
        }

        if is_decimal_literal(value) {
            return false;
        }

        value.split(PATH_SEPARATOR).all(|segment| !segment.is_empty())
    }

    /// The token path for references, or the trimmed literal otherwise.
    pub fn path(&self) -> &str {
        self.0.trim()
    }

    /// The path segments of this value.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path().split(PATH_SEPARATOR)
    }

    /// The raw value as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Consume the reference and return the raw value.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Matches `-?\d+\.\d+[a-zA-Z%]*`, e.g. `0.5rem`, `-1.25`, `1.5em`, `33.3%`.
fn is_decimal_literal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let Some((whole, rest)) = digits.split_once('.') else {
        return false;
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let fraction_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if fraction_len == 0 {
        return false;
    }
    rest[fraction_len..]
        .bytes()
        .all(|b| b.is_ascii_alphabetic() || b == b'%')
}

impl fmt::Display for TokenReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenReference {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TokenReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for TokenReference {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl AsRef<str> for TokenReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_ref(value: &str) -> bool {
        TokenReference::from(value).is_reference()
    }

    #[test]
    fn test_dotted_paths_are_references() {
        assert!(is_ref("colors.interactive.primary"));
        assert!(is_ref("primitives.colors.blue-500"));
        assert!(is_ref("components.button.primary.background_color"));
        assert!(is_ref("  spacing.md  "));
    }

    #[test]
    fn test_literals_are_not_references() {
        assert!(!is_ref("#3b82f6"));
        assert!(!is_ref("1rem"));
        assert!(!is_ref("0.5rem"));
        assert!(!is_ref("-1.25"));
        assert!(!is_ref("33.3%"));
        assert!(!is_ref("hsl(217, 91%, 60%)"));
        assert!(!is_ref("rgba(0,0,0,0.1)"));
        assert!(!is_ref("calc(100%.5)"));
        assert!(!is_ref("0 1px 2px rgba(0,0,0,0.1)"));
        assert!(!is_ref("transparent"));
        assert!(!is_ref(""));
    }

    #[test]
    fn test_malformed_paths_are_not_references() {
        assert!(!is_ref("colors."));
        assert!(!is_ref(".colors"));
        assert!(!is_ref("colors..primary"));
    }

    #[test]
    fn test_path_trims_whitespace() {
        let reference = TokenReference::from(" colors.text.default ");
        assert_eq!(reference.path(), "colors.text.default");
        assert_eq!(
            reference.segments().collect::<Vec<_>>(),
            vec!["colors", "text", "default"]
        );
    }
}
