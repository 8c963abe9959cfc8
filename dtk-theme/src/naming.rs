//! CSS naming conventions.
//!
//! Pure string transforms from token paths to custom-property names and from
//! component/variant pairs to class names. Nothing here looks at a theme.

use crate::namespace::{TokenLayer, TokenNamespace};
use crate::reference::PATH_SEPARATOR;

/// The custom-property name for a token path.
///
/// A leading layer segment is dropped when at least two segments follow it,
/// and the namespace segment is replaced by its CSS prefix:
///
/// ```rust
/// use dtk_theme::css_variable_name;
///
/// assert_eq!(css_variable_name("colors.interactive.primary"), "--color-interactive-primary");
/// assert_eq!(css_variable_name("primitives.colors.blue-500"), "--color-blue-500");
/// assert_eq!(css_variable_name("semantic.spacing.md"), "--spacing-md");
/// assert_eq!(css_variable_name("components.button.bg"), "--button-bg");
/// assert_eq!(css_variable_name("accent"), "--accent");
/// ```
pub fn css_variable_name(path: &str) -> String {
    let mut segments: Vec<&str> = path
        .trim()
        .split(PATH_SEPARATOR)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() >= 3 && TokenLayer::parse(segments[0]).is_some() {
        segments.remove(0);
    }

    let mut name = String::from("--");
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            name.push('-');
        }
        match TokenNamespace::parse(segment).filter(|_| i == 0) {
            Some(namespace) => name.push_str(namespace.css_prefix()),
            None => name.push_str(segment),
        }
    }
    name
}

/// The class name for a component variant. An empty variant yields the bare
/// component name.
///
/// ```rust
/// use dtk_theme::class_name;
///
/// assert_eq!(class_name("button", "primary"), "button-primary");
/// assert_eq!(class_name("button", ""), "button");
/// ```
pub fn class_name(component: &str, variant: &str) -> String {
    let component = component.trim();
    let variant = variant.trim();
    if variant.is_empty() {
        component.to_string()
    } else {
        format!("{component}-{variant}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_kept_for_short_paths() {
        assert_eq!(css_variable_name("semantic.md"), "--semantic-md");
    }

    #[test]
    fn test_namespace_aliases_share_prefix() {
        assert_eq!(css_variable_name("borders.thin"), "--border-thin");
        assert_eq!(css_variable_name("border.thin"), "--border-thin");
        assert_eq!(css_variable_name("zindex.modal"), "--z-index-modal");
    }

    #[test]
    fn test_only_leading_namespace_is_rewritten() {
        assert_eq!(
            css_variable_name("components.card.colors.bg"),
            "--card-colors-bg"
        );
    }

    #[test]
    fn test_unknown_primitive_maps_keep_their_name() {
        assert_eq!(css_variable_name("primitives.radius.sm"), "--radius-sm");
    }
}
