//! Compiled theme artifacts.
//!
//! The stylesheet text comes from the theme provider. The variable, class and
//! component maps are pulled out of it by scanning lines, which is good enough
//! for the provider's own output but is not a CSS parser: nested rules,
//! comments spanning lines and minified sheets are not understood. Nothing
//! reads these maps to decide what [CompiledTheme::css] contains.

use std::time::SystemTime;

use indexmap::IndexMap;
use serde::Serialize;

/// A theme compiled to stylesheet text plus extracted metadata.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledTheme {
    /// Theme id.
    pub id: String,
    /// Theme display name.
    pub name: String,
    /// Full stylesheet text as returned by the provider.
    pub css: String,
    /// Custom property name to value.
    pub variables: IndexMap<String, String>,
    /// Class name to selector text.
    pub classes: IndexMap<String, String>,
    /// Class name to its full rule block.
    pub components: IndexMap<String, String>,
    /// When the artifact was built.
    pub timestamp: SystemTime,
    /// MD5 of [CompiledTheme::css], lower-case hex.
    pub hash: String,
    /// Dark-mode overrides, compiled the same way.
    pub dark_mode: Option<Box<CompiledTheme>>,
}

impl CompiledTheme {
    /// Build an artifact from stylesheet text.
    pub fn from_css(id: impl Into<String>, name: impl Into<String>, css: String) -> Self {
        let variables = extract_variables(&css);
        let (classes, components) = extract_rules(&css);
        let hash = content_hash(&css);

        Self {
            id: id.into(),
            name: name.into(),
            css,
            variables,
            classes,
            components,
            timestamp: SystemTime::now(),
            hash,
            dark_mode: None,
        }
    }

    /// Attach a dark-mode artifact.
    pub fn with_dark_mode(mut self, dark: CompiledTheme) -> Self {
        self.dark_mode = Some(Box::new(dark));
        self
    }

    /// The stylesheet with the dark overrides appended inside a
    /// `prefers-color-scheme: dark` media query, when there are any.
    pub fn css_with_dark_mode(&self) -> String {
        match &self.dark_mode {
            Some(dark) => {
                let mut css = self.css.clone();
                if !css.ends_with('\n') {
                    css.push('\n');
                }
                css.push_str("\n@media (prefers-color-scheme: dark) {\n");
                css.push_str(&dark.css);
                if !dark.css.ends_with('\n') {
                    css.push('\n');
                }
                css.push_str("}\n");
                css
            }
            None => self.css.clone(),
        }
    }

    /// Every rule block whose class is `component` or starts with
    /// `component-`, in stylesheet order.
    pub fn component_rules(&self, component: &str) -> Vec<&str> {
        let prefix = format!("{component}-");
        self.components
            .iter()
            .filter(|(class, _)| class.as_str() == component || class.starts_with(&prefix))
            .map(|(_, rule)| rule.as_str())
            .collect()
    }
}

/// MD5 of the stylesheet text as lower-case hex.
pub fn content_hash(css: &str) -> String {
    format!("{:x}", md5::compute(css.as_bytes()))
}

/// Collect `--name: value;` declarations. Later declarations of a name win.
pub fn extract_variables(css: &str) -> IndexMap<String, String> {
    let mut variables = IndexMap::new();
    for line in css.lines() {
        let line = line.trim();
        if !line.starts_with("--") {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            let value = value.strip_suffix(';').unwrap_or(value).trim();
            variables.insert(name.trim().to_string(), value.to_string());
        }
    }
    variables
}

/// Collect class selectors and the rule blocks they open.
fn extract_rules(css: &str) -> (IndexMap<String, String>, IndexMap<String, String>) {
    let mut classes = IndexMap::new();
    let mut components = IndexMap::new();
    let mut open: Option<(String, Vec<&str>)> = None;

    for line in css.lines() {
        let trimmed = line.trim();

        if let Some((class, mut body)) = open.take() {
            body.push(line);
            if trimmed.contains('}') {
                components.insert(class, body.join("\n"));
            } else {
                open = Some((class, body));
            }
            continue;
        }

        if !trimmed.starts_with('.') {
            continue;
        }
        let Some((selector, _)) = trimmed.split_once('{') else {
            continue;
        };
        let selector = selector.trim();
        let class = selector
            .trim_start_matches('.')
            .split(|c: char| c.is_whitespace() || c == ':' || c == ',' || c == '.')
            .next()
            .unwrap_or_default()
            .to_string();
        if class.is_empty() {
            continue;
        }

        classes.insert(class.clone(), selector.to_string());
        if trimmed.contains('}') {
            components.insert(class, line.to_string());
        } else {
            open = Some((class, vec![line]));
        }
    }

    (classes, components)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSS: &str = "/* Theme: Default (default) */\n\
        \n\
        :root {\n  --color-blue-500: #3b82f6;\n  --spacing-md: 1rem;\n}\n\
        \n\
        .button {\n  --button-bg: var(--color-blue-500);\n}\n\
        \n\
        .button-primary {\n  --button-bg: #2563eb;\n}\n\
        \n\
        .card { --card-bg: #fff; }\n\
        \n\
        .buttonish {\n  --x: 1px;\n}\n";

    #[test]
    fn test_extract_variables() {
        let variables = extract_variables(CSS);
        assert_eq!(variables["--color-blue-500"], "#3b82f6");
        assert_eq!(variables["--spacing-md"], "1rem");
        // the variant rule is scanned last
        assert_eq!(variables["--button-bg"], "#2563eb");
    }

    #[test]
    fn test_extract_classes_and_rules() {
        let compiled = CompiledTheme::from_css("default", "Default", CSS.to_string());
        assert_eq!(
            compiled.classes.keys().collect::<Vec<_>>(),
            vec!["button", "button-primary", "card", "buttonish"]
        );
        assert_eq!(compiled.classes["button-primary"], ".button-primary");
        assert_eq!(compiled.components["card"], ".card { --card-bg: #fff; }");
        assert_eq!(
            compiled.components["button"],
            ".button {\n  --button-bg: var(--color-blue-500);\n}"
        );
    }

    #[test]
    fn test_component_rules_match_prefix_only() {
        let compiled = CompiledTheme::from_css("default", "Default", CSS.to_string());
        let rules = compiled.component_rules("button");
        assert_eq!(rules.len(), 2);
        assert!(rules[1].starts_with(".button-primary"));
        assert!(compiled.component_rules("badge").is_empty());
    }

    #[test]
    fn test_hash_is_a_function_of_css() {
        let a = CompiledTheme::from_css("a", "A", CSS.to_string());
        let b = CompiledTheme::from_css("b", "B", CSS.to_string());
        let c = CompiledTheme::from_css("a", "A", format!("{CSS}\n"));
        assert_eq!(a.hash, b.hash);
        assert_ne!(a.hash, c.hash);
        assert_eq!(a.hash.len(), 32);
    }

    #[test]
    fn test_dark_mode_wrapping() {
        let light = CompiledTheme::from_css("a", "A", ":root {\n  --x: 1px;\n}\n".into());
        assert_eq!(light.css_with_dark_mode(), light.css);

        let dark = CompiledTheme::from_css("a-dark", "A", ":root {\n  --x: 2px;\n}\n".into());
        let css = light.with_dark_mode(dark).css_with_dark_mode();
        assert!(css.ends_with(
            "\n@media (prefers-color-scheme: dark) {\n:root {\n  --x: 2px;\n}\n}\n"
        ));
    }

    #[test]
    fn test_garbage_is_tolerated() {
        let compiled = CompiledTheme::from_css("x", "X", ".a{.b{}}}\n--:\n.{\n".into());
        assert_eq!(compiled.css, ".a{.b{}}}\n--:\n.{\n");
    }
}
