//! Component token trees.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::reference::{TokenReference, PATH_SEPARATOR};

/// Component name to its token tree.
pub type ComponentTokens = IndexMap<String, TokenNode>;

/// A node in a component token tree: a value, or a named group of nodes
/// (variants, states, sub-parts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    /// A token value.
    Value(TokenReference),
    /// A nested group.
    Group(IndexMap<String, TokenNode>),
}

impl TokenNode {
    /// Walk `segments` down from this node.
    pub fn get<'a, I>(&self, segments: I) -> Option<&TokenNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        for segment in segments {
            match node {
                TokenNode::Group(children) => node = children.get(segment)?,
                TokenNode::Value(_) => return None,
            }
        }
        Some(node)
    }

    /// The value of a leaf node.
    pub fn as_value(&self) -> Option<&TokenReference> {
        match self {
            TokenNode::Value(value) => Some(value),
            TokenNode::Group(_) => None,
        }
    }

    /// The children of a group node.
    pub fn as_group(&self) -> Option<&IndexMap<String, TokenNode>> {
        match self {
            TokenNode::Group(children) => Some(children),
            TokenNode::Value(_) => None,
        }
    }

    /// Every leaf below this node as `(relative path, value)`, depth first in
    /// document order. A leaf at the root has an empty relative path.
    pub fn leaves(&self) -> Vec<(String, &TokenReference)> {
        let mut out = Vec::new();
        collect_leaves(self, String::new(), &mut out);
        out
    }
}

fn collect_leaves<'a>(node: &'a TokenNode, prefix: String, out: &mut Vec<(String, &'a TokenReference)>) {
    match node {
        TokenNode::Value(value) => out.push((prefix, value)),
        TokenNode::Group(children) => {
            for (key, child) in children {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}{PATH_SEPARATOR}{key}")
                };
                collect_leaves(child, path, out);
            }
        }
    }
}

impl From<&str> for TokenNode {
    fn from(value: &str) -> Self {
        TokenNode::Value(TokenReference::from(value))
    }
}
