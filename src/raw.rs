//! Raw token structure exchanged with the tokenizer
//!
//! A raw node is either a single token or an ordered list of raw nodes.
//! Whitespace is kept as separate tokens, so the structure carries
//! everything needed to reproduce the source byte for byte.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A token or a nested list of raw nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum RawNode {
    Token(String),
    List(Vec<RawNode>),
}

impl RawNode {
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    pub fn list(items: impl IntoIterator<Item = RawNode>) -> Self {
        Self::List(items.into_iter().collect())
    }

    pub fn is_token(&self) -> bool {
        matches!(self, RawNode::Token(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RawNode::List(_))
    }

    pub fn as_token(&self) -> Option<&str> {
        if let RawNode::Token(ref token) = self {
            Some(token)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[RawNode]> {
        if let RawNode::List(ref items) = self {
            Some(items)
        } else {
            None
        }
    }

    /// Whether this is a token made only of whitespace
    pub fn is_whitespace(&self) -> bool {
        self.as_token().is_some_and(is_whitespace)
    }

    /// All tokens of the tree, depth first
    pub fn flatten(&self) -> Vec<&str> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        tokens
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            RawNode::Token(token) => out.push(token),
            RawNode::List(items) => {
                for item in items {
                    item.collect_tokens(out);
                }
            }
        }
    }

    /// Reads a raw tree from JSON.
    ///
    /// Well-formed JSON that is not made of strings and arrays is a
    /// structural mismatch, anything else a [`TreeError::Json`].
    ///
    /// [`TreeError::Json`]: crate::TreeError::Json
    #[cfg(feature = "serde")]
    pub fn from_json(input: &str) -> crate::error::Result<Self> {
        serde_json::from_str(input).map_err(|err| match err.classify() {
            serde_json::error::Category::Data => crate::error::TreeError::StructuralMismatch(
                format!("Raw nodes are strings or lists of raw nodes: {err}"),
            ),
            _ => err.into(),
        })
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[cfg(feature = "serde")]
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&str> for RawNode {
    fn from(token: &str) -> Self {
        RawNode::Token(token.to_string())
    }
}

impl From<String> for RawNode {
    fn from(token: String) -> Self {
        RawNode::Token(token)
    }
}

impl From<Vec<RawNode>> for RawNode {
    fn from(items: Vec<RawNode>) -> Self {
        RawNode::List(items)
    }
}

/// Whether `token` is non-empty and consists solely of whitespace.
///
/// The empty token counts as a word.
pub fn is_whitespace(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_whitespace)
}

/// Builds a [`RawNode`] from a nested list literal.
///
/// ```ignore
/// let block = raw!([["server", " "], [["\n    ", "listen", " ", "80", ";"], "\n"]]);
/// ```
#[macro_export]
macro_rules! raw {
    ([$($item:tt),* $(,)?]) => {
        $crate::RawNode::List(vec![$($crate::raw!($item)),*])
    };
    ($token:expr) => {
        $crate::RawNode::from($token)
    };
}
