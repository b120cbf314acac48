//! Node variants of the parse tree
//!
//! The raw format carries no type tags, so every node kind exposes a
//! structural check ([`Parsable::matches`]) and a [`ParseContext`] decides
//! which kind wins by trying them in order.

mod block;
mod sentence;
mod statements;

pub use block::Block;
pub use sentence::{space_tokens, Sentence};
pub use statements::Statements;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::context::ParseContext;
use crate::error::Result;
use crate::raw::RawNode;
use crate::tree::{NodeId, ParseTree};

/// Capabilities shared by every node kind
pub trait Parsable: Sized + Into<Node> {
    const KIND: NodeKind;

    /// Whether `raw` has the shape this kind knows how to parse
    fn matches(raw: &RawNode) -> bool;

    /// Builds the node from `raw`.
    ///
    /// `owner` is the arena slot reserved for the node being built; every
    /// descendant is parsed into `tree` with a context bound to it. When
    /// `synthesize_spacing` is set, single-space tokens are inserted between
    /// adjacent words. Only use it for freshly built content.
    fn parse(
        tree: &mut ParseTree,
        owner: NodeId,
        context: ParseContext,
        raw: &RawNode,
        synthesize_spacing: bool,
    ) -> Result<Self>;

    fn context(&self) -> &ParseContext;

    /// Dumps back to a raw tree. With `include_whitespace`, an unmodified
    /// node reproduces exactly the raw node it was parsed from.
    fn dump(&self, tree: &ParseTree, include_whitespace: bool) -> RawNode;

    /// Guess at the indentation of this node. Never contains a newline.
    fn get_indent(&self, tree: &ParseTree) -> String;
}

/// Variant descriptor used for dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    Block,
    Sentence,
    Statements,
}

impl NodeKind {
    pub fn matches(self, raw: &RawNode) -> bool {
        match self {
            NodeKind::Block => Block::matches(raw),
            NodeKind::Sentence => Sentence::matches(raw),
            NodeKind::Statements => Statements::matches(raw),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Block => "block",
            NodeKind::Sentence => "sentence",
            NodeKind::Statements => "statements",
        };
        f.write_str(name)
    }
}

/// A parsed node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Block(Block),
    Sentence(Sentence),
    Statements(Statements),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Block(_) => NodeKind::Block,
            Node::Sentence(_) => NodeKind::Sentence,
            Node::Statements(_) => NodeKind::Statements,
        }
    }

    pub fn context(&self) -> &ParseContext {
        match self {
            Node::Block(b) => b.context(),
            Node::Sentence(s) => s.context(),
            Node::Statements(s) => s.context(),
        }
    }

    pub(crate) fn context_mut(&mut self) -> &mut ParseContext {
        match self {
            Node::Block(b) => b.context_mut(),
            Node::Sentence(s) => s.context_mut(),
            Node::Statements(s) => s.context_mut(),
        }
    }

    pub fn dump(&self, tree: &ParseTree, include_whitespace: bool) -> RawNode {
        match self {
            Node::Block(b) => b.dump(tree, include_whitespace),
            Node::Sentence(s) => s.dump(tree, include_whitespace),
            Node::Statements(s) => s.dump(tree, include_whitespace),
        }
    }

    pub fn get_indent(&self, tree: &ParseTree) -> String {
        match self {
            Node::Block(b) => b.get_indent(tree),
            Node::Sentence(s) => Parsable::get_indent(s, tree),
            Node::Statements(s) => s.get_indent(tree),
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        if let Node::Block(ref b) = self {
            Some(b)
        } else {
            None
        }
    }

    pub fn as_sentence(&self) -> Option<&Sentence> {
        if let Node::Sentence(ref s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_statements(&self) -> Option<&Statements> {
        if let Node::Statements(ref s) = self {
            Some(s)
        } else {
            None
        }
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<Sentence> for Node {
    fn from(sentence: Sentence) -> Self {
        Node::Sentence(sentence)
    }
}

impl From<Statements> for Node {
    fn from(statements: Statements) -> Self {
        Node::Statements(statements)
    }
}
