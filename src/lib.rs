//! Lossless, mutable parse tree for curly-brace configuration files.
//!
//! A tokenizer hands over a [`RawNode`] tree, [`parse_raw`] turns it into a
//! [`ParseTree`] of blocks, sentences and statements, and
//! [`ParseTree::dump`] turns it back. An unmodified tree dumps to exactly
//! the raw tree it was parsed from.

pub mod comment;
pub mod context;
pub mod error;
pub mod node;
pub mod raw;
pub mod tree;

pub use comment::{is_comment, is_marker_comment, make_marker_comment};
pub use context::{ParseContext, DEFAULT_INDENT_UNIT, DEFAULT_PARSING_HOOKS};
pub use error::{Result, TreeError};
pub use node::{Block, Node, NodeKind, Parsable, Sentence, Statements};
pub use raw::RawNode;
pub use tree::{parse_raw, Iter, NodeId, ParseTree};
