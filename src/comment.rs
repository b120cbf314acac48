//! Comment helpers, including the marker left next to managed directives

use crate::context::ParseContext;
use crate::error::Result;
use crate::node::{Node, Sentence};
use crate::raw::RawNode;

/// Text of the marker comment, right after the `#`
pub const MARKER_TEXT: &str = " managed by bracetree";

/// Words of the marker comment
pub const MARKER_COMMENT: [&str; 2] = ["#", MARKER_TEXT];

/// Whether `node` is a comment sentence
pub fn is_comment(node: &Node) -> bool {
    node.as_sentence()
        .is_some_and(|sentence| sentence.word(0) == Some("#"))
}

/// Whether `node` is exactly the marker comment
pub fn is_marker_comment(node: &Node) -> bool {
    is_comment(node)
        && node
            .as_sentence()
            .is_some_and(|sentence| sentence.words() == MARKER_COMMENT)
}

/// Builds a marker comment preceded by `leading_spaces` spaces.
///
/// The comment is meant to trail a directive on the same line, so no newline
/// is added. Use [`crate::ParseTree::insert_sentence`] to place it.
pub fn make_marker_comment(context: ParseContext, leading_spaces: usize) -> Result<Sentence> {
    let mut tokens = Vec::with_capacity(MARKER_COMMENT.len() + 1);
    if leading_spaces > 0 {
        tokens.push(RawNode::token(" ".repeat(leading_spaces)));
    }
    tokens.extend(MARKER_COMMENT.iter().copied().map(RawNode::from));
    Sentence::from_raw(context, &RawNode::List(tokens), false)
}
