use crate::context::ParseContext;
use crate::error::{Result, TreeError};
use crate::raw::RawNode;
use crate::tree::{NodeId, ParseTree};

use super::{NodeKind, Parsable, Sentence, Statements};

/// A block: a header sentence followed by braced contents.
///
/// The parsed block
///
/// ```text
/// server example {
///     listen 80;
///     root /var/www;
/// }
/// ```
///
/// is the raw pair `[names, contents]` where
///
/// ```text
/// names    = ["server", " ", "example", " "]
/// contents = [["\n    ", "listen", " ", "80", ";"], ["\n    ", "root", " ", "/var/www", ";"], "\n"]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    context: ParseContext,
    names: NodeId,
    contents: NodeId,
}

impl Block {
    /// The header sentence
    pub fn names(&self) -> NodeId {
        self.names
    }

    /// The body statements
    pub fn contents(&self) -> NodeId {
        self.contents
    }

    pub(crate) fn context_mut(&mut self) -> &mut ParseContext {
        &mut self.context
    }

    pub(crate) fn set_ids(&mut self, names: NodeId, contents: NodeId) {
        self.names = names;
        self.contents = contents;
    }
}

impl Parsable for Block {
    const KIND: NodeKind = NodeKind::Block;

    fn matches(raw: &RawNode) -> bool {
        match raw.as_list() {
            Some([names, contents]) => Sentence::matches(names) && contents.is_list(),
            _ => false,
        }
    }

    fn parse(
        tree: &mut ParseTree,
        owner: NodeId,
        context: ParseContext,
        raw: &RawNode,
        synthesize_spacing: bool,
    ) -> Result<Self> {
        let Some([names, contents]) = raw.as_list().filter(|_| Block::matches(raw)) else {
            return Err(TreeError::StructuralMismatch(
                "Block parsing expects a list of length 2. The first element should be a list \
                 of tokens (the block names), and the second another list of statements (the \
                 block contents)."
                    .to_string(),
            ));
        };

        let names = if synthesize_spacing {
            // separates the names from the opening brace
            let mut spaced = names.as_list().unwrap_or_default().to_vec();
            spaced.push(RawNode::token(" "));
            tree.parse_as::<Sentence>(&RawNode::List(spaced), context.child(owner), true)?
        } else {
            tree.parse_as::<Sentence>(names, context.child(owner), false)?
        };
        let contents =
            tree.parse_as::<Statements>(contents, context.child(owner), synthesize_spacing)?;

        Ok(Self {
            context,
            names,
            contents,
        })
    }

    fn context(&self) -> &ParseContext {
        &self.context
    }

    fn dump(&self, tree: &ParseTree, include_whitespace: bool) -> RawNode {
        RawNode::list(
            [self.names, self.contents]
                .into_iter()
                .filter_map(|id| tree.node(id))
                .map(|child| child.dump(tree, include_whitespace)),
        )
    }

    fn get_indent(&self, tree: &ParseTree) -> String {
        tree.node(self.names)
            .map(|names| names.get_indent(tree))
            .unwrap_or_default()
    }
}
