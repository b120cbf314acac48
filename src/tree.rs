//! Arena holding a parsed tree
//!
//! Every node lives in a [`ParseTree`] slot and refers to its children (and,
//! through its [`ParseContext`], to its parent) by [`NodeId`]. Ownership only
//! flows downward: the parent link is used for upward queries such as
//! indentation and never keeps anything alive.

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::context::ParseContext;
use crate::error::{Result, TreeError};
use crate::node::{Block, Node, NodeKind, Parsable, Sentence, Statements};
use crate::raw::RawNode;

/// Index of a node inside its [`ParseTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parses `raw` into a new tree whose root is the parsed node.
///
/// Without a `context` a root context with the default hook order is used.
pub fn parse_raw(
    raw: &RawNode,
    context: Option<ParseContext>,
    synthesize_spacing: bool,
) -> Result<ParseTree> {
    let mut tree = ParseTree::new();
    let root = tree.parse_raw(raw, context.unwrap_or_default(), synthesize_spacing)?;
    tree.root = Some(root);
    Ok(tree)
}

#[derive(Debug, Clone, Default)]
pub struct ParseTree {
    /// `None` while the node is being parsed
    nodes: Vec<Option<Node>>,
    root: Option<NodeId>,
}

impl ParseTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of slots in the arena, detached nodes included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parses `raw` into this tree with the first hook of `context` that
    /// matches it.
    ///
    /// The new node is not attached anywhere; see [`ParseTree::insert`].
    /// On failure nothing from this call stays in the tree. A context whose
    /// indentation unit contains a newline is rejected.
    pub fn parse_raw(
        &mut self,
        raw: &RawNode,
        context: ParseContext,
        synthesize_spacing: bool,
    ) -> Result<NodeId> {
        check_indent(context.indent_unit())?;
        match context.choose(raw)? {
            NodeKind::Block => self.parse_as::<Block>(raw, context, synthesize_spacing),
            NodeKind::Sentence => self.parse_as::<Sentence>(raw, context, synthesize_spacing),
            NodeKind::Statements => self.parse_as::<Statements>(raw, context, synthesize_spacing),
        }
    }

    pub(crate) fn parse_as<P: Parsable>(
        &mut self,
        raw: &RawNode,
        context: ParseContext,
        synthesize_spacing: bool,
    ) -> Result<NodeId> {
        let mark = self.nodes.len();
        let id = NodeId(mark);
        self.nodes.push(None);
        log::trace!("parsing {} {id}", P::KIND);

        match P::parse(self, id, context, raw, synthesize_spacing) {
            Ok(node) => {
                self.nodes[mark] = Some(node.into());
                Ok(id)
            }
            Err(err) => {
                self.nodes.truncate(mark);
                Err(err)
            }
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn sentence(&self, id: NodeId) -> Option<&Sentence> {
        self.node(id).and_then(Node::as_sentence)
    }

    pub fn statements(&self, id: NodeId) -> Option<&Statements> {
        self.node(id).and_then(Node::as_statements)
    }

    pub fn block(&self, id: NodeId) -> Option<&Block> {
        self.node(id).and_then(Node::as_block)
    }

    fn get(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(TreeError::NodeNotFound(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(TreeError::NodeNotFound(id))
    }

    fn statements_mut(&mut self, id: NodeId) -> Result<&mut Statements> {
        match self.get_mut(id)? {
            Node::Statements(statements) => Ok(statements),
            other => Err(TreeError::UnexpectedKind {
                id,
                expected: NodeKind::Statements,
                found: other.kind(),
            }),
        }
    }

    /// Context for a new descendant of `id`
    pub fn child_context(&self, id: NodeId) -> Result<ParseContext> {
        Ok(self.get(id)?.context().child(id))
    }

    /// Dumps the subtree at `id` back to a raw tree
    pub fn dump(&self, id: NodeId, include_whitespace: bool) -> Result<RawNode> {
        Ok(self.get(id)?.dump(self, include_whitespace))
    }

    pub fn get_indent(&self, id: NodeId) -> Result<String> {
        Ok(self.get(id)?.get_indent(self))
    }

    /// Re-indents the subtree at `id` to `indent`.
    ///
    /// Sentences that already start on a positioned line keep their
    /// whitespace. Block bodies go one indentation unit deeper than their
    /// header, and a body's trailing whitespace is aligned with the header so
    /// the closing brace lines up.
    pub fn set_indent(&mut self, id: NodeId, indent: &str) -> Result<()> {
        check_indent(indent)?;
        match self.get_mut(id)? {
            Node::Sentence(sentence) => sentence.set_indent(indent),
            Node::Block(block) => {
                let (names, contents) = (block.names(), block.contents());
                let body_indent = format!("{indent}{}", block.context().indent_unit());
                check_indent(&body_indent)?;
                self.set_indent(names, indent)?;
                self.set_indent(contents, &body_indent)
            }
            Node::Statements(statements) => {
                let children = statements.children().to_vec();
                let parent = statements.context().parent();
                for child in children {
                    self.set_indent(child, indent)?;
                }
                if let Some(parent) = parent {
                    let trailing = format!("\n{}", self.get_indent(parent)?);
                    self.statements_mut(id)?.set_trailing_whitespace(trailing);
                }
                Ok(())
            }
        }
    }

    /// Iterates over the visible nodes at `id`: sentences and blocks, never
    /// statements. Block contents are only visited when `expand` is set.
    pub fn iterate(&self, id: NodeId, expand: bool) -> Iter<'_, fn(&Node) -> bool> {
        fn always(_: &Node) -> bool {
            true
        }
        self.iterate_matching(id, expand, always as fn(&Node) -> bool)
    }

    /// Like [`ParseTree::iterate`], only yielding nodes `predicate` accepts.
    ///
    /// A rejected block is still expanded.
    pub fn iterate_matching<F>(&self, id: NodeId, expand: bool, predicate: F) -> Iter<'_, F>
    where
        F: FnMut(&Node) -> bool,
    {
        Iter {
            tree: self,
            stack: vec![id],
            expand,
            predicate,
        }
    }

    /// Parses `raw` under the statements at `parent` and inserts it at `index`.
    pub fn insert(
        &mut self,
        parent: NodeId,
        index: usize,
        raw: &RawNode,
        synthesize_spacing: bool,
    ) -> Result<NodeId> {
        let len = self.statements_mut(parent)?.len();
        if index > len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }

        let context = self.child_context(parent)?;
        let child = self.parse_raw(raw, context, synthesize_spacing)?;
        self.statements_mut(parent)?
            .children_mut()
            .insert(index, child);
        Ok(child)
    }

    /// Parses `raw` and appends it to the statements at `parent`.
    pub fn push(
        &mut self,
        parent: NodeId,
        raw: &RawNode,
        synthesize_spacing: bool,
    ) -> Result<NodeId> {
        let len = self.statements_mut(parent)?.len();
        self.insert(parent, len, raw, synthesize_spacing)
    }

    /// Adopts a stand-alone sentence, such as a marker comment, into the
    /// statements at `parent`. The sentence is rebound to
    /// [`ParseTree::child_context`] of `parent`, whatever it was built with.
    pub fn insert_sentence(
        &mut self,
        parent: NodeId,
        index: usize,
        mut sentence: Sentence,
    ) -> Result<NodeId> {
        let len = self.statements_mut(parent)?.len();
        if index > len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }
        *sentence.context_mut() = self.child_context(parent)?;

        let child = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::Sentence(sentence)));
        self.statements_mut(parent)?
            .children_mut()
            .insert(index, child);
        Ok(child)
    }

    /// Detaches the statement at `index` of `parent`. The removed subtree
    /// stays in the arena but is no longer reachable from `parent`.
    pub fn remove(&mut self, parent: NodeId, index: usize) -> Result<NodeId> {
        let statements = self.statements_mut(parent)?;
        let len = statements.len();
        if index >= len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }
        Ok(statements.children_mut().remove(index))
    }

    /// Drops every slot that is not reachable from the root and renumbers
    /// the rest in depth-first order.
    ///
    /// Ids obtained before the call are stale afterwards. The returned map
    /// translates the ones that survived. Nodes parsed with
    /// [`ParseTree::parse_raw`] but never attached are dropped as well.
    pub fn compact(&mut self) -> HashMap<NodeId, NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            order.push(id);
            match node {
                Node::Sentence(_) => {}
                Node::Statements(statements) => {
                    stack.extend(statements.children().iter().rev());
                }
                Node::Block(block) => {
                    stack.push(block.contents());
                    stack.push(block.names());
                }
            }
        }

        let remap: HashMap<NodeId, NodeId> = order
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, NodeId(index)))
            .collect();
        let relocate = |id: NodeId| remap.get(&id).copied();

        let mut old = std::mem::take(&mut self.nodes);
        self.nodes = order
            .iter()
            .map(|id| {
                let mut node = old.get_mut(id.0).and_then(Option::take)?;
                let parent = node.context().parent().and_then(relocate);
                node.context_mut().set_parent(parent);
                match &mut node {
                    Node::Sentence(_) => {}
                    Node::Statements(statements) => {
                        statements.children_mut().retain_mut(|child| match relocate(*child) {
                            Some(id) => {
                                *child = id;
                                true
                            }
                            None => false,
                        });
                    }
                    Node::Block(block) => {
                        if let (Some(names), Some(contents)) =
                            (relocate(block.names()), relocate(block.contents()))
                        {
                            block.set_ids(names, contents);
                        }
                    }
                }
                Some(node)
            })
            .collect();
        self.root = self.root.and_then(relocate);

        log::debug!(
            "compacted parse tree from {} to {} slot(s)",
            old.len(),
            self.nodes.len()
        );
        remap
    }
}

/// Rejects indentation strings that would break a line
pub(crate) fn check_indent(indent: &str) -> Result<()> {
    if indent.contains('\n') {
        return Err(TreeError::InvalidIndent(indent.to_string()));
    }
    Ok(())
}

/// Lazy traversal returned by [`ParseTree::iterate`]
pub struct Iter<'t, F> {
    tree: &'t ParseTree,
    stack: Vec<NodeId>,
    expand: bool,
    predicate: F,
}

impl<'t, F> Iterator for Iter<'t, F>
where
    F: FnMut(&Node) -> bool,
{
    type Item = (NodeId, &'t Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            match node {
                Node::Sentence(_) => {}
                Node::Statements(statements) => {
                    self.stack.extend(statements.children().iter().rev());
                    continue;
                }
                Node::Block(block) => {
                    if self.expand {
                        self.stack.push(block.contents());
                    }
                }
            }
            if (self.predicate)(node) {
                return Some((id, node));
            }
        }
        None
    }
}
