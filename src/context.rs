use std::sync::Arc;

use crate::error::{Result, TreeError};
use crate::node::NodeKind;
use crate::raw::RawNode;
use crate::tree::NodeId;

/// Default dispatch order. `Statements` accepts any list, so it goes last.
pub const DEFAULT_PARSING_HOOKS: [NodeKind; 3] =
    [NodeKind::Block, NodeKind::Sentence, NodeKind::Statements];

/// Indentation added for every nesting level
pub const DEFAULT_INDENT_UNIT: &str = "    ";

/// Contextual information held by every parsed node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// The node owning the subtree this context was handed to
    parent: Option<NodeId>,
    /// Variant order used when dispatching raw nodes
    parsing_hooks: Arc<[NodeKind]>,
    /// Extra indentation of a block body relative to its header
    indent_unit: Arc<str>,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self {
            parent: None,
            parsing_hooks: Arc::from(DEFAULT_PARSING_HOOKS.as_slice()),
            indent_unit: Arc::from(DEFAULT_INDENT_UNIT),
        }
    }
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parsing_hooks(mut self, hooks: impl IntoIterator<Item = NodeKind>) -> Self {
        let hooks: Arc<[NodeKind]> = hooks.into_iter().collect();
        if let Some(position) = hooks.iter().position(|kind| *kind == NodeKind::Statements) {
            if position + 1 < hooks.len() {
                log::warn!(
                    "Statements is hook {} of {}, it will shadow {:?}",
                    position + 1,
                    hooks.len(),
                    &hooks[position + 1..]
                );
            }
        }
        self.parsing_hooks = hooks;
        self
    }

    pub fn with_indent_unit(mut self, indent_unit: impl Into<String>) -> Self {
        self.indent_unit = Arc::from(indent_unit.into());
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn parsing_hooks(&self) -> &[NodeKind] {
        &self.parsing_hooks
    }

    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Spawns a context for a descendant of `parent`
    pub fn child(&self, parent: NodeId) -> Self {
        Self {
            parent: Some(parent),
            parsing_hooks: Arc::clone(&self.parsing_hooks),
            indent_unit: Arc::clone(&self.indent_unit),
        }
    }

    /// Picks the first hook whose shape check accepts `raw`
    pub fn choose(&self, raw: &RawNode) -> Result<NodeKind> {
        match self.parsing_hooks.iter().find(|kind| kind.matches(raw)) {
            Some(kind) => Ok(*kind),
            None => {
                log::debug!(
                    "no parsing hook out of {:?} matched {:?}",
                    self.parsing_hooks,
                    raw
                );
                Err(TreeError::StructuralMismatch(
                    "None of the parsing hooks matched, can't tell how to parse this raw node"
                        .to_string(),
                ))
            }
        }
    }
}
