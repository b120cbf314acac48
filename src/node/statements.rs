use crate::context::ParseContext;
use crate::error::{Result, TreeError};
use crate::raw::RawNode;
use crate::tree::{NodeId, ParseTree};

use super::{NodeKind, Parsable};

/// A list of sibling statements (blocks and sentences), plus the whitespace
/// trailing the last of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Statements {
    context: ParseContext,
    children: Vec<NodeId>,
    trailing_whitespace: Option<String>,
}

impl Statements {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whitespace that does not precede any statement
    pub fn trailing_whitespace(&self) -> Option<&str> {
        self.trailing_whitespace.as_deref()
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }

    pub(crate) fn context_mut(&mut self) -> &mut ParseContext {
        &mut self.context
    }

    pub(crate) fn set_trailing_whitespace(&mut self, whitespace: String) {
        self.trailing_whitespace = Some(whitespace);
    }
}

impl Parsable for Statements {
    const KIND: NodeKind = NodeKind::Statements;

    fn matches(raw: &RawNode) -> bool {
        raw.is_list()
    }

    fn parse(
        tree: &mut ParseTree,
        owner: NodeId,
        context: ParseContext,
        raw: &RawNode,
        synthesize_spacing: bool,
    ) -> Result<Self> {
        let Some(mut items) = raw.as_list() else {
            return Err(TreeError::StructuralMismatch(
                "Statements parsing expects a list".to_string(),
            ));
        };

        let mut trailing_whitespace = None;
        if let Some((last, rest)) = items.split_last() {
            if last.is_whitespace() {
                trailing_whitespace = last.as_token().map(str::to_string);
                items = rest;
            }
        }

        let mut children = Vec::with_capacity(items.len());
        for item in items {
            children.push(tree.parse_raw(item, context.child(owner), synthesize_spacing)?);
        }

        Ok(Self {
            context,
            children,
            trailing_whitespace,
        })
    }

    fn context(&self) -> &ParseContext {
        &self.context
    }

    fn dump(&self, tree: &ParseTree, include_whitespace: bool) -> RawNode {
        let mut dumped: Vec<RawNode> = self
            .children
            .iter()
            .filter_map(|id| tree.node(*id))
            .map(|child| child.dump(tree, include_whitespace))
            .collect();
        if include_whitespace {
            if let Some(ref whitespace) = self.trailing_whitespace {
                dumped.push(RawNode::token(whitespace.as_str()));
            }
        }
        RawNode::List(dumped)
    }

    /// Indentation of the first statement
    fn get_indent(&self, tree: &ParseTree) -> String {
        self.children
            .first()
            .and_then(|id| tree.node(*id))
            .map(|child| child.get_indent(tree))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::raw;
    use crate::tree::parse_raw;

    #[test]
    fn test_matches() {
        assert!(Statements::matches(&raw!([])));
        assert!(Statements::matches(&raw!(["a", ["b"]])));
        assert!(!Statements::matches(&raw!("a")));
    }

    #[test]
    fn test_trailing_whitespace() {
        let raw = raw!([["\n", "listen", " ", "80", ";"], ["\n", "root", " ", "/var/www", ";"], "\n\n"]);
        let tree = parse_raw(&raw, None, false).unwrap();
        let statements = tree.statements(tree.root().unwrap()).unwrap();

        assert_eq!(statements.len(), 2);
        assert_eq!(statements.trailing_whitespace(), Some("\n\n"));
        assert_eq!(tree.dump(tree.root().unwrap(), true).unwrap(), raw);
        assert_eq!(
            tree.dump(tree.root().unwrap(), false).unwrap(),
            raw!([["listen", "80", ";"], ["root", "/var/www", ";"]])
        );
    }

    #[test]
    fn test_children_have_parent_context() {
        let raw = raw!([["\n", "a", ";"], ["\n", "b", ";"], ["\n", "c", ";"]]);
        let tree = parse_raw(&raw, None, false).unwrap();
        let root = tree.root().unwrap();
        let statements = tree.statements(root).unwrap();

        assert_eq!(statements.context().parent(), None);
        for child in statements.children() {
            let node = tree.node(*child).unwrap();
            assert!(matches!(node, Node::Sentence(_)));
            assert_eq!(node.context().parent(), Some(root));
        }
    }

    #[test]
    fn test_bare_token_is_rejected() {
        assert!(matches!(
            parse_raw(&raw!([["a", ";"], "b", ["c", ";"]]), None, false),
            Err(TreeError::StructuralMismatch(_))
        ));
    }

    #[test]
    fn test_empty() {
        let tree = parse_raw(&raw!([]), None, false).unwrap();
        let root = tree.root().unwrap();
        assert!(tree.statements(root).unwrap().is_empty());
        assert_eq!(tree.get_indent(root).unwrap(), "");
        assert_eq!(tree.dump(root, true).unwrap(), raw!([]));
    }

    #[test]
    fn test_get_indent_uses_first_child() {
        let raw = raw!([["\n  ", "a", ";"], ["\n        ", "b", ";"], ["\n", "c", ";"]]);
        let tree = parse_raw(&raw, None, false).unwrap();
        assert_eq!(tree.get_indent(tree.root().unwrap()).unwrap(), "  ");
    }
}
