//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::fs;

use bracetree::{Node, NodeId, ParseTree};

/// Renders the subtree at `id` as configuration text, wrapping block
/// contents in braces.
pub fn render(tree: &ParseTree, id: NodeId) -> String {
    let mut output = String::new();
    render_into(tree, id, &mut output);
    output
}

fn render_into(tree: &ParseTree, id: NodeId, output: &mut String) {
    match tree.node(id) {
        Some(Node::Sentence(sentence)) => {
            for token in sentence.tokens() {
                output.push_str(token);
            }
        }
        Some(Node::Statements(statements)) => {
            for child in statements.children() {
                render_into(tree, *child, output);
            }
            if let Some(whitespace) = statements.trailing_whitespace() {
                output.push_str(whitespace);
            }
        }
        Some(Node::Block(block)) => {
            render_into(tree, block.names(), output);
            output.push('{');
            render_into(tree, block.contents(), output);
            output.push('}');
        }
        None => panic!("node {id} is missing"),
    }
}

pub fn fixture(name: &str) -> String {
    let path = format!("tests/fixtures/{}", name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("unable to read fixture: {}", path))
}
