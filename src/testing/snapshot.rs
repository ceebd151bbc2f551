//! Snapshot rendering helpers.
//!
//! Converts a tree into indented plain text suitable for snapshot tests:
//!
//! ```text
//! screen "Login"
//!   label#labelUsername "Username"
//!   textbox#txtUser {color: red;}
//!   table#tableOptions "Options"
//!     row#rowYes "Yes"
//! ```
//!
//! One line per node: type, `#id` when set, quoted text when set, and the
//! style in braces when non-empty. Two spaces of indent per level.

use std::fmt::Write;

use crate::ast::node::{NodeData, NodeId};
use crate::ast::Ast;

/// Render every screen with its subtree. Lines are joined with `'\n'`; there
/// is no trailing newline. An empty tree renders as an empty string.
pub fn ast_to_string(ast: &Ast) -> String {
    let mut lines = Vec::new();
    for screen in ast.screens() {
        render_node(ast, screen.node_id(), 0, &mut lines);
    }
    lines.join("\n")
}

/// Render a single subtree starting at `node`.
pub fn subtree_to_string(ast: &Ast, node: NodeId) -> String {
    let mut lines = Vec::new();
    render_node(ast, node, 0, &mut lines);
    lines.join("\n")
}

/// Format one node as a single line without indentation.
pub fn node_line(data: &NodeData) -> String {
    let mut line = String::from(data.type_name());
    if !data.id.is_empty() {
        line.push('#');
        line.push_str(&data.id);
    }
    if !data.text.is_empty() {
        // Writing into a String cannot fail.
        let _ = write!(line, " {:?}", data.text);
    }
    if !data.style.is_empty() {
        let _ = write!(line, " {{{}}}", data.style);
    }
    line
}

fn render_node(ast: &Ast, node: NodeId, depth: usize, lines: &mut Vec<String>) {
    let Some(data) = ast.get(node) else {
        return;
    };
    lines.push(format!("{}{}", "  ".repeat(depth), node_line(data)));
    for &child in ast.children(node) {
        render_node(ast, child, depth + 1, lines);
    }
}
