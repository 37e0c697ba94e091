#![forbid(unsafe_code)]

//! Plain-text projection of a view tree.
//!
//! One line per visible node, two spaces of indent per region level:
//!
//! ```text
//! # Contact Form
//! First Name*: [abc] (focused)
//! ! firstName must be at least 5 characters
//! Last Name*:  []
//! <Submit>
//! You Submitted:
//!   First Name: Ashish
//! ```
//!
//! Input labels are padded to a shared column so values line up. The
//! output never carries trailing whitespace.

use std::fmt::Write as FmtWrite;

use unicode_width::UnicodeWidthStr;

use crate::node::{Node, Role};

/// Render `root` as plain text.
#[must_use]
pub fn tree_to_text(root: &Node) -> String {
    let label_col = input_label_column(root);
    let mut lines = Vec::new();
    push_lines(root, 0, label_col, &mut lines);
    lines.join("\n")
}

/// Display width of the widest `"{label}:"` among text inputs.
fn input_label_column(root: &Node) -> usize {
    root.descendants()
        .filter(|n| n.role == Role::TextInput)
        .map(|n| n.label.as_deref().unwrap_or_default().width() + 1)
        .max()
        .unwrap_or(0)
}

fn push_lines(node: &Node, depth: usize, label_col: usize, out: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    let mut child_depth = depth;
    match node.role {
        Role::Document | Role::Form => {}
        Role::Heading => out.push(format!("{indent}# {}", node.text)),
        Role::TextInput => {
            let label = format!("{}:", node.label.as_deref().unwrap_or_default());
            let pad = label_col.saturating_sub(label.width());
            let mut line = format!(
                "{indent}{label}{:pad$} [{}]",
                "",
                node.value.as_deref().unwrap_or_default()
            );
            if node.focused {
                line.push_str(" (focused)");
            }
            out.push(line);
        }
        Role::Button => out.push(format!("{indent}<{}>", node.text)),
        Role::Alert => out.push(format!("{indent}! {}", node.text)),
        Role::Region => {
            out.push(format!(
                "{indent}{}",
                node.label.as_deref().unwrap_or_default()
            ));
            child_depth += 1;
        }
        Role::Text => {
            let mut line = indent;
            if let Some(label) = &node.label {
                let _ = write!(line, "{label} ");
            }
            line.push_str(&node.text);
            out.push(line);
        }
    }
    for child in &node.children {
        push_lines(child, child_depth, label_col, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_share_label_column() {
        let tree = Node::new(Role::Form)
            .child(Node::text_input("a", "Long Label", "x"))
            .child(Node::text_input("b", "Short", ""));
        assert_eq!(tree_to_text(&tree), "Long Label: [x]\nShort:      []");
    }

    #[test]
    fn focused_input_is_marked() {
        let tree = Node::text_input("a", "Name", "Al").focused(true);
        assert_eq!(tree_to_text(&tree), "Name: [Al] (focused)");
    }

    #[test]
    fn region_children_are_indented() {
        let tree = Node::new(Role::Document).child(
            Node::region("Summary")
                .child(Node::text("Ashish").with_label("First Name:"))
                .child(Node::text("plain")),
        );
        assert_eq!(
            tree_to_text(&tree),
            "Summary\n  First Name: Ashish\n  plain"
        );
    }

    #[test]
    fn heading_button_alert_markers() {
        let tree = Node::new(Role::Form)
            .child(Node::heading("Title"))
            .child(Node::alert("bad"))
            .child(Node::button("go", "Go"));
        assert_eq!(tree_to_text(&tree), "# Title\n! bad\n<Go>");
    }

    #[test]
    fn empty_document_renders_nothing() {
        assert_eq!(tree_to_text(&Node::new(Role::Document)), "");
    }
}
