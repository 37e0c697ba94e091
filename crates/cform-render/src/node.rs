#![forbid(unsafe_code)]

//! View nodes: the UI-tree description produced by `Model::view()`.
//!
//! A [`Node`] is a plain value. Views build a fresh tree on every render and
//! hosts (or the test harness) reconcile it however they like. Nodes carry
//! just enough semantics for label association and element lookup: a
//! [`Role`], an optional element id, an optional test id, a label, text
//! content, and for inputs the current value.

use smallvec::SmallVec;

/// Semantic role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Root of a rendered tree.
    Document,
    /// A form container.
    Form,
    /// A heading line.
    Heading,
    /// A single-line text input. Its value is not text content.
    TextInput,
    /// An activatable button.
    Button,
    /// An inline error or warning.
    Alert,
    /// A labelled grouping of other nodes.
    Region,
    /// Plain text.
    Text,
}

impl Role {
    /// Lower-case role name, as used in query failures.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Form => "form",
            Self::Heading => "heading",
            Self::TextInput => "textbox",
            Self::Button => "button",
            Self::Alert => "alert",
            Self::Region => "region",
            Self::Text => "text",
        }
    }
}

/// One element of the UI tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Semantic role.
    pub role: Role,
    /// Element id; clicks are routed by this id.
    pub id: Option<String>,
    /// Stable identifier for tests.
    pub test_id: Option<String>,
    /// Associated label (inputs, regions, labelled text).
    pub label: Option<String>,
    /// Text content.
    pub text: String,
    /// Current value for inputs.
    pub value: Option<String>,
    /// Whether this element holds input focus.
    pub focused: bool,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty node with the given role.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            id: None,
            test_id: None,
            label: None,
            text: String::new(),
            value: None,
            focused: false,
            children: Vec::new(),
        }
    }

    /// A heading with the given text.
    #[must_use]
    pub fn heading(text: impl Into<String>) -> Self {
        Self::new(Role::Heading).with_text(text)
    }

    /// A labelled text input bound to `value`.
    #[must_use]
    pub fn text_input(
        id: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut node = Self::new(Role::TextInput).with_id(id).with_label(label);
        node.value = Some(value.into());
        node
    }

    /// A button with an id and caption.
    #[must_use]
    pub fn button(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Role::Button).with_id(id).with_text(text)
    }

    /// An alert carrying a message.
    #[must_use]
    pub fn alert(text: impl Into<String>) -> Self {
        Self::new(Role::Alert).with_text(text)
    }

    /// A labelled region.
    #[must_use]
    pub fn region(label: impl Into<String>) -> Self {
        Self::new(Role::Region).with_label(label)
    }

    /// Plain text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Role::Text).with_text(text)
    }

    /// Set the element id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the test id.
    #[must_use]
    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Mark focus.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a child only when `child` is `Some`.
    #[must_use]
    pub fn child_opt(mut self, child: Option<Node>) -> Self {
        if let Some(c) = child {
            self.children.push(c);
        }
        self
    }

    /// Pre-order iterator over this node and all descendants.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack = SmallVec::new();
        stack.push(self);
        Descendants { stack }
    }

    /// First node (pre-order) whose element id equals `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.descendants().find(|n| n.id.as_deref() == Some(id))
    }

    /// Whether this node contributes text content to the document.
    ///
    /// Input values are not text content.
    #[must_use]
    pub fn has_text_content(&self) -> bool {
        self.role != Role::TextInput && !self.text.is_empty()
    }
}

/// Depth-first pre-order traversal of a [`Node`] tree.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: SmallVec<[&'a Node; 16]>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::new(Role::Form)
            .child(Node::heading("Title"))
            .child(Node::text_input("a", "Alpha", "1").focused(true))
            .child(Node::region("Group").child(Node::text("inner").with_test_id("inner")))
            .child(Node::button("go", "Go"))
    }

    #[test]
    fn descendants_are_pre_order() {
        let tree = sample();
        let roles: Vec<Role> = tree.descendants().map(|n| n.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::Form,
                Role::Heading,
                Role::TextInput,
                Role::Region,
                Role::Text,
                Role::Button,
            ]
        );
    }

    #[test]
    fn find_by_id_hits_nested() {
        let tree = sample();
        assert_eq!(tree.find_by_id("go").map(|n| n.text.as_str()), Some("Go"));
        assert!(tree.find_by_id("missing").is_none());
    }

    #[test]
    fn input_value_is_not_text_content() {
        let input = Node::text_input("a", "Alpha", "value");
        assert!(!input.has_text_content());
        assert!(Node::text("x").has_text_content());
        assert!(!Node::text("").has_text_content());
    }

    #[test]
    fn child_opt_skips_none() {
        let node = Node::new(Role::Region)
            .child_opt(None)
            .child_opt(Some(Node::text("x")));
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn role_names() {
        assert_eq!(Role::TextInput.as_str(), "textbox");
        assert_eq!(Role::Button.as_str(), "button");
    }
}
