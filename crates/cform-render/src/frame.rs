#![forbid(unsafe_code)]

//! Frame = the render target for one view pass.
//!
//! `Model::view()` writes [`Node`]s into a `Frame`; the frame owns the
//! document root so a view never has to construct it.
//!
//! # Usage
//!
//! ```
//! use cform_render::frame::Frame;
//! use cform_render::node::Node;
//!
//! let mut frame = Frame::new();
//! frame.render(Node::heading("Hello"));
//! assert_eq!(frame.root().children.len(), 1);
//! ```

use crate::node::{Node, Role};

/// Render target collecting top-level nodes under a document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    root: Node,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Create an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::new(Role::Document),
        }
    }

    /// Append a top-level node.
    pub fn render(&mut self, node: Node) {
        self.root.children.push(node);
    }

    /// The document root.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Consume the frame, returning the document root.
    #[must_use]
    pub fn into_root(self) -> Node {
        self.root
    }

    /// True if nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}
