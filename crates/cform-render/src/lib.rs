#![forbid(unsafe_code)]

//! Render kernel: the view-node tree, the frame views write into, and a
//! plain-text projection used for snapshots.

pub mod frame;
pub mod node;
pub mod text;

pub use frame::Frame;
pub use node::{Node, Role};
pub use text::tree_to_text;
