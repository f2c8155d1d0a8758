//! View tree: nodes, fragment identity, and maintenance passes

pub mod fragment;
pub mod hierarchy;
pub mod node;

pub use fragment::{BoxFragmentFactory, FragmentFactory, FragmentInfo};
pub use hierarchy::{clear_parent_links, hide_subtree, repair_parent_links, set_subtree_visible};
pub use node::{AttributeBag, LayoutNode, LayoutTree, NodeId, NodeKind};
