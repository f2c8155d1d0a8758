//! pageflow: view fragmentation and pagination core
//!
//! This crate implements the hard center of a composite-view rich-text
//! layout framework: deciding how a node's children split across a
//! size-constrained region (a page, column, or viewport) and where embedded
//! interactive controls land when their host node is split.
//!
//! # Pieces
//!
//! - A [`LayoutTree`] arena of [`LayoutNode`]s, each tied to a content
//!   element in an external, independently mutable document model reached
//!   through [`ContentSource`]. Composite nodes cache their aggregate offset
//!   range behind a validity stamp.
//! - [`break_along_axis`] / [`break_into_fragments`]: greedy span-driven
//!   breaking of a composite node into fragments, with break-weight guided
//!   sub-breaking and forced inclusion so no fragment is ever empty.
//! - [`extract_fragment`]: offset-range driven extraction, down to splitting
//!   individual leaves.
//! - [`ComponentManager`]: per-node registry of out-of-flow controls with
//!   declarative placement (dock anchor, relative point, relative size),
//!   rescaled as the node resizes or zooms and migrated between fragments.
//! - Hierarchy passes ([`clear_parent_links`], [`repair_parent_links`],
//!   [`hide_subtree`]) keeping parent links and control visibility coherent
//!   after structural surgery.
//!
//! The document model, rendering pipeline, input handling, and application
//! shell all live outside this crate; they are reached only through the
//! narrow [`ContentSource`], [`FragmentFactory`], and [`Control`] seams.
//!
//! Everything here is single-threaded and synchronous, driven by a UI
//! event/rendering loop that owns the one thread mutating the tree.

pub mod component;
pub mod content;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod tree;

pub use component::dock::DockPosition;
pub use component::{ComponentEntry, ComponentManager, Control, ControlHandle, PlacementRule};
pub use content::{ContentSource, ElementId};
pub use error::{Error, FragmentError, Result};
pub use geometry::{Point, Rect, Size};
pub use layout::axis::Axis;
pub use layout::breaking::{break_along_axis, break_into_fragments, BreakWeight};
pub use layout::extract::extract_fragment;
pub use tree::{
  clear_parent_links, hide_subtree, repair_parent_links, set_subtree_visible, AttributeBag,
  BoxFragmentFactory, FragmentFactory, FragmentInfo, LayoutNode, LayoutTree, NodeId, NodeKind,
};

#[cfg(test)]
pub(crate) mod test_util;
