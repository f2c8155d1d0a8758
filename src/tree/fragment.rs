//! Fragment identity and fragment construction
//!
//! A fragment is a node standing in for a contiguous sub-portion of an
//! original "whole" node. It keeps a back-reference to the whole and two
//! flags saying whether it carries the whole's true first and/or last
//! content. Across a chain of fragments produced from one whole, exactly one
//! fragment is first and exactly one is last; intermediates carry neither.
//!
//! Fragments are minted by a [`FragmentFactory`] injected into the break and
//! extraction algorithms, so an embedding application can substitute its own
//! node flavors. [`BoxFragmentFactory`] is the stock implementation: the
//! fragment mirrors the original's kind, axis, attributes, break weight, and
//! component-management capability.

use crate::component::ComponentManager;
use crate::tree::node::{LayoutNode, LayoutTree, NodeId, NodeKind};

/// Marker capability identifying a node as a fragment of some whole node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentInfo {
  /// The original, unfragmented node this fragment derives from. Shared by
  /// every fragment in the chain.
  pub whole: NodeId,
  /// True on exactly one fragment of a chain: the one carrying the whole's
  /// first content.
  pub is_first: bool,
  /// True on exactly one fragment of a chain: the one carrying the whole's
  /// last content.
  pub is_last: bool,
}

/// Creates empty fragment nodes for the break and extraction algorithms.
///
/// The factory only builds the empty shell tagged with its identity; the
/// calling algorithm installs children (or a leaf range override) afterwards.
pub trait FragmentFactory {
  /// Creates an empty fragment of `original` tagged with the given flags.
  ///
  /// `original` is the node being fragmented, which may itself already be a
  /// fragment; the factory must resolve the ultimate whole through it.
  fn create_empty_fragment(
    &self,
    tree: &mut LayoutTree,
    original: NodeId,
    is_first: bool,
    is_last: bool,
  ) -> NodeId;
}

/// Stock fragment factory.
///
/// The produced fragment mirrors the original node: same backing element,
/// same kind (a composite keeps its tiling axis, a leaf its preferred size),
/// cloned attributes, same break weight, and an empty component registry when
/// the original manages embedded components.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxFragmentFactory;

impl FragmentFactory for BoxFragmentFactory {
  fn create_empty_fragment(
    &self,
    tree: &mut LayoutTree,
    original: NodeId,
    is_first: bool,
    is_last: bool,
  ) -> NodeId {
    let source = tree.node(original);
    let whole = tree.whole_of(original);
    let mut fragment = match *source.kind() {
      NodeKind::Composite { axis } => LayoutNode::composite(source.element(), axis),
      NodeKind::Leaf { preferred } => LayoutNode::leaf(source.element(), preferred),
    };
    *fragment.attributes_mut() = source.attributes().clone();
    fragment.set_break_weight(source.break_weight());
    fragment.set_fragment(FragmentInfo {
      whole,
      is_first,
      is_last,
    });
    if source.components().is_some() {
      fragment.set_components(ComponentManager::new());
    }
    tree.insert(fragment)
  }
}
