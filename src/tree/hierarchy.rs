//! Tree-wide maintenance passes
//!
//! Fragmentation performs structural surgery: children built by independent
//! sub-breaks get installed under a freshly minted fragment, and discarded
//! subtrees get recycled. These passes keep the parent back-references and
//! component visibility consistent afterwards. All of them are idempotent.

use crate::tree::node::{LayoutTree, NodeId};

/// Nulls the parent back-reference of `node` and every descendant.
///
/// Run before a subtree is discarded or grafted elsewhere so nothing keeps
/// navigating into a tree position that no longer exists. Post-order, like
/// [`repair_parent_links`].
pub fn clear_parent_links(tree: &mut LayoutTree, node: NodeId) {
  let children = tree.children(node).to_vec();
  for child in children {
    clear_parent_links(tree, child);
  }
  tree.set_parent(node, None);
}

/// Reassigns any child whose recorded parent drifted from the node it
/// actually sits under.
///
/// Sub-breaks and sub-extractions return nodes built by independent calls;
/// their parent links may still point at an intermediate or stale node rather
/// than the fragment they were just installed into. Walking post-order fixes
/// the deepest drift first.
pub fn repair_parent_links(tree: &mut LayoutTree, node: NodeId) {
  let children = tree.children(node).to_vec();
  for child in children {
    repair_parent_links(tree, child);
    if tree.node(child).parent() != Some(node) {
      tree.set_parent(child, Some(node));
    }
  }
}

/// Propagates a visibility state to every component-capable descendant.
///
/// Component management is a capability; nodes without it are traversed but
/// not notified.
pub fn set_subtree_visible(tree: &mut LayoutTree, node: NodeId, visible: bool) {
  if let Some(manager) = tree.node_mut(node).components_mut() {
    manager.set_visible(visible);
  }
  let children = tree.children(node).to_vec();
  for child in children {
    set_subtree_visible(tree, child, visible);
  }
}

/// Hides every component-capable descendant of `node`.
///
/// Used by the pagination driver when only one fragment of a multi-fragment
/// whole is on screen: the off-screen fragments must not leave live controls
/// floating over the visible page.
pub fn hide_subtree(tree: &mut LayoutTree, node: NodeId) {
  set_subtree_visible(tree, node, false);
}
