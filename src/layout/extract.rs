//! Arbitrary-range fragment extraction
//!
//! Where [`break_along_axis`](crate::layout::breaking::break_along_axis)
//! selects children by span, [`extract_fragment`] selects them by offset
//! range: a consumer (a redisplay region, a straddled child during a resumed
//! break) names the exact `[start, end)` slice of content it needs and gets a
//! fragment covering it. Children fully inside the range are reused as-is;
//! children crossing the boundary are recursively extracted with the range
//! clamped to their own bounds, bottoming out at leaves, which split by
//! carrying an explicit sub-range and a proportionally scaled preferred size.

use crate::component::migrate_components;
use crate::content::ContentSource;
use crate::error::{Error, FragmentError, Result};
use crate::layout::axis::Axis;
use crate::layout::breaking::assemble_fragment;
use crate::tree::fragment::FragmentFactory;
use crate::tree::node::{LayoutTree, NodeId, NodeKind};

/// Extracts a fragment of `node` covering `[range_start, range_end)`.
///
/// Returns `node` itself when the range covers the node's whole content:
/// extraction that would reproduce the whole node is wasted work, and the
/// identity result is what lets callers detect "nothing was actually split".
///
/// The produced fragment follows the same contract as a break result: parent
/// link at the original's tree position, component registrations migrated by
/// docking rule against the fragment's first/last standing, parent links
/// repaired.
pub fn extract_fragment(
  tree: &mut LayoutTree,
  content: &dyn ContentSource,
  node: NodeId,
  range_start: usize,
  range_end: usize,
  factory: &dyn FragmentFactory,
) -> Result<NodeId> {
  if range_start >= range_end {
    return Err(
      FragmentError::EmptyRange {
        start: range_start,
        end: range_end,
      }
      .into(),
    );
  }
  let (node_start, node_end) = tree.range(content, node);
  if range_start <= node_start && range_end >= node_end {
    return Ok(node);
  }
  if range_end <= node_start || range_start >= node_end {
    return Err(Error::BadLocation {
      offset: range_start,
      start: node_start,
      end: node_end,
    });
  }

  let (represents_first, represents_last) = tree.fragment_standing(node);
  let clamp_start = range_start.max(node_start);
  let clamp_end = range_end.min(node_end);
  let is_first = represents_first && clamp_start <= node_start;
  let is_last = represents_last && clamp_end >= node_end;

  if tree.node(node).is_leaf() {
    return Ok(split_leaf(
      tree, node, node_start, node_end, clamp_start, clamp_end, is_first, is_last, factory,
    ));
  }

  let children = tree.children(node).to_vec();
  let mut kept: Vec<NodeId> = Vec::new();
  for child in children {
    let (child_start, child_end) = tree.range(content, child);
    if child_end <= range_start || child_start >= range_end {
      continue;
    }
    let piece = extract_fragment(
      tree,
      content,
      child,
      range_start.max(child_start),
      range_end.min(child_end),
      factory,
    )?;
    kept.push(piece);
  }
  if kept.is_empty() {
    return Err(FragmentError::EmptyComposite.into());
  }

  Ok(assemble_fragment(tree, node, kept, is_first, is_last, factory))
}

/// Splits a leaf by minting a childless fragment carrying an explicit
/// sub-range. The preferred size shrinks proportionally to the retained
/// content along the parent's tiling axis; the cross dimension is kept.
#[allow(clippy::too_many_arguments)]
fn split_leaf(
  tree: &mut LayoutTree,
  node: NodeId,
  node_start: usize,
  node_end: usize,
  clamp_start: usize,
  clamp_end: usize,
  is_first: bool,
  is_last: bool,
  factory: &dyn FragmentFactory,
) -> NodeId {
  let fragment = factory.create_empty_fragment(tree, node, is_first, is_last);
  tree.node_mut(fragment).set_range_override((clamp_start, clamp_end));

  let full_len = node_end - node_start;
  if full_len > 0 {
    if let NodeKind::Leaf { preferred } = *tree.node(node).kind() {
      let fraction = (clamp_end - clamp_start) as f32 / full_len as f32;
      let axis = parent_axis(tree, node);
      let along = axis.of_size(preferred) * fraction;
      let across = axis.cross().of_size(preferred);
      tree
        .node_mut(fragment)
        .set_preferred(axis.pack_size(along, across));
    }
  }

  let parent = tree.node(node).parent();
  tree.set_parent(fragment, parent);
  migrate_components(tree, node, fragment);
  fragment
}

/// The axis a leaf tiles along inside its parent. Detached leaves default to
/// horizontal, the direction text runs tile in.
fn parent_axis(tree: &LayoutTree, node: NodeId) -> Axis {
  tree
    .node(node)
    .parent()
    .and_then(|parent| tree.node(parent).axis())
    .unwrap_or(Axis::Horizontal)
}
