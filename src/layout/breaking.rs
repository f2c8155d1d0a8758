//! Span-driven breaking of composite box nodes
//!
//! [`break_along_axis`] answers one question for a pagination driver: given a
//! composite node, a starting offset, and an available span on the node's
//! tiling axis, which maximal prefix of children fits? The selected children
//! are packaged into a fragment node minted by the injected
//! [`FragmentFactory`]; whatever did not fit is left for the driver's next
//! break call, which resumes from the offset where this one stopped.
//!
//! Accumulation is greedy and strictly in document order. When a child
//! overflows the remaining budget the algorithm either sub-breaks it (when
//! its break weight allows), stops and defers it, or — when nothing has been
//! accumulated yet — force-includes it, because a fragment must never be
//! empty. It never skips an overflowing child to fit a later, smaller one:
//! reordering content across a break point would violate document order.

use crate::component::migrate_components;
use crate::content::ContentSource;
use crate::error::{Error, FragmentError, Result};
use crate::layout::axis::Axis;
use crate::layout::extract::extract_fragment;
use crate::tree::fragment::FragmentFactory;
use crate::tree::hierarchy::repair_parent_links;
use crate::tree::node::{LayoutTree, NodeId};

/// How acceptable a node considers a split at a candidate position.
///
/// Anything above [`BreakWeight::Bad`] permits sub-breaking; `Bad` means "do
/// not break here unless forced".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BreakWeight {
  /// Breaking here would be unacceptable (e.g. inside an unbreakable run).
  Bad,
  /// Breaking here is tolerable when the span demands it.
  Natural,
  /// A reasonable break opportunity.
  Good,
  /// A preferred break opportunity.
  Excellent,
  /// A break is mandated at this position.
  Forced,
}

impl BreakWeight {
  /// True when this weight is better than the worst defined rating.
  pub fn allows_breaking(self) -> bool {
    self > Self::Bad
  }
}

/// Breaks `node` along `axis`, producing a fragment holding the maximal
/// prefix of children (starting at `start_offset`) that fits in `available`.
///
/// `pos` is the position already consumed along the axis by earlier content
/// in the same region; it is propagated into sub-breaks.
///
/// Returns `node` itself unbroken when `axis` is not the node's tiling axis
/// (cross-axis pagination is not supported), or when the whole node already
/// fits in `available`. Leaves are atomic here; they are only split by
/// offset-range extraction.
///
/// The produced fragment stands in for `node` at the same tree position: its
/// parent link points at `node`'s parent, embedded component registrations
/// whose docking rule matches the fragment's first/last standing are migrated
/// into it, and parent links across the new subtree are repaired.
pub fn break_along_axis(
  tree: &mut LayoutTree,
  content: &dyn ContentSource,
  node: NodeId,
  axis: Axis,
  start_offset: usize,
  pos: f32,
  available: f32,
  factory: &dyn FragmentFactory,
) -> Result<NodeId> {
  if available <= 0.0 {
    return Err(FragmentError::NonPositiveSpan { span: available }.into());
  }
  let Some(tiling) = tree.node(node).axis() else {
    return Ok(node);
  };
  if tiling != axis {
    return Ok(node);
  }
  if tree.children(node).is_empty() {
    return Err(FragmentError::EmptyComposite.into());
  }

  let (represents_first, represents_last) = tree.fragment_standing(node);
  let (node_start, node_end) = tree.range(content, node);

  // Unbroken only when nothing was consumed by an earlier break; a resumed
  // break must still carve out the remainder even if the whole would fit.
  if start_offset <= node_start && available >= tree.preferred_span(node, axis) {
    return Ok(node);
  }

  let children = tree.children(node).to_vec();
  let mut kept: Vec<NodeId> = Vec::new();
  let mut consumed = 0.0_f32;
  for child in children {
    let (child_start, child_end) = tree.range(content, child);
    if child_end <= start_offset {
      continue;
    }

    // A child straddling the starting offset was partially consumed by an
    // earlier break; only its remainder is a candidate here.
    let candidate = if child_start < start_offset {
      extract_fragment(tree, content, child, start_offset, child_end, factory)?
    } else {
      child
    };

    let span = tree.preferred_span(candidate, axis);
    let remaining = available - consumed;
    if span > remaining {
      let breakable = tree.node(candidate).break_weight().allows_breaking()
        && tree.node(candidate).axis() == Some(axis)
        && !tree.children(candidate).is_empty()
        && remaining > 0.0;
      if kept.is_empty() {
        // A fragment must never be empty: this child goes in regardless.
        // Sub-breaking first keeps the forced piece as small as possible.
        let piece = if breakable {
          break_along_axis(
            tree,
            content,
            candidate,
            axis,
            start_offset.max(child_start),
            pos + consumed,
            remaining,
            factory,
          )?
        } else {
          candidate
        };
        kept.push(piece);
      } else if breakable {
        let piece = break_along_axis(
          tree,
          content,
          candidate,
          axis,
          start_offset.max(child_start),
          pos + consumed,
          remaining,
          factory,
        )?;
        kept.push(piece);
      }
      // The cut-off remainder and all trailing children are deferred to the
      // next break pass; fitting them now would present content out of order.
      break;
    }

    consumed += span;
    kept.push(candidate);
  }

  let Some(&first) = kept.first() else {
    // Nothing at or after start_offset: the caller asked to resume past the
    // end of this node's content.
    return Err(Error::BadLocation {
      offset: start_offset,
      start: node_start,
      end: node_end,
    });
  };
  let last = *kept.last().unwrap_or(&first);
  let fragment_start = tree.range(content, first).0;
  let fragment_end = tree.range(content, last).1;
  let is_first = represents_first && fragment_start <= node_start;
  let is_last = represents_last && fragment_end >= node_end;

  Ok(assemble_fragment(tree, node, kept, is_first, is_last, factory))
}

/// Breaks `node` repeatedly until its content is exhausted, returning the
/// resulting fragment chain in document order.
///
/// This is the loop an external pagination driver runs with one fragmentainer
/// span; it is also the operation the coverage-conservation and single
/// first/last properties are stated over. A node that fits entirely yields a
/// one-element chain holding the node itself.
pub fn break_into_fragments(
  tree: &mut LayoutTree,
  content: &dyn ContentSource,
  node: NodeId,
  axis: Axis,
  available: f32,
  factory: &dyn FragmentFactory,
) -> Result<Vec<NodeId>> {
  let (start, end) = tree.range(content, node);
  let mut fragments = Vec::new();
  let mut offset = start;
  let mut pos = 0.0;
  while offset < end {
    let fragment = break_along_axis(tree, content, node, axis, offset, pos, available, factory)?;
    let fragment_end = tree.range(content, fragment).1;
    assert!(fragment_end > offset, "a break must consume content");
    fragments.push(fragment);
    offset = fragment_end;
    pos += available;
  }
  Ok(fragments)
}

/// Steps 6–8 of the break contract, shared with range extraction: mint the
/// empty fragment, install the accumulated children, stand the fragment in at
/// the original's tree position, migrate matching component registrations,
/// and repair parent links across the newly built subtree.
pub(crate) fn assemble_fragment(
  tree: &mut LayoutTree,
  node: NodeId,
  children: Vec<NodeId>,
  is_first: bool,
  is_last: bool,
  factory: &dyn FragmentFactory,
) -> NodeId {
  let fragment = factory.create_empty_fragment(tree, node, is_first, is_last);
  tree.replace_children(fragment, 0, 0, children);
  let parent = tree.node(node).parent();
  tree.set_parent(fragment, parent);
  migrate_components(tree, node, fragment);
  repair_parent_links(tree, fragment);
  fragment
}
