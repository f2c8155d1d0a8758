//! Layout nodes and the tree arena
//!
//! A [`LayoutTree`] owns every node in an arena; nodes refer to each other by
//! [`NodeId`]. Ownership flows strictly parent → children through the child
//! lists; the parent back-reference is a plain non-owning id used only for
//! upward navigation, so fragments and detached subtrees never form ownership
//! cycles.
//!
//! # Range caching
//!
//! A composite node's offset range is the union of its children's ranges.
//! Computing that union is O(children) and range queries happen on every
//! layout pass, so the aggregate is cached. The cache carries a validity
//! stamp: the range of the node's own backing element at the moment the cache
//! was built. The document model is independently mutable, so before any
//! cached value is served the stamp is compared against the element's current
//! range; any mismatch (or an explicit invalidation from a child-list splice)
//! forces a rebuild.

use rustc_hash::FxHashMap;

use crate::component::ComponentManager;
use crate::content::{ContentSource, ElementId};
use crate::error::{Error, Result};
use crate::geometry::Size;
use crate::layout::axis::Axis;
use crate::layout::breaking::BreakWeight;
use crate::tree::fragment::FragmentInfo;

/// Non-owning handle to a node inside a [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
  /// Returns the arena index of this id.
  pub fn index(self) -> usize {
    self.0
  }
}

/// Opaque key/value bag attached to every node.
///
/// The style and semantic systems that interpret these values live outside
/// this core; the bag only stores and clones them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBag {
  values: FxHashMap<String, String>,
}

impl AttributeBag {
  /// Creates an empty bag.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets an attribute, replacing any previous value for the key.
  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.values.insert(key.into(), value.into());
  }

  /// Looks up an attribute value.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.values.get(key).map(String::as_str)
  }

  /// Removes an attribute, returning the previous value if any.
  pub fn remove(&mut self, key: &str) -> Option<String> {
    self.values.remove(key)
  }

  /// Returns the number of attributes.
  pub fn len(&self) -> usize {
    self.values.len()
  }

  /// Returns true when no attributes are set.
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

/// Shape of a node: a content leaf or a composite box tiling children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
  /// A leaf mapped directly onto a content element. Carries the preferred
  /// size supplied by the external measurement pass.
  Leaf {
    /// Preferred size in unscaled view units.
    preferred: Size,
  },
  /// A composite box laying its children out along one axis.
  Composite {
    /// The tiling axis. Only this axis can be paginated.
    axis: Axis,
  },
}

/// Cached aggregate range for a composite node.
///
/// `stamp` records the backing element's range at cache-build time; `None`
/// means explicitly invalidated. `aggregate` of `None` with a present stamp
/// means the node had no children when the cache was built.
#[derive(Debug, Clone, Default, PartialEq)]
struct RangeCache {
  aggregate: Option<(usize, usize)>,
  stamp: Option<(usize, usize)>,
}

/// A node in the view tree.
///
/// Constructed with [`LayoutNode::leaf`] or [`LayoutNode::composite`], then
/// inserted into a [`LayoutTree`]. Capabilities a node may or may not have
/// (fragment identity, embedded component management) are probed through
/// `Option`-returning accessors rather than downcasts.
#[derive(Debug, Clone)]
pub struct LayoutNode {
  element: ElementId,
  kind: NodeKind,
  children: Vec<NodeId>,
  parent: Option<NodeId>,
  attributes: AttributeBag,
  cache: RangeCache,
  fragment: Option<FragmentInfo>,
  components: Option<ComponentManager>,
  range_override: Option<(usize, usize)>,
  break_weight: BreakWeight,
}

impl LayoutNode {
  /// Creates a leaf node backed by a content element.
  pub fn leaf(element: ElementId, preferred: Size) -> Self {
    Self {
      element,
      kind: NodeKind::Leaf { preferred },
      children: Vec::new(),
      parent: None,
      attributes: AttributeBag::new(),
      cache: RangeCache::default(),
      fragment: None,
      components: None,
      range_override: None,
      break_weight: BreakWeight::Bad,
    }
  }

  /// Creates a composite box node tiling children along `axis`.
  pub fn composite(element: ElementId, axis: Axis) -> Self {
    Self {
      element,
      kind: NodeKind::Composite { axis },
      children: Vec::new(),
      parent: None,
      attributes: AttributeBag::new(),
      cache: RangeCache::default(),
      fragment: None,
      components: None,
      range_override: None,
      break_weight: BreakWeight::Natural,
    }
  }

  /// Overrides the node's break weight.
  pub fn with_break_weight(mut self, weight: BreakWeight) -> Self {
    self.break_weight = weight;
    self
  }

  /// Enables embedded component management on this node.
  pub fn with_components(mut self) -> Self {
    self.components = Some(ComponentManager::new());
    self
  }

  /// Returns the backing content element.
  pub fn element(&self) -> ElementId {
    self.element
  }

  /// Returns the node kind.
  pub fn kind(&self) -> &NodeKind {
    &self.kind
  }

  /// Returns the tiling axis for composite nodes, `None` for leaves.
  pub fn axis(&self) -> Option<Axis> {
    match self.kind {
      NodeKind::Composite { axis } => Some(axis),
      NodeKind::Leaf { .. } => None,
    }
  }

  /// Returns true for leaf nodes.
  pub fn is_leaf(&self) -> bool {
    matches!(self.kind, NodeKind::Leaf { .. })
  }

  /// Returns the recorded parent, if any.
  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  /// Returns the ordered child list.
  pub fn children(&self) -> &[NodeId] {
    &self.children
  }

  /// Returns the attribute bag.
  pub fn attributes(&self) -> &AttributeBag {
    &self.attributes
  }

  /// Returns the attribute bag for mutation.
  pub fn attributes_mut(&mut self) -> &mut AttributeBag {
    &mut self.attributes
  }

  /// Fragment identity capability probe: present only on fragment nodes.
  pub fn fragment(&self) -> Option<&FragmentInfo> {
    self.fragment.as_ref()
  }

  /// Component management capability probe.
  pub fn components(&self) -> Option<&ComponentManager> {
    self.components.as_ref()
  }

  /// Component management capability probe, mutable.
  pub fn components_mut(&mut self) -> Option<&mut ComponentManager> {
    self.components.as_mut()
  }

  /// Returns the node's break weight.
  pub fn break_weight(&self) -> BreakWeight {
    self.break_weight
  }

  /// Sets the node's break weight.
  pub fn set_break_weight(&mut self, weight: BreakWeight) {
    self.break_weight = weight;
  }

  /// Explicit range carried by leaf fragments, overriding the element range.
  pub fn range_override(&self) -> Option<(usize, usize)> {
    self.range_override
  }

  pub(crate) fn set_fragment(&mut self, info: FragmentInfo) {
    self.fragment = Some(info);
  }

  pub(crate) fn set_components(&mut self, manager: ComponentManager) {
    self.components = Some(manager);
  }

  pub(crate) fn set_range_override(&mut self, range: (usize, usize)) {
    self.range_override = Some(range);
  }

  pub(crate) fn set_preferred(&mut self, preferred: Size) {
    if let NodeKind::Leaf { preferred: p } = &mut self.kind {
      *p = preferred;
    }
  }
}

/// Arena of layout nodes.
///
/// All structural mutation goes through the tree so cache invalidation can be
/// applied at every splice site.
#[derive(Debug, Default)]
pub struct LayoutTree {
  nodes: Vec<LayoutNode>,
}

impl LayoutTree {
  /// Creates an empty tree.
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts a node and returns its id.
  pub fn insert(&mut self, node: LayoutNode) -> NodeId {
    let id = NodeId(self.nodes.len());
    self.nodes.push(node);
    id
  }

  /// Returns the number of nodes in the arena, fragments included.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// Returns true when the arena holds no nodes.
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Borrows a node. Panics on a foreign id; ids are only minted by this
  /// arena, so a miss is a programming error.
  pub fn node(&self, id: NodeId) -> &LayoutNode {
    &self.nodes[id.0]
  }

  /// Mutably borrows a node.
  pub fn node_mut(&mut self, id: NodeId) -> &mut LayoutNode {
    &mut self.nodes[id.0]
  }

  /// Returns the ordered child ids of a node.
  pub fn children(&self, id: NodeId) -> &[NodeId] {
    &self.nodes[id.0].children
  }

  /// Sets a node's parent back-reference.
  pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
    self.nodes[id.0].parent = parent;
  }

  /// Splices the child list of `id`: removes `remove_count` children starting
  /// at `index` and inserts `insert` in their place.
  ///
  /// Removed children have their parent link cleared; inserted children are
  /// reparented to `id`. The aggregate-range cache of `id` and of every
  /// ancestor is invalidated, so the next range query recomputes from the
  /// current children.
  pub fn replace_children(
    &mut self,
    id: NodeId,
    index: usize,
    remove_count: usize,
    insert: Vec<NodeId>,
  ) {
    assert!(
      index + remove_count <= self.nodes[id.0].children.len(),
      "child splice out of bounds"
    );
    let removed: Vec<NodeId> = self.nodes[id.0]
      .children
      .splice(index..index + remove_count, insert.iter().copied())
      .collect();
    for child in removed {
      self.nodes[child.0].parent = None;
    }
    for child in insert {
      self.nodes[child.0].parent = Some(id);
    }
    self.invalidate_range(id);
  }

  /// Appends a child at the end of a node's child list.
  pub fn append_child(&mut self, id: NodeId, child: NodeId) {
    let end = self.nodes[id.0].children.len();
    self.replace_children(id, end, 0, vec![child]);
  }

  /// Marks the aggregate-range cache of `id` and all its ancestors invalid.
  ///
  /// Invalidating an already-invalid cache is a no-op, so re-entrant calls
  /// during a splice cascade are safe.
  pub fn invalidate_range(&mut self, id: NodeId) {
    let mut current = Some(id);
    while let Some(node) = current {
      self.nodes[node.0].cache.stamp = None;
      current = self.nodes[node.0].parent;
    }
  }

  /// Returns the `[start, end)` offset range of a node.
  ///
  /// Leaf fragments serve their explicit override; plain leaves ask the
  /// content source; composites serve the (verified) cached aggregate, or
  /// fall back to their own backing element range when they have no children.
  pub fn range(&mut self, content: &dyn ContentSource, id: NodeId) -> (usize, usize) {
    if let Some(range) = self.nodes[id.0].range_override {
      return range;
    }
    match self.nodes[id.0].kind {
      NodeKind::Leaf { .. } => content.range(self.nodes[id.0].element),
      NodeKind::Composite { .. } => {
        self.verify_cache(content, id);
        match self.nodes[id.0].cache.aggregate {
          Some(aggregate) => aggregate,
          None => content.range(self.nodes[id.0].element),
        }
      }
    }
  }

  /// Revalidates the aggregate cache of `id` against the backing element.
  fn verify_cache(&mut self, content: &dyn ContentSource, id: NodeId) {
    let current = content.range(self.nodes[id.0].element);
    if self.nodes[id.0].cache.stamp != Some(current) {
      self.rebuild_cache(content, id, current);
    }
  }

  /// Recomputes the aggregate range from the current children and stamps the
  /// cache with the element range observed at build time.
  fn rebuild_cache(&mut self, content: &dyn ContentSource, id: NodeId, stamp: (usize, usize)) {
    let children = self.nodes[id.0].children.clone();
    let mut aggregate: Option<(usize, usize)> = None;
    for child in children.into_iter().rev() {
      let (start, end) = self.range(content, child);
      aggregate = Some(match aggregate {
        Some((lo, hi)) => (lo.min(start), hi.max(end)),
        None => (start, end),
      });
    }
    let cache = &mut self.nodes[id.0].cache;
    cache.aggregate = aggregate;
    cache.stamp = Some(stamp);
  }

  /// Returns the preferred span of a node projected on `axis`.
  ///
  /// A composite sums child spans along its own tiling axis and takes the
  /// maximum across the other axis; a leaf projects its measured size.
  pub fn preferred_span(&self, id: NodeId, axis: Axis) -> f32 {
    match self.nodes[id.0].kind {
      NodeKind::Leaf { preferred } => axis.of_size(preferred),
      NodeKind::Composite { axis: tiling } => {
        let children = &self.nodes[id.0].children;
        if axis == tiling {
          children
            .iter()
            .map(|child| self.preferred_span(*child, axis))
            .sum()
        } else {
          children
            .iter()
            .map(|child| self.preferred_span(*child, axis))
            .fold(0.0, f32::max)
        }
      }
    }
  }

  /// Whether this node still represents the true first/last portion of its
  /// ultimate whole. A node that is not a fragment represents both.
  pub fn fragment_standing(&self, id: NodeId) -> (bool, bool) {
    match self.nodes[id.0].fragment {
      Some(info) => (info.is_first, info.is_last),
      None => (true, true),
    }
  }

  /// The original whole node a fragment chain derives from, or `id` itself
  /// for an unfragmented node.
  pub fn whole_of(&self, id: NodeId) -> NodeId {
    match self.nodes[id.0].fragment {
      Some(info) => info.whole,
      None => id,
    }
  }

  /// Extracts the text of `[start, end)`, which must lie within the node's
  /// own range.
  ///
  /// Returns [`Error::BadLocation`] carrying the node's valid bounds when the
  /// request reaches outside them; callers recover by clamping.
  pub fn text(
    &mut self,
    content: &dyn ContentSource,
    id: NodeId,
    start: usize,
    end: usize,
  ) -> Result<String> {
    let (node_start, node_end) = self.range(content, id);
    if start < node_start || start >= end {
      return Err(Error::BadLocation {
        offset: start,
        start: node_start,
        end: node_end,
      });
    }
    if end > node_end {
      return Err(Error::BadLocation {
        offset: end,
        start: node_start,
        end: node_end,
      });
    }
    content.text_in_range(start, end)
  }

  /// Finds the child of `id` whose range contains `offset`.
  ///
  /// Used by pagination drivers to resume where a previous break left off.
  /// Offsets outside the node (or falling in a gap between children) yield
  /// [`Error::BadLocation`].
  pub fn child_at_offset(
    &mut self,
    content: &dyn ContentSource,
    id: NodeId,
    offset: usize,
  ) -> Result<NodeId> {
    let (node_start, node_end) = self.range(content, id);
    let children = self.nodes[id.0].children.clone();
    for child in children {
      let (start, end) = self.range(content, child);
      if start <= offset && offset < end {
        return Ok(child);
      }
    }
    Err(Error::BadLocation {
      offset,
      start: node_start,
      end: node_end,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_util::StubContent;

  fn three_leaf_box(content: &mut StubContent, tree: &mut LayoutTree) -> (NodeId, Vec<NodeId>) {
    let parent_el = content.add_element(0, 30);
    let leaves: Vec<NodeId> = [(0, 10), (10, 20), (20, 30)]
      .iter()
      .map(|(s, e)| {
        let el = content.add_element(*s, *e);
        tree.insert(LayoutNode::leaf(el, Size::new(50.0, 10.0)))
      })
      .collect();
    let root = tree.insert(LayoutNode::composite(parent_el, Axis::Vertical));
    tree.replace_children(root, 0, 0, leaves.clone());
    (root, leaves)
  }

  #[test]
  fn composite_range_is_union_of_children() {
    let mut content = StubContent::with_len(30);
    let mut tree = LayoutTree::new();
    let (root, _) = three_leaf_box(&mut content, &mut tree);
    assert_eq!(tree.range(&content, root), (0, 30));
  }

  #[test]
  fn splice_invalidates_cache_on_all_ancestors() {
    let mut content = StubContent::with_len(40);
    let mut tree = LayoutTree::new();
    let (inner, _) = three_leaf_box(&mut content, &mut tree);
    let outer_el = content.add_element(0, 40);
    let outer = tree.insert(LayoutNode::composite(outer_el, Axis::Vertical));
    tree.replace_children(outer, 0, 0, vec![inner]);
    assert_eq!(tree.range(&content, outer), (0, 30));

    let extra_el = content.add_element(30, 40);
    let extra = tree.insert(LayoutNode::leaf(extra_el, Size::new(50.0, 10.0)));
    tree.append_child(inner, extra);
    assert_eq!(
      tree.range(&content, outer),
      (0, 40),
      "the very next range query must reflect the splice"
    );
  }

  #[test]
  fn stale_stamp_forces_recomputation() {
    let mut content = StubContent::with_len(30);
    let mut tree = LayoutTree::new();
    let (root, leaves) = three_leaf_box(&mut content, &mut tree);
    assert_eq!(tree.range(&content, root), (0, 30));

    // The document mutates underneath the view: the backing element and the
    // last leaf both grow. No explicit invalidation happens.
    content.grow(5);
    let root_el = tree.node(root).element();
    content.set_element_range(root_el, 0, 35);
    let leaf_el = tree.node(leaves[2]).element();
    content.set_element_range(leaf_el, 20, 35);

    assert_eq!(
      tree.range(&content, root),
      (0, 35),
      "stamp mismatch must trigger a rebuild"
    );
  }

  #[test]
  fn empty_composite_falls_back_to_element_range() {
    let mut content = StubContent::with_len(12);
    let mut tree = LayoutTree::new();
    let el = content.add_element(3, 9);
    let boxed = tree.insert(LayoutNode::composite(el, Axis::Horizontal));
    assert_eq!(tree.range(&content, boxed), (3, 9));
  }

  #[test]
  fn preferred_span_sums_along_tiling_axis() {
    let mut content = StubContent::with_len(30);
    let mut tree = LayoutTree::new();
    let (root, _) = three_leaf_box(&mut content, &mut tree);
    assert_eq!(tree.preferred_span(root, Axis::Vertical), 30.0);
    assert_eq!(tree.preferred_span(root, Axis::Horizontal), 50.0);
  }

  #[test]
  fn text_outside_range_is_a_bad_location() {
    let mut content = StubContent::new("hello, fragment world");
    let mut tree = LayoutTree::new();
    let el = content.add_element(0, 5);
    let leaf = tree.insert(LayoutNode::leaf(el, Size::new(30.0, 10.0)));

    assert_eq!(tree.text(&content, leaf, 0, 5).unwrap(), "hello");
    let err = tree.text(&content, leaf, 0, 9).unwrap_err();
    assert_eq!(
      err,
      Error::BadLocation {
        offset: 9,
        start: 0,
        end: 5
      }
    );
  }

  #[test]
  fn child_at_offset_finds_the_covering_child() {
    let mut content = StubContent::with_len(30);
    let mut tree = LayoutTree::new();
    let (root, leaves) = three_leaf_box(&mut content, &mut tree);
    assert_eq!(tree.child_at_offset(&content, root, 15).unwrap(), leaves[1]);
    assert!(tree.child_at_offset(&content, root, 30).is_err());
  }
}
