//! Public-API tests for embedded-component placement and migration.

mod common;

use std::rc::Rc;

use common::{leaf, StubContent, TestControl};
use pageflow::{
  break_into_fragments, hide_subtree, Axis, BoxFragmentFactory, ComponentManager, ControlHandle,
  DockPosition, LayoutNode, LayoutTree, NodeId, PlacementRule, Point, Size,
};

fn registry_holds(manager: &ComponentManager, control: &ControlHandle) -> bool {
  manager
    .entries()
    .iter()
    .any(|entry| Rc::ptr_eq(entry.control(), control))
}

/// A component-capable vertical box with four 40-span leaves over [0, 40).
fn hosting_box(content: &mut StubContent, tree: &mut LayoutTree) -> NodeId {
  let leaves: Vec<NodeId> = (0..4)
    .map(|i| leaf(tree, content, i * 10, (i + 1) * 10, 40.0))
    .collect();
  let el = content.add_element(0, 40);
  let node = tree.insert(LayoutNode::composite(el, Axis::Vertical).with_components());
  tree.replace_children(node, 0, 0, leaves);
  node
}

#[test]
fn bottom_docked_control_follows_the_last_fragment_only() {
  let mut content = StubContent::with_len(40);
  let mut tree = LayoutTree::new();
  let node = hosting_box(&mut content, &mut tree);

  let bottom: ControlHandle = TestControl::handle(Size::new(16.0, 16.0));
  let top: ControlHandle = TestControl::handle(Size::new(16.0, 16.0));
  let floating: ControlHandle = TestControl::handle(Size::new(16.0, 16.0));
  {
    let manager = tree.node_mut(node).components_mut().unwrap();
    manager.register(bottom.clone(), PlacementRule::docked(DockPosition::Bottom));
    manager.register(top.clone(), PlacementRule::docked(DockPosition::TopRight));
    manager.register(floating.clone(), PlacementRule::at(Point::new(10.0, 10.0)));
  }

  let chain = break_into_fragments(
    &mut tree,
    &content,
    node,
    Axis::Vertical,
    90.0,
    &BoxFragmentFactory,
  )
  .unwrap();
  assert!(chain.len() >= 2, "the box must actually fragment");

  let mut bottom_hits = 0;
  let mut top_hits = 0;
  let mut floating_hits = 0;
  for (index, fragment) in chain.iter().enumerate() {
    let manager = tree
      .node(*fragment)
      .components()
      .expect("fragments of a component-capable node manage components");
    if registry_holds(manager, &bottom) {
      bottom_hits += 1;
      assert_eq!(index, chain.len() - 1, "bottom dock belongs to the last fragment");
    }
    if registry_holds(manager, &top) {
      top_hits += 1;
      assert_eq!(index, 0, "top dock belongs to the first fragment");
    }
    if registry_holds(manager, &floating) {
      floating_hits += 1;
      assert_eq!(index, 0, "an unanchored point belongs to the first fragment");
    }
  }
  assert_eq!(bottom_hits, 1, "exactly one owner after migration");
  assert_eq!(top_hits, 1);
  assert_eq!(floating_hits, 1);
}

#[test]
fn unfragmented_node_keeps_its_registrations() {
  let mut content = StubContent::with_len(40);
  let mut tree = LayoutTree::new();
  let node = hosting_box(&mut content, &mut tree);
  let control: ControlHandle = TestControl::handle(Size::new(8.0, 8.0));
  tree
    .node_mut(node)
    .components_mut()
    .unwrap()
    .register(control.clone(), PlacementRule::docked(DockPosition::Bottom));

  // Everything fits: the chain is the node itself, no migration happens.
  let chain = break_into_fragments(
    &mut tree,
    &content,
    node,
    Axis::Vertical,
    500.0,
    &BoxFragmentFactory,
  )
  .unwrap();
  assert_eq!(chain, vec![node]);
  assert!(registry_holds(tree.node(node).components().unwrap(), &control));
}

#[test]
fn migrated_registration_keeps_the_placement_rule() {
  let mut content = StubContent::with_len(40);
  let mut tree = LayoutTree::new();
  let node = hosting_box(&mut content, &mut tree);
  let control = TestControl::handle(Size::new(16.0, 16.0));
  let handle: ControlHandle = control.clone();
  tree.node_mut(node).components_mut().unwrap().register(
    handle.clone(),
    PlacementRule::docked(DockPosition::Bottom).with_size(Size::new(40.0, 20.0)),
  );

  let chain = break_into_fragments(
    &mut tree,
    &content,
    node,
    Axis::Vertical,
    90.0,
    &BoxFragmentFactory,
  )
  .unwrap();
  let last = *chain.last().unwrap();
  let manager = tree.node(last).components().unwrap();
  let entry = manager
    .entries()
    .iter()
    .find(|e| Rc::ptr_eq(e.control(), &handle))
    .expect("registration migrated to the last fragment");
  assert_eq!(entry.rule().dock, Some(DockPosition::Bottom));
  assert_eq!(entry.rule().size, Some(Size::new(40.0, 20.0)));

  // The clone shares the live control: sizing the fragment moves the same
  // widget the original registry pointed at.
  let manager = tree.node_mut(last).components_mut().unwrap();
  manager.set_allocated_size(Size::new(100.0, 40.0), Size::new(100.0, 40.0));
  manager.set_origin(Point::new(0.0, 200.0));
  let bounds = control.borrow().bounds;
  assert_eq!(bounds.size, Size::new(40.0, 20.0));
  assert_eq!(bounds.origin, Point::new(30.0, 220.0));
}

#[test]
fn hiding_an_offscreen_fragment_hides_its_controls() {
  let mut content = StubContent::with_len(40);
  let mut tree = LayoutTree::new();
  let node = hosting_box(&mut content, &mut tree);
  let top = TestControl::handle(Size::new(8.0, 8.0));
  let handle: ControlHandle = top.clone();
  tree
    .node_mut(node)
    .components_mut()
    .unwrap()
    .register(handle, PlacementRule::docked(DockPosition::Top));

  let chain = break_into_fragments(
    &mut tree,
    &content,
    node,
    Axis::Vertical,
    90.0,
    &BoxFragmentFactory,
  )
  .unwrap();
  let first = chain[0];

  // Only a later fragment is on screen: the driver hides the first one.
  hide_subtree(&mut tree, first);
  assert!(
    !top.borrow().visible,
    "hiding the hosting fragment must hide its migrated controls"
  );
  assert!(!tree.node(first).components().unwrap().is_visible());
}
