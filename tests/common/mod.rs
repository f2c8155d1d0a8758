//! Shared fixtures for the public-API tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use pageflow::{
  Axis, ContentSource, Control, ElementId, Error, LayoutNode, LayoutTree, NodeId, Rect, Result,
  Size,
};

/// Stand-in document model: a text buffer plus a mutable element table.
pub struct StubContent {
  text: String,
  elements: Vec<(usize, usize)>,
}

impl StubContent {
  pub fn with_len(len: usize) -> Self {
    Self {
      text: "x".repeat(len),
      elements: Vec::new(),
    }
  }

  pub fn add_element(&mut self, start: usize, end: usize) -> ElementId {
    self.elements.push((start, end));
    ElementId(self.elements.len() - 1)
  }
}

impl ContentSource for StubContent {
  fn range(&self, element: ElementId) -> (usize, usize) {
    self.elements[element.0]
  }

  fn text_in_range(&self, start: usize, end: usize) -> Result<String> {
    if start >= end || end > self.text.len() {
      return Err(Error::BadLocation {
        offset: end,
        start: 0,
        end: self.text.len(),
      });
    }
    Ok(self.text[start..end].to_string())
  }
}

/// Recording control: remembers the last bounds and visibility pushed in.
#[derive(Debug)]
pub struct TestControl {
  pub preferred: Size,
  pub bounds: Rect,
  pub visible: bool,
}

impl TestControl {
  pub fn handle(preferred: Size) -> Rc<RefCell<TestControl>> {
    Rc::new(RefCell::new(TestControl {
      preferred,
      bounds: Rect::ZERO,
      visible: true,
    }))
  }
}

impl Control for TestControl {
  fn preferred_size(&self) -> Size {
    self.preferred
  }

  fn set_bounds(&mut self, bounds: Rect) {
    self.bounds = bounds;
  }

  fn set_visible(&mut self, visible: bool) {
    self.visible = visible;
  }
}

/// Inserts a leaf over `[start, end)` with the given vertical span.
pub fn leaf(
  tree: &mut LayoutTree,
  content: &mut StubContent,
  start: usize,
  end: usize,
  span: f32,
) -> NodeId {
  let el = content.add_element(start, end);
  tree.insert(LayoutNode::leaf(el, Size::new(100.0, span)))
}

/// Inserts a vertical composite over `[start, end)` with the given children.
pub fn vbox(
  tree: &mut LayoutTree,
  content: &mut StubContent,
  start: usize,
  end: usize,
  children: Vec<NodeId>,
) -> NodeId {
  let el = content.add_element(start, end);
  let node = tree.insert(LayoutNode::composite(el, Axis::Vertical));
  tree.replace_children(node, 0, 0, children);
  node
}
