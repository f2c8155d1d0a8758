//! Shared fixtures for unit tests

use crate::content::{ContentSource, ElementId};
use crate::error::{Error, Result};

/// In-memory stand-in for the external document model: a flat text buffer
/// plus a mutable element table, so tests can shift element ranges underneath
/// the view tree.
pub struct StubContent {
  text: String,
  elements: Vec<(usize, usize)>,
}

impl StubContent {
  pub fn new(text: &str) -> Self {
    Self {
      text: text.to_string(),
      elements: Vec::new(),
    }
  }

  pub fn with_len(len: usize) -> Self {
    Self::new(&"x".repeat(len))
  }

  pub fn add_element(&mut self, start: usize, end: usize) -> ElementId {
    self.elements.push((start, end));
    ElementId(self.elements.len() - 1)
  }

  pub fn set_element_range(&mut self, element: ElementId, start: usize, end: usize) {
    self.elements[element.0] = (start, end);
  }

  pub fn grow(&mut self, extra: usize) {
    self.text.push_str(&"x".repeat(extra));
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
