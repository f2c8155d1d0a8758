//! Content Range Provider boundary
//!
//! The document model that backs a view tree lives outside this crate. Views
//! only need two things from it: the current offset range of the content
//! element a node is mapped to, and text extraction by offset range. Both are
//! expressed through the [`ContentSource`] trait so the pagination core never
//! depends on a concrete document representation.
//!
//! Offsets are document positions; every range is half-open `[start, end)`.

use crate::error::Result;

/// Opaque handle to a content element inside the external document model.
///
/// Nodes hold an `ElementId` rather than offsets because the document is
/// independently mutable: the element's range may have shifted since the node
/// last looked. Range caches stamp the element range they were built from and
/// recompute on mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub usize);

/// Read access to the external, independently mutable document model.
pub trait ContentSource {
  /// Returns the current `[start, end)` range of the given element.
  fn range(&self, element: ElementId) -> (usize, usize);

  /// Extracts the text in `[start, end)`.
  ///
  /// Returns [`Error::BadLocation`](crate::Error::BadLocation) when the range
  /// reaches outside the document.
  fn text_in_range(&self, start: usize, end: usize) -> Result<String>;

  /// Returns the current start offset of the given element.
  fn start(&self, element: ElementId) -> usize {
    self.range(element).0
  }

  /// Returns the current end offset of the given element.
  fn end(&self, element: ElementId) -> usize {
    self.range(element).1
  }
}
