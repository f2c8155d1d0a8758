//! Tiling axes
//!
//! A composite box arranges its children along exactly one of two axes, and
//! only that axis can be paginated. The helpers here project sizes and points
//! onto an axis so the break algorithm can stay axis-agnostic.

use crate::geometry::{Point, Size};

/// One of the two tiling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
  /// Children tile left to right; spans are widths.
  Horizontal,
  /// Children tile top to bottom; spans are heights.
  Vertical,
}

impl Axis {
  /// Returns the other axis.
  pub fn cross(self) -> Self {
    match self {
      Self::Horizontal => Self::Vertical,
      Self::Vertical => Self::Horizontal,
    }
  }

  /// Projects a size onto this axis.
  pub fn of_size(self, size: Size) -> f32 {
    match self {
      Self::Horizontal => size.width,
      Self::Vertical => size.height,
    }
  }

  /// Projects a point onto this axis.
  pub fn of_point(self, point: Point) -> f32 {
    match self {
      Self::Horizontal => point.x,
      Self::Vertical => point.y,
    }
  }

  /// Builds a size from a span on this axis and a span on the cross axis.
  pub fn pack_size(self, along: f32, across: f32) -> Size {
    match self {
      Self::Horizontal => Size::new(along, across),
      Self::Vertical => Size::new(across, along),
    }
  }
}
