//! Dock positions for embedded controls
//!
//! A docked control is placed against a named anchor of its host node's
//! current (scaled) bounds instead of at a registered point. The nine anchors
//! cover the four edges, the four corners, and the center.

use crate::geometry::{Point, Size};

/// Named anchor for a docked embedded control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockPosition {
  /// Top-left corner.
  TopLeft,
  /// Centered against the top edge.
  Top,
  /// Top-right corner.
  TopRight,
  /// Centered against the left edge.
  Left,
  /// Centered in both dimensions.
  Center,
  /// Centered against the right edge.
  Right,
  /// Bottom-left corner.
  BottomLeft,
  /// Centered against the bottom edge.
  Bottom,
  /// Bottom-right corner.
  BottomRight,
}

impl DockPosition {
  /// True for anchors tied to the trailing (bottom) edge.
  ///
  /// When a node is fragmented, trailing-anchored controls belong with the
  /// last fragment; every other anchor belongs with the first.
  pub fn anchors_to_trailing_edge(self) -> bool {
    matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
  }

  /// Computes the top-left location of a control of size `control` docked
  /// inside a host of size `host`. Both sizes are in the same (scaled)
  /// coordinate space.
  pub fn locate(self, control: Size, host: Size) -> Point {
    let centered_x = (host.width - control.width) / 2.0;
    let centered_y = (host.height - control.height) / 2.0;
    let right = host.width - control.width;
    let bottom = host.height - control.height;
    match self {
      Self::TopLeft => Point::new(0.0, 0.0),
      Self::Top => Point::new(centered_x, 0.0),
      Self::TopRight => Point::new(right, 0.0),
      Self::Left => Point::new(0.0, centered_y),
      Self::Center => Point::new(centered_x, centered_y),
      Self::Right => Point::new(right, centered_y),
      Self::BottomLeft => Point::new(0.0, bottom),
      Self::Bottom => Point::new(centered_x, bottom),
      Self::BottomRight => Point::new(right, bottom),
    }
  }
}
