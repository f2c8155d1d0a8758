//! Core geometry types for view layout
//!
//! This module provides the geometric primitives used by the fragmentation
//! engine and the embedded component manager. All values are in unscaled
//! view coordinates unless a name says otherwise ("scaled" values have been
//! multiplied by the current zoom ratio).
//!
//! # Coordinate System
//!
//! The coordinate system has its origin at the top-left corner:
//! - Positive X extends to the right
//! - Positive Y extends downward

use std::fmt;

/// A 2D point in view coordinate space.
///
/// # Examples
///
/// ```
/// use pageflow::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.translate(Point::new(5.0, -5.0)), Point::new(15.0, 15.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
  /// X coordinate (increases to the right).
  pub x: f32,
  /// Y coordinate (increases downward).
  pub y: f32,
}

impl Point {
  /// The origin (0, 0).
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates.
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Translates this point by another point's coordinates.
  pub fn translate(self, other: Point) -> Self {
    Self {
      x: self.x + other.x,
      y: self.y + other.y,
    }
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// A 2D size (width and height).
///
/// # Examples
///
/// ```
/// use pageflow::Size;
///
/// let size = Size::new(200.0, 100.0);
/// assert!(size.is_positive());
/// assert!(!Size::ZERO.is_positive());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
  /// Width in view units.
  pub width: f32,
  /// Height in view units.
  pub height: f32,
}

impl Size {
  /// The zero size.
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size.
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Returns true when both dimensions are strictly positive.
  pub fn is_positive(self) -> bool {
    self.width > 0.0 && self.height > 0.0
  }

  /// Scales each dimension by the matching factor.
  pub fn scale(self, rx: f32, ry: f32) -> Self {
    Self {
      width: self.width * rx,
      height: self.height * ry,
    }
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}x{}", self.width, self.height)
  }
}

/// A rectangle described by origin and size.
///
/// # Examples
///
/// ```
/// use pageflow::{Point, Rect};
///
/// let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(rect.x(), 10.0);
/// assert_eq!(rect.max_y(), 70.0);
/// assert!(rect.contains_point(Point::new(50.0, 30.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
  /// Top-left corner.
  pub origin: Point,
  /// Extent of the rectangle.
  pub size: Size,
}

impl Rect {
  /// The empty rectangle at the origin.
  pub const ZERO: Self = Self {
    origin: Point::ZERO,
    size: Size::ZERO,
  };

  /// Creates a rectangle from an origin and size.
  pub const fn new(origin: Point, size: Size) -> Self {
    Self { origin, size }
  }

  /// Creates a rectangle from individual components.
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  /// Returns the X coordinate of the left edge.
  pub fn x(self) -> f32 {
    self.origin.x
  }

  /// Returns the Y coordinate of the top edge.
  pub fn y(self) -> f32 {
    self.origin.y
  }

  /// Returns the width.
  pub fn width(self) -> f32 {
    self.size.width
  }

  /// Returns the height.
  pub fn height(self) -> f32 {
    self.size.height
  }

  /// Returns the X coordinate of the right edge.
  pub fn max_x(self) -> f32 {
    self.origin.x + self.size.width
  }

  /// Returns the Y coordinate of the bottom edge.
  pub fn max_y(self) -> f32 {
    self.origin.y + self.size.height
  }

  /// Returns a copy translated by the given deltas.
  pub fn translate(self, dx: f32, dy: f32) -> Self {
    Self {
      origin: Point::new(self.origin.x + dx, self.origin.y + dy),
      size: self.size,
    }
  }

  /// Returns true when the point lies inside this rectangle.
  ///
  /// Points on the left/top edges are inside; points on the right/bottom
  /// edges are outside, so adjacent rectangles do not double-claim points.
  pub fn contains_point(self, p: Point) -> bool {
    p.x >= self.x() && p.x < self.max_x() && p.y >= self.y() && p.y < self.max_y()
  }
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.origin, self.size)
  }
}
