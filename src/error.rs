//! Error types for pageflow
//!
//! Two kinds of failure exist in this core:
//! - Recoverable conditions (a range query outside a node's content, a
//!   malformed break request). These are reported as [`Error`] values and
//!   callers are expected to fall back to a nearby valid state.
//! - Structural invariant violations (duplicated live controls, a factory
//!   producing a node of the wrong shape). These indicate a broken
//!   precondition, not bad input, and are asserted rather than returned.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for pageflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for pageflow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
  /// A document offset fell outside the valid range of the queried node.
  ///
  /// Recoverable: callers should clamp to the nearest boundary of
  /// `[start, end)` and retry or use the boundary directly.
  #[error("bad location: offset {offset} outside [{start}, {end})")]
  BadLocation {
    /// The offending offset.
    offset: usize,
    /// Start of the valid range.
    start: usize,
    /// End of the valid range (exclusive).
    end: usize,
  },

  /// Fragmentation request that cannot be satisfied.
  #[error("fragmentation error: {0}")]
  Fragment(#[from] FragmentError),
}

/// Errors raised by the break and extraction algorithms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FragmentError {
  /// `break_along_axis` was asked to break a composite with no children.
  /// A fragment must never be empty, so there is nothing to produce.
  #[error("cannot break a composite node with no children")]
  EmptyComposite,

  /// The available span passed to a break was zero or negative.
  #[error("available span must be positive, got {span}")]
  NonPositiveSpan {
    /// The offending span value.
    span: f32,
  },

  /// An extraction range was empty or inverted.
  #[error("requested range [{start}, {end}) is empty or inverted")]
  EmptyRange {
    /// Requested range start.
    start: usize,
    /// Requested range end.
    end: usize,
  },
}
