//! Break and extraction algorithms operating on the view tree

pub mod axis;
pub mod breaking;
pub mod extract;

pub use axis::Axis;
pub use breaking::{break_along_axis, break_into_fragments, BreakWeight};
pub use extract::extract_fragment;
