//! Embedded component management
//!
//! Interactive controls (buttons, form fields, embedded widgets) sit on top
//! of a node but are not part of the flowed text. Each component-capable node
//! carries a [`ComponentManager`]: a registry mapping every managed control
//! to a declarative [`PlacementRule`], from which concrete screen bounds are
//! recomputed whenever the node's allocated size or origin changes.
//!
//! Controls are live external objects owned by the UI toolkit; the registry
//! holds shared [`ControlHandle`]s. A control must be placed by exactly one
//! registry at a time, which is why fragmentation migrates a registration
//! into at most one fragment: trailing-anchored registrations follow the last
//! fragment, all others follow the first.
//!
//! Everything here runs on the single UI thread; handles are `Rc<RefCell<_>>`
//! and no operation blocks.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub mod dock;

pub use dock::DockPosition;

use crate::geometry::{Point, Rect, Size};
use crate::tree::node::{LayoutTree, NodeId};

/// A live interactive control hosted over a node.
///
/// Implemented by the embedding application's widget wrappers. The manager
/// pushes bounds and visibility into the control; it never reads them back.
pub trait Control {
  /// The control's natural size in unscaled view units, used when its
  /// registration carries no explicit relative size.
  fn preferred_size(&self) -> Size;

  /// Moves/resizes the control in host container coordinates.
  fn set_bounds(&mut self, bounds: Rect);

  /// Shows or hides the control.
  fn set_visible(&mut self, visible: bool);
}

/// Shared handle to a live control. Cloning shares the control; the clone is
/// never a second widget.
pub type ControlHandle = Rc<RefCell<dyn Control>>;

/// Declarative placement for one registered control.
///
/// At most one positioning rule is active: a dock position wins over a
/// relative location when both are set. Locations and sizes are in the
/// node's unscaled coordinate space and are multiplied by the current
/// scaled/full ratio per axis before use.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlacementRule {
  /// Fixed point in unscaled node coordinates.
  pub location: Option<Point>,
  /// Named anchor; takes precedence over `location`.
  pub dock: Option<DockPosition>,
  /// Size in unscaled node coordinates; the control's preferred size is used
  /// when absent.
  pub size: Option<Size>,
  /// When true, the registered point denotes the control's center rather
  /// than its top-left corner.
  pub centered: bool,
}

impl PlacementRule {
  /// Places the control at a fixed unscaled point.
  pub fn at(location: Point) -> Self {
    Self {
      location: Some(location),
      ..Self::default()
    }
  }

  /// Docks the control against a named anchor.
  pub fn docked(dock: DockPosition) -> Self {
    Self {
      dock: Some(dock),
      ..Self::default()
    }
  }

  /// Sets an explicit unscaled size.
  pub fn with_size(mut self, size: Size) -> Self {
    self.size = Some(size);
    self
  }

  /// Marks the registered point as denoting the control's center.
  pub fn centered(mut self) -> Self {
    self.centered = true;
    self
  }
}

/// One managed control: the shared handle, its placement rule, and the
/// derived scaled geometry.
///
/// Cloning an entry deep-copies the rule and derived geometry but shares the
/// control handle; fragmentation relies on this to duplicate a registration
/// into exactly one destination registry without duplicating the widget.
#[derive(Clone)]
pub struct ComponentEntry {
  control: ControlHandle,
  rule: PlacementRule,
  scaled_location: Point,
  scaled_size: Size,
}

impl ComponentEntry {
  /// The managed control.
  pub fn control(&self) -> &ControlHandle {
    &self.control
  }

  /// The declarative placement.
  pub fn rule(&self) -> &PlacementRule {
    &self.rule
  }

  /// Last computed location in scaled node coordinates.
  pub fn scaled_location(&self) -> Point {
    self.scaled_location
  }

  /// Last computed size in scaled node coordinates.
  pub fn scaled_size(&self) -> Size {
    self.scaled_size
  }

  /// Whether this registration follows the last fragment on migration.
  pub fn anchored_to_trailing_edge(&self) -> bool {
    self
      .rule
      .dock
      .is_some_and(DockPosition::anchors_to_trailing_edge)
  }
}

impl fmt::Debug for ComponentEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ComponentEntry")
      .field("rule", &self.rule)
      .field("scaled_location", &self.scaled_location)
      .field("scaled_size", &self.scaled_size)
      .finish_non_exhaustive()
  }
}

/// Per-node registry of embedded controls.
///
/// The manager is told the node's geometry through [`set_allocated_size`]
/// and [`set_origin`] and pushes the resulting absolute bounds into every
/// control. Scaled values are recomputed only when both the full and scaled
/// sizes are known and positive; degenerate sizes leave the previous values
/// untouched.
///
/// [`set_allocated_size`]: ComponentManager::set_allocated_size
/// [`set_origin`]: ComponentManager::set_origin
#[derive(Debug, Clone)]
pub struct ComponentManager {
  entries: Vec<ComponentEntry>,
  full_size: Option<Size>,
  scaled_size: Option<Size>,
  origin: Point,
  visible: bool,
}

impl Default for ComponentManager {
  fn default() -> Self {
    Self::new()
  }
}

impl ComponentManager {
  /// Creates an empty, visible registry.
  pub fn new() -> Self {
    Self {
      entries: Vec::new(),
      full_size: None,
      scaled_size: None,
      origin: Point::ZERO,
      visible: true,
    }
  }

  /// Registers a control with its placement rule.
  ///
  /// Registering the same live control twice in one registry would place one
  /// widget in two spots; that is a broken invariant, not bad input.
  pub fn register(&mut self, control: ControlHandle, rule: PlacementRule) {
    debug_assert!(
      !self.entries.iter().any(|e| Rc::ptr_eq(&e.control, &control)),
      "control registered twice in one registry"
    );
    let mut entry = ComponentEntry {
      control,
      rule,
      scaled_location: rule.location.unwrap_or(Point::ZERO),
      scaled_size: rule.size.unwrap_or(Size::ZERO),
    };
    if let (Some(full), Some(scaled)) = (self.full_size, self.scaled_size) {
      recompute_entry(&mut entry, full, scaled);
      push_bounds(&entry, self.origin);
    }
    entry.control.borrow_mut().set_visible(self.visible);
    self.entries.push(entry);
  }

  /// Removes a control's registration. Returns true when it was present.
  pub fn remove(&mut self, control: &ControlHandle) -> bool {
    let before = self.entries.len();
    self.entries.retain(|e| !Rc::ptr_eq(&e.control, control));
    self.entries.len() != before
  }

  /// The current registrations.
  pub fn entries(&self) -> &[ComponentEntry] {
    &self.entries
  }

  /// Number of registered controls.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// True when no controls are registered.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Current visibility state.
  pub fn is_visible(&self) -> bool {
    self.visible
  }

  /// Records the node's full (unscaled) and current (scaled) sizes and
  /// recomputes every control's scaled geometry.
  ///
  /// A zero or negative dimension on either size means geometry is not yet
  /// known; nothing is recomputed and previous values stay in effect.
  pub fn set_allocated_size(&mut self, full: Size, scaled: Size) {
    if !full.is_positive() || !scaled.is_positive() {
      return;
    }
    self.full_size = Some(full);
    self.scaled_size = Some(scaled);
    for entry in &mut self.entries {
      recompute_entry(entry, full, scaled);
      push_bounds(entry, self.origin);
    }
  }

  /// Records the node's screen origin and repositions every control.
  pub fn set_origin(&mut self, origin: Point) {
    self.origin = origin;
    for entry in &self.entries {
      push_bounds(entry, origin);
    }
  }

  /// Shows or hides every registered control.
  ///
  /// Used by pagination when an ancestor hides the portion of content this
  /// node sits in; the controls are live toolkit objects, so an off-screen
  /// fragment must actively hide them.
  pub fn set_visible(&mut self, visible: bool) {
    self.visible = visible;
    for entry in &self.entries {
      entry.control.borrow_mut().set_visible(visible);
    }
  }

  /// Installs an entry cloned from another registry during fragmentation.
  pub(crate) fn adopt(&mut self, entry: ComponentEntry) {
    debug_assert!(
      !self
        .entries
        .iter()
        .any(|e| Rc::ptr_eq(&e.control, &entry.control)),
      "control migrated twice into one registry"
    );
    self.entries.push(entry);
  }
}

/// Recomputes an entry's scaled geometry from the host's sizes.
fn recompute_entry(entry: &mut ComponentEntry, full: Size, scaled: Size) {
  let ratio_x = scaled.width / full.width;
  let ratio_y = scaled.height / full.height;

  let base_size = entry
    .rule
    .size
    .unwrap_or_else(|| entry.control.borrow().preferred_size());
  entry.scaled_size = base_size.scale(ratio_x, ratio_y);

  entry.scaled_location = if let Some(dock) = entry.rule.dock {
    dock.locate(entry.scaled_size, scaled)
  } else if let Some(location) = entry.rule.location {
    let mut point = Point::new(location.x * ratio_x, location.y * ratio_y);
    if entry.rule.centered {
      point.x -= entry.scaled_size.width / 2.0;
      point.y -= entry.scaled_size.height / 2.0;
    }
    point
  } else {
    Point::ZERO
  };
}

/// Pushes an entry's absolute bounds into its control.
fn push_bounds(entry: &ComponentEntry, origin: Point) {
  entry.control.borrow_mut().set_bounds(Rect::new(
    origin.translate(entry.scaled_location),
    entry.scaled_size,
  ));
}

/// Moves matching component registrations from `from` onto the fragment `to`.
///
/// Only meaningful when both nodes manage components and `to` carries
/// fragment identity. Trailing-anchored registrations are installed when the
/// fragment is last; all others when it is first. Each registration is cloned
/// into at most one fragment per break, preserving single ownership of the
/// live control.
pub(crate) fn migrate_components(tree: &mut LayoutTree, from: NodeId, to: NodeId) {
  let Some(info) = tree.node(to).fragment().copied() else {
    return;
  };
  if tree.node(to).components().is_none() {
    return;
  }
  let Some(source) = tree.node(from).components() else {
    return;
  };
  let moved: Vec<ComponentEntry> = source
    .entries()
    .iter()
    .filter(|entry| {
      if entry.anchored_to_trailing_edge() {
        info.is_last
      } else {
        info.is_first
      }
    })
    .cloned()
    .collect();
  if moved.is_empty() {
    return;
  }
  let target = tree
    .node_mut(to)
    .components_mut()
    .expect("presence checked above");
  for entry in moved {
    target.adopt(entry);
  }
}
