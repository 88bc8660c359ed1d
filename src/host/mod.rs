//! The seam between the engine and whatever actually owns the document.
//!
//! [`DocumentHost`] is the only surface the engine talks to: it enumerates
//! marked elements, answers geometry queries, and accepts position/stacking
//! writes. Structure changes arrive as an explicit event stream rather than a
//! host-specific observer API, so the registration watcher works the same
//! against a DOM bridge, a test double, or the bundled in-memory document.

pub mod memory;

pub use memory::{DocumentError, ElementSpec, InMemoryDocument};

use crate::events::StructureEvent;
use crate::geometry::{PixelPoint, PixelRect, PixelSize};

/// Stable identity of a document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cursor / styling hint applied while a surface is (not) being dragged.
/// Purely visual; correctness never depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragVisual {
    #[default]
    Idle,
    Grab,
    Grabbing,
}

pub trait DocumentHost {
    /// Visible viewport extent, in pixels.
    fn viewport(&self) -> PixelSize;

    /// Every element currently in the document, in document order.
    fn elements(&self) -> Vec<ElementId>;

    fn has_marker(&self, id: ElementId, marker: &str) -> bool;

    /// Adds a marker to an element. Unknown ids are ignored.
    fn add_marker(&mut self, id: ElementId, marker: &str);

    /// Current bounding rect, or `None` for an unknown id.
    fn geometry(&self, id: ElementId) -> Option<PixelRect>;

    /// Dedicated title-bar sub-region of an element, if it has one.
    fn title_bar(&self, id: ElementId) -> Option<PixelRect>;

    /// Whether the given viewport-relative point lies on a nested interactive
    /// control (button) of the element.
    fn button_at(&self, id: ElementId, x: i32, y: i32) -> bool;

    /// Moves an element. Unknown ids are ignored; the engine degrades to
    /// inert rather than failing mid-drag.
    fn set_position(&mut self, id: ElementId, origin: PixelPoint);

    fn set_z_order(&mut self, id: ElementId, z: u64);

    fn set_drag_visual(&mut self, id: ElementId, visual: DragVisual);

    /// First-registration side effects: non-selectable text, absolute
    /// positioning, and an origin default when the element was never
    /// positioned.
    fn apply_registration_defaults(&mut self, id: ElementId);

    /// Drains structure notifications accumulated since the last call, in
    /// arrival order.
    fn take_structure_events(&mut self) -> Vec<StructureEvent>;
}

impl<T: DocumentHost + ?Sized> DocumentHost for &mut T {
    fn viewport(&self) -> PixelSize {
        (**self).viewport()
    }

    fn elements(&self) -> Vec<ElementId> {
        (**self).elements()
    }

    fn has_marker(&self, id: ElementId, marker: &str) -> bool {
        (**self).has_marker(id, marker)
    }

    fn add_marker(&mut self, id: ElementId, marker: &str) {
        (**self).add_marker(id, marker)
    }

    fn geometry(&self, id: ElementId) -> Option<PixelRect> {
        (**self).geometry(id)
    }

    fn title_bar(&self, id: ElementId) -> Option<PixelRect> {
        (**self).title_bar(id)
    }

    fn button_at(&self, id: ElementId, x: i32, y: i32) -> bool {
        (**self).button_at(id, x, y)
    }

    fn set_position(&mut self, id: ElementId, origin: PixelPoint) {
        (**self).set_position(id, origin)
    }

    fn set_z_order(&mut self, id: ElementId, z: u64) {
        (**self).set_z_order(id, z)
    }

    fn set_drag_visual(&mut self, id: ElementId, visual: DragVisual) {
        (**self).set_drag_visual(id, visual)
    }

    fn apply_registration_defaults(&mut self, id: ElementId) {
        (**self).apply_registration_defaults(id)
    }

    fn take_structure_events(&mut self) -> Vec<StructureEvent> {
        (**self).take_structure_events()
    }
}
