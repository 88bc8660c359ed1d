//! Host-agnostic input and document-structure events.
//!
//! The engine never talks to a concrete windowing or document API. Hosts
//! translate whatever they receive (crossterm mouse events, DOM pointer
//! events, synthetic test input) into these types.

use crate::host::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

impl PointerButton {
    pub fn is_primary(self) -> bool {
        matches!(self, PointerButton::Primary)
    }
}

/// A single pointer event in viewport-relative pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { button: PointerButton, x: i32, y: i32 },
    Move { x: i32, y: i32 },
    Up { x: i32, y: i32 },
    /// The pointer left the tracked region without a release.
    Leave,
}

impl PointerEvent {
    pub fn down(x: i32, y: i32) -> Self {
        PointerEvent::Down {
            button: PointerButton::Primary,
            x,
            y,
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        PointerEvent::Move { x, y }
    }

    pub fn up(x: i32, y: i32) -> Self {
        PointerEvent::Up { x, y }
    }
}

/// Notification that the hosting document's structure changed.
///
/// Collaborators insert marked elements and rely on the registration watcher
/// picking them up; they never call into the engine directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureEvent {
    ElementAdded(ElementId),
    ElementRemoved(ElementId),
}
