//! Input seam for the terminal demo shell.
//!
//! The engine consumes [`PointerEvent`]s; these drivers produce crossterm
//! events and the translation between the two. Tests drive the engine with
//! synthetic pointer events and never need a driver.

pub mod console;

pub use console::ConsoleDriver;

use std::io;
use std::time::Duration;

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};

use crate::events::{PointerButton, PointerEvent};

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

/// Translates a terminal mouse event into an engine pointer event. Cells map
/// 1:1 to engine pixels. Scroll wheel events have no pointer meaning here.
pub fn pointer_event_from_mouse(mouse: &MouseEvent) -> Option<PointerEvent> {
    let x = mouse.column as i32;
    let y = mouse.row as i32;
    match mouse.kind {
        MouseEventKind::Down(button) => Some(PointerEvent::Down {
            button: pointer_button(button),
            x,
            y,
        }),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => Some(PointerEvent::Move { x, y }),
        MouseEventKind::Up(_) => Some(PointerEvent::Up { x, y }),
        MouseEventKind::ScrollDown
        | MouseEventKind::ScrollUp
        | MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight => None,
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Auxiliary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn left_down_maps_to_primary() {
        let evt = mouse(MouseEventKind::Down(MouseButton::Left), 4, 7);
        assert_eq!(
            pointer_event_from_mouse(&evt),
            Some(PointerEvent::Down {
                button: PointerButton::Primary,
                x: 4,
                y: 7
            })
        );
    }

    #[test]
    fn drag_and_move_both_map_to_move() {
        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 1, 2);
        let moved = mouse(MouseEventKind::Moved, 1, 2);
        assert_eq!(
            pointer_event_from_mouse(&drag),
            Some(PointerEvent::moved(1, 2))
        );
        assert_eq!(
            pointer_event_from_mouse(&moved),
            Some(PointerEvent::moved(1, 2))
        );
    }

    #[test]
    fn scroll_has_no_pointer_meaning() {
        let evt = mouse(MouseEventKind::ScrollUp, 0, 0);
        assert_eq!(pointer_event_from_mouse(&evt), None);
    }
}
