//! The drag-and-drop / window-stacking engine.
//!
//! [`SurfaceManager`] owns the registry, the z-order allocator, and the one
//! permitted drag session. All state transitions happen synchronously inside
//! the host's event callbacks; pointer-move updates are applied in arrival
//! order. Anything the engine cannot act on — unknown targets, non-primary
//! buttons, duplicate registrations — is a silent no-op: an interaction layer
//! degrades to inert, it never fails the surrounding application.

mod session;

pub use session::DragSession;

use crate::events::{PointerEvent, StructureEvent};
use crate::geometry::{PixelPoint, clamp_to_viewport};
use crate::host::{DocumentHost, DragVisual, ElementId};
use crate::registry::SurfaceRegistry;
use crate::zorder::ZOrderAllocator;

#[derive(Debug, Default)]
pub struct SurfaceManager {
    registry: SurfaceRegistry,
    allocator: ZOrderAllocator,
    session: Option<DragSession>,
    suppress_next_click: bool,
}

impl SurfaceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    /// Id of the surface currently being dragged, if any.
    pub fn dragging(&self) -> Option<ElementId> {
        self.session.as_ref().map(|s| s.surface)
    }

    /// Startup scan: attaches every eligible element already in the document.
    pub fn register_all(&mut self, host: &mut impl DocumentHost) -> usize {
        self.registry.register_all(host)
    }

    /// The continuous watcher: consumes the host's structure-event stream,
    /// attaching newly inserted eligible elements exactly once and dropping
    /// removed ones. A removal mid-drag ends the session.
    pub fn pump_structure_events(&mut self, host: &mut impl DocumentHost) {
        for event in host.take_structure_events() {
            match event {
                StructureEvent::ElementAdded(id) => {
                    self.registry.register(host, id);
                }
                StructureEvent::ElementRemoved(id) => {
                    if self.dragging() == Some(id) {
                        tracing::debug!(element = %id, "drag target removed, ending session");
                        self.session = None;
                    }
                    self.registry.remove(id);
                }
            }
        }
    }

    /// Feeds one pointer event through the state machine. Returns whether the
    /// event acted on a surface.
    pub fn handle_pointer_event(
        &mut self,
        host: &mut impl DocumentHost,
        event: PointerEvent,
    ) -> bool {
        match event {
            PointerEvent::Down { button, x, y } => {
                if !button.is_primary() {
                    return false;
                }
                self.start_session(host, x, y)
            }
            PointerEvent::Move { x, y } => self.update_session(host, x, y),
            PointerEvent::Up { x, y } => self.end_session(host, Some(PixelPoint::new(x, y))),
            PointerEvent::Leave => self.end_session(host, None),
        }
    }

    /// One-shot click filter. Returns `true` when the click following a real
    /// drag must be cancelled; the flag clears on first read so only that one
    /// click is affected.
    pub fn filter_click(&mut self) -> bool {
        std::mem::take(&mut self.suppress_next_click)
    }

    fn start_session(&mut self, host: &mut impl DocumentHost, x: i32, y: i32) -> bool {
        // Single-pointer input model: a second down while dragging is not a
        // new session.
        if self.session.is_some() {
            return false;
        }
        let Some(surface) = self.registry.hit_test_handle(&*host, x, y) else {
            return false;
        };
        let id = surface.id;
        let origin = host
            .geometry(id)
            .map(|rect| rect.origin)
            .unwrap_or(surface.position);

        let z = self.allocator.allocate();
        self.registry.raise(id, z);
        host.set_z_order(id, z);
        host.set_drag_visual(id, DragVisual::Grabbing);
        if let Some(surface) = self.registry.get_mut(id) {
            surface.dragging = true;
            surface.position = origin;
        }
        self.session = Some(DragSession::new(id, PixelPoint::new(x, y), origin));
        tracing::debug!(element = %id, z, "drag started");
        true
    }

    fn update_session(&mut self, host: &mut impl DocumentHost, x: i32, y: i32) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let pointer = PixelPoint::new(x, y);
        session.last_pointer = pointer;
        let proposed = session.proposed_origin(pointer);
        let id = session.surface;
        let Some(surface) = self.registry.get_mut(id) else {
            return false;
        };
        let next = if surface.config.clamp_to_viewport {
            clamp_to_viewport(proposed, surface.size, host.viewport())
        } else {
            proposed
        };
        surface.position = next;
        host.set_position(id, next);
        true
    }

    fn end_session(&mut self, host: &mut impl DocumentHost, pointer: Option<PixelPoint>) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        if let Some(pointer) = pointer {
            session.last_pointer = pointer;
        }
        let id = session.surface;
        let mut suppress = false;
        if let Some(surface) = self.registry.get_mut(id) {
            surface.dragging = false;
            suppress = surface.config.suppress_click_on_drag;
        }
        host.set_drag_visual(id, DragVisual::Grab);
        // A pointer that left the document never produces the synthetic
        // click, so suppression only arms on a real release.
        if pointer.is_some() && suppress && session.exceeds_jitter() {
            self.suppress_next_click = true;
        }
        let (dx, dy) = session.displacement();
        tracing::debug!(element = %id, dx, dy, "drag ended");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MARKER_DRAGGABLE, MARKER_ICON};
    use crate::events::PointerButton;
    use crate::geometry::PixelSize;
    use crate::host::{ElementSpec, InMemoryDocument};

    fn desktop() -> (InMemoryDocument, SurfaceManager) {
        let doc = InMemoryDocument::new(PixelSize::new(1000, 800));
        (doc, SurfaceManager::new())
    }

    fn icon(doc: &mut InMemoryDocument, x: i32, y: i32) -> ElementId {
        doc.insert(
            ElementSpec::new(&[MARKER_ICON, MARKER_DRAGGABLE], PixelSize::new(32, 32)).at(x, y),
        )
    }

    #[test]
    fn drag_moves_surface_by_pointer_delta() {
        let (mut doc, mut wm) = desktop();
        let id = doc.insert(
            ElementSpec::new(&[MARKER_ICON, MARKER_DRAGGABLE], PixelSize::new(200, 100)).at(10, 10),
        );
        wm.register_all(&mut doc);

        assert!(wm.handle_pointer_event(&mut doc, PointerEvent::down(100, 100)));
        assert!(wm.handle_pointer_event(&mut doc, PointerEvent::moved(150, 130)));
        let rect = doc.geometry(id).expect("element exists");
        assert_eq!(rect.origin, PixelPoint::new(60, 40));
        assert!(wm.handle_pointer_event(&mut doc, PointerEvent::up(150, 130)));
        assert!(wm.dragging().is_none());
    }

    #[test]
    fn moves_are_clamped_to_the_viewport() {
        let (mut doc, mut wm) = desktop();
        let id = doc.insert(
            ElementSpec::new(&[MARKER_ICON, MARKER_DRAGGABLE], PixelSize::new(200, 100)).at(10, 10),
        );
        wm.register_all(&mut doc);

        wm.handle_pointer_event(&mut doc, PointerEvent::down(100, 50));
        wm.handle_pointer_event(&mut doc, PointerEvent::moved(-500, 5000));
        let rect = doc.geometry(id).expect("element exists");
        assert_eq!(rect.origin, PixelPoint::new(0, 700));
    }

    #[test]
    fn non_primary_buttons_are_ignored() {
        let (mut doc, mut wm) = desktop();
        icon(&mut doc, 0, 0);
        wm.register_all(&mut doc);
        let handled = wm.handle_pointer_event(
            &mut doc,
            PointerEvent::Down {
                button: PointerButton::Secondary,
                x: 5,
                y: 5,
            },
        );
        assert!(!handled);
        assert!(wm.dragging().is_none());
    }

    #[test]
    fn second_down_does_not_open_a_second_session() {
        let (mut doc, mut wm) = desktop();
        let first = icon(&mut doc, 0, 0);
        icon(&mut doc, 200, 200);
        wm.register_all(&mut doc);

        wm.handle_pointer_event(&mut doc, PointerEvent::down(5, 5));
        assert_eq!(wm.dragging(), Some(first));
        let handled = wm.handle_pointer_event(&mut doc, PointerEvent::down(210, 210));
        assert!(!handled);
        assert_eq!(wm.dragging(), Some(first));
    }

    #[test]
    fn z_order_rises_monotonically_across_drag_starts() {
        let (mut doc, mut wm) = desktop();
        let a = icon(&mut doc, 0, 0);
        let b = icon(&mut doc, 200, 200);
        wm.register_all(&mut doc);

        let mut last = 0;
        for (id, x, y) in [(a, 5, 5), (b, 210, 210), (a, 5, 5)] {
            wm.handle_pointer_event(&mut doc, PointerEvent::down(x, y));
            wm.handle_pointer_event(&mut doc, PointerEvent::up(x, y));
            let z = doc.z_order(id).expect("element exists");
            assert!(z > last, "each drag start must outrank the previous");
            last = z;
        }
    }

    #[test]
    fn real_drag_suppresses_exactly_one_click() {
        let (mut doc, mut wm) = desktop();
        icon(&mut doc, 0, 0);
        wm.register_all(&mut doc);

        wm.handle_pointer_event(&mut doc, PointerEvent::down(5, 5));
        wm.handle_pointer_event(&mut doc, PointerEvent::moved(40, 5));
        wm.handle_pointer_event(&mut doc, PointerEvent::up(40, 5));
        assert!(wm.filter_click());
        assert!(!wm.filter_click());
    }

    #[test]
    fn jitter_release_passes_the_click_through() {
        let (mut doc, mut wm) = desktop();
        icon(&mut doc, 0, 0);
        wm.register_all(&mut doc);

        wm.handle_pointer_event(&mut doc, PointerEvent::down(5, 5));
        wm.handle_pointer_event(&mut doc, PointerEvent::moved(8, 7));
        wm.handle_pointer_event(&mut doc, PointerEvent::up(8, 7));
        assert!(!wm.filter_click());
    }

    #[test]
    fn pointer_leave_ends_the_session_without_suppression() {
        let (mut doc, mut wm) = desktop();
        let id = icon(&mut doc, 0, 0);
        wm.register_all(&mut doc);

        wm.handle_pointer_event(&mut doc, PointerEvent::down(5, 5));
        wm.handle_pointer_event(&mut doc, PointerEvent::moved(100, 100));
        assert_eq!(wm.dragging(), Some(id));
        assert!(wm.handle_pointer_event(&mut doc, PointerEvent::Leave));
        assert!(wm.dragging().is_none());
        assert!(!wm.filter_click());
    }

    #[test]
    fn removing_the_dragged_element_ends_the_session() {
        let (mut doc, mut wm) = desktop();
        let id = icon(&mut doc, 0, 0);
        wm.register_all(&mut doc);
        doc.take_structure_events(); // drain the insert notifications

        wm.handle_pointer_event(&mut doc, PointerEvent::down(5, 5));
        assert_eq!(wm.dragging(), Some(id));
        doc.remove(id).expect("element exists");
        wm.pump_structure_events(&mut doc);
        assert!(wm.dragging().is_none());
        assert!(wm.registry().get(id).is_none());
    }

    #[test]
    fn watcher_registers_inserted_elements_exactly_once() {
        let (mut doc, mut wm) = desktop();
        wm.register_all(&mut doc);
        let id = icon(&mut doc, 50, 50);
        wm.pump_structure_events(&mut doc);
        assert!(wm.registry().get(id).is_some());
        assert_eq!(wm.registry().len(), 1);

        // A duplicated notification for the same element changes nothing.
        wm.registry.register(&mut doc, id);
        assert_eq!(wm.registry().len(), 1);
    }

    #[test]
    fn down_outside_any_surface_is_inert() {
        let (mut doc, mut wm) = desktop();
        icon(&mut doc, 0, 0);
        wm.register_all(&mut doc);
        assert!(!wm.handle_pointer_event(&mut doc, PointerEvent::down(500, 500)));
        assert!(!wm.handle_pointer_event(&mut doc, PointerEvent::moved(510, 510)));
        assert!(!wm.handle_pointer_event(&mut doc, PointerEvent::up(510, 510)));
    }
}
