//! Ephemeral per-drag state, alive between pointer-down and pointer-up.

use crate::constants::JITTER_THRESHOLD_PX;
use crate::geometry::PixelPoint;
use crate::host::ElementId;

#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    pub surface: ElementId,
    /// Pointer position at drag start.
    pub pointer_start: PixelPoint,
    /// Surface origin at drag start.
    pub surface_start: PixelPoint,
    /// Most recent pointer position seen this session.
    pub last_pointer: PixelPoint,
}

impl DragSession {
    pub fn new(surface: ElementId, pointer: PixelPoint, origin: PixelPoint) -> Self {
        Self {
            surface,
            pointer_start: pointer,
            surface_start: origin,
            last_pointer: pointer,
        }
    }

    /// Proposed (pre-clamp) surface origin for a pointer position: the start
    /// origin offset by the pointer delta.
    pub fn proposed_origin(&self, pointer: PixelPoint) -> PixelPoint {
        self.surface_start.offset(
            pointer.x - self.pointer_start.x,
            pointer.y - self.pointer_start.y,
        )
    }

    /// Total pointer displacement since drag start.
    pub fn displacement(&self) -> (i32, i32) {
        (
            self.last_pointer.x - self.pointer_start.x,
            self.last_pointer.y - self.pointer_start.y,
        )
    }

    /// Whether the session moved far enough on either axis to count as a
    /// drag rather than a click.
    pub fn exceeds_jitter(&self) -> bool {
        let (dx, dy) = self.displacement();
        dx.abs() > JITTER_THRESHOLD_PX || dy.abs() > JITTER_THRESHOLD_PX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposed_origin_follows_pointer_delta() {
        let session = DragSession::new(
            ElementId(1),
            PixelPoint::new(100, 100),
            PixelPoint::new(10, 10),
        );
        let proposed = session.proposed_origin(PixelPoint::new(150, 130));
        assert_eq!(proposed, PixelPoint::new(60, 40));
    }

    #[test]
    fn jitter_requires_more_than_threshold_on_an_axis() {
        let mut session = DragSession::new(
            ElementId(1),
            PixelPoint::new(100, 100),
            PixelPoint::new(0, 0),
        );
        session.last_pointer = PixelPoint::new(105, 100);
        assert!(!session.exceeds_jitter());
        session.last_pointer = PixelPoint::new(106, 100);
        assert!(session.exceeds_jitter());
        session.last_pointer = PixelPoint::new(100, 94);
        assert!(session.exceeds_jitter());
    }

    #[test]
    fn displacement_is_signed() {
        let mut session = DragSession::new(
            ElementId(1),
            PixelPoint::new(50, 50),
            PixelPoint::new(0, 0),
        );
        session.last_pointer = PixelPoint::new(30, 80);
        assert_eq!(session.displacement(), (-20, 30));
    }
}
