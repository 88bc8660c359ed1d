//! The surface registry: every element the engine knows how to drag.
//!
//! Registration is idempotent — an element carries a marker once attached and
//! is never attached twice, whether it shows up in a startup scan, a repeated
//! scan, or a duplicated structure notification.

use std::collections::BTreeMap;

use crate::adapters::{self, DragConfig, MARKER_REGISTERED, SurfaceKind};
use crate::geometry::{PixelPoint, PixelRect, PixelSize};
use crate::host::{DocumentHost, DragVisual, ElementId};

/// Per-surface state record, mutated only by the drag state machine.
#[derive(Debug, Clone, Copy)]
pub struct DraggableSurface {
    pub id: ElementId,
    pub kind: SurfaceKind,
    pub config: DragConfig,
    pub position: PixelPoint,
    pub size: PixelSize,
    /// Allocated stacking priority; 0 means still at the document baseline.
    pub z_order: u64,
    pub dragging: bool,
}

#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: BTreeMap<ElementId, DraggableSurface>,
    /// Bottom-to-top paint order. Registration appends; raising moves an id
    /// to the end.
    stacking: Vec<ElementId>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&DraggableSurface> {
        self.surfaces.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut DraggableSurface> {
        self.surfaces.get_mut(&id)
    }

    /// Surfaces bottom-to-top.
    pub fn stacking(&self) -> impl DoubleEndedIterator<Item = &DraggableSurface> {
        self.stacking.iter().filter_map(|id| self.surfaces.get(id))
    }

    /// Scans the document and attaches every eligible, not-yet-registered
    /// element. Returns how many surfaces were newly attached.
    pub fn register_all(&mut self, host: &mut impl DocumentHost) -> usize {
        let mut attached = 0;
        for id in host.elements() {
            if self.register(host, id) {
                attached += 1;
            }
        }
        attached
    }

    /// Attaches one element if it is eligible and not already registered.
    pub fn register(&mut self, host: &mut impl DocumentHost, id: ElementId) -> bool {
        if host.has_marker(id, MARKER_REGISTERED) || self.surfaces.contains_key(&id) {
            return false;
        }
        let Some(kind) = adapters::classify(&*host, id) else {
            return false;
        };
        let config = DragConfig::for_kind(kind);
        host.apply_registration_defaults(id);
        let Some(rect) = host.geometry(id) else {
            return false;
        };
        host.add_marker(id, MARKER_REGISTERED);
        host.set_drag_visual(id, DragVisual::Grab);
        self.surfaces.insert(
            id,
            DraggableSurface {
                id,
                kind,
                config,
                position: rect.origin,
                size: rect.size,
                z_order: 0,
                dragging: false,
            },
        );
        self.stacking.push(id);
        tracing::debug!(element = %id, kind = ?kind, "registered surface");
        true
    }

    /// Drops a surface after its element left the document. Eligibility ends
    /// with removal; there is no explicit unregister step for collaborators.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if self.surfaces.remove(&id).is_none() {
            return false;
        }
        self.stacking.retain(|e| *e != id);
        tracing::debug!(element = %id, "removed surface");
        true
    }

    /// Assigns a new stacking priority and moves the surface to the top of
    /// the paint order.
    pub fn raise(&mut self, id: ElementId, z: u64) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.z_order = z;
        }
        if let Some(pos) = self.stacking.iter().position(|e| *e == id) {
            let id = self.stacking.remove(pos);
            self.stacking.push(id);
        }
    }

    /// Topmost surface whose drag handle contains the point, or `None`.
    ///
    /// A surface body above another surface's handle obscures it, so the
    /// search walks the paint order top-down and stops at the first body hit:
    /// the point either lands on that surface's handle or on nothing.
    pub fn hit_test_handle(
        &self,
        host: &impl DocumentHost,
        x: i32,
        y: i32,
    ) -> Option<&DraggableSurface> {
        for id in self.stacking.iter().rev() {
            let surface = self.surfaces.get(id)?;
            let body = self.body_rect(host, surface);
            if !body.contains(x, y) {
                continue;
            }
            if surface.config.ignore_button_targets && host.button_at(surface.id, x, y) {
                return None;
            }
            let handle = adapters::handle_region(host, surface.id, surface.config)?;
            return handle.contains(x, y).then_some(surface);
        }
        None
    }

    fn body_rect(&self, host: &impl DocumentHost, surface: &DraggableSurface) -> PixelRect {
        host.geometry(surface.id).unwrap_or(PixelRect {
            origin: surface.position,
            size: surface.size,
        })
    }
}
