//! In-memory [`DocumentHost`] used by the demo shell and the test suite.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use thiserror::Error;

use super::{DocumentHost, DragVisual, ElementId};
use crate::events::StructureEvent;
use crate::geometry::{PixelPoint, PixelRect, PixelSize};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unknown element {0}")]
    UnknownElement(ElementId),
}

/// Description of an element to insert. Button and title-bar regions are
/// element-local so they follow the element when it moves.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    pub markers: Vec<String>,
    /// Initial origin. `None` means "never positioned"; registration defaults
    /// it to the viewport origin.
    pub position: Option<PixelPoint>,
    pub size: PixelSize,
    /// Height of a title-bar strip at the top of the element, if any.
    pub title_bar_height: Option<u32>,
    /// Nested interactive controls, element-local.
    pub buttons: Vec<PixelRect>,
    /// Free-form label, only used for rendering.
    pub label: String,
}

impl ElementSpec {
    pub fn new(markers: &[&str], size: PixelSize) -> Self {
        Self {
            markers: markers.iter().map(|m| m.to_string()).collect(),
            size,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some(PixelPoint::new(x, y));
        self
    }

    pub fn with_title_bar(mut self, height: u32) -> Self {
        self.title_bar_height = Some(height);
        self
    }

    pub fn with_button(mut self, local: PixelRect) -> Self {
        self.buttons.push(local);
        self
    }

    pub fn labeled(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }
}

#[derive(Debug, Clone)]
struct Element {
    markers: BTreeSet<String>,
    position: Option<PixelPoint>,
    size: PixelSize,
    title_bar_height: Option<u32>,
    buttons: Vec<PixelRect>,
    label: String,
    z: u64,
    visual: DragVisual,
    selectable: bool,
    absolutely_positioned: bool,
}

impl Element {
    fn origin(&self) -> PixelPoint {
        self.position.unwrap_or(PixelPoint::ORIGIN)
    }

    fn rect(&self) -> PixelRect {
        PixelRect {
            origin: self.origin(),
            size: self.size,
        }
    }
}

/// A flat simulated document: elements, a viewport, and a structure-event
/// queue that mimics a mutation observer.
#[derive(Debug)]
pub struct InMemoryDocument {
    viewport: PixelSize,
    elements: BTreeMap<ElementId, Element>,
    insertion_order: Vec<ElementId>,
    pending: Vec<StructureEvent>,
    next_id: u64,
}

impl InMemoryDocument {
    pub fn new(viewport: PixelSize) -> Self {
        Self {
            viewport,
            elements: BTreeMap::new(),
            insertion_order: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }

    pub fn set_viewport(&mut self, viewport: PixelSize) {
        self.viewport = viewport;
    }

    /// Inserts an element and queues an `ElementAdded` notification.
    pub fn insert(&mut self, spec: ElementSpec) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            Element {
                markers: spec.markers.into_iter().collect(),
                position: spec.position,
                size: spec.size,
                title_bar_height: spec.title_bar_height,
                buttons: spec.buttons,
                label: spec.label,
                z: 0,
                visual: DragVisual::Idle,
                selectable: true,
                absolutely_positioned: false,
            },
        );
        self.insertion_order.push(id);
        self.pending.push(StructureEvent::ElementAdded(id));
        id
    }

    /// Removes an element and queues an `ElementRemoved` notification.
    pub fn remove(&mut self, id: ElementId) -> Result<(), DocumentError> {
        if self.elements.remove(&id).is_none() {
            return Err(DocumentError::UnknownElement(id));
        }
        self.insertion_order.retain(|e| *e != id);
        self.pending.push(StructureEvent::ElementRemoved(id));
        Ok(())
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).map(|e| e.label.as_str())
    }

    pub fn z_order(&self, id: ElementId) -> Option<u64> {
        self.elements.get(&id).map(|e| e.z)
    }

    pub fn drag_visual(&self, id: ElementId) -> Option<DragVisual> {
        self.elements.get(&id).map(|e| e.visual)
    }

    pub fn is_selectable(&self, id: ElementId) -> Option<bool> {
        self.elements.get(&id).map(|e| e.selectable)
    }

    pub fn is_absolutely_positioned(&self, id: ElementId) -> Option<bool> {
        self.elements.get(&id).map(|e| e.absolutely_positioned)
    }
}

impl DocumentHost for InMemoryDocument {
    fn viewport(&self) -> PixelSize {
        self.viewport
    }

    fn elements(&self) -> Vec<ElementId> {
        self.insertion_order.clone()
    }

    fn has_marker(&self, id: ElementId, marker: &str) -> bool {
        self.elements
            .get(&id)
            .is_some_and(|e| e.markers.contains(marker))
    }

    fn add_marker(&mut self, id: ElementId, marker: &str) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.markers.insert(marker.to_string());
        }
    }

    fn geometry(&self, id: ElementId) -> Option<PixelRect> {
        self.elements.get(&id).map(|e| e.rect())
    }

    fn title_bar(&self, id: ElementId) -> Option<PixelRect> {
        let element = self.elements.get(&id)?;
        let height = element.title_bar_height?;
        let rect = element.rect();
        Some(PixelRect {
            origin: rect.origin,
            size: PixelSize::new(rect.size.width, height.min(rect.size.height)),
        })
    }

    fn button_at(&self, id: ElementId, x: i32, y: i32) -> bool {
        let Some(element) = self.elements.get(&id) else {
            return false;
        };
        let origin = element.origin();
        let local_x = x - origin.x;
        let local_y = y - origin.y;
        element
            .buttons
            .iter()
            .any(|button| button.contains(local_x, local_y))
    }

    fn set_position(&mut self, id: ElementId, origin: PixelPoint) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.position = Some(origin);
        }
    }

    fn set_z_order(&mut self, id: ElementId, z: u64) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.z = z;
        }
    }

    fn set_drag_visual(&mut self, id: ElementId, visual: DragVisual) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.visual = visual;
        }
    }

    fn apply_registration_defaults(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.selectable = false;
            element.absolutely_positioned = true;
            if element.position.is_none() {
                element.position = Some(PixelPoint::ORIGIN);
            }
        }
    }

    fn take_structure_events(&mut self) -> Vec<StructureEvent> {
        std::mem::take(&mut self.pending)
    }
}
