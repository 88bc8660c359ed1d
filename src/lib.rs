//! desk-wm: a drag-and-drop window stacking engine for simulated desktop
//! shells.
//!
//! The engine is host-agnostic: hosts feed it [`events::PointerEvent`]s and
//! structure notifications through the [`host::DocumentHost`] seam, and read
//! back the only externally observable state — surface positions and stacking
//! order. A terminal demo host and an in-memory document ship in-tree.

pub mod actions;
pub mod adapters;
pub mod catalog;
pub mod constants;
pub mod drivers;
pub mod engine;
pub mod event_loop;
pub mod events;
pub mod geometry;
pub mod host;
pub mod registry;
pub mod tracing_sub;
pub mod ui;
pub mod zorder;

pub use adapters::{DragConfig, DragHandleKind, SurfaceKind};
pub use engine::{DragSession, SurfaceManager};
pub use events::{PointerButton, PointerEvent, StructureEvent};
pub use geometry::{PixelPoint, PixelRect, PixelSize, clamp_to_viewport};
pub use host::{DocumentHost, DragVisual, ElementId, ElementSpec, InMemoryDocument};
pub use registry::{DraggableSurface, SurfaceRegistry};
pub use zorder::{Z_ORDER_BASELINE, ZOrderAllocator};
