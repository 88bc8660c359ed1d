//! Marker classification and per-kind drag configuration.
//!
//! External collaborators declare eligibility with markers on the elements
//! they insert; the adapters map those markers to a surface kind and the kind
//! to a [`DragConfig`]. The legacy split between a clamping window/icon drag
//! path and an unclamped popup path is gone: every kind runs through the same
//! state machine and clamping is an explicit knob.

use crate::constants::DEFAULT_TITLE_BAR_HEIGHT;
use crate::geometry::{PixelRect, PixelSize};
use crate::host::{DocumentHost, ElementId};

/// Marker consumed for window-style dragging (title-bar handle).
pub const MARKER_WINDOW: &str = "window";
/// Marker pair consumed for icon dragging (whole-element handle).
pub const MARKER_ICON: &str = "icon";
pub const MARKER_DRAGGABLE: &str = "draggable";
/// Markers consumed for transient popup dragging.
pub const MARKER_POPUP: &str = "popup";
pub const MARKER_NOTIFICATION: &str = "notification";
/// Marker the registry stamps on an element once attached.
pub const MARKER_REGISTERED: &str = "drag-registered";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SurfaceKind {
    Window,
    Icon,
    Popup,
}

/// Which sub-region of a surface accepts pointer-down for drag initiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragHandleKind {
    TitleBar,
    WholeSurface,
}

/// Per-kind drag behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragConfig {
    pub handle: DragHandleKind,
    pub clamp_to_viewport: bool,
    pub suppress_click_on_drag: bool,
    /// Pointer-down on a nested button never starts a drag; the button's own
    /// activation wins.
    pub ignore_button_targets: bool,
}

impl DragConfig {
    pub fn for_kind(kind: SurfaceKind) -> Self {
        match kind {
            SurfaceKind::Window => Self {
                handle: DragHandleKind::TitleBar,
                clamp_to_viewport: true,
                suppress_click_on_drag: true,
                ignore_button_targets: false,
            },
            SurfaceKind::Icon => Self {
                handle: DragHandleKind::WholeSurface,
                clamp_to_viewport: true,
                suppress_click_on_drag: true,
                ignore_button_targets: false,
            },
            SurfaceKind::Popup => Self {
                handle: DragHandleKind::WholeSurface,
                clamp_to_viewport: true,
                suppress_click_on_drag: true,
                ignore_button_targets: true,
            },
        }
    }

    /// Legacy popup behavior: drag anywhere, never clamp, let surfaces leave
    /// the viewport. Kept as an opt-in for hosts that want self-dismissing
    /// notifications to fly off-screen.
    pub fn unclamped_popup() -> Self {
        Self {
            clamp_to_viewport: false,
            ..Self::for_kind(SurfaceKind::Popup)
        }
    }
}

/// Maps an element's markers to a surface kind. `window` wins over the popup
/// markers so a window is only ever registered once, with its title-bar
/// handle.
pub fn classify(host: &impl DocumentHost, id: ElementId) -> Option<SurfaceKind> {
    if host.has_marker(id, MARKER_WINDOW) {
        return Some(SurfaceKind::Window);
    }
    if host.has_marker(id, MARKER_ICON) && host.has_marker(id, MARKER_DRAGGABLE) {
        return Some(SurfaceKind::Icon);
    }
    if host.has_marker(id, MARKER_POPUP) || host.has_marker(id, MARKER_NOTIFICATION) {
        return Some(SurfaceKind::Popup);
    }
    None
}

/// Resolves the drag-handle region for a surface. Windows use the host's
/// title bar when it exposes one, falling back to a strip at the top of the
/// element; other kinds drag by the whole element.
pub fn handle_region(
    host: &impl DocumentHost,
    id: ElementId,
    config: DragConfig,
) -> Option<PixelRect> {
    let rect = host.geometry(id)?;
    match config.handle {
        DragHandleKind::WholeSurface => Some(rect),
        DragHandleKind::TitleBar => Some(host.title_bar(id).unwrap_or(PixelRect {
            origin: rect.origin,
            size: PixelSize::new(
                rect.size.width,
                DEFAULT_TITLE_BAR_HEIGHT.min(rect.size.height),
            ),
        })),
    }
}
