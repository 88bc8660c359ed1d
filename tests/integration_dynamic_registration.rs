//! Discovery-path coverage: the startup scan, the structure-event watcher,
//! and the catalog glue that feeds it.

use std::time::Instant;

use desk_wm::adapters::{MARKER_DRAGGABLE, MARKER_ICON, MARKER_REGISTERED, MARKER_WINDOW};
use desk_wm::catalog::{AppCatalog, CatalogFilter, Category, builtin_apps};
use desk_wm::geometry::PixelSize;
use desk_wm::host::{DocumentHost, ElementSpec, InMemoryDocument};
use desk_wm::{PointerEvent, SurfaceManager};

fn desktop() -> (InMemoryDocument, SurfaceManager) {
    (
        InMemoryDocument::new(PixelSize::new(1000, 800)),
        SurfaceManager::new(),
    )
}

#[test]
fn startup_scan_then_watcher_covers_late_insertions() {
    let (mut doc, mut wm) = desktop();
    let early = doc.insert(ElementSpec::new(&[MARKER_WINDOW], PixelSize::new(100, 60)));
    assert_eq!(wm.register_all(&mut doc), 1);

    // Collaborators just insert; no registration call on their side.
    let late = doc.insert(
        ElementSpec::new(&[MARKER_ICON, MARKER_DRAGGABLE], PixelSize::new(20, 20)).at(300, 300),
    );
    wm.pump_structure_events(&mut doc);

    assert!(wm.registry().get(early).is_some());
    assert!(wm.registry().get(late).is_some());
    assert!(doc.has_marker(late, MARKER_REGISTERED));
}

#[test]
fn scan_after_watcher_does_not_double_register() {
    let (mut doc, mut wm) = desktop();
    let id = doc.insert(ElementSpec::new(&[MARKER_WINDOW], PixelSize::new(100, 60)));
    wm.pump_structure_events(&mut doc);
    assert_eq!(wm.register_all(&mut doc), 0);
    assert_eq!(wm.registry().len(), 1);
    assert!(wm.registry().get(id).is_some());
}

#[test]
fn watcher_ignores_unmarked_insertions() {
    let (mut doc, mut wm) = desktop();
    doc.insert(ElementSpec::new(&["toolbar"], PixelSize::new(500, 20)));
    wm.pump_structure_events(&mut doc);
    assert!(wm.registry().is_empty());
}

#[test]
fn installed_icon_is_immediately_draggable() {
    let (mut doc, mut wm) = desktop();
    wm.register_all(&mut doc);
    let mut catalog = AppCatalog::new();

    let icon = catalog
        .install(&mut doc, "calculator", Instant::now())
        .expect("calculator is a builtin app");
    wm.pump_structure_events(&mut doc);

    let rect = doc.geometry(icon).expect("icon exists");
    let (x, y) = (rect.origin.x + 2, rect.origin.y + 1);
    wm.handle_pointer_event(&mut doc, PointerEvent::down(x, y));
    assert_eq!(wm.dragging(), Some(icon));
    wm.handle_pointer_event(&mut doc, PointerEvent::moved(x + 50, y + 30));
    wm.handle_pointer_event(&mut doc, PointerEvent::up(x + 50, y + 30));

    let moved = doc.geometry(icon).expect("icon exists");
    assert_eq!(moved.origin.x, rect.origin.x + 50);
    assert_eq!(moved.origin.y, rect.origin.y + 30);
}

#[test]
fn every_builtin_app_installs_once() {
    let (mut doc, mut wm) = desktop();
    let mut catalog = AppCatalog::new();
    let now = Instant::now();
    for app in builtin_apps() {
        catalog.install(&mut doc, app.id, now).expect("first install");
        assert!(catalog.install(&mut doc, app.id, now).is_err());
    }
    wm.pump_structure_events(&mut doc);
    // one icon + one notification per app
    assert_eq!(wm.registry().len(), builtin_apps().len() * 2);
}

#[test]
fn filter_matches_category_membership() {
    let mut catalog = AppCatalog::new();
    catalog.set_filter(CatalogFilter::Category(Category::Utilities));
    for app in catalog.visible_apps() {
        assert_eq!(app.category, Category::Utilities);
    }
    catalog.set_filter(CatalogFilter::All);
    assert_eq!(catalog.visible_apps().len(), builtin_apps().len());
}
