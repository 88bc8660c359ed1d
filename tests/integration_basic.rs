use desk_wm::adapters::{MARKER_DRAGGABLE, MARKER_ICON};
use desk_wm::geometry::{PixelPoint, PixelSize};
use desk_wm::host::{DocumentHost, ElementSpec, InMemoryDocument};
use desk_wm::{PointerEvent, SurfaceManager, Z_ORDER_BASELINE, ZOrderAllocator, clamp_to_viewport};

#[test]
fn allocator_sequence_is_strictly_increasing() {
    let alloc = ZOrderAllocator::new();
    let values: Vec<u64> = (0..20).map(|_| alloc.allocate()).collect();
    assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(values[0] > Z_ORDER_BASELINE);
}

#[test]
fn clamp_reference_case() {
    let got = clamp_to_viewport(
        PixelPoint::new(-50, 900),
        PixelSize::new(200, 100),
        PixelSize::new(1000, 800),
    );
    assert_eq!(got, PixelPoint::new(0, 700));
}

#[test]
fn clamp_is_idempotent_for_fixed_dimensions() {
    let surface = PixelSize::new(200, 100);
    let viewport = PixelSize::new(1000, 800);
    for proposed in [
        PixelPoint::new(-50, 900),
        PixelPoint::new(0, 0),
        PixelPoint::new(800, 700),
        PixelPoint::new(5000, -5000),
    ] {
        let once = clamp_to_viewport(proposed, surface, viewport);
        assert_eq!(clamp_to_viewport(once, surface, viewport), once);
    }
}

#[test]
fn drag_displacement_reference_case() {
    let mut doc = InMemoryDocument::new(PixelSize::new(1000, 800));
    let id = doc.insert(
        ElementSpec::new(&[MARKER_ICON, MARKER_DRAGGABLE], PixelSize::new(200, 100)).at(10, 10),
    );
    let mut wm = SurfaceManager::new();
    wm.register_all(&mut doc);

    wm.handle_pointer_event(&mut doc, PointerEvent::down(100, 100));
    wm.handle_pointer_event(&mut doc, PointerEvent::moved(150, 130));
    let rect = doc.geometry(id).expect("element exists");
    assert_eq!(rect.origin, PixelPoint::new(60, 40));
}

#[test]
fn geometry_and_stacking_are_the_observable_outputs() {
    let mut doc = InMemoryDocument::new(PixelSize::new(1000, 800));
    let id = doc.insert(
        ElementSpec::new(&[MARKER_ICON, MARKER_DRAGGABLE], PixelSize::new(32, 32)).at(50, 50),
    );
    let mut wm = SurfaceManager::new();
    wm.register_all(&mut doc);

    assert_eq!(doc.z_order(id), Some(0));
    wm.handle_pointer_event(&mut doc, PointerEvent::down(60, 60));
    wm.handle_pointer_event(&mut doc, PointerEvent::moved(80, 90));
    wm.handle_pointer_event(&mut doc, PointerEvent::up(80, 90));

    let rect = doc.geometry(id).expect("element exists");
    assert_eq!(rect.origin, PixelPoint::new(70, 80));
    assert!(doc.z_order(id).expect("element exists") > Z_ORDER_BASELINE);
}
