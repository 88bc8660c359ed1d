//! Pointer-path benchmark: drives synthetic drag sessions through the engine
//! against an in-memory document and reports event throughput.

use std::time::{Duration, Instant};

use clap::Parser;

use desk_wm::adapters::{MARKER_DRAGGABLE, MARKER_ICON, MARKER_WINDOW};
use desk_wm::geometry::PixelSize;
use desk_wm::host::{DocumentHost, ElementSpec, InMemoryDocument};
use desk_wm::{PointerEvent, SurfaceManager};

#[derive(Parser, Debug)]
#[command(
    name = "drag-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Synthetic pointer-stream benchmark for the drag engine"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// Number of surfaces on the simulated desktop.
    #[arg(short = 's', long = "surfaces", default_value_t = 200)]
    surfaces: usize,

    /// Pointer-move events per drag session.
    #[arg(short = 'm', long = "moves", default_value_t = 64)]
    moves_per_session: usize,
}

fn main() {
    let cli = BenchCli::parse();
    if !(0.5..=600.0).contains(&cli.duration_seconds) {
        eprintln!("duration must be between 0.5 and 600 seconds");
        std::process::exit(2);
    }
    if cli.surfaces == 0 {
        eprintln!("surfaces must be at least 1");
        std::process::exit(2);
    }
    let duration = Duration::from_secs_f64(cli.duration_seconds);

    let viewport = PixelSize::new(1920, 1080);
    let mut doc = InMemoryDocument::new(viewport);
    let mut targets = Vec::with_capacity(cli.surfaces);
    for i in 0..cli.surfaces {
        let x = (i as i32 * 37) % (viewport.width as i32 - 80);
        let y = (i as i32 * 23) % (viewport.height as i32 - 60);
        let id = if i % 3 == 0 {
            doc.insert(
                ElementSpec::new(&[MARKER_WINDOW], PixelSize::new(80, 60))
                    .at(x, y)
                    .with_title_bar(8),
            )
        } else {
            doc.insert(ElementSpec::new(&[MARKER_ICON, MARKER_DRAGGABLE], PixelSize::new(32, 32)).at(x, y))
        };
        targets.push(id);
    }
    let mut wm = SurfaceManager::new();
    let registered = wm.register_all(&mut doc);

    let start = Instant::now();
    let mut sessions: u64 = 0;
    let mut events: u64 = 0;
    let mut cursor = 0usize;
    while start.elapsed() < duration {
        let id = targets[cursor % targets.len()];
        cursor += 1;
        let Some(rect) = doc.geometry(id) else {
            continue;
        };
        let (x, y) = (rect.origin.x + 2, rect.origin.y + 2);
        wm.handle_pointer_event(&mut doc, PointerEvent::down(x, y));
        events += 1;
        for step in 0..cli.moves_per_session as i32 {
            let wobble = if step % 2 == 0 { step } else { -step };
            wm.handle_pointer_event(&mut doc, PointerEvent::moved(x + wobble, y + step));
            events += 1;
        }
        wm.handle_pointer_event(
            &mut doc,
            PointerEvent::up(x, y + cli.moves_per_session as i32),
        );
        events += 1;
        let _ = wm.filter_click();
        sessions += 1;
    }

    let elapsed = start.elapsed().as_secs_f64();
    println!("surfaces registered : {}", registered);
    println!("drag sessions       : {}", sessions);
    println!("pointer events      : {}", events);
    println!("events/sec          : {:.0}", events as f64 / elapsed);
    println!("sessions/sec        : {:.0}", sessions as f64 / elapsed);
}
