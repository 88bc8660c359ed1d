use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::Event;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use desk_wm::actions::{Action, action_for_key};
use desk_wm::adapters::{MARKER_DRAGGABLE, MARKER_ICON, MARKER_WINDOW};
use desk_wm::catalog::AppCatalog;
use desk_wm::drivers::{ConsoleDriver, InputDriver, pointer_event_from_mouse};
use desk_wm::engine::SurfaceManager;
use desk_wm::event_loop::{ControlFlow, EventLoop};
use desk_wm::events::PointerEvent;
use desk_wm::geometry::{PixelRect, PixelSize};
use desk_wm::host::{DocumentHost, ElementSpec, InMemoryDocument};
use desk_wm::{tracing_sub, ui};

#[derive(Debug, Parser)]
#[command(name = "desk-wm", about = "A simulated desktop with draggable surfaces.")]
struct Cli {
    /// Poll interval for the event loop, in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Emit engine debug logs to stderr.
    #[arg(long)]
    log: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    if cli.log {
        tracing_sub::init_default();
    }

    let (cols, rows) = terminal::size()?;
    let mut app = App::new(PixelSize::new(cols as u32, rows.saturating_sub(1) as u32));

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut driver = ConsoleDriver::new();
    driver.set_mouse_capture(true)?;
    let mut event_loop = EventLoop::new(driver, Duration::from_millis(cli.tick_ms));
    let result = event_loop.run(|_driver, event| {
        match event {
            None => {
                app.tick();
                terminal
                    .draw(|frame| {
                        ui::render_desktop(
                            frame,
                            &app.doc,
                            &app.wm,
                            &app.catalog,
                            app.help_visible,
                        )
                    })
                    .map_err(|err| io::Error::other(err.to_string()))?;
            }
            Some(event) => {
                if app.handle_event(&event) {
                    return Ok(ControlFlow::Quit);
                }
            }
        }
        Ok(ControlFlow::Continue)
    });

    terminal::disable_raw_mode()?;
    event_loop.driver().set_mouse_capture(false)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

struct App {
    doc: InMemoryDocument,
    wm: SurfaceManager,
    catalog: AppCatalog,
    help_visible: bool,
    window_count: usize,
}

impl App {
    fn new(viewport: PixelSize) -> Self {
        let mut doc = InMemoryDocument::new(viewport);
        doc.insert(
            ElementSpec::new(&[MARKER_WINDOW], PixelSize::new(36, 12))
                .at(6, 2)
                .with_title_bar(1)
                .labeled("App Store"),
        );
        doc.insert(
            ElementSpec::new(&[MARKER_ICON, MARKER_DRAGGABLE], PixelSize::new(10, 4))
                .at(1, 1)
                .labeled("Home"),
        );
        doc.insert(
            ElementSpec::new(&[MARKER_ICON, MARKER_DRAGGABLE], PixelSize::new(10, 4))
                .at(1, 6)
                .labeled("Trash"),
        );

        let mut wm = SurfaceManager::new();
        wm.register_all(&mut doc);
        doc.take_structure_events(); // startup elements were handled by the scan

        Self {
            doc,
            wm,
            catalog: AppCatalog::new(),
            help_visible: false,
            window_count: 1,
        }
    }

    /// Idle work between events: dismiss expired notifications and pick up
    /// anything collaborators inserted.
    fn tick(&mut self) {
        self.catalog.prune_expired(&mut self.doc, Instant::now());
        self.wm.pump_structure_events(&mut self.doc);
    }

    /// Returns `true` when the app should quit.
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => match action_for_key(key) {
                Some(Action::Quit) => return true,
                Some(Action::ToggleHelp) => self.help_visible = !self.help_visible,
                Some(Action::NewWindow) => self.open_window(),
                Some(Action::InstallNextApp) => self.install_next(),
                Some(Action::CycleFilter) => self.catalog.cycle_filter(),
                None => {}
            },
            Event::Mouse(mouse) => {
                if let Some(pointer) = pointer_event_from_mouse(mouse) {
                    self.wm.handle_pointer_event(&mut self.doc, pointer);
                    if let PointerEvent::Up { x, y } = pointer {
                        self.click_at(x, y);
                    }
                    self.wm.pump_structure_events(&mut self.doc);
                }
            }
            Event::Resize(cols, rows) => {
                self.doc.set_viewport(PixelSize::new(
                    *cols as u32,
                    rows.saturating_sub(1) as u32,
                ));
            }
            _ => {}
        }
        false
    }

    fn open_window(&mut self) {
        self.window_count += 1;
        let offset = (self.window_count as i32 % 8) * 2;
        self.doc.insert(
            ElementSpec::new(&[MARKER_WINDOW], PixelSize::new(30, 10))
                .at(10 + offset, 3 + offset)
                .with_title_bar(1)
                .with_button(PixelRect::new(27, 0, 3, 1))
                .labeled(&format!("window {}", self.window_count)),
        );
        self.wm.pump_structure_events(&mut self.doc);
    }

    fn install_next(&mut self) {
        let next = self
            .catalog
            .visible_apps()
            .iter()
            .find(|app| !self.catalog.is_installed(app.id))
            .map(|app| app.id);
        if let Some(app_id) = next {
            match self.catalog.install(&mut self.doc, app_id, Instant::now()) {
                Ok(_) => self.wm.pump_structure_events(&mut self.doc),
                Err(err) => tracing::warn!(%err, "install failed"),
            }
        }
    }

    /// The synthetic click that follows a release. A release that ended a
    /// real drag is filtered by the engine; otherwise a click on a
    /// notification dismisses it.
    fn click_at(&mut self, x: i32, y: i32) {
        if self.wm.filter_click() {
            tracing::debug!(x, y, "click suppressed after drag");
            return;
        }
        let target = self
            .wm
            .registry()
            .stacking()
            .filter(|surface| surface.kind == desk_wm::SurfaceKind::Popup)
            .filter_map(|surface| self.doc.geometry(surface.id).map(|rect| (surface.id, rect)))
            .filter(|(_, rect)| rect.contains(x, y))
            .next_back()
            .map(|(id, _)| id);
        if let Some(id) = target {
            let _ = self.doc.remove(id);
        }
    }
}
