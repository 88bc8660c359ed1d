//! Rendering for the demo shell: paints the simulated desktop into a
//! terminal frame, bottom-to-top in stacking order.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::adapters::SurfaceKind;
use crate::catalog::AppCatalog;
use crate::engine::SurfaceManager;
use crate::geometry::PixelRect;
use crate::host::{DocumentHost, InMemoryDocument};

include!(concat!(env!("OUT_DIR"), "/generated_help.rs"));

/// Clips a pixel rect (cells map 1:1 to pixels) against the desktop area.
/// Surfaces dragged partially off an unclamped edge are truncated; fully
/// off-screen surfaces are skipped.
fn clip_to_area(rect: PixelRect, area: Rect) -> Option<Rect> {
    let x0 = rect.origin.x.max(area.x as i32);
    let y0 = rect.origin.y.max(area.y as i32);
    let x1 = (rect.origin.x + rect.size.width as i32).min((area.x + area.width) as i32);
    let y1 = (rect.origin.y + rect.size.height as i32).min((area.y + area.height) as i32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect {
        x: x0 as u16,
        y: y0 as u16,
        width: (x1 - x0) as u16,
        height: (y1 - y0) as u16,
    })
}

fn surface_style(kind: SurfaceKind, dragging: bool) -> Style {
    let base = match kind {
        SurfaceKind::Window => Style::default().fg(Color::Cyan),
        SurfaceKind::Icon => Style::default().fg(Color::Yellow),
        SurfaceKind::Popup => Style::default().fg(Color::Magenta),
    };
    if dragging {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    }
}

pub fn render_desktop(
    frame: &mut Frame,
    doc: &InMemoryDocument,
    wm: &SurfaceManager,
    catalog: &AppCatalog,
    help_visible: bool,
) {
    let area = frame.area();
    if area.height < 2 {
        return;
    }
    let desktop = Rect {
        height: area.height - 1,
        ..area
    };
    let status = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };

    for surface in wm.registry().stacking() {
        let Some(rect) = doc.geometry(surface.id) else {
            continue;
        };
        let Some(cell_rect) = clip_to_area(rect, desktop) else {
            continue;
        };
        let label = doc.label(surface.id).unwrap_or_default();
        let style = surface_style(surface.kind, surface.dragging);
        frame.render_widget(Clear, cell_rect);
        match surface.kind {
            SurfaceKind::Window => {
                let block = Block::bordered()
                    .title(Line::from(format!(" {} ", label)))
                    .border_style(style);
                frame.render_widget(block, cell_rect);
            }
            SurfaceKind::Icon => {
                let block = Block::new().borders(Borders::NONE).style(style);
                let icon = Paragraph::new(label.to_string()).block(block).centered();
                frame.render_widget(icon, cell_rect);
            }
            SurfaceKind::Popup => {
                let block = Block::bordered().border_style(style);
                let body = Paragraph::new(label.to_string()).block(block);
                frame.render_widget(body, cell_rect);
            }
        }
    }

    render_status_bar(frame, status, catalog);
    if help_visible {
        render_help(frame, desktop);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, catalog: &AppCatalog) {
    let visible = catalog.visible_apps().len();
    let line = format!(
        " filter: {} ({} apps) · i install · f filter · n new window · ? help · q quit",
        catalog.filter().label(),
        visible,
    );
    let bar = Paragraph::new(line).style(Style::default().fg(Color::Black).bg(Color::Gray));
    frame.render_widget(bar, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let text = String::from_utf8_lossy(EMBEDDED_HELP.content);
    let width = area.width.saturating_sub(8).min(50).max(20);
    let height = area.height.saturating_sub(4).min(14).max(5);
    let rect = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, rect);
    let block = Block::bordered()
        .title(" help ")
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(Paragraph::new(text.into_owned()).block(block), rect);
}
