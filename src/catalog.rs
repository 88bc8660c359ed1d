//! App-catalog scaffolding.
//!
//! This is deliberately thin collaborator glue, not part of the interaction
//! engine: it only inserts marked elements into the document (desktop icons
//! on install, auto-dismissing notifications) and lets the registration
//! watcher pick them up. Installed state is process-local; persistence is out
//! of scope.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::adapters::{MARKER_DRAGGABLE, MARKER_ICON, MARKER_NOTIFICATION};
use crate::constants::NOTIFICATION_TTL;
use crate::geometry::{PixelPoint, PixelSize};
use crate::host::{DocumentHost, ElementId, ElementSpec, InMemoryDocument};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown app id `{0}`")]
    UnknownApp(String),
    #[error("app `{0}` is already installed")]
    AlreadyInstalled(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Productivity,
    Media,
    Games,
    Utilities,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Productivity => "productivity",
            Category::Media => "media",
            Category::Games => "games",
            Category::Utilities => "utilities",
        }
    }
}

/// One filter button is active at a time; `All` shows everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogFilter {
    #[default]
    All,
    Category(Category),
}

impl CatalogFilter {
    fn admits(self, category: Category) -> bool {
        match self {
            CatalogFilter::All => true,
            CatalogFilter::Category(wanted) => wanted == category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CatalogFilter::All => "all",
            CatalogFilter::Category(c) => c.label(),
        }
    }

    pub fn next(self) -> Self {
        match self {
            CatalogFilter::All => CatalogFilter::Category(Category::Productivity),
            CatalogFilter::Category(Category::Productivity) => {
                CatalogFilter::Category(Category::Media)
            }
            CatalogFilter::Category(Category::Media) => CatalogFilter::Category(Category::Games),
            CatalogFilter::Category(Category::Games) => {
                CatalogFilter::Category(Category::Utilities)
            }
            CatalogFilter::Category(Category::Utilities) => CatalogFilter::All,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AppEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub desc: &'static str,
}

pub fn builtin_apps() -> &'static [AppEntry] {
    &[
        AppEntry {
            id: "calculator",
            name: "Calculator",
            category: Category::Utilities,
            desc: "Basic arithmetic",
        },
        AppEntry {
            id: "notes",
            name: "Notes",
            category: Category::Productivity,
            desc: "Quick text notes",
        },
        AppEntry {
            id: "calendar",
            name: "Calendar",
            category: Category::Productivity,
            desc: "Day planner",
        },
        AppEntry {
            id: "weather",
            name: "Weather",
            category: Category::Utilities,
            desc: "Local forecast",
        },
        AppEntry {
            id: "music",
            name: "Music",
            category: Category::Media,
            desc: "Audio player",
        },
        AppEntry {
            id: "games",
            name: "Games",
            category: Category::Games,
            desc: "Arcade pack",
        },
    ]
}

const ICON_SIZE: PixelSize = PixelSize {
    width: 10,
    height: 4,
};
const ICON_GRID_MARGIN: i32 = 1;
const ICON_GRID_STEP_Y: i32 = 5;
const ICONS_PER_COLUMN: usize = 8;
const NOTIFICATION_SIZE: PixelSize = PixelSize {
    width: 34,
    height: 3,
};

/// The app list, the active filter, and the transient notifications the
/// catalog has inserted (tracked only for auto-dismiss).
#[derive(Debug)]
pub struct AppCatalog {
    apps: Vec<AppEntry>,
    filter: CatalogFilter,
    installed: BTreeSet<&'static str>,
    notifications: Vec<(ElementId, Instant)>,
    installed_count: usize,
    ttl: Duration,
}

impl Default for AppCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl AppCatalog {
    pub fn new() -> Self {
        Self::with_apps(builtin_apps().to_vec())
    }

    pub fn with_apps(apps: Vec<AppEntry>) -> Self {
        Self {
            apps,
            filter: CatalogFilter::default(),
            installed: BTreeSet::new(),
            notifications: Vec::new(),
            installed_count: 0,
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn filter(&self) -> CatalogFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CatalogFilter) {
        self.filter = filter;
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
    }

    /// Apps admitted by the active filter, in catalog order.
    pub fn visible_apps(&self) -> Vec<&AppEntry> {
        self.apps
            .iter()
            .filter(|app| self.filter.admits(app.category))
            .collect()
    }

    pub fn is_installed(&self, app_id: &str) -> bool {
        self.installed.contains(app_id)
    }

    /// Installs an app: a draggable desktop icon plus a notification are
    /// inserted into the document, and the registration watcher does the
    /// rest.
    pub fn install(
        &mut self,
        doc: &mut InMemoryDocument,
        app_id: &str,
        now: Instant,
    ) -> Result<ElementId, CatalogError> {
        let app = self
            .apps
            .iter()
            .find(|app| app.id == app_id)
            .copied()
            .ok_or_else(|| CatalogError::UnknownApp(app_id.to_string()))?;
        if !self.installed.insert(app.id) {
            return Err(CatalogError::AlreadyInstalled(app_id.to_string()));
        }

        let slot = self.installed_count;
        self.installed_count += 1;
        let column = (slot / ICONS_PER_COLUMN) as i32;
        let row = (slot % ICONS_PER_COLUMN) as i32;
        let origin = PixelPoint::new(
            ICON_GRID_MARGIN + column * (ICON_SIZE.width as i32 + 2),
            ICON_GRID_MARGIN + row * ICON_GRID_STEP_Y,
        );
        let icon = doc.insert(
            ElementSpec::new(&[MARKER_ICON, MARKER_DRAGGABLE], ICON_SIZE)
                .at(origin.x, origin.y)
                .labeled(app.name),
        );
        tracing::info!(app = app.id, icon = %icon, "installed app");
        self.notify(doc, &format!("{} installed", app.name), now);
        Ok(icon)
    }

    /// Inserts an auto-dismissing, draggable notification near the top-right
    /// corner of the viewport.
    pub fn notify(&mut self, doc: &mut InMemoryDocument, message: &str, now: Instant) -> ElementId {
        let viewport = doc.viewport();
        let stack_depth = self.notifications.len() as i32;
        let x = viewport.width as i32 - NOTIFICATION_SIZE.width as i32 - 1;
        let y = 1 + stack_depth * (NOTIFICATION_SIZE.height as i32 + 1);
        let id = doc.insert(
            ElementSpec::new(&[MARKER_NOTIFICATION, MARKER_DRAGGABLE], NOTIFICATION_SIZE)
                .at(x.max(0), y)
                .labeled(message),
        );
        self.notifications.push((id, now + self.ttl));
        id
    }

    /// Removes notifications whose deadline passed. Returns how many were
    /// dismissed. Elements already gone from the document are skipped.
    pub fn prune_expired(&mut self, doc: &mut InMemoryDocument, now: Instant) -> usize {
        let mut dismissed = 0;
        self.notifications.retain(|(id, deadline)| {
            if now < *deadline {
                return true;
            }
            if doc.contains(*id) {
                let _ = doc.remove(*id);
            }
            dismissed += 1;
            false
        });
        dismissed
    }

    #[cfg(test)]
    fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
    }
}
