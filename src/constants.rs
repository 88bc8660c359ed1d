//! Shared crate-wide constants.

/// Minimum pointer displacement (in pixels, per axis) for a down/up pair to
/// count as a drag rather than a click. Releases that moved farther than this
/// on either axis arm one-shot click suppression.
pub const JITTER_THRESHOLD_PX: i32 = 5;

/// Height of the title-bar drag handle carved out of the top of a window
/// surface when the host does not expose a dedicated title-bar region.
pub const DEFAULT_TITLE_BAR_HEIGHT: u32 = 1;

/// How long an auto-dismissing notification stays in the document.
pub const NOTIFICATION_TTL: std::time::Duration = std::time::Duration::from_secs(8);
