use tracing::Level;

/// Initialize the global tracing subscriber: compact format, stderr. Safe to
/// call multiple times; subsequent calls are no-ops.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
