//! Process-wide shutdown state.
//!
//! Ctrl+C does not kill a run mid-encode: it sets `SHUTDOWN`, and the
//! pipeline stops picking up new files at the next file boundary.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Setup the global Ctrl+C handler. Call once at program start
///
/// A second Ctrl+C while the run is draining exits immediately.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if SHUTDOWN.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        crate::log!("generate"; "stopping after in-flight files...");
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// The flag itself, for components that take an explicit cancel token.
pub fn shutdown_flag() -> &'static AtomicBool {
    &SHUTDOWN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_flag_is_shared() {
        assert!(std::ptr::eq(shutdown_flag(), &SHUTDOWN));
    }
}
