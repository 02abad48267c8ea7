// --- INITIALIZATION ---
// Application bootstrap: stale temp cleanup and the crash handler.

use crate::api::tts::artifact::cleanup_stale_artifacts;

/// Remove speech audio left in the temp dir by a previous run that crashed
/// mid-playback.
pub fn cleanup_temporary_files() {
    let removed = cleanup_stale_artifacts(&std::env::temp_dir());
    if removed > 0 {
        crate::log_info!("Startup: removed {} stale audio file(s)", removed);
    }
}

/// Set up crash handler so panics end up in the session log.
pub fn setup_crash_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = if let Some(location) = panic_info.location() {
            format!("{}:{}", location.file(), location.line())
        } else {
            "unknown location".to_string()
        };

        let payload = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic payload".to_string()
        };

        let thread = std::thread::current();
        crate::log_error!(
            "CRASH DETECTED in thread '{}': {} ({})",
            thread.name().unwrap_or("unnamed"),
            payload,
            location
        );

        default_hook(panic_info);
    }));
}
