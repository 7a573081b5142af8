//! Deduplicated warnings with colored terminal output.
//!
//! Recoverable problems (malformed UTF-8 replaced by U+FFFD, a buffer that
//! could not grow) are reported here instead of failing the caller. Each
//! distinct message is printed once per process, or once per
//! [`clear_warnings`] cycle.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    // A panic while holding the lock cannot leave the set half-updated.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a recoverable condition (prints once per unique message)
///
/// # Example
/// ```
/// use unorm_common::warning::{has_warned, warn_once};
///
/// warn_once("UTF-8", "invalid byte sequence replaced with U+FFFD");
/// assert!(has_warned("UTF-8", "invalid byte sequence replaced with U+FFFD"));
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = warned()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        let line = format!("[unorm {component}] ⚠ {message}");
        eprintln!("{}", line.yellow());
    }
}

/// Whether `message` has already been reported for `component`.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call when starting a new document)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}
