//! Redaction of record values in log output.
//!
//! Scraped listings can carry seller contact details, so field values are
//! only written to logs when explicitly enabled (the CLI's `--log-data`).
//! Field names, transformer names and error kinds are always logged.

use std::sync::atomic::{AtomicBool, Ordering};

static LOG_VALUES_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when value logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Enable or disable logging of record values.
pub fn set_log_values(enabled: bool) {
    LOG_VALUES_ENABLED.store(enabled, Ordering::Release);
}

/// Returns true if record values may be logged.
pub fn log_values_enabled() -> bool {
    LOG_VALUES_ENABLED.load(Ordering::Acquire)
}

/// Returns the input when value logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_values_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}
