//! Structured logging with visual formatting.
//!
//! Output is a single vertical "tree" drawn with box characters: a header when
//! the daemon starts, `┣` branches for status lines, indented details and a
//! closing mark on exit. Level prefixes match the style of the other tools a
//! user is likely to see in the same terminal or journal.
//!
//! Logging can be switched off at runtime (tests, one-shot commands), and a
//! separate debug switch gates the chatty per-tick messages.

use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Log level enumeration for categorizing message importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Log,  // Normal operational logs
    Warn, // Warning messages (non-fatal issues)
    Err,  // Error messages (recoverable failures)
    Crit, // Critical errors (may require user intervention)
    Info, // Informational messages (status updates)
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Log => "[LOG]",
            LogLevel::Warn => "[WARN]",
            LogLevel::Err => "[ERR]",
            LogLevel::Crit => "[CRIT]",
            LogLevel::Info => "[INFO]",
        }
    }
}

/// Main logging interface providing structured output formatting.
pub struct Log;

impl Log {
    /// Enable or disable all output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable per-tick debug messages.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Log a message with its level prefix.
    pub fn log(level: LogLevel, message: &str) {
        if !Self::is_enabled() {
            return;
        }
        println!("{} {}", level.prefix(), message);
    }

    // ═══ Convenience Methods for Common Log Levels ═══

    pub fn log_error(message: &str) {
        Self::log(LogLevel::Err, message);
    }

    pub fn log_warning(message: &str) {
        Self::log(LogLevel::Warn, message);
    }

    pub fn log_info(message: &str) {
        Self::log(LogLevel::Info, message);
    }

    pub fn log_debug(message: &str) {
        Self::log(LogLevel::Log, message);
    }

    pub fn log_critical(message: &str) {
        Self::log(LogLevel::Crit, message);
    }

    /// Log only when debug output was requested with `--debug`.
    pub fn log_verbose(message: &str) {
        if Self::is_debug() {
            Self::log_decorated(message);
        }
    }

    // ═══ Visual Formatting Functions ═══

    /// Main status line with a branch marker.
    pub fn log_decorated(message: &str) {
        if !Self::is_enabled() {
            return;
        }
        println!("┣ {}", message);
    }

    /// Detail line under a status line.
    pub fn log_indented(message: &str) {
        if !Self::is_enabled() {
            return;
        }
        println!("┃   {}", message);
    }

    pub fn log_pipe() {
        if !Self::is_enabled() {
            return;
        }
        println!("┃");
    }

    /// Status line preceded by a spacer, used for phase changes.
    pub fn log_block_start(message: &str) {
        if !Self::is_enabled() {
            return;
        }
        println!("┃");
        println!("┣ {}", message);
    }

    /// Header printed once when the daemon starts.
    pub fn log_version() {
        if !Self::is_enabled() {
            return;
        }
        println!("┏ screenburn v{} ━━╸", env!("CARGO_PKG_VERSION"));
        println!("┃");
    }

    /// Closing mark printed on exit.
    pub fn log_end() {
        if !Self::is_enabled() {
            return;
        }
        println!("╹");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_level_prefixes() {
        assert_eq!(LogLevel::Warn.prefix(), "[WARN]");
        assert_eq!(LogLevel::Err.prefix(), "[ERR]");
        assert_eq!(LogLevel::Info.prefix(), "[INFO]");
    }

    #[test]
    #[serial]
    fn test_toggle_enabled_and_debug() {
        Log::set_enabled(false);
        assert!(!Log::is_enabled());
        Log::set_enabled(true);
        assert!(Log::is_enabled());

        Log::set_debug(true);
        assert!(Log::is_debug());
        Log::set_debug(false);
        assert!(!Log::is_debug());
    }
}
