// Console Logger
//
// Everything goes to stderr so stdout stays clean for JSON output.

use super::logger::{LogLevel, Logger};

/// Console logger.
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        if self.is_enabled(LogLevel::Debug) {
            eprintln!("[DEBUG] {}", msg);
        }
    }

    fn info(&self, msg: &str) {
        if self.is_enabled(LogLevel::Info) {
            eprintln!("[INFO] {}", msg);
        }
    }

    fn warn(&self, msg: &str) {
        if self.is_enabled(LogLevel::Warn) {
            eprintln!("[WARN] {}", msg);
        }
    }

    fn error(&self, msg: &str) {
        if self.is_enabled(LogLevel::Error) {
            eprintln!("[ERROR] {}", msg);
        }
    }
}
