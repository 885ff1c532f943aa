// Logging
//
// Logger abstraction used by the interpreter and the CLI.

mod console_logger;
mod logger;

pub use console_logger::ConsoleLogger;
pub use logger::{LogLevel, Logger, NullLogger};

#[cfg(test)]
mod tests {
    use super::*;

    mod log_level_tests {
        use super::*;

        #[test]
        fn should_have_correct_ordering() {
            assert!(LogLevel::Debug < LogLevel::Info);
            assert!(LogLevel::Info < LogLevel::Warn);
            assert!(LogLevel::Warn < LogLevel::Error);
        }

        #[test]
        fn should_deserialize_from_lowercase_names() {
            let level: LogLevel = serde_json::from_str("\"warn\"").unwrap();
            assert_eq!(level, LogLevel::Warn);
        }
    }

    mod console_logger_tests {
        use super::*;

        #[test]
        fn should_check_level_enabled() {
            let logger = ConsoleLogger::new(LogLevel::Warn);

            assert_eq!(logger.level(), LogLevel::Warn);
            assert!(!logger.is_enabled(LogLevel::Debug));
            assert!(!logger.is_enabled(LogLevel::Info));
            assert!(logger.is_enabled(LogLevel::Warn));
            assert!(logger.is_enabled(LogLevel::Error));
        }
    }

    mod null_logger_tests {
        use super::*;

        #[test]
        fn should_not_log_anything() {
            let logger = NullLogger::new();

            logger.debug("debug message");
            logger.error("error message");
            assert!(!logger.is_enabled(LogLevel::Warn));
        }
    }
}
