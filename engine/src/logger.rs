use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
    verbose: bool,
}

impl Logger {
    fn new(prefix: Option<String>, verbose: bool) -> Self {
        Self { prefix, verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn log(&self, message: &str) {
        println!("{}", self.format_line(message));
    }

    fn format_line(&self, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}] {}", timestamp, prefix, message),
            None => format!("[{}] {}", timestamp, message),
        }
    }
}

/// Installs the process-wide logger. Later calls keep the first configuration.
pub fn init_logger(prefix: Option<String>, verbose: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, verbose));
}

// The engine is a library: until a driver installs a logger, messages are dropped.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

pub fn log_verbose(message: &str) {
    if let Some(logger) = LOGGER.get()
        && logger.is_verbose()
    {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($($arg:tt)*) => {
        $crate::logger::log_verbose(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_with_prefix() {
        let logger = Logger::new(Some("Sim".to_string()), false);
        let line = logger.format_line("snake reset");
        assert!(line.contains("][Sim] snake reset"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn test_format_line_without_prefix() {
        let logger = Logger::new(None, true);
        let line = logger.format_line("apple eaten");
        assert!(line.ends_with("] apple eaten"));
        assert!(!line.contains("]["));
        assert!(logger.is_verbose());
    }

    #[test]
    fn test_log_before_init_is_silent() {
        // Must not panic when nothing installed a logger.
        log("dropped");
        log_verbose("dropped too");
    }
}
