//! Structured, in-process logging for the demodulation pipeline.
//!
//! Entries are pushed only on state transitions (tone debounce changes,
//! `BFSK_INVALID`, telegram `NO_SYNC`/`INTEGRITY`, emitted events), never
//! once per sample, so the logger stays off the per-sample hot path.

use std::fmt;

/// Log level for filtering entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level to record.
    pub level: LogLevel,
    /// Maximum number of entries retained; oldest is evicted once full.
    /// `0` disables the logger entirely.
    pub max_entries: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            max_entries: 256,
        }
    }
}

impl LogConfig {
    /// Verbose logging, useful while tuning tone/bit-detector thresholds.
    pub fn verbose() -> Self {
        Self {
            level: LogLevel::Debug,
            max_entries: 2000,
        }
    }

    /// Disable logging entirely.
    pub fn disabled() -> Self {
        Self {
            level: LogLevel::Error,
            max_entries: 0,
        }
    }
}

/// A single log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub subsystem: &'static str,
    pub message: String,
}

/// Bounded-capacity collector of structured log entries.
#[derive(Debug, Clone)]
pub struct SignalLogger {
    config: LogConfig,
    entries: Vec<LogEntry>,
}

impl SignalLogger {
    pub fn new(config: LogConfig) -> Self {
        let capacity = config.max_entries.min(2000);
        Self {
            config,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Log a message at the given level for the given subsystem.
    ///
    /// `message` is lazily formatted only if the entry will actually be
    /// recorded, so disabled levels/subsystems cost a single comparison.
    pub fn log(&mut self, level: LogLevel, subsystem: &'static str, message: impl fmt::Display) {
        if level < self.config.level || self.config.max_entries == 0 {
            return;
        }

        let entry = LogEntry {
            level,
            subsystem,
            message: message.to_string(),
        };

        if self.entries.len() >= self.config.max_entries {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    pub fn debug(&mut self, subsystem: &'static str, message: impl fmt::Display) {
        self.log(LogLevel::Debug, subsystem, message);
    }

    pub fn info(&mut self, subsystem: &'static str, message: impl fmt::Display) {
        self.log(LogLevel::Info, subsystem, message);
    }

    pub fn warn(&mut self, subsystem: &'static str, message: impl fmt::Display) {
        self.log(LogLevel::Warn, subsystem, message);
    }

    pub fn error(&mut self, subsystem: &'static str, message: impl fmt::Display) {
        self.log(LogLevel::Error, subsystem, message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn entries_for_subsystem(&self, subsystem: &str) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.subsystem == subsystem).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SignalLogger {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl fmt::Display for SignalLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "[{}] {}: {}", entry.level, entry.subsystem, entry.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_level() {
        let mut logger = SignalLogger::new(LogConfig {
            level: LogLevel::Info,
            max_entries: 256,
        });

        logger.debug("TEST", "debug message");
        logger.info("TEST", "info message");
        logger.warn("TEST", "warn message");

        assert_eq!(logger.entries().len(), 2);
    }

    #[test]
    fn evicts_oldest_once_full() {
        let mut logger = SignalLogger::new(LogConfig {
            level: LogLevel::Debug,
            max_entries: 3,
        });

        for i in 0..4 {
            logger.info("TEST", format!("message {i}"));
        }

        assert_eq!(logger.entries().len(), 3);
        assert!(logger.entries()[0].message.contains("message 1"));
    }

    #[test]
    fn disabled_logger_records_nothing() {
        let mut logger = SignalLogger::new(LogConfig::disabled());
        logger.error("TEST", "should not be recorded");
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn subsystem_filter_selects_matching_entries() {
        let mut logger = SignalLogger::default();
        logger.info("TONE", "tone message");
        logger.info("BFSK", "bfsk message");

        let tone_entries = logger.entries_for_subsystem("TONE");
        assert_eq!(tone_entries.len(), 1);
        assert_eq!(tone_entries[0].message, "tone message");
    }
}
