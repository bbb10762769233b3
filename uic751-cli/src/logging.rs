//! Structured diagnostic logging, always on stderr (the stdout stream
//! is reserved for the literal protocol output, see `output.rs`).

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    Info { message: String },
    Warn { message: String },
    Error { message: String },
}

pub struct StructuredLogger {
    format: LogFormat,
    writer: io::Stderr,
}

impl StructuredLogger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            writer: io::stderr(),
        }
    }

    pub fn log(&mut self, event: LogEvent) -> Result<()> {
        let line = match self.format {
            LogFormat::Json => serde_json::to_string(&event)?,
            LogFormat::Pretty => Self::format_pretty(&event),
        };
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    pub fn info(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::Info { message: message.into() })
    }

    pub fn warn(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::Warn { message: message.into() })
    }

    pub fn error(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::Error { message: message.into() })
    }

    fn format_pretty(event: &LogEvent) -> String {
        let ts: DateTime<Utc> = Utc::now();
        let ts = ts.format("%Y-%m-%d %H:%M:%S%.3f");
        match event {
            LogEvent::Info { message } => format!("[{ts}] INFO: {message}"),
            LogEvent::Warn { message } => format!("[{ts}] WARN: {message}"),
            LogEvent::Error { message } => format!("[{ts}] ERROR: {message}"),
        }
    }
}
