//! Logging capability injected into the time server.
//!
//! Operations report what they do through [`Logger`] instead of writing to a
//! process-wide handle, so the sink can be swapped (tracing, a log file, or a
//! recorder in tests).

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Sink for operation logs
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, data: Option<&Value>);

    fn debug(&self, message: &str, data: Option<&Value>) {
        self.log(LogLevel::Debug, message, data);
    }

    fn info(&self, message: &str, data: Option<&Value>) {
        self.log(LogLevel::Info, message, data);
    }

    fn error(&self, message: &str, data: Option<&Value>) {
        self.log(LogLevel::Error, message, data);
    }
}

/// Forwards operation logs to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str, data: Option<&Value>) {
        let data = data.map(Value::to_string).unwrap_or_default();
        match level {
            LogLevel::Debug => tracing::debug!(data = %data, "{}", message),
            LogLevel::Info => tracing::info!(data = %data, "{}", message),
            LogLevel::Warn => tracing::warn!(data = %data, "{}", message),
            LogLevel::Error => tracing::error!(data = %data, "{}", message),
        }
    }
}

/// Appends operation logs to a file
///
/// Write failures are ignored: stdout carries the protocol, so there is no
/// better place to report them.
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn format_entry(level: LogLevel, message: &str, data: Option<&Value>) -> String {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let entry = format!("[{}] [{}] {}", timestamp, level, message);
        match data.and_then(|value| serde_json::to_string_pretty(value).ok()) {
            Some(pretty) => format!("{}\nData: {}\n", entry, pretty),
            None => format!("{}\n", entry),
        }
    }
}

impl Logger for FileLogger {
    fn log(&self, level: LogLevel, message: &str, data: Option<&Value>) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let entry = Self::format_entry(level, message, data);
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = file.write_all(entry.as_bytes());
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Keeps every entry in memory for assertions
    #[derive(Debug, Default)]
    pub struct RecordingLogger {
        pub entries: Mutex<Vec<(LogLevel, String, Option<Value>)>>,
    }

    impl RecordingLogger {
        pub fn messages(&self) -> Vec<(LogLevel, String)> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .map(|(level, message, _)| (*level, message.clone()))
                .collect()
        }
    }

    impl Logger for RecordingLogger {
        fn log(&self, level: LogLevel, message: &str, data: Option<&Value>) {
            self.entries
                .lock()
                .unwrap()
                .push((level, message.to_string(), data.cloned()));
        }
    }
}
