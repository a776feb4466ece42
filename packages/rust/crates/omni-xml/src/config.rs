//! Logger settings.
//!
//! Settings are plain YAML, for example:
//!
//! ```yaml
//! name: FileLogger
//! sink:
//!   kind: file
//!   path: file.operations.txt
//! ```
//!
//! Every field is optional; missing fields fall back to the defaults above.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SettingsError;
use crate::logging::LogSink;

/// Logger name used when none is configured.
pub const DEFAULT_LOGGER_NAME: &str = "FileLogger";
/// Log file used when the sink is a file without an explicit path.
pub const DEFAULT_LOG_FILE: &str = "file.operations.txt";

/// Settings for an [`crate::OperationLogger`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// Name written into every log line.
    pub name: String,
    /// Destination of log lines.
    pub sink: SinkSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            sink: SinkSettings::default(),
        }
    }
}

/// Sink selection as written in settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkSettings {
    /// Standard error stream.
    Console,
    /// Append-only log file.
    File {
        /// Log file path.
        #[serde(default = "default_log_file")]
        path: PathBuf,
    },
}

impl Default for SinkSettings {
    fn default() -> Self {
        Self::File {
            path: default_log_file(),
        }
    }
}

impl SinkSettings {
    /// Runtime sink for these settings.
    #[must_use]
    pub fn to_sink(&self) -> LogSink {
        match self {
            Self::Console => LogSink::Console,
            Self::File { path } => LogSink::File(path.clone()),
        }
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

impl LoggerSettings {
    /// Parse settings from YAML text.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] when the YAML does not match.
    pub fn from_yaml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load settings from a YAML file.
    ///
    /// # Errors
    /// Returns [`SettingsError::Read`] when the file cannot be read and
    /// [`SettingsError::Parse`] when its content does not match.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_file_logger() {
        let settings = LoggerSettings::default();
        assert_eq!(settings.name, "FileLogger");
        assert_eq!(
            settings.sink.to_sink(),
            LogSink::File(PathBuf::from("file.operations.txt"))
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = LoggerSettings::from_yaml_str("name: AuditLog\n").unwrap();
        assert_eq!(settings.name, "AuditLog");
        assert_eq!(settings.sink, SinkSettings::default());

        let settings = LoggerSettings::from_yaml_str("sink:\n  kind: file\n").unwrap();
        assert_eq!(settings.sink.to_sink(), LogSink::File(default_log_file()));
    }

    #[test]
    fn test_console_sink() {
        let settings = LoggerSettings::from_yaml_str("sink:\n  kind: console\n").unwrap();
        assert_eq!(settings.sink.to_sink(), LogSink::Console);
        assert_eq!(settings.name, DEFAULT_LOGGER_NAME);
    }

    #[test]
    fn test_unknown_sink_kind_is_rejected() {
        let err = LoggerSettings::from_yaml_str("sink:\n  kind: syslog\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logging.yaml");
        fs::write(&path, "name: Ops\nsink:\n  kind: file\n  path: ops.log\n").unwrap();

        let settings = LoggerSettings::load(&path).unwrap();
        assert_eq!(settings.name, "Ops");
        assert_eq!(settings.sink.to_sink(), LogSink::File(PathBuf::from("ops.log")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LoggerSettings::load("/nonexistent/logging.yaml").unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}
