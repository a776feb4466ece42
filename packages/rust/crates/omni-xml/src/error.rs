//! Error types for XML document handling.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::logging::WatchedError;

/// Error types for document handle operations.
///
/// `NotFound` is only produced when a handle is opened; every failure after
/// that point is `Corrupted`.
#[derive(Error, Debug)]
pub enum FileHandlerError {
    /// No file existed at the path when the handle was opened.
    #[error("File not found at path: {}", path.display())]
    NotFound {
        /// Path that was checked.
        path: PathBuf,
    },

    /// The file could not be parsed, read or written.
    #[error("Problem with file '{}'. Original error: {cause}", path.display())]
    Corrupted {
        /// Path of the file being processed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        cause: CorruptionCause,
    },
}

impl FileHandlerError {
    /// Build a `NotFound` error for `path`.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Build a `Corrupted` error for `path`.
    pub fn corrupted(path: impl Into<PathBuf>, cause: CorruptionCause) -> Self {
        Self::Corrupted {
            path: path.into(),
            cause,
        }
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::Corrupted { path, .. } => path,
        }
    }
}

impl WatchedError for FileHandlerError {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFoundError",
            Self::Corrupted { .. } => "CorruptedError",
        }
    }
}

/// What went wrong underneath a [`FileHandlerError::Corrupted`].
#[derive(Error, Debug)]
pub enum CorruptionCause {
    /// Content is not well-formed XML.
    #[error("Incorrect XML: {0}")]
    Parse(#[from] roxmltree::Error),

    /// Content bytes do not decode as the document's encoding.
    #[error("Incorrect XML: {0}")]
    Decode(#[from] DecodeError),

    /// File could not be read.
    #[error("Access/read error: {0}")]
    Read(#[source] io::Error),

    /// File could not be written.
    #[error("Write error: {0}")]
    Write(#[source] io::Error),
}

/// Failure to turn document bytes into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The XML declaration names an encoding that is not recognized.
    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),

    /// The bytes are not valid in the selected encoding.
    #[error("content is not valid {encoding}")]
    Malformed {
        /// Name of the encoding used for decoding.
        encoding: &'static str,
    },
}

/// Failure to attach a log sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Log file could not be opened for appending.
    #[error("Cannot open log file '{}': {source}", path.display())]
    Open {
        /// Log file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Failure to load logger settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read.
    #[error("Cannot read settings '{}': {source}", path.display())]
    Read {
        /// Settings file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Settings content is not valid YAML for [`crate::LoggerSettings`].
    #[error("Invalid settings: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_found_message_embeds_path() {
        let err = FileHandlerError::not_found("missing/config.xml");
        assert_eq!(err.to_string(), "File not found at path: missing/config.xml");
        assert_eq!(err.kind_name(), "NotFoundError");
    }

    #[test]
    fn test_corrupted_message_embeds_cause() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = FileHandlerError::corrupted("config.xml", CorruptionCause::Write(io));
        assert_eq!(
            err.to_string(),
            "Problem with file 'config.xml'. Original error: Write error: denied"
        );
        assert_eq!(err.kind_name(), "CorruptedError");
    }

    #[test]
    fn test_decode_failure_reads_as_incorrect_xml() {
        let cause = CorruptionCause::from(DecodeError::Malformed { encoding: "UTF-8" });
        let err = FileHandlerError::corrupted("a.xml", cause);
        assert_eq!(
            err.to_string(),
            "Problem with file 'a.xml'. Original error: Incorrect XML: content is not valid UTF-8"
        );
    }

    #[test]
    fn test_corrupted_exposes_source_chain() {
        let io = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = FileHandlerError::corrupted("a.xml", CorruptionCause::Read(io));
        let cause = err.source().unwrap();
        assert_eq!(cause.to_string(), "Access/read error: gone");
        assert_eq!(cause.source().unwrap().to_string(), "gone");
    }
}
