#![allow(clippy::doc_markdown)]

//! omni-xml - Logged XML document handling for Omni DevEnv
//!
//! A thin handle around one XML file on disk: read it into an owned tree,
//! write a tree back, or append a single element. Every call is logged as one
//! plain-text line.
//!
//! # Features
//!
//! - **Two failure kinds**: `NotFound` when opening, `Corrupted` afterwards
//! - **Explicit logging**: an injectable `OperationLogger`, no global subscriber
//! - **Owned tree**: parse with `roxmltree`, edit, serialize back
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-xml/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # FileHandlerError, CorruptionCause, SinkError, SettingsError
//! ├── decode.rs   # Declared-encoding decoding
//! ├── element.rs  # Owned element tree + parsing
//! ├── writer.rs   # Document serialization
//! ├── logging.rs  # OperationLogger and the WatchedError trait
//! ├── config.rs   # LoggerSettings (YAML)
//! └── handler.rs  # XmlHandler
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use omni_xml::{LogSink, OperationLogger, XmlHandler};
//!
//! let logger = Arc::new(OperationLogger::new("FileLogger", &LogSink::Console)?);
//! let handler = XmlHandler::open("config.xml", logger)?;
//! handler.append("data_item", [("id", "1")], Some("New Value"))?;
//! let root = handler.read()?;
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod config;
mod decode;
mod element;
mod error;
mod handler;
mod logging;
mod writer;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use config::{DEFAULT_LOG_FILE, DEFAULT_LOGGER_NAME, LoggerSettings, SinkSettings};
pub use decode::decode_document;
pub use element::Element;
pub use error::{CorruptionCause, DecodeError, FileHandlerError, SettingsError, SinkError};
pub use handler::XmlHandler;
pub use logging::{LogSink, OperationLogger, WatchedError};
pub use writer::{XML_DECLARATION, to_document_string};
