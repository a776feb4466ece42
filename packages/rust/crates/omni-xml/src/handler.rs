//! Document handle bound to one XML file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::decode::decode_document;
use crate::element::Element;
use crate::error::{CorruptionCause, FileHandlerError};
use crate::logging::OperationLogger;
use crate::writer::to_document_string;

/// Reads, writes and appends to a single XML file, logging every call.
///
/// The file must exist when the handle is opened. Nothing is cached: every
/// [`read`](Self::read) parses the file again and every
/// [`write`](Self::write) replaces its content.
#[derive(Debug, Clone)]
pub struct XmlHandler {
    path: PathBuf,
    logger: Arc<OperationLogger>,
}

impl XmlHandler {
    /// Bind a handle to `path`.
    ///
    /// Existence is checked only here. A file removed later shows up as
    /// [`FileHandlerError::Corrupted`] on the next operation.
    ///
    /// # Errors
    /// Returns [`FileHandlerError::NotFound`] when nothing exists at `path`.
    pub fn open(
        path: impl Into<PathBuf>,
        logger: Arc<OperationLogger>,
    ) -> Result<Self, FileHandlerError> {
        let path = path.into();
        if !path.exists() {
            return Err(FileHandlerError::not_found(path));
        }

        tracing::debug!(path = %path.display(), "xml handler created");
        Ok(Self { path, logger })
    }

    /// Path this handle is bound to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Logger shared by this handle.
    #[must_use]
    pub fn logger(&self) -> &Arc<OperationLogger> {
        &self.logger
    }

    /// Parse the file and return its root element.
    ///
    /// # Errors
    /// Returns [`FileHandlerError::Corrupted`] when the file cannot be read or
    /// is not well-formed XML.
    pub fn read(&self) -> Result<Element, FileHandlerError> {
        self.logger.logged(&self.path, "read", || self.read_document())
    }

    /// Replace the file content with `root`, preceded by the XML declaration.
    ///
    /// # Errors
    /// Returns [`FileHandlerError::Corrupted`] when the file cannot be written.
    pub fn write(&self, root: &Element) -> Result<(), FileHandlerError> {
        self.logger.logged(&self.path, "write", || self.write_document(root))
    }

    /// Append a new element as the last child of the root.
    ///
    /// The inner read is logged on its own; the inner write is covered by the
    /// `append` line, so a successful call logs `read` then `append`.
    ///
    /// # Errors
    /// Returns the error of the inner read or write unchanged.
    pub fn append<I, K, V>(
        &self,
        tag: &str,
        attributes: I,
        text: Option<&str>,
    ) -> Result<(), FileHandlerError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.logger.logged(&self.path, "append", || {
            let mut root = self.read()?;

            let mut element = Element::new(tag);
            for (name, value) in attributes {
                element.set_attribute(name, value);
            }
            element.set_text(text.map(str::to_string));
            root.push(element);

            self.write_document(&root)
        })
    }

    fn read_document(&self) -> Result<Element, FileHandlerError> {
        let bytes = fs::read(&self.path)
            .map_err(|e| FileHandlerError::corrupted(&self.path, CorruptionCause::Read(e)))?;
        let text = decode_document(&bytes)
            .map_err(|e| FileHandlerError::corrupted(&self.path, CorruptionCause::Decode(e)))?;
        Element::parse_str(&text)
            .map_err(|e| FileHandlerError::corrupted(&self.path, CorruptionCause::Parse(e)))
    }

    fn write_document(&self, root: &Element) -> Result<(), FileHandlerError> {
        fs::write(&self.path, to_document_string(root))
            .map_err(|e| FileHandlerError::corrupted(&self.path, CorruptionCause::Write(e)))
    }
}
