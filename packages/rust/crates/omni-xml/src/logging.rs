//! Per-operation logging.
//!
//! An [`OperationLogger`] owns its own `tracing` dispatcher, so log lines go to
//! the configured sink without installing a global subscriber. Lines are plain
//! text in the form
//!
//! ```text
//! 2026-10-16 09:30:12,041 - FileLogger - INFO - 'config.xml' - method read completed.
//! ```

use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

use chrono::Local;
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::config::LoggerSettings;
use crate::error::SinkError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Errors that an [`OperationLogger`] knows how to report.
pub trait WatchedError: std::error::Error {
    /// Name written into failure lines, e.g. `CorruptedError`.
    fn kind_name(&self) -> &'static str;

    /// Whether a failure with this error gets a log line.
    ///
    /// Unwatched errors are passed through silently.
    fn is_watched(&self) -> bool {
        true
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Standard error stream.
    Console,
    /// Append-only file, created if absent.
    File(PathBuf),
}

/// Wraps operations and writes one line per call to its sink.
pub struct OperationLogger {
    name: String,
    dispatch: RwLock<Dispatch>,
}

impl OperationLogger {
    /// Create a logger called `name` writing to `sink`.
    ///
    /// # Errors
    /// Returns [`SinkError::Open`] when a file sink cannot be opened.
    pub fn new(name: impl Into<String>, sink: &LogSink) -> Result<Self, SinkError> {
        let name = name.into();
        let dispatch = build_dispatch(&name, sink)?;
        Ok(Self {
            name,
            dispatch: RwLock::new(dispatch),
        })
    }

    /// Create a logger from loaded settings.
    ///
    /// # Errors
    /// Returns [`SinkError::Open`] when a file sink cannot be opened.
    pub fn from_settings(settings: &LoggerSettings) -> Result<Self, SinkError> {
        Self::new(settings.name.clone(), &settings.sink.to_sink())
    }

    /// Logger name written into every line.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the sink. The previous destination receives no further lines.
    ///
    /// # Errors
    /// Returns [`SinkError::Open`] when a file sink cannot be opened; the
    /// current sink is kept in that case.
    pub fn reconfigure(&self, sink: &LogSink) -> Result<(), SinkError> {
        let dispatch = build_dispatch(&self.name, sink)?;
        *self.dispatch.write().unwrap_or_else(PoisonError::into_inner) = dispatch;
        Ok(())
    }

    /// Run `op` and log its outcome against `subject` under `method`.
    ///
    /// The result of `op` is returned unchanged. Watched errors produce an
    /// ERROR line before being returned; unwatched errors produce nothing.
    ///
    /// # Errors
    /// Returns whatever error `op` returned.
    pub fn logged<T, E, F>(&self, subject: &Path, method: &str, op: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: WatchedError,
    {
        match op() {
            Ok(value) => {
                self.emit(
                    Level::INFO,
                    &format!("'{}' - method {method} completed.", subject.display()),
                );
                Ok(value)
            }
            Err(err) => {
                if err.is_watched() {
                    self.emit(
                        Level::ERROR,
                        &format!(
                            "ERROR: '{}' - method {method} caused {}: {err}",
                            subject.display(),
                            err.kind_name()
                        ),
                    );
                }
                Err(err)
            }
        }
    }

    fn emit(&self, level: Level, message: &str) {
        let dispatch = self
            .dispatch
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        tracing::dispatcher::with_default(&dispatch, || {
            if level == Level::ERROR {
                tracing::error!("{message}");
            } else {
                tracing::info!("{message}");
            }
        });
    }
}

impl fmt::Debug for OperationLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationLogger")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn build_dispatch(name: &str, sink: &LogSink) -> Result<Dispatch, SinkError> {
    let writer = match sink {
        LogSink::Console => BoxMakeWriter::new(io::stderr),
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| SinkError::Open {
                    path: path.clone(),
                    source,
                })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .event_format(LineFormat {
            logger_name: name.to_string(),
        })
        .with_writer(writer)
        .finish();
    Ok(Dispatch::new(subscriber))
}

/// `<timestamp> - <logger-name> - <LEVEL> - <message>`
struct LineFormat {
    logger_name: String,
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        write!(
            writer,
            "{timestamp} - {} - {} - ",
            self.logger_name,
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
