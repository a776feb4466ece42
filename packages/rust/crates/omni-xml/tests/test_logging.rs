//! Tests for the log lines produced by XmlHandler operations.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use omni_xml::{FileHandlerError, LogSink, LoggerSettings, OperationLogger, XmlHandler};
use tempfile::TempDir;

fn messages(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(|line| line.splitn(4, " - ").nth(3).unwrap_or_default().to_string())
        .collect()
}

fn setup(dir: &TempDir, content: &str) -> (XmlHandler, PathBuf, PathBuf) {
    let doc = dir.path().join("config.xml");
    fs::write(&doc, content).unwrap();
    let log = dir.path().join("file.operations.txt");
    let logger = Arc::new(OperationLogger::new("FileLogger", &LogSink::File(log.clone())).unwrap());
    (XmlHandler::open(&doc, logger).unwrap(), doc, log)
}

#[test]
fn test_open_is_not_logged() {
    let dir = TempDir::new().unwrap();
    let (_handler, _doc, log) = setup(&dir, "<settings/>");
    assert!(messages(&log).is_empty());
}

#[test]
fn test_read_logs_one_success_line() {
    let dir = TempDir::new().unwrap();
    let (handler, doc, log) = setup(&dir, "<settings/>");

    handler.read().unwrap();
    assert_eq!(
        messages(&log),
        vec![format!("'{}' - method read completed.", doc.display())]
    );
}

#[test]
fn test_append_logs_read_then_append() {
    let dir = TempDir::new().unwrap();
    let (handler, doc, log) = setup(&dir, "<settings><param name=\"version\">1.0</param></settings>");

    handler
        .append("data_item", [("id", "1")], Some("New Value"))
        .unwrap();

    assert_eq!(
        messages(&log),
        vec![
            format!("'{}' - method read completed.", doc.display()),
            format!("'{}' - method append completed.", doc.display()),
        ]
    );
}

#[test]
fn test_failed_read_logs_error_line_and_returns_error() {
    let dir = TempDir::new().unwrap();
    let (handler, doc, log) = setup(&dir, "<tag_without_closing_tag");

    let err = handler.read().unwrap_err();
    assert!(matches!(err, FileHandlerError::Corrupted { .. }));

    let raw = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" - FileLogger - ERROR - "));
    assert_eq!(
        messages(&log),
        vec![format!(
            "ERROR: '{}' - method read caused CorruptedError: {err}",
            doc.display()
        )]
    );
}

#[test]
fn test_failed_append_logs_read_and_append_errors() {
    let dir = TempDir::new().unwrap();
    let (handler, _doc, log) = setup(&dir, "<broken");

    handler.append("x", [("k", "v")], None).unwrap_err();

    let messages = messages(&log);
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("method read caused CorruptedError"));
    assert!(messages[1].contains("method append caused CorruptedError"));
}

#[test]
fn test_handles_share_one_logger() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("a.xml");
    let second = dir.path().join("b.xml");
    fs::write(&first, "<a/>").unwrap();
    fs::write(&second, "<b/>").unwrap();
    let log = dir.path().join("shared.txt");

    let logger = Arc::new(OperationLogger::new("FileLogger", &LogSink::File(log.clone())).unwrap());
    let a = XmlHandler::open(&first, Arc::clone(&logger)).unwrap();
    let b = XmlHandler::open(&second, Arc::clone(&logger)).unwrap();

    a.read().unwrap();
    b.write(&b.read().unwrap()).unwrap();

    let messages = messages(&log);
    assert_eq!(messages.len(), 3);
    assert!(messages[0].starts_with(&format!("'{}'", first.display())));
    assert!(messages[2].ends_with("method write completed."));
}

#[test]
fn test_logger_from_yaml_settings() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("audit.txt");
    let yaml = format!("name: AuditLog\nsink:\n  kind: file\n  path: {}\n", log.display());

    let settings = LoggerSettings::from_yaml_str(&yaml).unwrap();
    let logger = Arc::new(OperationLogger::from_settings(&settings).unwrap());
    assert_eq!(logger.name(), "AuditLog");

    let doc = dir.path().join("doc.xml");
    fs::write(&doc, "<doc/>").unwrap();
    XmlHandler::open(&doc, logger).unwrap().read().unwrap();

    let raw = fs::read_to_string(&log).unwrap();
    assert!(raw.contains(" - AuditLog - INFO - "));
}
