//! Integration tests for the logging kit
//!
//! These tests verify:
//! - File output through the plain formatter
//! - NOTICE registration and threshold filtering
//! - Adapters and call-by-name logging
//! - Coloured console layout against the plain layout
//! - Thread safety of registration while logging

use rust_logging_kit::appenders::{FileAppender, MemoryAppender};
use rust_logging_kit::core::{LogLevel, LogOptions, Logger, LoggerAdapter, SeverityLog};
use rust_logging_kit::formatters::{strip_ansi, ColourFormatter, Formatter, PlainFormatter};
use rust_logging_kit::{LogContext, LoggerError, TimestampFormat};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn notice_logger() -> Logger {
    let logger = Logger::builder().min_level(LogLevel::DEBUG).build();
    logger.registry().register_level("NOTICE", 25);
    logger
}

#[test]
fn test_file_output_is_plain_text() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = notice_logger();
    let appender = FileAppender::new(&log_file)
        .expect("Failed to create appender")
        .with_timestamp_format(TimestampFormat::Utc);
    logger.add_appender(Box::new(appender));

    logger.child("db").notice("connected");
    logger.child("db").error_with(
        "query failed",
        LogOptions::new().with_raw_payload("SELECT *\nFROM users"),
    );
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].ends_with(" [NOTICE  ] db: connected"));
    assert!(lines[1].ends_with(" [ERROR   ] db: query failed"));
    assert_eq!(lines[2], "  SELECT *");
    assert_eq!(lines[3], "  FROM users");
    assert_eq!(lines[4], "");
    assert!(!content.contains('\x1b'));
}

#[test]
fn test_file_threshold_independent_of_root() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("notices.log");

    let logger = notice_logger();
    let memory = MemoryAppender::new();
    logger.add_appender(Box::new(memory.clone()));
    logger.add_appender(Box::new(
        FileAppender::new(&log_file)
            .expect("Failed to create appender")
            .with_min_level(LogLevel::NOTICE),
    ));

    logger.info("everywhere but the file");
    logger.notice("everywhere");
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 1);
    assert_eq!(memory.entries().len(), 2);
}

#[test]
fn test_notice_threshold_boundaries() {
    let logger = notice_logger();
    let memory = MemoryAppender::new();
    logger.add_appender(Box::new(memory.clone()));

    for (threshold, expected) in [(26, 0), (25, 1), (20, 1), (30, 0)] {
        memory.clear();
        logger.set_min_level(LogLevel::new(threshold));
        logger.notice("boundary");
        assert_eq!(
            memory.entries().len(),
            expected,
            "threshold {} should yield {} entries",
            threshold,
            expected
        );
    }
}

#[test]
fn test_adapter_and_call_by_name() {
    let logger = notice_logger();
    let memory = MemoryAppender::new();
    logger.add_appender(Box::new(memory.clone()));

    let adapter = LoggerAdapter::new(
        logger.child("cog.music"),
        LogContext::new().with_field("guild", 1234_i64),
    );
    adapter.log_named("notice", "queue started").unwrap();

    let entries = memory.entries();
    assert_eq!(entries[0].level_name, "NOTICE");
    assert_eq!(entries[0].logger_name, "cog.music");
    assert!(entries[0].extra.get("guild").is_some());

    assert!(matches!(
        adapter.log_named("verbose", "nope"),
        Err(LoggerError::UnknownLevel(_))
    ));
}

#[test]
fn test_runtime_registered_level() {
    let logger = notice_logger();
    let memory = MemoryAppender::new();
    logger.add_appender(Box::new(memory.clone()));

    logger.registry().register_level("audit", 35);
    logger.log_named("audit", "export").unwrap();
    logger.log(LogLevel::new(35), "direct");

    let entries = memory.entries();
    assert_eq!(entries[0].level_name, "AUDIT");
    assert_eq!(entries[1].level_name, "AUDIT");
    assert!(logger.registry().register_level_strict("OTHER", 35).is_err());
}

#[test]
fn test_colour_and_plain_agree() {
    let logger = notice_logger();
    let memory = MemoryAppender::new();
    logger.add_appender(Box::new(memory.clone()));

    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "gateway timed out");
    logger.exception("reconnect failed", &err);
    logger.notice_with("payload", LogOptions::new().with_raw_payload("{\"op\": 7}"));

    let plain = PlainFormatter::new().with_timestamp_format(TimestampFormat::Utc);
    let colour = ColourFormatter::with_config(
        rust_logging_kit::formatters::FormatterConfig::new()
            .with_timestamp_format(TimestampFormat::Utc),
    );

    for entry in memory.entries() {
        let coloured = colour.format(&entry);
        assert!(coloured.contains('\x1b'));
        assert_eq!(strip_ansi(&coloured), plain.format(&entry));
    }
}

#[test]
fn test_concurrent_logging_and_registration() {
    let logger = notice_logger();
    let memory = MemoryAppender::new();
    logger.add_appender(Box::new(memory.clone()));
    let logger = Arc::new(logger);

    let mut handles = vec![];
    for i in 0..8u32 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            logger
                .registry()
                .register_level(&format!("CUSTOM{}", i), 60 + i);
            for j in 0..50 {
                logger.child(&format!("worker{}", i)).notice(format!("tick {}", j));
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(memory.entries().len(), 400);
    assert_eq!(logger.registry().level_name(LogLevel::new(63)), "CUSTOM3");
}
