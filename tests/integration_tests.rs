//! Integration tests for the logger
//!
//! These tests verify:
//! - Level filtering does no work below the threshold
//! - Text and JSON wire formats
//! - Buffered delivery and explicit flush
//! - File and writer sinks
//! - Context fields and configuration from the environment

use chrono::{TimeZone, Utc};
use rust_fast_logger::prelude::*;
use rust_fast_logger::{info, ConsoleTarget};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn fixed_clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2024, 1, 20, 15, 4, 5)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(250),
    )
}

fn memory_logger(config: LoggerConfig) -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .config(config)
        .clock(fixed_clock())
        .sink(sink.clone())
        .build();
    (logger, sink)
}

#[test]
fn test_below_threshold_writes_nothing() {
    let (logger, sink) = memory_logger(LoggerConfig::new().with_level(LogLevel::Info));

    logger.debug("x", &[]);

    assert!(sink.contents().is_empty());
    assert_eq!(sink.write_count(), 0);
    assert_eq!(logger.pool().acquired_count(), 0);
}

#[test]
fn test_every_level_against_every_threshold() {
    for threshold in LogLevel::ALL {
        let (logger, sink) = memory_logger(LoggerConfig::new().with_level(threshold));
        logger.debug("m", &[]);
        logger.info("m", &[]);
        logger.warn("m", &[]);
        logger.error("m", &[]);

        let expected = LogLevel::ALL[..4]
            .iter()
            .filter(|level| **level >= threshold)
            .count();
        assert_eq!(sink.lines().len(), expected, "threshold {}", threshold);
    }
}

#[test]
fn test_json_info_scenario() {
    let (logger, sink) = memory_logger(
        LoggerConfig::new()
            .with_level(LogLevel::Info)
            .with_format(OutputFormat::Json)
            .with_time_zone(TimeZoneMode::Utc),
    );

    logger.debug("x", &[]);
    logger.info("started", &[Field::new("userID", 12345)]);

    assert_eq!(
        sink.contents_string(),
        "{\"timestamp\":\"2024-01-20T15:04:05.250000000Z\",\"level\":\"INFO\",\"message\":\"started\",\"userID\":12345}\n"
    );
}

#[test]
fn test_json_output_parses_with_ordered_keys() {
    let (logger, sink) = memory_logger(LoggerConfig::new().with_format(OutputFormat::Json));

    logger.error(
        "payment \"declined\"\nretrying",
        &[
            Field::new("zeta", 1),
            Field::new("alpha", "two words"),
            Field::new("ratio", 0.5),
            Field::new("ok", false),
        ],
    );

    let line = sink.lines().pop().expect("one line");
    let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
    assert_eq!(parsed["level"], "ERROR");
    assert_eq!(parsed["message"], "payment \"declined\"\nretrying");
    assert_eq!(parsed["ratio"], 0.5);

    let order = [
        "\"timestamp\"",
        "\"level\"",
        "\"message\"",
        "\"zeta\"",
        "\"alpha\"",
        "\"ratio\"",
        "\"ok\"",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|key| line.find(key).expect("key present"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "keys out of order: {}", line);
}

#[test]
fn test_json_local_timestamp_is_rfc3339() {
    let (logger, sink) = memory_logger(
        LoggerConfig::new()
            .with_format(OutputFormat::Json)
            .with_time_zone(TimeZoneMode::Local),
    );

    logger.info("local", &[]);

    let parsed: serde_json::Value = serde_json::from_str(&sink.lines()[0]).unwrap();
    let ts = parsed["timestamp"].as_str().unwrap();
    let dt = chrono::DateTime::parse_from_rfc3339(ts).expect("RFC 3339 timestamp");
    assert_eq!(dt.with_timezone(&Utc), fixed_clock().now());
}

#[test]
fn test_text_quoting_scenarios() {
    let (logger, sink) = memory_logger(LoggerConfig::new());

    logger.info("q", &[Field::new("key", "a b")]);
    logger.info("q", &[Field::new("key", "ab")]);

    let lines = sink.lines();
    assert_eq!(lines[0], "2024-01-20T15:04:05.250Z INFO q key=\"a b\"");
    assert_eq!(lines[1], "2024-01-20T15:04:05.250Z INFO q key=ab");
}

#[test]
#[allow(clippy::approx_constant)]
fn test_float_is_truncated() {
    let (logger, sink) = memory_logger(LoggerConfig::new());
    logger.info("pi", &[Field::new("value", 3.14159)]);
    assert!(sink.contents_string().ends_with("value=3.141\n"));
}

#[test]
fn test_text_timestamp_ignores_local_zone() {
    let (logger, sink) = memory_logger(LoggerConfig::new().with_time_zone(TimeZoneMode::Local));
    logger.info("utc", &[]);
    assert!(sink.lines()[0].starts_with("2024-01-20T15:04:05.250Z "));
}

#[test]
fn test_identical_input_identical_output() {
    let config = LoggerConfig::new()
        .with_format(OutputFormat::Json)
        .with_time_zone(TimeZoneMode::Utc);
    let (first, first_sink) = memory_logger(config);
    let (second, second_sink) = memory_logger(config);

    let fields = [Field::new("k", "v"), Field::new("n", -1)];
    first.warn("same", &fields);
    second.warn("same", &fields);

    assert_eq!(first_sink.contents(), second_sink.contents());
}

#[test]
fn test_buffered_capacity_scenario() {
    // Each record below encodes to exactly 40 bytes
    let (logger, sink) = memory_logger(LoggerConfig::new().with_buffer_size(50));
    let message = "x".repeat(40 - "2024-01-20T15:04:05.250Z INFO ".len());

    logger.info(&message, &[]);
    assert_eq!(logger.pending_bytes(), 41);
    assert_eq!(sink.write_count(), 0);

    logger.info(&message, &[]);
    assert_eq!(sink.write_count(), 1);
    assert_eq!(sink.contents().len(), 41);
    assert_eq!(logger.pending_bytes(), 41);

    logger.flush();
    assert_eq!(sink.lines().len(), 2);
}

#[test]
fn test_buffered_never_exceeds_capacity_plus_one_record() {
    let capacity = 200;
    let (logger, sink) = memory_logger(LoggerConfig::new().with_buffer_size(capacity));

    let mut largest = 0;
    for i in 0..100 {
        let message = "m".repeat(i % 37);
        logger.info(&message, &[Field::new("i", i)]);
        largest = largest.max(logger.pending_bytes());
    }
    logger.flush();

    assert!(sink.write_count() > 1);
    assert!(largest <= capacity + 1 + 100);
    assert_eq!(sink.lines().len(), 100);
}

#[test]
fn test_flush_on_empty_buffer_writes_nothing() {
    let (logger, sink) = memory_logger(LoggerConfig::new().with_buffer_size(1024));
    logger.flush();
    logger.flush();
    assert_eq!(sink.write_count(), 0);
    assert_eq!(logger.metrics().flushes(), 0);
}

#[test]
fn test_file_sink_end_to_end() -> rust_fast_logger::Result<()> {
    let temp_dir = TempDir::new()?;
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::with_sink(
        LoggerConfig::new().with_buffer_size(4096),
        FileSink::new(&log_file)?,
    );
    for i in 0..20 {
        info!(logger, "request", "i" => i);
    }
    assert_eq!(fs::read_to_string(&log_file)?, "");

    logger.sync()?;

    let content = fs::read_to_string(&log_file)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 20);
    assert!(lines[19].ends_with("INFO request i=19"));
    Ok(())
}

#[test]
fn test_writer_sink_shared_between_loggers() {
    let sink: Arc<dyn Sink> = Arc::new(MemorySink::new());
    let a = Logger::builder().shared_sink(Arc::clone(&sink)).build();
    let b = Logger::builder().shared_sink(Arc::clone(&sink)).build();

    a.info("from a", &[]);
    b.info("from b", &[]);

    assert_eq!(a.sink_name(), "memory");
    assert_eq!(a.metrics().sink_writes() + b.metrics().sink_writes(), 2);
}

#[test]
fn test_writer_sink_adapter() {
    let logger = Logger::builder()
        .clock(fixed_clock())
        .sink(WriterSink::new(std::io::sink()))
        .build();
    logger.info("discarded", &[]);
    assert_eq!(logger.metrics().sink_writes(), 1);
    assert_eq!(logger.metrics().write_errors(), 0);
}

#[test]
fn test_context_logger_prepends_trace_fields() {
    let (logger, sink) = memory_logger(LoggerConfig::new());
    let request = logger.with_context(|| TracingContext::new("abc", "def"));

    request.info("handled", &[Field::new("status", 200)]);

    assert!(sink.lines()[0].ends_with("INFO handled traceID=abc spanID=def status=200"));
}

#[test]
fn test_config_from_lookup_drives_logger() {
    let config = LoggerConfig::from_lookup(|key| match key {
        "LOG_LEVEL" => Some("WARN".into()),
        "LOG_FORMAT" => Some("json".into()),
        "LOG_BUFFER_SIZE" => Some("not-a-number".into()),
        "LOG_USE_UTC" => Some("1".into()),
        _ => None,
    });
    let (logger, sink) = memory_logger(config);

    logger.info("dropped", &[]);
    logger.warn("kept", &[]);

    assert_eq!(sink.write_count(), 1);
    assert!(sink
        .contents_string()
        .starts_with("{\"timestamp\":\"2024-01-20T15:04:05.250000000Z\""));
}

#[test]
fn test_max_buffer_size_from_env_still_logs() {
    let config = LoggerConfig::from_lookup(|key| {
        (key == "LOG_BUFFER_SIZE").then(|| u64::MAX.to_string())
    });
    assert_eq!(config.buffer_size as u64, u64::MAX);

    let (logger, sink) = memory_logger(config);
    logger.info("still here", &[]);
    assert_eq!(sink.write_count(), 0);

    logger.flush();
    assert_eq!(sink.lines(), vec!["2024-01-20T15:04:05.250Z INFO still here".to_string()]);
}

#[test]
fn test_console_sink_default() {
    let logger = Logger::builder().sink(ConsoleSink::new(ConsoleTarget::Stderr)).build();
    logger.info("console integration", &[]);
    assert_eq!(logger.metrics().write_errors(), 0);
}
