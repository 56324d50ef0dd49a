//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Records from many threads arrive whole, one per line
//! - Buffered delivery loses nothing when flushes race with logging
//! - The buffer pool stays within its idle bound under contention
//! - Metrics add up after heavy load

use rust_fast_logger::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

fn shared_logger(buffer_size: usize, format: OutputFormat) -> (Arc<Logger>, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .buffer_size(buffer_size)
        .format(format)
        .sink(sink.clone())
        .build();
    (Arc::new(logger), sink)
}

fn log_from_threads(logger: &Arc<Logger>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info(
                        "worker tick",
                        &[
                            Field::new("thread", t),
                            Field::new("seq", i),
                            Field::new("note", "a b c"),
                        ],
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
}

/// Each (thread, seq) pair must appear exactly once, on a line of its own
fn assert_all_records_whole(lines: &[String]) {
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    let mut seen = HashSet::new();
    for line in lines {
        let value: serde_json::Value =
            serde_json::from_str(line).unwrap_or_else(|e| panic!("torn line {:?}: {}", line, e));
        assert_eq!(value["message"], "worker tick");
        assert_eq!(value["note"], "a b c");
        let key = (value["thread"].as_u64().unwrap(), value["seq"].as_u64().unwrap());
        assert!(seen.insert(key), "duplicate record {:?}", key);
    }
}

#[test]
fn test_unbuffered_concurrent_records_are_whole() {
    let (logger, sink) = shared_logger(0, OutputFormat::Json);

    log_from_threads(&logger);

    assert_all_records_whole(&sink.lines());
    assert_eq!(sink.write_count(), THREADS * PER_THREAD);
    assert_eq!(logger.metrics().total_logged(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_buffered_concurrent_records_are_whole() {
    let (logger, sink) = shared_logger(4096, OutputFormat::Json);

    log_from_threads(&logger);
    logger.flush();

    assert_all_records_whole(&sink.lines());
    assert_eq!(logger.pending_bytes(), 0);
    // Batching means far fewer writes than records
    assert!(sink.write_count() < THREADS * PER_THREAD / 4);
    assert_eq!(logger.metrics().flushes(), sink.write_count() as u64);
}

#[test]
fn test_flush_racing_with_writers() {
    let (logger, sink) = shared_logger(1024, OutputFormat::Json);

    let flusher = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for _ in 0..200 {
                logger.flush();
                thread::yield_now();
            }
        })
    };

    log_from_threads(&logger);
    flusher.join().expect("flusher thread panicked");
    logger.flush();

    assert_all_records_whole(&sink.lines());
}

#[test]
fn test_buffered_file_sink_under_load() -> rust_fast_logger::Result<()> {
    let temp_dir = TempDir::new()?;
    let log_file = temp_dir.path().join("stress.log");

    let logger = Arc::new(Logger::with_sink(
        LoggerConfig::new()
            .with_format(OutputFormat::Json)
            .with_buffer_size(8192),
        FileSink::new(&log_file)?,
    ));

    log_from_threads(&logger);
    logger.sync()?;

    let content = std::fs::read_to_string(&log_file)?;
    let lines: Vec<String> = content.lines().map(String::from).collect();
    assert_all_records_whole(&lines);
    assert_eq!(logger.metrics().write_errors(), 0);
    Ok(())
}

#[test]
fn test_filtered_calls_under_load_do_nothing() {
    let sink = MemorySink::new();
    let logger = Arc::new(
        Logger::builder()
            .min_level(LogLevel::Error)
            .sink(sink.clone())
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.debug("noise", &[Field::new("i", i)]);
                    logger.info("noise", &[]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    assert_eq!(sink.write_count(), 0);
    assert_eq!(logger.pool().acquired_count(), 0);
    assert_eq!(logger.metrics().total_logged(), 0);
}

#[test]
fn test_pool_reuse_under_contention() {
    let sink = MemorySink::new();
    let logger = Arc::new(
        Logger::builder()
            .pool(128, 4)
            .sink(sink.clone())
            .build(),
    );

    log_from_threads(&logger);

    let pool = logger.pool();
    assert_eq!(pool.acquired_count(), (THREADS * PER_THREAD) as u64);
    // Concurrency can force extra allocations, but most calls must reuse
    assert!(pool.allocated_count() < pool.acquired_count() / 2);
    assert!(pool.idle_count() <= 4);
    assert_eq!(sink.lines().len(), THREADS * PER_THREAD);
}
