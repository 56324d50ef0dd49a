//! Basic logger usage example
//!
//! Demonstrates text and JSON output, level filtering, context fields,
//! batched file output and configuration from the environment.
//!
//! Run with: cargo run --example basic_usage

use rust_fast_logger::prelude::*;
use rust_fast_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Fast Logger - Basic Usage Example ===\n");

    // Text records on stdout, everything from DEBUG up
    println!("1. Text output at different levels:");
    let logger = Logger::new(LoggerConfig::new());
    logger.debug("This is a debug message", &[]);
    logger.info("This is an info message", &[Field::new("port", 8080)]);
    logger.warn("This is a warning message", &[Field::new("path", "/tmp/my file")]);
    logger.error("This is an error message", &[Field::new("retries", 3)]);

    println!("\n2. JSON output with a minimum level of INFO:");
    let logger = Logger::new(
        LoggerConfig::new()
            .with_level(LogLevel::Info)
            .with_format(OutputFormat::Json)
            .with_time_zone(TimeZoneMode::Utc),
    );
    logger.debug("Debug message (hidden)", &[]);
    info!(logger, "started", "userID" => 12345, "ratio" => 0.75, "cached" => true);

    println!("\n3. Context fields on every record:");
    let request =
        logger.with_static_context(TracingContext::new("4bf92f3577b34da6", "00f067aa0ba902b7"));
    request.info("handling request", &[Field::new("method", "GET")]);
    request.warn("slow response", &[Field::new("latency_ms", 812)]);

    println!("\n4. Batched file output:");
    let path = std::env::temp_dir().join("rust_fast_logger_demo.log");
    let file_logger = Logger::with_sink(
        LoggerConfig::new().with_buffer_size(4096),
        FileSink::new(&path)?,
    );
    for i in 0..10 {
        warn!(file_logger, "disk usage high", "sample" => i);
    }
    println!("   pending before flush: {} bytes", file_logger.pending_bytes());
    file_logger.sync()?;
    println!("   wrote {} bytes to {}", std::fs::metadata(&path)?.len(), path.display());

    println!("\n5. Configuration from LOG_* environment variables:");
    let config = LoggerConfig::from_env();
    println!("   {:?}", config);
    Logger::new(config).info("configured from environment", &[]);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
