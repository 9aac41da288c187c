//! Basic logger usage example
//!
//! Demonstrates the NOTICE level, plain and coloured console output and
//! call-by-name logging.
//!
//! Run with: cargo run --example basic_usage

use rust_logging_kit::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Logging Kit - Basic Usage Example ===\n");

    // Logger writing coloured text to stderr
    let logger = Logger::builder()
        .min_level(LogLevel::DEBUG)
        .appender(ConsoleAppender::with_colors(true))
        .build();
    logger.registry().register_level("NOTICE", 25);

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.notice("This is a notice message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");

    println!("\n2. Raw payload and exception blocks:");
    logger.info_with(
        "Received payload",
        LogOptions::new().with_raw_payload("{\n  \"user\": 42\n}"),
    );
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
    logger.exception("Could not load configuration", &err);

    println!("\n3. Custom levels by name:");
    logger.registry().register_level("AUDIT", 35);
    logger.log_named("audit", "User 42 exported the report")?;

    println!("\n4. Minimum level set to NOTICE - info won't show:");
    logger.set_min_level(LogLevel::NOTICE);
    logger.info("Info message (hidden)");
    logger.notice("Notice message (visible)");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
