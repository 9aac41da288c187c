//! Notification delivery example
//!
//! Demonstrates routing NOTICE-and-above entries to a chat-style sink through
//! the async delivery queue. The sink prints the embed JSON it would post.
//!
//! Run with: cargo run --example notification_delivery

use async_trait::async_trait;
use rust_logging_kit::delivery::{register_notification_handler, NotificationSink, QueueCapacity};
use rust_logging_kit::formatters::RichMessage;
use rust_logging_kit::prelude::*;
use std::time::Duration;

struct PrintingSink;

#[async_trait]
impl NotificationSink for PrintingSink {
    async fn send(&self, message: RichMessage) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(&message.to_json()?)?);
        Ok(())
    }

    fn name(&self) -> &str {
        "printing"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Rust Logging Kit - Notification Delivery Example ===\n");

    let logger = Logger::builder()
        .min_level(LogLevel::DEBUG)
        .appender(ConsoleAppender::new())
        .build();
    logger.registry().register_level("NOTICE", 25);

    let worker = register_notification_handler(
        &logger,
        PrintingSink,
        LogLevel::NOTICE,
        QueueCapacity::Bounded(100),
    );

    let bot = logger.child("bot.events");
    bot.info("Console only");
    bot.notice("Member joined (guild 1234).");
    bot.error_with(
        "Command failed",
        LogOptions::new()
            .with_raw_payload("**/play** by `user#0001`")
            .with_exception(ExceptionInfo::new("PermissionError", "missing Connect")),
    );

    tokio::time::sleep(Duration::from_millis(100)).await;

    // Dropping the last logger handle closes the queue and ends the worker
    drop(bot);
    drop(logger);
    let _ = worker.await;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
