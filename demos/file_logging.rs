//! File logging example
//!
//! Demonstrates one-call setup with console output and a NOTICE-level log
//! file, module-level logging functions and panic reporting.
//!
//! Run with: cargo run --example file_logging

use rust_logging_kit::prelude::*;
use rust_logging_kit::{global, notice, warning};

fn main() -> Result<()> {
    println!("=== Rust Logging Kit - File Logging Example ===\n");

    let root = setup_logging(
        LoggingConfig::default().with_file("application.log", LogLevel::NOTICE),
    )?;

    println!("1. Console gets INFO and above, the file NOTICE and above:");
    let app = root.child("app");
    app.info("Application started");
    notice!(app, "Listening on port {}", 8080);
    warning!(app, "Using default settings for {} options", 3);

    println!("\n2. Module-level functions log on the root logger:");
    global::info("Connecting to database...");
    global::notice("Database connection established");

    println!("\n3. `log` crate records are forwarded:");
    log::warn!(target: "plugin.loader", "Optional plugin missing");

    println!("\n4. A panicking worker is reported at CRITICAL:");
    let _ = std::thread::spawn(|| panic!("worker lost its connection")).join();

    root.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the NOTICE-and-above output");

    Ok(())
}
