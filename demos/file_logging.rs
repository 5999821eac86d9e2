//! File logging example
//!
//! Configures a day-rotating file destination from a descriptor, logs to it,
//! then closes it and falls back to the console.
//!
//! Run with: cargo run --example file_logging

use logurl::prelude::*;
use logurl::{debug, error, info, parse, warn};

fn main() -> Result<()> {
    println!("=== logurl - File Logging Example ===\n");

    let descriptor = "file://application.log,rotate=day,level=DBG";
    println!("1. Configuring destination '{}'", descriptor);
    init(descriptor)?;

    info!("Application started");
    debug!("Loading configuration...");
    info!("Configuration loaded successfully");
    warn!("Using default settings for some options");
    error!("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        info!("Processing item {}/5", i);
        if i == 3 {
            warn!("Item 3 took longer than expected");
        }
    }
    info!("All operations completed");

    println!("\n3. A second init is reported in the log and ignored");
    init("file://other.log")?;

    fini();
    info!("Destination closed, this record goes to stdout");

    println!("\n4. Descriptor errors are returned to the caller:");
    for bad in [
        "syslog://localhost",
        "file://app.log,colour=red",
        "file://app.log,rotate=hour",
    ] {
        if let Err(e) = parse(bad) {
            println!("   {}: {}", bad, e);
        }
    }

    let written = logger().metrics().records_written();
    println!("\n=== Example completed successfully! ({} records) ===", written);
    println!("Check 'application.log' for the full log output");

    Ok(())
}
