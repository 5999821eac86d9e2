//! Basic logger usage example
//!
//! Logs through the process-wide logger before any destination is configured,
//! so records go to stdout. Shows the gate and the raw variants.
//!
//! Run with: cargo run --example basic_usage

use logurl::prelude::*;
use logurl::{debug, error, info, info_raw, trace, warn};

fn main() -> Result<()> {
    println!("=== logurl - Basic Usage Example ===\n");

    println!("1. Logging at different levels:");
    trace!("This is a trace message");
    debug!("This is a debug message");
    info!("This is an info message");
    warn!("This is a warning message");
    error!("This is an error message");

    println!("\n2. Raising the gate:");
    set_level(LogLevel::Info)?;
    println!("   Gate set to {} - trace and debug won't show:", level());
    trace!("Trace message (hidden)");
    debug!("Debug message (hidden)");
    info!("Info message (visible)");
    warn!("Warning message (visible)");

    println!("\n3. Raw variants leave the terminator to the caller:");
    info_raw!("progress: {}%", 50);
    println!();
    info_raw!("done\n");

    println!("\n4. Fatal is not a threshold:");
    if let Err(e) = set_level(LogLevel::Fatal) {
        println!("   {}", e);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
