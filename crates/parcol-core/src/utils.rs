//! Shared defaults and debug logging.

use std::env;

use chrono::Local;

pub const DEFAULT_ROWS: usize = 100;
pub const DEFAULT_COLS: usize = 1000;
pub const DEFAULT_DELAY_MS: u64 = 10;
/// Serial baseline plus the two pool sizes of the reference run.
pub const DEFAULT_WORKER_COUNTS: [usize; 3] = [1, 2, 10];

fn is_debug() -> bool {
    env::var("PARCOL_LOG")
        .map(|v| v.to_lowercase() == "debug")
        .unwrap_or(false)
}

/// Timestamped diagnostics on stderr, enabled with PARCOL_LOG=debug.
/// Stdout stays reserved for the report itself.
pub fn log(message: &str) {
    if !is_debug() {
        return;
    }
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    eprintln!("[{}] {}", timestamp, message);
}
