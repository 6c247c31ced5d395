//! Core library for Parcol: matrix generation, per-column workload, bounded
//! worker pools, and benchmark runs. Used by the CLI binary; can be reused
//! by other tools.

pub mod bench;
pub mod config;
pub mod error;
pub mod matrix;
pub mod pool;
pub mod utils;
pub mod workload;

// Re-export main API for CLI
pub use bench::{
    means_match, run_bench, run_strategy, run_strategy_with_progress, BenchReport, Strategy,
    StrategyRun,
};
pub use config::{load_config, Config};
pub use error::CoreError;
pub use matrix::Matrix;
pub use pool::{default_workers, parallel_map_bounded, parallel_map_with_progress};
pub use utils::{log, DEFAULT_COLS, DEFAULT_DELAY_MS, DEFAULT_ROWS, DEFAULT_WORKER_COUNTS};
pub use workload::Workload;
