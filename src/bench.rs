//! CLI-layer runners: build the matrix, drive strategies, render output.

use std::io::IsTerminal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use parcol_core::{
    means_match, run_bench, run_strategy, run_strategy_with_progress, Matrix, Strategy,
    StrategyRun, Workload,
};

use crate::{dim, info, success, use_color};

pub struct RunOptions {
    pub rows: usize,
    pub cols: usize,
    pub delay_ms: u64,
    pub seed: Option<u64>,
    pub quiet: bool,
    pub json: bool,
}

fn build_workload(opts: &RunOptions) -> Workload {
    parcol_core::log(&format!(
        "matrix: {} rows x {} cols, {} ms per column",
        opts.rows, opts.cols, opts.delay_ms
    ));
    let matrix = Arc::new(Matrix::random(opts.rows, opts.cols, opts.seed));
    Workload::new(matrix, Duration::from_millis(opts.delay_ms))
}

/// Compare every requested worker count over one shared matrix.
pub fn cmd_bench(opts: &RunOptions, worker_counts: &[usize]) -> Result<(), String> {
    let workload = build_workload(opts);
    let strategies: Vec<Strategy> =
        worker_counts.iter().map(|w| Strategy::with_workers(*w)).collect();

    if opts.json {
        let report = run_bench(&workload, &strategies).map_err(|e| e.to_string())?;
        println!("{}", serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?);
        return Ok(());
    }

    if !opts.quiet {
        info(&format!(
            "Matrix {}x{}, {} ms per column",
            opts.rows, opts.cols, opts.delay_ms
        ));
    }

    let mut runs: Vec<StrategyRun> = Vec::with_capacity(strategies.len());
    for strategy in &strategies {
        let run = run_with_bar(&workload, *strategy, opts.quiet)?;
        print_run(&run);
        runs.push(run);
    }
    print_summary(&runs, opts.quiet)
}

/// Run a single strategy (`workers == 1` means serial).
pub fn cmd_run(opts: &RunOptions, workers: usize) -> Result<(), String> {
    let workload = build_workload(opts);
    let strategy = Strategy::with_workers(workers);

    if opts.json {
        let report = run_bench(&workload, &[strategy]).map_err(|e| e.to_string())?;
        println!("{}", serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?);
        return Ok(());
    }

    let run = run_with_bar(&workload, strategy, opts.quiet)?;
    print_run(&run);
    Ok(())
}

/// Run a strategy on a worker thread while the main thread keeps a progress
/// bar in sync with the shared column counter.
fn run_with_bar(
    workload: &Workload,
    strategy: Strategy,
    quiet: bool,
) -> Result<StrategyRun, String> {
    if quiet || !std::io::stdout().is_terminal() {
        return run_strategy(workload, strategy).map_err(|e| e.to_string());
    }

    let progress = Arc::new(AtomicUsize::new(0));
    let total = workload.columns() as u64;
    let (tx, rx) = mpsc::channel();
    let wl = workload.clone();
    let counter = Arc::clone(&progress);
    thread::spawn(move || {
        let result = run_strategy_with_progress(&wl, strategy, &counter);
        let _ = tx.send(result);
    });

    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.dim} {pos}/{len} columns")
            .unwrap(),
    );
    let tick = Duration::from_millis(80);
    loop {
        match rx.try_recv() {
            Ok(result) => {
                bar.finish_and_clear();
                return result.map_err(|e| e.to_string());
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                bar.finish_and_clear();
                return Err("Benchmark worker exited unexpectedly.".to_string());
            }
            Err(mpsc::TryRecvError::Empty) => {}
        }
        bar.set_position(progress.load(Ordering::Relaxed) as u64);
        thread::sleep(tick);
    }
}

fn print_run(run: &StrategyRun) {
    let label = if run.workers == 1 {
        "1 Processor".to_string()
    } else {
        format!("{} Processors", run.workers)
    };
    if use_color() {
        println!("{}", label.bold());
    } else {
        println!("{}", label);
    }
    println!("Elapsed computation time: {:.2} s", run.elapsed_secs);
}

fn print_summary(runs: &[StrategyRun], quiet: bool) -> Result<(), String> {
    let Some((baseline, rest)) = runs.split_first() else {
        return Ok(());
    };
    if runs.iter().any(|r| !means_match(&baseline.means, &r.means)) {
        return Err("Strategies disagreed on column means.".to_string());
    }
    if quiet {
        return Ok(());
    }
    for run in rest {
        if run.elapsed_secs > 0.0 {
            dim(&format!(
                "{} workers: {:.2}x speedup over {} worker(s)",
                run.workers,
                baseline.elapsed_secs / run.elapsed_secs,
                baseline.workers
            ));
        }
    }
    success("Column means identical across strategies.");
    Ok(())
}
