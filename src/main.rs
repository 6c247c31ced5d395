//! Thin CLI layer: parse args, styled output, and call into parcol-core.
//! Crash-proof: panic caught and reported; all errors return Result.

use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use std::env;
use std::io::IsTerminal;

mod bench;

// ---- UI helpers (no-op when stdout isn't a TTY) ----

fn use_color() -> bool {
    std::io::stdout().is_terminal()
        && env::var("NO_COLOR").unwrap_or_default().is_empty()
}

fn success(msg: &str) {
    if use_color() {
        println!("{}", msg.green());
    } else {
        println!("{}", msg);
    }
}

fn error(msg: &str) {
    if use_color() {
        eprintln!("{}", msg.red());
    } else {
        eprintln!("{}", msg);
    }
}

fn info(msg: &str) {
    if use_color() {
        println!("{}", msg.cyan());
    } else {
        println!("{}", msg);
    }
}

fn dim(msg: &str) {
    if use_color() {
        println!("{}", msg.dimmed());
    } else {
        println!("{}", msg);
    }
}

fn with_shared_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("rows")
            .long("rows")
            .value_parser(clap::value_parser!(usize))
            .help("Matrix rows (default 100)"),
    )
    .arg(
        Arg::new("cols")
            .long("cols")
            .value_parser(clap::value_parser!(usize))
            .help("Matrix columns (default 1000)"),
    )
    .arg(
        Arg::new("delay-ms")
            .long("delay-ms")
            .value_parser(clap::value_parser!(u64))
            .help("Artificial per-column delay in milliseconds (default 10)"),
    )
    .arg(
        Arg::new("seed")
            .long("seed")
            .value_parser(clap::value_parser!(u64))
            .help("Seed for a reproducible matrix (default: OS entropy)"),
    )
    .arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Output machine-readable JSON result"),
    )
    .arg(
        Arg::new("quiet")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .help("Minimal output; no progress bar"),
    )
}

fn resolve_opts(sub_m: &ArgMatches, config: &parcol_core::Config) -> bench::RunOptions {
    let delay_env = env::var("PARCOL_DELAY_MS").ok().and_then(|v| v.parse::<u64>().ok());
    bench::RunOptions {
        rows: sub_m
            .get_one::<usize>("rows")
            .copied()
            .or(config.rows)
            .unwrap_or(parcol_core::DEFAULT_ROWS),
        cols: sub_m
            .get_one::<usize>("cols")
            .copied()
            .or(config.cols)
            .unwrap_or(parcol_core::DEFAULT_COLS),
        delay_ms: sub_m
            .get_one::<u64>("delay-ms")
            .copied()
            .or(delay_env)
            .or(config.delay_ms)
            .unwrap_or(parcol_core::DEFAULT_DELAY_MS),
        seed: sub_m.get_one::<u64>("seed").copied().or(config.seed),
        quiet: sub_m.get_flag("quiet"),
        json: sub_m.get_flag("json"),
    }
}

fn default_opts(config: &parcol_core::Config) -> bench::RunOptions {
    let delay_env = env::var("PARCOL_DELAY_MS").ok().and_then(|v| v.parse::<u64>().ok());
    bench::RunOptions {
        rows: config.rows.unwrap_or(parcol_core::DEFAULT_ROWS),
        cols: config.cols.unwrap_or(parcol_core::DEFAULT_COLS),
        delay_ms: delay_env.or(config.delay_ms).unwrap_or(parcol_core::DEFAULT_DELAY_MS),
        seed: config.seed,
        quiet: false,
        json: false,
    }
}

fn run() -> Result<(), String> {
    let matches = Command::new("parcol")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Column-mean benchmark — serial baseline vs fixed-size worker pools")
        .after_help(
            "Examples:\n  parcol\n  parcol bench --workers 1 --workers 4 --workers 16\n  parcol run --workers 8 --cols 200\n  parcol bench --json --seed 42",
        )
        .subcommand(
            with_shared_args(
                Command::new("bench")
                    .about("Run every configured strategy over one shared matrix"),
            )
            .arg(
                Arg::new("workers")
                    .long("workers")
                    .value_parser(clap::value_parser!(usize))
                    .action(ArgAction::Append)
                    .help("Worker count per run; repeat for several runs (default 1, 2, 10)"),
            ),
        )
        .subcommand(
            with_shared_args(Command::new("run").about("Run a single strategy")).arg(
                Arg::new("workers")
                    .long("workers")
                    .value_parser(clap::value_parser!(usize))
                    .help("Worker count; 1 means serial (default: CPU count)"),
            ),
        )
        .get_matches();

    let cwd = env::current_dir().map_err(|e| e.to_string())?;
    let config = parcol_core::load_config(&cwd);

    match matches.subcommand() {
        Some(("bench", sub_m)) => {
            let opts = resolve_opts(sub_m, &config);
            let workers: Vec<usize> = match sub_m.get_many::<usize>("workers") {
                Some(values) => values.copied().collect(),
                None => config
                    .workers
                    .clone()
                    .unwrap_or_else(|| parcol_core::DEFAULT_WORKER_COUNTS.to_vec()),
            };
            bench::cmd_bench(&opts, &workers)?;
        }
        Some(("run", sub_m)) => {
            let opts = resolve_opts(sub_m, &config);
            let workers = sub_m
                .get_one::<usize>("workers")
                .copied()
                .unwrap_or_else(parcol_core::default_workers);
            bench::cmd_run(&opts, workers)?;
        }
        _ => {
            // Bare `parcol` is the reference demo: serial, 2 workers, 10 workers.
            let opts = default_opts(&config);
            let workers = config
                .workers
                .clone()
                .unwrap_or_else(|| parcol_core::DEFAULT_WORKER_COUNTS.to_vec());
            bench::cmd_bench(&opts, &workers)?;
        }
    }

    Ok(())
}

fn main() {
    if !use_color() {
        colored::control::set_override(false);
    }

    let code = match std::panic::catch_unwind(run) {
        Ok(Ok(())) => 0,
        Ok(Err(e)) => {
            error(&e);
            1
        }
        Err(_) => {
            error("An unexpected error occurred. Please report this issue.");
            1
        }
    };
    std::process::exit(code);
}
