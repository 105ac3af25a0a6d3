// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! chat-tracker - check, time and generate tracker command scripts.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use chat_tracker::config::DEFAULT_BUCKETS;
use chat_tracker::script::BASIC_SCRIPT;
use chat_tracker::{Script, TrackerConfig, Workload};

#[derive(Parser, Debug)]
#[command(name = "chat-tracker")]
#[command(about = "Check, time and generate chat tracker command scripts")]
#[command(version)]
struct Args {
    /// Hash buckets per index
    #[arg(long, global = true, env = "CHAT_TRACKER_BUCKETS", default_value_t = DEFAULT_BUCKETS)]
    buckets: usize,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Run a script against the fast and reference trackers and compare
    Check {
        /// Script to check (plain or .gz); the built-in basic script if omitted
        path: Option<PathBuf>,
    },
    /// Time construction, commands and teardown for a script
    Time {
        /// Script to time (plain or .gz)
        path: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a random script to stdout
    Generate {
        #[arg(long, default_value_t = 10_000)]
        commands: usize,

        #[arg(long, default_value_t = 1_000)]
        users: usize,

        #[arg(long, default_value_t = 200)]
        chats: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load(path: Option<&PathBuf>) -> Result<Script> {
    match path {
        Some(path) => {
            Script::load(path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => Script::parse_str(BASIC_SCRIPT).context("built-in script is malformed"),
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = TrackerConfig::with_buckets(args.buckets);
    info!(buckets = config.effective_buckets(), "starting");

    match args.command {
        Cmd::Check { path } => {
            let script = load(path.as_ref())?;
            print!("Correctness test on {} commands: ", script.len());
            match script.check(config) {
                Ok(()) => println!("Passed"),
                Err(mismatch) => {
                    println!("{}", mismatch);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Cmd::Time { path, json } => {
            let script = load(Some(&path))?;
            let timings = script.time(config);
            if json {
                let out = serde_json::to_string_pretty(&timings).context("failed to encode report")?;
                println!("{}", out);
            } else {
                println!("Performance test on {} commands: {:.3} milliseconds.", timings.commands, timings.total_ms);
                println!("   Construction: {:.3} msec.", timings.construction_ms);
                println!("       Commands: {:.3} msec.", timings.commands_ms);
                println!("    Destruction: {:.3} msec.", timings.destruction_ms);
            }
        }
        Cmd::Generate { commands, users, chats, seed } => {
            let workload = Workload {
                commands,
                users,
                chats,
                seed,
                ..Workload::default()
            };
            workload
                .write_to(io::BufWriter::new(io::stdout().lock()))
                .context("failed to write script")?;
        }
    }

    return Ok(ExitCode::SUCCESS);
}
