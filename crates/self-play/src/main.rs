//! Random self-play over the legality engine.
//!
//! ```text
//! self-play [--fen <record>] [--max-plies N] [--seed S] [--config PATH] [--json]
//! ```
//!
//! Logging goes through `tracing`; set `RUST_LOG` to adjust (default `info`).

mod config;
mod game;

use clap::Parser;
use config::SelfPlayConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "self-play")]
#[command(about = "Plays random legal moves from a position until the game ends")]
struct Cli {
    /// Starting position record
    #[arg(long)]
    fen: Option<String>,
    /// Maximum number of plies to play
    #[arg(long)]
    max_plies: Option<u32>,
    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
    /// Configuration file
    #[arg(long, default_value_os_t = SelfPlayConfig::default_path())]
    config: PathBuf,
    /// Print a JSON summary to stdout
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SelfPlayConfig::load(&cli.config)?;

    let start = cli.fen.unwrap_or(config.start);
    let max_plies = cli.max_plies.unwrap_or(config.max_plies);
    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(%start, max_plies, "starting self-play");
    let summary = game::play(&start, max_plies, &mut rng)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.final_record());
        println!(
            "{} after {} plies",
            summary.result.as_deref().unwrap_or("*"),
            summary.plies
        );
    }
    Ok(())
}
