//! Lane Runner headless driver
//!
//! Runs one AI-driven round at the fixed tick rate without rendering and
//! prints the final snapshot as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lane_runner::Tuning;
use lane_runner::consts::TICK_RATE;
use lane_runner::sim::{GameState, TickInput, tick};

#[derive(Debug, Parser)]
#[command(name = "lane-runner", version)]
#[command(about = "Run a headless Lane Runner session and print the final state")]
struct Args {
    /// Session seed
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// JSON file with tuning overrides (missing fields keep their defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Stop after this many simulated seconds if the round is still going
    #[arg(long, default_value_t = 600)]
    seconds: u64,

    /// Start with manual driving (the player never steers, so expect a crash)
    #[arg(long)]
    manual: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut tuning = match &args.tuning {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading tuning file {}", path.display()))?;
            Tuning::from_json(&text)
                .with_context(|| format!("loading tuning file {}", path.display()))?
        }
        None => Tuning::default(),
    };
    if args.manual {
        tuning.start_in_ai_mode = false;
    }

    let mut state = GameState::new(args.seed, tuning).context("starting session")?;
    log::info!("Lane Runner (headless) starting with seed {:#x}", args.seed);

    let limit = args.seconds * TICK_RATE as u64;
    let input = TickInput::default();
    while state.time_ticks < limit && !state.collided() {
        tick(&mut state, &input);
        if state.time_ticks % (10 * TICK_RATE as u64) == 0 {
            log::info!(
                "t={}s distance={:.0} score={} obstacles={}",
                state.time_ticks / TICK_RATE as u64,
                state.distance,
                state.score,
                state.obstacles.len()
            );
        }
    }

    let snapshot = state.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
