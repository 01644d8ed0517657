//! Skybound headless shell
//!
//! Drives the simulation without a window: batch mode runs ticks as fast as
//! possible, realtime mode paces them through the fixed-step clock. Rendering
//! and menus belong to a front end; this binary is for soak runs, balance
//! checks and dumping snapshots.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use skybound::Tuning;
use skybound::consts::{SIM_DT, TICK_RATE};
use skybound::sim::{FixedStep, GameState, TickInput, demo_input, tick};

#[derive(Parser, Debug)]
#[command(name = "skybound", about = "Run the Skybound simulation headless")]
struct Args {
    /// Session seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// JSON file with tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Let the autopilot play (and restart after each death)
    #[arg(long)]
    demo: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Pace ticks in real time instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Skybound (headless) starting, seed {}", seed);

    let mut state = GameState::with_tuning(seed, tuning);
    let ticks_run = if args.realtime {
        run_realtime(&mut state, &args)
    } else {
        run_batch(&mut state, &args)
    };

    println!(
        "seed={} ticks={} runs={} score={} high={} status={:?}",
        seed,
        ticks_run,
        state.runs,
        state.score,
        state.high_score.best(),
        state.status
    );

    if args.json {
        let json = serde_json::to_string_pretty(&state.snapshot())
            .context("serializing final snapshot")?;
        println!("{json}");
    }
    Ok(())
}

fn next_input(state: &GameState, demo: bool) -> TickInput {
    if demo {
        demo_input(state)
    } else {
        TickInput::default()
    }
}

/// Run ticks back to back. Without the autopilot nobody restarts, so stop at
/// the first death.
fn run_batch(state: &mut GameState, args: &Args) -> u64 {
    let mut ticks_run = 0;
    while ticks_run < args.ticks {
        if state.is_dead() && !args.demo {
            break;
        }
        let input = next_input(state, args.demo);
        tick(state, &input);
        ticks_run += 1;
    }
    ticks_run
}

/// Run ticks at the fixed rate, logging a status line every second
fn run_realtime(state: &mut GameState, args: &Args) -> u64 {
    let mut clock = FixedStep::default();
    let mut last = Instant::now();
    let mut ticks_run = 0;

    while ticks_run < args.ticks {
        if state.is_dead() && !args.demo {
            break;
        }
        let now = Instant::now();
        let steps = clock.advance(now.duration_since(last).as_secs_f64());
        last = now;

        for _ in 0..steps {
            let input = next_input(state, args.demo);
            tick(state, &input);
            ticks_run += 1;
            if ticks_run % TICK_RATE as u64 == 0 {
                log::info!(
                    "t={}s score={} cam_y={:.0} enemies={} platforms={}",
                    ticks_run / TICK_RATE as u64,
                    state.score,
                    state.cam_y,
                    state.world.enemies.len(),
                    state.world.platforms.len()
                );
            }
        }
        std::thread::sleep(Duration::from_secs_f64(SIM_DT / 2.0));
    }
    ticks_run
}
