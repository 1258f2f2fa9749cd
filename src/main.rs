//! Tower Climb headless runner
//!
//! Plays seeded runs on autopilot and reports where each one ended.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use tower_climb::Tuning;
use tower_climb::audio::AudioManager;
use tower_climb::render::RenderFrame;
use tower_climb::sim::{FrameClock, GameEvent, GameState, InputEvent, run_frame_until, tick};

#[derive(Parser, Debug)]
#[command(name = "tower-climb")]
#[command(about = "Run the vertical platformer simulation headless on autopilot")]
struct Cli {
    /// Seed for the first run (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Tick limit per run
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,
    /// Number of runs; later runs reseed from the previous one
    #[arg(long, default_value_t = 1)]
    runs: u32,
    /// Pace ticks at the frame interval instead of running flat out
    #[arg(long, default_value_t = false)]
    realtime: bool,
    /// JSON tuning file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the effective tuning as JSON and exit
    #[arg(long, default_value_t = false)]
    dump_tuning: bool,
    /// Print run summaries as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    score: u64,
    floor: u32,
    ticks: u64,
    game_over: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    if cli.dump_tuning {
        println!("{}", serde_json::to_string_pretty(&tuning)?);
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!("Starting {} run(s) from seed {}", cli.runs, seed);

    let mut state = GameState::new(seed, tuning);
    state.handle_input(InputEvent::ToggleDemo);
    let mut clock = FrameClock::new(state.tuning.frame_time_ms);
    let mut audio = AudioManager::default();

    let mut results = Vec::with_capacity(cli.runs as usize);
    for run in 0..cli.runs {
        if run > 0 {
            if state.is_game_over() {
                state.handle_input(InputEvent::Restart);
            } else {
                state.restart();
            }
            audio.handle_events(&state.drain_events());
        }
        results.push(play(&mut state, &mut clock, &mut audio, cli.ticks, cli.realtime));
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for (i, r) in results.iter().enumerate() {
            println!(
                "run {:>3}  seed {:>20}  score {:>7}  floor {:>5}  ticks {:>7}{}",
                i + 1,
                r.seed,
                r.score,
                r.floor,
                r.ticks,
                if r.game_over { "" } else { "  (tick limit)" }
            );
        }
    }

    Ok(())
}

fn play(
    state: &mut GameState,
    clock: &mut FrameClock,
    audio: &mut AudioManager,
    max_ticks: u64,
    realtime: bool,
) -> RunSummary {
    let seed = state.seed;
    let mut last = Instant::now();

    while !state.is_game_over() && state.time_ticks < max_ticks {
        if realtime {
            thread::sleep(clock.frame());
            let now = Instant::now();
            run_frame_until(state, clock, now - last, max_ticks);
            last = now;
        } else {
            tick(state);
        }

        let events = state.drain_events();
        for event in &events {
            if let GameEvent::FloorReached { floor } = event {
                log::debug!("Floor {} reached at tick {}", floor, state.time_ticks);
            }
        }
        audio.handle_events(&events);
    }

    let frame = RenderFrame::capture(state);
    if let Some(message) = &frame.hud.game_over {
        log::info!("{}", message.replace('\n', " "));
    } else {
        log::info!("Tick limit reached: {}", frame.hud.score_text);
    }

    RunSummary {
        seed,
        score: state.score.score(),
        floor: state.player.highest_floor,
        ticks: state.time_ticks,
        game_over: state.is_game_over(),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos() as u64
}
