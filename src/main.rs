//! Brickfall headless driver
//!
//! Runs the simulation without a window: starts a game, launches the ball and
//! steers the paddle under it, logging events as they happen.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use brickfall::audio::{self, LogAudio};
use brickfall::sim::{GameEvent, GamePhase, GameState, process_input, update};
use brickfall::{GameConfig, Key, KeyState};

const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "brickfall", about = "Run the brick-breaking simulation headless")]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Override the config's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Level index to start on
    #[arg(long, default_value_t = 0)]
    level: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load_or_default(path),
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;

    let mut state = GameState::from_config(&config).context("failed to load levels")?;
    let mut keys = KeyState::new();
    let mut sink = LogAudio;
    audio::start_music(&mut sink);

    for _ in 0..args.level % state.levels.len() {
        state.select_level(true);
    }

    log::info!("Brickfall (headless) running {} frames", args.frames);

    let mut bricks_destroyed = 0u32;
    let mut wins = 0u32;
    for frame in 0..args.frames {
        steer(&state, &mut keys);
        process_input(&mut state, &mut keys, FRAME_DT);
        update(&mut state, FRAME_DT);

        let events = state.drain_events();
        audio::play_events(&events, &mut sink);
        for event in &events {
            match event {
                GameEvent::BrickDestroyed { .. } => bricks_destroyed += 1,
                GameEvent::LevelWon => {
                    wins += 1;
                    log::info!("Frame {}: level won", frame);
                }
                GameEvent::LifeLost { lives } => log::info!("Frame {}: life lost ({} left)", frame, lives),
                GameEvent::GameOver => log::info!("Frame {}: game over", frame),
                _ => {}
            }
        }
    }

    println!(
        "frames: {}  phase: {:?}  level: {}  lives: {}  bricks destroyed: {}  wins: {}",
        args.frames, state.phase, state.level, state.lives, bricks_destroyed, wins
    );
    Ok(())
}

/// Scripted player: confirm menus, launch, keep the paddle under the ball
fn steer(state: &GameState, keys: &mut KeyState) {
    for key in [Key::Left, Key::Right, Key::Launch, Key::Confirm] {
        keys.release(key);
    }

    match state.phase {
        GamePhase::Menu | GamePhase::Win => keys.press(Key::Confirm),
        GamePhase::Active => {
            if state.ball.stuck {
                keys.press(Key::Launch);
            }
            let target = state.ball.center().x;
            let paddle_center = state.paddle.center().x;
            if target < paddle_center - 10.0 {
                keys.press(Key::Left);
            } else if target > paddle_center + 10.0 {
                keys.press(Key::Right);
            }
        }
    }
}
