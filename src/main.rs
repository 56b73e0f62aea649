//! Snake Milestone entry point
//!
//! Headless demo: the autopilot plays a few rounds against the simulated
//! swap collaborator while frames are printed to the terminal.
//!
//! Usage: `snake-milestone [settings.json]`

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use snake_milestone::renderer::render_frame;
use snake_milestone::sim::choose_direction;
use snake_milestone::{InputSignal, SessionHandle, SessionRunner, Settings, SimulatedSwap};

/// Rounds played before the demo exits
const DEMO_ROUNDS: u32 = 3;
/// A round that has not ended by itself is restarted after this many ticks
const MAX_ROUND_TICKS: u64 = 500;
/// Pause on the game-over frame before restarting
const RESTART_DELAY: Duration = Duration::from_secs(1);

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    log::info!("Snake Milestone (headless demo) starting...");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = match Settings::load_or_default(path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let collaborator = Arc::new(SimulatedSwap::default());
    let (runner, handle) = match SessionRunner::new(&settings, Arc::clone(&collaborator)) {
        Ok(pair) => pair,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let runner_task = tokio::spawn(runner.run());

    autoplay(handle).await;

    match runner_task.await {
        Ok(end) => {
            log::info!("Session ended: {:?}", end);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Session task failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Feed autopilot input and print every frame until the last round ends
async fn autoplay(handle: SessionHandle) {
    let mut frames = handle.subscribe();
    let mut round = 1;
    let mut generation = handle.snapshot().generation;

    while frames.changed().await.is_ok() {
        let snapshot = frames.borrow_and_update().clone();
        print!("\x1b[2J\x1b[H{}", render_frame(&snapshot));

        // Frames published before a restart took effect
        if snapshot.generation != generation {
            continue;
        }

        let round_over = snapshot.is_stopped() || snapshot.tick >= MAX_ROUND_TICKS;
        if round_over {
            if round >= DEMO_ROUNDS {
                handle.exit();
                return;
            }
            tokio::time::sleep(RESTART_DELAY).await;
            round += 1;
            log::info!("Starting round {}", round);
            handle.restart();
            generation += 1;
            continue;
        }

        if let Some(dir) = choose_direction(
            snapshot.board,
            &snapshot.snake,
            snapshot.food,
            snapshot.heading,
        ) {
            handle.send(InputSignal::Move(dir));
        }
    }
}
