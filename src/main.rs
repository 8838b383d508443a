//! Headless demo driver
//!
//! Runs the simulation core at a fixed 60 Hz with a small autopilot and logs
//! progress. Rendering, audio and real input live in front-end crates; this
//! binary exercises the core end to end.
//!
//! Environment:
//! - `SEED`: u64 run seed (default: random)
//! - `TUNING`: path to a JSON tuning override file

use std::path::Path;

use imba_shooter::Tuning;
use imba_shooter::consts::SIM_DT;
use imba_shooter::sim::{GamePhase, GameState, TickInput, tick};

/// Two minutes of simulated play
const DEMO_TICKS: u64 = 60 * 120;

fn main() {
    env_logger::init();

    let seed = std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);

    let tuning = match std::env::var("TUNING") {
        Ok(path) => match Tuning::load(Path::new(&path)) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("ignoring tuning file {path}: {e}");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    log::info!("demo run starting, seed {seed}");
    let mut state = GameState::new(seed, tuning);

    let mut restarts = 0u32;
    let mut best_score = 0u32;
    for i in 0..DEMO_TICKS {
        let now_ms = i * 1000 / 60;
        let input = autopilot(&state, now_ms);
        tick(&mut state, &input, SIM_DT);

        let snap = state.snapshot();
        for event in &snap.events {
            log::debug!("tick {i}: event {event:?}");
        }

        best_score = best_score.max(state.score);
        if state.phase == GamePhase::GameOver {
            restarts += 1;
            if restarts > 1 {
                break;
            }
        }
    }

    log::info!(
        "demo finished: best score {best_score}, level {}, weapon {}",
        state.level,
        state.player.weapon.as_str()
    );
}

/// Chase the nearest enemy horizontally with the trigger held; pick the
/// shotgun at interludes and restart once after a loss.
fn autopilot(state: &GameState, now_ms: u64) -> TickInput {
    let mut input = TickInput {
        fire: true,
        now_ms,
        ..Default::default()
    };
    match state.phase {
        GamePhase::GameOver => input.restart = true,
        GamePhase::WeaponChoice => input.select = Some(2),
        GamePhase::Playing => {
            let px = state.player.center().x;
            let target = state.enemies.iter().min_by(|a, b| {
                let da = (a.center().x - px).abs();
                let db = (b.center().x - px).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });
            if let Some(enemy) = target {
                if enemy.center().x < px - 4.0 {
                    input.left = true;
                } else if enemy.center().x > px + 4.0 {
                    input.right = true;
                }
            }
        }
    }
    input
}
