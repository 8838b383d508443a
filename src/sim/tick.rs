//! Fixed timestep simulation tick
//!
//! Orchestrates one step: input, player movement, spawning, enemy AI,
//! bullet motion, collision resolution, progression, particle decay. All
//! state changes flow through the single `&mut GameState`.

use glam::Vec2;

use super::ai::{self, WorldContext};
use super::state::{GameEvent, GamePhase, GameState, Weapon};
use super::{collision, particles, spawn};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pressed movement keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire key held
    pub fire: bool,
    /// Restart from game over
    pub restart: bool,
    /// Weapon menu selection (1 = sniper, 2 = shotgun, 3 = ak)
    pub select: Option<u8>,
    /// Monotonic timestamp (ms) for cooldown and banner arithmetic
    pub now_ms: u64,
}

/// `floor(score / 100) + 1` - level is a pure function of score
pub fn level_for(score: u32) -> u32 {
    score / 100 + 1
}

/// Advance the game state by one step of `dt` seconds (dt > 0)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
            // Leftover explosions keep falling behind the overlay
            particles::update(&mut state.particles);
            return;
        }
        GamePhase::WeaponChoice => {
            if let Some(weapon) = input.select.and_then(select_weapon) {
                log::info!("weapon upgraded to {}", weapon.as_str());
                state.player.weapon = weapon;
                state.phase = GamePhase::Playing;
            }
            particles::update(&mut state.particles);
            return;
        }
        GamePhase::Playing => {}
    }

    move_player(state, input, dt);

    if input.fire && state.player.can_shoot(input.now_ms) {
        let speed = state.tuning.bullet_speed;
        for shot in state.player.shoot(input.now_ms, speed) {
            state.spawn_bullet(shot);
        }
        state.events.push(GameEvent::Shoot);
    }

    // Spawn timer accumulates real elapsed time, independent of frame rate
    state.spawn_timer_ms += dt * 1000.0;
    while state.spawn_timer_ms >= state.tuning.spawn_interval_ms {
        state.spawn_timer_ms -= state.tuning.spawn_interval_ms;
        spawn::spawn_wave(state);
    }

    // Enemy AI: movement plus hostile-bullet intents, then off-field culling
    let ctx = WorldContext {
        field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        player_center: Some(state.player.center()),
        bullet_speed: state.tuning.bullet_speed,
    };
    let mut intents = Vec::new();
    for enemy in &mut state.enemies {
        if let Some(shot) = ai::advance(enemy, dt, &ctx) {
            intents.push(shot);
        }
    }
    state.enemies.retain(|e| ai::on_field(e, ctx.field));
    for shot in intents {
        state.spawn_bullet(shot);
    }

    // Bullet motion and off-field culling
    let field = ctx.field;
    state.bullets.retain_mut(|b| b.advance(dt, field));

    collision::resolve(state);
    // A death during resolution freezes the run; progression must not heal
    // the player back or swap GameOver for the weapon-choice interlude
    if state.phase == GamePhase::Playing {
        apply_level_ups(state, input.now_ms);
    }
    particles::update(&mut state.particles);

    // Stable iteration order for the next tick
    state.normalize_order();
}

fn select_weapon(choice: u8) -> Option<Weapon> {
    match choice {
        1 => Some(Weapon::Sniper),
        2 => Some(Weapon::Shotgun),
        3 => Some(Weapon::Ak),
        _ => None,
    }
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut dir = Vec2::ZERO;
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if dir != Vec2::ZERO {
        // Diagonals normalized to unit length
        state.player.pos += dir.normalize() * state.tuning.player_speed * dt;
    }
    // Clamp to the field, no wraparound
    state.player.pos.x = state.player.pos.x.clamp(0.0, FIELD_WIDTH - PLAYER_WIDTH);
    state.player.pos.y = state.player.pos.y.clamp(0.0, FIELD_HEIGHT - PLAYER_HEIGHT);
}

/// Bring the stored level up to `level_for(score)`, one step at a time so a
/// big score jump applies every step's boosts and healing. Landing on a
/// multiple of 5 opens the weapon-choice interlude.
fn apply_level_ups(state: &mut GameState, now_ms: u64) {
    while level_for(state.score) > state.level {
        state.level += 1;
        state.size_boost += state.tuning.size_boost_step;
        state.speed_boost += state.tuning.speed_boost_step;
        if state.player.health < state.tuning.player_max_health {
            state.player.health += 1;
        }
        state.last_level_up_ms = now_ms;
        state.events.push(GameEvent::LevelUp);
        log::info!("level up -> {} (score {})", state.level, state.score);
        if state.level % 5 == 0 {
            state.phase = GamePhase::WeaponChoice;
        }
    }
}
