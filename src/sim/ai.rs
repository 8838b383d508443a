//! Per-variant enemy movement and AI
//!
//! `advance` owns every motion rule and never touches shared collections: a
//! Shooter that decides to fire returns a `BulletSpawn` intent for the tick
//! orchestrator to realize. The player is visible to enemies only as a
//! tick-scoped position in `WorldContext`, never as a stored reference.

use glam::Vec2;
use std::f32::consts::TAU;

use super::state::{BulletSpawn, COLOR_HOSTILE_BULLET, Enemy, EnemyKind};

/// Hostile bullets travel at this fraction of the base bullet speed
const SHOOTER_BULLET_FACTOR: f32 = 0.6;
/// Added to homing distances so zero-length vectors normalize safely
const HOMING_EPSILON: f32 = 1e-6;
/// Hostile bullets spawn this far below the shooter's box
const SHOOTER_MUZZLE_OFFSET: f32 = 6.0;

/// Tick-scoped world inputs for enemy AI
#[derive(Debug, Clone, Copy)]
pub struct WorldContext {
    /// Visible field dimensions
    pub field: Vec2,
    /// Player center this tick; None degrades homing variants to plain
    /// descent and silences Shooters
    pub player_center: Option<Vec2>,
    /// Base bullet speed from tuning
    pub bullet_speed: f32,
}

/// Advance one enemy by `dt` seconds. Returns a hostile-bullet intent when a
/// Shooter's timer fires.
pub fn advance(enemy: &mut Enemy, dt: f32, ctx: &WorldContext) -> Option<BulletSpawn> {
    let speed = enemy.speed;
    let center = enemy.center();
    let muzzle = Vec2::new(center.x, enemy.pos.y + enemy.size + SHOOTER_MUZZLE_OFFSET);

    let mut delta = Vec2::new(0.0, speed * dt);
    let mut zigzag_x = None;
    let mut shot = None;

    match &mut enemy.kind {
        EnemyKind::Basic | EnemyKind::Shielded => {}
        EnemyKind::Zigzag {
            spawn_x,
            elapsed,
            amplitude,
            frequency,
        } => {
            *elapsed += dt;
            zigzag_x = Some(*spawn_x + (*elapsed * *frequency * TAU).sin() * *amplitude);
        }
        EnemyKind::Shooter { interval, timer } => {
            *timer += dt;
            if *timer >= *interval {
                *timer = 0.0;
                if let Some(target) = ctx.player_center {
                    let to_target = target - center;
                    let dist = to_target.length() + HOMING_EPSILON;
                    shot = Some(BulletSpawn {
                        pos: muzzle,
                        vel: to_target / dist * (ctx.bullet_speed * SHOOTER_BULLET_FACTOR),
                        damage: 1.0,
                        friendly: false,
                        color: COLOR_HOSTILE_BULLET,
                    });
                }
            }
        }
        EnemyKind::Kamikaze => {
            // Pure pursuit: re-aim at the player's current center every tick
            if let Some(target) = ctx.player_center {
                let to_target = target - center;
                let dist = to_target.length() + HOMING_EPSILON;
                delta = to_target / dist * speed * dt;
            }
        }
    }

    enemy.pos += delta;
    if let Some(x) = zigzag_x {
        enemy.pos.x = x;
    }

    shot
}

/// True while the enemy is still in play. Every variant dies past the bottom
/// edge; the horizontally-mobile ones also die once fully out a side.
pub fn on_field(enemy: &Enemy, field: Vec2) -> bool {
    let b = enemy.aabb();
    if b.min.y > field.y {
        return false;
    }
    match enemy.kind {
        EnemyKind::Zigzag { .. } | EnemyKind::Kamikaze => b.max.x > 0.0 && b.min.x < field.x,
        _ => true,
    }
}
