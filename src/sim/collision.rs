//! Axis-aligned collision detection and the per-tick resolution passes
//!
//! Three passes run in a fixed order after movement: enemies vs friendly
//! bullets, player vs enemies, player vs hostile bullets. The order matters
//! only for consistent scoring, not correctness.

use glam::Vec2;

use super::particles;
use super::state::{
    COLOR_EXPLOSION, COLOR_HIT_SPARK, COLOR_PLAYER_HIT, GameEvent, GamePhase, GameState,
};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test; touching edges do not count
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Run all three collision passes for this tick
pub fn resolve(state: &mut GameState) {
    enemy_bullet_pass(state);
    player_enemy_pass(state);
    player_bullet_pass(state);
}

/// Pass 1: friendly bullets vs enemies. Damage from every overlapping bullet
/// accumulates before the health check, and a bullet overlapping several
/// enemies damages each of them; every overlapping bullet is consumed.
fn enemy_bullet_pass(state: &mut GameState) {
    let mut consumed: Vec<u32> = Vec::new();
    let mut destroyed: Vec<u32> = Vec::new();

    for ei in 0..state.enemies.len() {
        let ebox = state.enemies[ei].aabb();
        let mut damage = 0.0f32;
        let mut sparks: Vec<Vec2> = Vec::new();
        for b in &state.bullets {
            if b.friendly && b.aabb().intersects(&ebox) {
                damage += b.damage;
                sparks.push(b.pos);
                if !consumed.contains(&b.id) {
                    consumed.push(b.id);
                }
            }
        }
        if damage == 0.0 {
            continue;
        }

        for pos in sparks {
            particles::emit(&mut state.particles, &mut state.rng, pos, COLOR_HIT_SPARK, 6);
        }

        let (dead, id, center, points) = {
            let enemy = &mut state.enemies[ei];
            enemy.health -= damage;
            (
                enemy.health <= 0.0,
                enemy.id,
                enemy.center(),
                enemy.kind.score(),
            )
        };
        if dead {
            destroyed.push(id);
            state.score += points;
            particles::emit(
                &mut state.particles,
                &mut state.rng,
                center,
                COLOR_EXPLOSION,
                25,
            );
            state.events.push(GameEvent::Explosion);
        }
    }

    state.bullets.retain(|b| !consumed.contains(&b.id));
    state.enemies.retain(|e| !destroyed.contains(&e.id));
}

/// Pass 2: enemies vs the player. Any overlapping enemy is destroyed
/// outright (not health-gated, no score), and the player loses one health
/// per collider - the count, not the enemies' stats, is the damage. That
/// asymmetry with the bullet paths is deliberate gameplay balance.
fn player_enemy_pass(state: &mut GameState) {
    let pbox = state.player.aabb();
    let before = state.enemies.len();
    state.enemies.retain(|e| !e.aabb().intersects(&pbox));
    let hit_count = before - state.enemies.len();
    if hit_count == 0 {
        return;
    }

    state.player.health -= hit_count as i32;
    let center = state.player.center();
    particles::emit(
        &mut state.particles,
        &mut state.rng,
        center,
        COLOR_PLAYER_HIT,
        18,
    );
    check_player_down(state);
}

/// Pass 3: hostile bullets vs the player. Damage is summed across all
/// overlapping bullets, then applied as one ceiling-rounded hit.
fn player_bullet_pass(state: &mut GameState) {
    let pbox = state.player.aabb();
    let mut total = 0.0f32;
    state.bullets.retain(|b| {
        if !b.friendly && b.aabb().intersects(&pbox) {
            total += b.damage;
            false
        } else {
            true
        }
    });
    if total == 0.0 {
        return;
    }

    state.player.health -= total.ceil() as i32;
    let center = state.player.center();
    particles::emit(
        &mut state.particles,
        &mut state.rng,
        center,
        COLOR_PLAYER_HIT,
        10,
    );
    check_player_down(state);
}

fn check_player_down(state: &mut GameState) {
    if state.player.health <= 0 {
        state.player.health = 0;
        state.phase = GamePhase::GameOver;
        log::info!(
            "player down: game over at score {} level {}",
            state.score,
            state.level
        );
    }
}
