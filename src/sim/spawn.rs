//! Spawn controller
//!
//! Emits enemy waves on a fixed timer with a weighted variant distribution
//! and per-variant size/speed ranges, scaled by the current difficulty
//! boosts. All randomness comes from the game state's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, EnemyTag, GameState};
use crate::consts::FIELD_WIDTH;

/// Map one uniform roll in [0, 1) onto the cumulative variant bands:
/// Basic 45%, Zigzag 25%, Shooter 15%, Kamikaze 10%, Shielded 5%.
pub fn variant_for_roll(roll: f32) -> EnemyTag {
    if roll < 0.45 {
        EnemyTag::Basic
    } else if roll < 0.70 {
        EnemyTag::Zigzag
    } else if roll < 0.85 {
        EnemyTag::Shooter
    } else if roll < 0.95 {
        EnemyTag::Kamikaze
    } else {
        EnemyTag::Shielded
    }
}

/// Emit one wave: `1 + level/2` independently sampled enemies
pub fn spawn_wave(state: &mut GameState) {
    let count = 1 + (state.level / 2) as usize;
    log::debug!("spawning {} enemies at level {}", count, state.level);
    for _ in 0..count {
        spawn_enemy(state);
    }
}

fn spawn_enemy(state: &mut GameState) {
    let min = state.tuning.enemy_speed_min;
    let max = state.tuning.enemy_speed_max;

    let roll = state.rng.random::<f32>();
    let (size, speed, health, mut kind) = match variant_for_roll(roll) {
        EnemyTag::Basic => (
            state.rng.random_range(28.0..=56.0) * state.size_boost,
            state.rng.random_range(min..max),
            1.0,
            EnemyKind::Basic,
        ),
        EnemyTag::Zigzag => (
            state.rng.random_range(24.0..=48.0),
            state.rng.random_range(min * 0.9..max * 1.1),
            1.0,
            EnemyKind::Zigzag {
                // Anchored to the actual spawn column below
                spawn_x: 0.0,
                elapsed: 0.0,
                amplitude: state.rng.random_range(40.0..=110.0),
                frequency: state.rng.random_range(0.4..1.6),
            },
        ),
        EnemyTag::Shooter => {
            // Shooters fire faster at higher levels, floored at 0.7s
            let interval = (1.2 - state.level as f32 * 0.05).max(0.7);
            (
                state.rng.random_range(28.0..=56.0),
                state.rng.random_range(min * 0.6..min * 1.2),
                2.0,
                EnemyKind::Shooter {
                    interval,
                    // Random phase so a wave of shooters doesn't volley in sync
                    timer: state.rng.random_range(0.0..interval),
                },
            )
        }
        EnemyTag::Kamikaze => (
            state.rng.random_range(20.0..=36.0),
            state.rng.random_range(min * 1.2..max * 1.7),
            1.0,
            EnemyKind::Kamikaze,
        ),
        EnemyTag::Shielded => (
            state.rng.random_range(36.0..=64.0),
            state.rng.random_range(min * 0.6..max * 0.9),
            3.0,
            EnemyKind::Shielded,
        ),
    };

    let speed = speed * state.speed_boost;
    let x = state.rng.random_range(0.0..(FIELD_WIDTH - size).max(1.0));
    if let EnemyKind::Zigzag { spawn_x, .. } = &mut kind {
        *spawn_x = x;
    }

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        // Just above the visible field
        pos: Vec2::new(x, -size),
        size,
        speed,
        health,
        kind,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_variant_bands() {
        assert_eq!(variant_for_roll(0.0), EnemyTag::Basic);
        assert_eq!(variant_for_roll(0.44), EnemyTag::Basic);
        assert_eq!(variant_for_roll(0.45), EnemyTag::Zigzag);
        assert_eq!(variant_for_roll(0.69), EnemyTag::Zigzag);
        assert_eq!(variant_for_roll(0.70), EnemyTag::Shooter);
        assert_eq!(variant_for_roll(0.84), EnemyTag::Shooter);
        assert_eq!(variant_for_roll(0.85), EnemyTag::Kamikaze);
        assert_eq!(variant_for_roll(0.94), EnemyTag::Kamikaze);
        assert_eq!(variant_for_roll(0.95), EnemyTag::Shielded);
        assert_eq!(variant_for_roll(0.999), EnemyTag::Shielded);
    }

    #[test]
    fn test_wave_size_scales_with_level() {
        for (level, expected) in [(1, 1), (2, 2), (3, 2), (4, 3), (7, 4), (10, 6)] {
            let mut state = GameState::new(42, Tuning::default());
            state.level = level;
            spawn_wave(&mut state);
            assert_eq!(state.enemies.len(), expected, "level {level}");
        }
    }

    #[test]
    fn test_spawns_land_above_field_within_bounds() {
        let mut state = GameState::new(42, Tuning::default());
        state.level = 20; // large wave
        spawn_wave(&mut state);
        for e in &state.enemies {
            assert_eq!(e.pos.y, -e.size);
            assert!(e.pos.x >= 0.0);
            assert!(e.pos.x + e.size <= FIELD_WIDTH);
            assert!(e.speed > 0.0);
            assert!(e.health > 0.0);
        }
    }

    #[test]
    fn test_variant_payloads_well_formed() {
        // Spawn a lot so every band gets hit
        let mut state = GameState::new(7, Tuning::default());
        for _ in 0..300 {
            spawn_enemy(&mut state);
        }
        let mut seen = [false; 5];
        for e in &state.enemies {
            match &e.kind {
                EnemyKind::Basic => {
                    seen[0] = true;
                    assert_eq!(e.health, 1.0);
                }
                EnemyKind::Zigzag {
                    spawn_x,
                    elapsed,
                    amplitude,
                    frequency,
                } => {
                    seen[1] = true;
                    assert_eq!(*spawn_x, e.pos.x);
                    assert_eq!(*elapsed, 0.0);
                    assert!((40.0..=110.0).contains(amplitude));
                    assert!((0.4..1.6).contains(frequency));
                }
                EnemyKind::Shooter { interval, timer } => {
                    seen[2] = true;
                    assert_eq!(e.health, 2.0);
                    assert!((1.2 - 0.05..=1.2).contains(interval));
                    assert!(*timer >= 0.0 && timer < interval);
                }
                EnemyKind::Kamikaze => {
                    seen[3] = true;
                    assert!((20.0..=36.0).contains(&e.size));
                }
                EnemyKind::Shielded => {
                    seen[4] = true;
                    assert_eq!(e.health, 3.0);
                }
            }
        }
        assert!(seen.iter().all(|&s| s), "all variants sampled: {seen:?}");
    }

    #[test]
    fn test_boosts_scale_speed_and_basic_size() {
        let tuning = Tuning::default();
        let mut plain = GameState::new(9, tuning.clone());
        let mut boosted = GameState::new(9, tuning);
        boosted.size_boost = 2.0;
        boosted.speed_boost = 2.0;

        for _ in 0..50 {
            spawn_enemy(&mut plain);
            spawn_enemy(&mut boosted);
        }
        // Same seed, same rolls: entities pair up one to one
        for (a, b) in plain.enemies.iter().zip(&boosted.enemies) {
            assert_eq!(a.kind.tag(), b.kind.tag());
            assert!((b.speed - a.speed * 2.0).abs() < 0.001);
            if a.kind == EnemyKind::Basic {
                assert!((b.size - a.size * 2.0).abs() < 0.001);
            }
        }
    }

    #[test]
    fn test_shooter_interval_floors_at_high_level() {
        let mut state = GameState::new(3, Tuning::default());
        state.level = 50;
        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        for e in &state.enemies {
            if let EnemyKind::Shooter { interval, .. } = e.kind {
                assert_eq!(interval, 0.7);
            }
        }
    }
}
