//! Cosmetic particle bursts for hits, explosions and player damage
//!
//! Particles are a side channel: they never collide, never affect gameplay,
//! and are safe to cap or drop. They decay on tick counts with velocities in
//! px/tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Particle;
use crate::consts::MAX_PARTICLES;

/// Downward acceleration per tick on every particle
const GRAVITY_PER_TICK: f32 = 0.1;

/// Burst `count` particles around `pos` with upward-biased velocities and
/// short randomized lifetimes. Oldest particles are dropped past the cap.
pub fn emit(particles: &mut Vec<Particle>, rng: &mut Pcg32, pos: Vec2, color: u32, count: usize) {
    for _ in 0..count {
        particles.push(Particle {
            pos: pos + Vec2::new(rng.random_range(-6.0..=6.0), rng.random_range(-6.0..=6.0)),
            vel: Vec2::new(
                rng.random_range(-150.0..150.0),
                rng.random_range(-300.0..-50.0),
            ) / 60.0,
            life: rng.random_range(18..=36),
            color,
            size: rng.random_range(2i32..=5) as f32,
        });
    }
    if particles.len() > MAX_PARTICLES {
        let excess = particles.len() - MAX_PARTICLES;
        particles.drain(..excess);
    }
}

/// Advance every particle one tick and drop the expired ones
pub fn update(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += GRAVITY_PER_TICK;
        p.life -= 1;
    }
    particles.retain(|p| p.life > 0);
}
