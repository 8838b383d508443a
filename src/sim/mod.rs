//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;

pub use ai::{WorldContext, advance, on_field};
pub use collision::{Aabb, resolve};
pub use state::{
    Bullet, BulletSpawn, Enemy, EnemyKind, EnemyTag, EnemyView, GameEvent, GamePhase, GameState,
    Hud, Particle, Player, PlayerView, Snapshot, SpriteView, Weapon,
};
pub use tick::{TickInput, level_for, tick};
