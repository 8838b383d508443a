//! Imba Shooter - simulation core for a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement/AI, collisions, progression)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio and input polling are external collaborators: each frame
//! they feed a `sim::TickInput` in and consume the `sim::Snapshot` the core
//! emits back out.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Visible field dimensions in pixels
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player sprite bounds
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Bullet radii (hostile bullets render slightly fatter)
    pub const FRIENDLY_BULLET_RADIUS: f32 = 4.0;
    pub const HOSTILE_BULLET_RADIUS: f32 = 5.0;

    /// How long the HUD shows the "LEVEL UP!" banner (ms)
    pub const LEVEL_UP_DURATION_MS: u64 = 2000;

    /// Maximum live cosmetic particles
    pub const MAX_PARTICLES: usize = 256;
}
