//! Data-driven game balance
//!
//! Every knob here can be overridden from a JSON file (see [`Tuning::load`]);
//! the defaults are the shipped balance.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Gameplay balance values. Speeds are px/sec, intervals are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement speed
    pub player_speed: f32,
    /// Base bullet speed; weapons and enemy shooters scale off this
    pub bullet_speed: f32,
    /// Enemy speed range before variant scaling and difficulty boosts
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    /// Interval between enemy spawn waves
    pub spawn_interval_ms: f32,
    /// Player health ceiling (heals and the starting value derive from it)
    pub player_max_health: i32,
    /// Additive difficulty steps applied on every level-up
    pub size_boost_step: f32,
    pub speed_boost_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 350.0,
            bullet_speed: 700.0,
            enemy_speed_min: 60.0,
            enemy_speed_max: 140.0,
            spawn_interval_ms: 900.0,
            player_max_health: 10,
            size_boost_step: 0.12,
            speed_boost_step: 0.18,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file. Missing fields fall back to defaults,
    /// so a file can override a single knob.
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path).map_err(TuningError::Io)?;
        serde_json::from_str(&text).map_err(TuningError::Parse)
    }
}

/// Failure to read or parse a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "failed to parse tuning file: {e}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
        }
    }
}
