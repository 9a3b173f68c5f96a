//! Dodge Jump - an endless-runner jump game for the browser canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, spawning, collisions)
//! - `renderer`: Draw surface abstraction, Canvas 2D backend, HUD overlays
//! - `game`: Controller owning the state, stepped by the host each frame
//! - `platform`: Frame clock and manual stepper for headless drivers
//! - `settings`: Difficulty presets and page configuration

pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Activation, Game};
pub use highscores::HighScores;
pub use settings::{Difficulty, DifficultyPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one 60 Hz display frame)
    pub const STEP_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Host frame gaps longer than this are clamped (tab switches, debugger)
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Slack when comparing the accumulator to a step (host timestamp rounding)
    pub const STEP_EPSILON_MS: f64 = 1e-3;

    /// Default surface dimensions
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Height above the floor the player drops in from on first load
    pub const PLAYER_DROP_HEIGHT: f32 = 10.0;
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_IMPULSE: f32 = -12.0;

    /// Time between obstacle spawns
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;

    /// Obstacle geometry (half-open ranges)
    pub const OBSTACLE_MIN_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 50.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 20.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 70.0;
    pub const HAZARD_MIN_HEIGHT: f32 = 80.0;
    pub const HAZARD_MAX_HEIGHT: f32 = 120.0;

    /// Hazard obstacles only roll once the score is above this
    pub const HAZARD_MIN_SCORE: u32 = 5;
    pub const HAZARD_CHANCE: f64 = 0.25;
}
