//! Gate Runner - a one-button arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, gates, scoring, difficulty)
//! - `game`: Round flow on top of the simulation (restart, high score, cues)
//! - `presentation`: Draw/input contract consumed by the front ends
//! - `renderer`: WebGPU vertex-batch renderer
//! - `platform`: Terminal (native) and browser front ends
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod color;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod presentation;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use color::Color;
pub use game::{Flow, Game};
pub use highscores::{HighScoreStore, MemoryStore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Avatar defaults (x never changes)
    pub const AVATAR_X: f32 = 80.0;
    pub const AVATAR_START_Y: f32 = 300.0;
    pub const AVATAR_SIZE: f32 = 20.0;

    /// Added to vertical velocity every tick (pixels/tick²)
    pub const GRAVITY: f32 = 3.5;
    /// Velocity set by a jump press (negative is up)
    pub const JUMP_VELOCITY: f32 = -8.0;

    /// Gate defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    /// Gap centres stay this far from the top and bottom edges
    pub const GAP_MARGIN: f32 = 150.0;

    /// Bonus item defaults
    pub const BONUS_SIZE: f32 = 15.0;
    pub const BONUS_CHANCE: f64 = 0.3;
    pub const BONUS_POINTS: u64 = 5;

    /// Points for each gate that scrolls off the left edge
    pub const OBSTACLE_POINTS: u64 = 1;
}
