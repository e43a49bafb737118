//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame, no wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (oldest gate first)
//! - No rendering, audio or platform dependencies

pub mod avatar;
pub mod collision;
pub mod difficulty;
pub mod spawner;
pub mod state;
pub mod tick;

pub use avatar::Avatar;
pub use collision::{Rect, circle_rect_overlap, rects_overlap};
pub use difficulty::{DifficultyTable, DifficultyTableError, DifficultyTier};
pub use spawner::{ObstacleGenerator, Spawn};
pub use state::{BonusItem, GameEvent, GameState, Obstacle, RoundPhase};
pub use tick::{TickInput, tick};
