//! Data-driven game balance
//!
//! Defaults reproduce the classic feel; any field can be overridden from the
//! settings file.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::DifficultyTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub avatar_x: f32,
    pub avatar_start_y: f32,
    pub avatar_size: f32,
    /// Base gravity per tick, scaled by the active tier
    pub gravity: f32,
    pub jump_velocity: f32,

    pub obstacle_width: f32,
    /// Minimum distance from a gap centre to the top/bottom edge
    pub gap_margin: f32,
    pub obstacle_points: u64,

    pub bonus_size: f32,
    /// Probability that a new gate carries a bonus item
    pub bonus_chance: f64,
    pub bonus_points: u64,

    pub difficulty: DifficultyTable,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            avatar_x: AVATAR_X,
            avatar_start_y: AVATAR_START_Y,
            avatar_size: AVATAR_SIZE,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            obstacle_width: OBSTACLE_WIDTH,
            gap_margin: GAP_MARGIN,
            obstacle_points: OBSTACLE_POINTS,
            bonus_size: BONUS_SIZE,
            bonus_chance: BONUS_CHANCE,
            bonus_points: BONUS_POINTS,
            difficulty: DifficultyTable::default(),
        }
    }
}

impl Tuning {
    /// Bonus chance clamped into a valid probability
    pub fn bonus_probability(&self) -> f64 {
        if self.bonus_chance.is_nan() {
            0.0
        } else {
            self.bonus_chance.clamp(0.0, 1.0)
        }
    }
}
