//! Colours shared by the simulation (tier tints) and the front ends

use serde::{Deserialize, Serialize};

/// 8-bit sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA for GPU vertices
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// Game palette
pub mod palette {
    use super::Color;

    pub const SKY: Color = Color::rgb(135, 206, 235);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const LIGHT_PINK: Color = Color::rgb(255, 182, 193);
    pub const LIGHT_GREEN: Color = Color::rgb(144, 238, 144);

    pub const BARRIER: Color = Color::rgb(0, 200, 0);
    pub const BONUS: Color = Color::rgb(255, 255, 0);
    pub const AVATAR: Color = Color::rgb(255, 255, 0);
    pub const TEXT: Color = Color::rgb(255, 255, 255);
}
