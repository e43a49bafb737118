//! The player's avatar and its fixed-timestep physics

use glam::Vec2;

use super::collision::Rect;

/// The falling avatar. Horizontal position never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick (positive is down)
    pub vel: f32,
    /// Bounding box side length
    pub size: f32,
}

impl Avatar {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: 0.0,
            size,
        }
    }

    /// One tick of free fall: accelerate, then move
    pub fn step(&mut self, gravity: f32) {
        self.vel += gravity;
        self.integrate();
    }

    /// Move by the current velocity without accelerating
    pub fn integrate(&mut self) {
        self.pos.y += self.vel;
    }

    /// Replace the velocity with the jump velocity (no accumulation)
    pub fn apply_impulse(&mut self, jump_velocity: f32) {
        self.vel = jump_velocity;
    }

    /// Hit box used for every collision test
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Centre of the drawn circle
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}
