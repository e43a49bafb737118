//! Front ends
//!
//! - `terminal`: native, crossterm half-block rendering
//! - `web`: browser, wgpu canvas plus a DOM HUD

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::presentation::InputEvent;

/// Map a DOM `KeyboardEvent.key` value to game input
pub fn key_to_input(key: &str) -> Option<InputEvent> {
    match key {
        " " | "ArrowUp" | "w" | "W" => Some(InputEvent::JumpPressed),
        "p" | "P" | "Escape" => Some(InputEvent::PauseToggled),
        "m" | "M" => Some(InputEvent::MuteToggled),
        _ => None,
    }
}
