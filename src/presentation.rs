//! Presentation contract
//!
//! The game draws through `Presenter` and reads input from it; front ends
//! (terminal, browser, test recorders) implement it. All coordinates are in
//! field space: origin top-left, y down, `field_width` x `field_height`.

use glam::Vec2;

use crate::color::{Color, palette};
use crate::sim::{GameState, Rect, RoundPhase};

/// Input delivered by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed or quit key
    Quit,
    /// Jump (also restarts after game over)
    JumpPressed,
    /// Pause toggle
    PauseToggled,
    /// Sound on/off
    MuteToggled,
}

/// Drawing, input and pacing provided by a front end
pub trait Presenter {
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Draw text with its top-left corner at `position`
    fn draw_text(&mut self, text: &str, position: Vec2, color: Color);
    /// Show everything drawn since the last call
    fn present_frame(&mut self);
    /// Drain pending input without blocking
    fn poll_events(&mut self) -> Vec<InputEvent>;
    /// Wait out the rest of the frame at the target rate
    fn tick_delay(&mut self, target_hz: u32);
}

/// Approximate glyph advance used to centre text
pub const GLYPH_WIDTH: f32 = 10.0;

/// Draw the whole frame for the current state
pub fn render_frame<P: Presenter + ?Sized>(state: &GameState, high_score: u64, presenter: &mut P) {
    let tuning = &state.tuning;
    let field = Rect::new(0.0, 0.0, tuning.field_width, tuning.field_height);

    if state.phase == RoundPhase::GameOver {
        render_game_over(state.score, high_score, field, presenter);
        return;
    }

    presenter.draw_rect(field, state.background);

    for obstacle in &state.obstacles {
        presenter.draw_rect(obstacle.upper(), palette::BARRIER);
        presenter.draw_rect(obstacle.lower(), palette::BARRIER);
    }
    for bonus in &state.bonuses {
        presenter.draw_rect(bonus.rect, palette::BONUS);
    }

    let avatar = &state.avatar;
    presenter.draw_circle(avatar.center(), avatar.radius(), palette::AVATAR);

    presenter.draw_text(
        &format!("Score: {}", state.score),
        Vec2::new(10.0, 10.0),
        palette::TEXT,
    );
    presenter.draw_text(
        &format!("Level: {}", state.tier_index + 1),
        Vec2::new(10.0, 50.0),
        palette::TEXT,
    );
    presenter.draw_text(
        &format!("Best: {}", high_score.max(state.score)),
        Vec2::new(10.0, 90.0),
        palette::TEXT,
    );

    if state.phase == RoundPhase::Paused {
        centered_text(presenter, "Paused", field, field.center().y);
    }
}

fn render_game_over<P: Presenter + ?Sized>(score: u64, high_score: u64, field: Rect, presenter: &mut P) {
    presenter.draw_rect(field, palette::SKY);
    let mid = field.center().y;
    centered_text(presenter, "Game Over", field, mid - 80.0);
    centered_text(presenter, &format!("Final Score: {score}"), field, mid - 30.0);
    centered_text(presenter, &format!("High Score: {high_score}"), field, mid + 10.0);
    centered_text(presenter, "Press SPACE to Restart", field, mid + 50.0);
}

fn centered_text<P: Presenter + ?Sized>(presenter: &mut P, text: &str, field: Rect, y: f32) {
    let width = text.chars().count() as f32 * GLYPH_WIDTH;
    let x = (field.center().x - width / 2.0).max(0.0);
    presenter.draw_text(text, Vec2::new(x, y), palette::TEXT);
}
