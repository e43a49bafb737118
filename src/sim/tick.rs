//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is one
//! frame; nothing here reads the clock.

use super::state::{GameEvent, GameState, RoundPhase};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump presses drained since the last tick
    pub jumps: u32,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    pub fn jump() -> Self {
        Self {
            jumps: 1,
            ..Default::default()
        }
    }
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            RoundPhase::Playing => {
                state.phase = RoundPhase::Paused;
                log::debug!("Paused at tick {}", state.time_ticks);
                return events;
            }
            RoundPhase::Paused => {
                state.phase = RoundPhase::Playing;
                log::debug!("Resumed at tick {}", state.time_ticks);
            }
            RoundPhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != RoundPhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    // 1. Difficulty from the current score
    update_difficulty(state, &mut events);

    // 2-3. Input, then physics. A jump replaces gravity for this tick.
    if input.jumps > 0 {
        for _ in 0..input.jumps {
            state.avatar.apply_impulse(state.tuning.jump_velocity);
            events.push(GameEvent::Jumped);
        }
        state.avatar.integrate();
    } else {
        state.avatar.step(state.gravity);
    }

    let bounds = state.avatar.bounds();
    let speed = state.scroll_speed;

    // 4. Gates: first overlap ends the round, later gates are left untouched
    let mut hit = false;
    for obstacle in &mut state.obstacles {
        obstacle.scroll(speed);
        if obstacle.hits(&bounds) {
            log::debug!("Hit gate at x={:.1}", obstacle.x);
            hit = true;
            break;
        }
    }
    if hit {
        end_round(state, &mut events);
        return events;
    }

    // 5. Bonuses: collect on overlap, drop once fully off-screen
    let bonus_points = state.tuning.bonus_points;
    let mut collected = 0u32;
    state.bonuses.retain_mut(|bonus| {
        bonus.scroll(speed);
        if bonus.rect.overlaps(&bounds) {
            collected += 1;
            return false;
        }
        bonus.rect.right() > 0.0
    });
    for _ in 0..collected {
        state.score += bonus_points;
        events.push(GameEvent::BonusCollected);
    }

    // 6. Recycle the oldest gate once it has left the field
    if state.obstacles.first().is_some_and(|o| o.right() <= 0.0) {
        state.obstacles.remove(0);
        state.spawn_obstacle();
        state.score += state.tuning.obstacle_points;
        events.push(GameEvent::ObstaclePassed);
    }

    // 7. Leaving the field vertically
    let y = state.avatar.pos.y;
    if y < 0.0 || y > state.tuning.field_height {
        log::debug!("Avatar left the field at y={:.1}", y);
        end_round(state, &mut events);
    }

    events
}

fn update_difficulty(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let index = state.tuning.difficulty.tier_index(state.score);
    let tier = *state.tuning.difficulty.tier_for(state.score);
    if index != state.tier_index {
        log::info!(
            "Tier {} reached at score {} (speed {}, gap {})",
            index + 1,
            state.score,
            tier.scroll_speed,
            tier.gap_size
        );
        events.push(GameEvent::TierChanged { tier: index });
    }
    state.apply_tier(index, &tier);
}

fn end_round(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = RoundPhase::GameOver;
    events.push(GameEvent::Collided);
    events.push(GameEvent::RoundOver { score: state.score });
}
