//! Game state and core simulation types
//!
//! Everything a round needs lives in one `GameState` owned by the caller.

use super::avatar::Avatar;
use super::collision::Rect;
use super::spawner::ObstacleGenerator;
use crate::color::Color;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen until unpaused
    Paused,
    /// Round ended, waiting for restart or quit
    GameOver,
}

/// Things that happened during a tick, for sound cues and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A jump impulse was applied
    Jumped,
    /// The avatar hit a barrier or left the field
    Collided,
    /// A bonus item was collected
    BonusCollected,
    /// A gate scrolled off the left edge and was replaced
    ObstaclePassed,
    /// The active difficulty tier changed
    TierChanged { tier: usize },
    /// The round ended with this score
    RoundOver { score: u64 },
}

/// A gate: two barriers sharing one horizontal position, with a gap between
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Bottom edge of the upper barrier
    pub gap_top: f32,
    /// Top edge of the lower barrier
    pub gap_bottom: f32,
    /// Field height (the lower barrier reaches at least this far)
    pub floor: f32,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, gap_center: f32, gap_size: f32, floor: f32) -> Self {
        let gap_size = gap_size.max(0.0);
        Self {
            x,
            width,
            gap_top: gap_center - gap_size / 2.0,
            gap_bottom: gap_center + gap_size / 2.0,
            floor,
        }
    }

    /// Barrier hanging from the top of the field
    pub fn upper(&self) -> Rect {
        let top = self.gap_top.min(0.0);
        Rect::new(self.x, top, self.width, self.gap_top - top)
    }

    /// Barrier standing on the bottom of the field
    pub fn lower(&self) -> Rect {
        let bottom = self.floor.max(self.gap_bottom);
        Rect::new(self.x, self.gap_bottom, self.width, bottom - self.gap_bottom)
    }

    pub fn gap(&self) -> f32 {
        self.gap_bottom - self.gap_top
    }

    pub fn gap_center(&self) -> f32 {
        (self.gap_top + self.gap_bottom) / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn scroll(&mut self, dx: f32) {
        self.x -= dx;
    }

    /// Whether either barrier overlaps the given box
    pub fn hits(&self, bounds: &Rect) -> bool {
        self.lower().overlaps(bounds) || self.upper().overlaps(bounds)
    }
}

/// Collectible square inside a gate's gap
#[derive(Debug, Clone, PartialEq)]
pub struct BonusItem {
    pub rect: Rect,
}

impl BonusItem {
    pub fn scroll(&mut self, dx: f32) {
        self.rect.translate_x(-dx);
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Balance parameters for this run
    pub tuning: Tuning,
    /// Current phase
    pub phase: RoundPhase,
    /// Score
    pub score: u64,
    /// Index of the active difficulty tier
    pub tier_index: usize,
    /// Live scroll speed from the active tier
    pub scroll_speed: f32,
    /// Gap size used for the next spawned gate
    pub gap_size: f32,
    /// Live gravity (base gravity scaled by the tier)
    pub gravity: f32,
    /// Background tint from the active tier
    pub background: Color,
    /// Simulation tick counter for the current round
    pub time_ticks: u64,
    /// Player avatar
    pub avatar: Avatar,
    /// Gates, oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
    /// Uncollected bonus items
    pub bonuses: Vec<BonusItem>,
    /// Gate generator (its stream continues across restarts)
    spawner: ObstacleGenerator,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_generator(tuning, ObstacleGenerator::new(seed))
    }

    /// Create a game state around an injected generator
    pub fn with_generator(tuning: Tuning, spawner: ObstacleGenerator) -> Self {
        let lowest = *tuning.difficulty.lowest();
        let avatar = Avatar::new(tuning.avatar_x, tuning.avatar_start_y, tuning.avatar_size);
        let mut state = Self {
            phase: RoundPhase::Playing,
            score: 0,
            tier_index: 0,
            scroll_speed: lowest.scroll_speed,
            gap_size: lowest.gap_size,
            gravity: tuning.gravity * lowest.gravity_scale,
            background: lowest.background,
            time_ticks: 0,
            avatar,
            obstacles: Vec::new(),
            bonuses: Vec::new(),
            spawner,
            tuning,
        };
        state.reset();
        state
    }

    /// Start a fresh round: one new gate, no bonuses, lowest tier, score 0
    pub fn reset(&mut self) {
        let tuning = &self.tuning;
        let lowest = *tuning.difficulty.lowest();

        self.avatar = Avatar::new(tuning.avatar_x, tuning.avatar_start_y, tuning.avatar_size);
        self.score = 0;
        self.time_ticks = 0;
        self.apply_tier(0, &lowest);
        self.obstacles.clear();
        self.bonuses.clear();

        // A bonus rolled for the opening gate is discarded: rounds start clean
        let spawn = self.spawner.spawn(&self.tuning, self.gap_size);
        self.obstacles.push(spawn.obstacle);

        self.phase = RoundPhase::Playing;
    }

    /// Spawn a gate (and maybe a bonus) at the right edge
    pub fn spawn_obstacle(&mut self) {
        let spawn = self.spawner.spawn(&self.tuning, self.gap_size);
        self.obstacles.push(spawn.obstacle);
        if let Some(bonus) = spawn.bonus {
            self.bonuses.push(bonus);
        }
    }

    /// Copy live parameters from a tier
    pub(crate) fn apply_tier(&mut self, index: usize, tier: &super::DifficultyTier) {
        self.tier_index = index;
        self.scroll_speed = tier.scroll_speed;
        self.gap_size = tier.gap_size;
        self.gravity = self.tuning.gravity * tier.gravity_scale;
        self.background = tier.background;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RoundPhase::Playing
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }
}
