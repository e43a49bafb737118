//! Gate and bonus generation
//!
//! All randomness in the simulation comes from the seeded generator here, so a
//! seed fully determines the sequence of gates.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::state::{BonusItem, Obstacle};
use crate::tuning::Tuning;

/// Result of one spawn
#[derive(Debug, Clone, PartialEq)]
pub struct Spawn {
    pub obstacle: Obstacle,
    pub bonus: Option<BonusItem>,
}

/// Seeded source of gates
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleGenerator {
    rng: Pcg32,
}

impl ObstacleGenerator {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(Pcg32::seed_from_u64(seed))
    }

    pub fn from_rng(rng: Pcg32) -> Self {
        Self { rng }
    }

    /// Produce a gate at the right edge of the field with the given gap.
    ///
    /// Always draws exactly two values (gap centre, bonus roll) so the stream
    /// does not depend on whether a bonus appeared.
    pub fn spawn(&mut self, tuning: &Tuning, gap_size: f32) -> Spawn {
        // Whole-pixel centres keep the barrier edges exact for whole gaps
        let lo = tuning.gap_margin.ceil() as i32;
        let hi = (tuning.field_height - tuning.gap_margin).floor() as i32;
        let drawn = self.rng.random_range(0..=hi.max(lo) - lo);
        let center = if lo <= hi {
            (lo + drawn) as f32
        } else {
            tuning.field_height / 2.0
        };

        let obstacle = Obstacle::new(
            tuning.field_width,
            tuning.obstacle_width,
            center,
            gap_size,
            tuning.field_height,
        );

        let roll: f64 = self.rng.random();
        let bonus = (roll < tuning.bonus_probability()).then(|| {
            let size = tuning.bonus_size;
            BonusItem {
                rect: Rect::new(
                    obstacle.x + obstacle.width / 2.0 - size / 2.0,
                    center - size / 2.0,
                    size,
                    size,
                ),
            }
        });

        Spawn { obstacle, bonus }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_seed_same_gates() {
        let tuning = Tuning::default();
        let mut a = ObstacleGenerator::new(1234);
        let mut b = ObstacleGenerator::new(1234);
        for _ in 0..20 {
            assert_eq!(a.spawn(&tuning, 160.0), b.spawn(&tuning, 160.0));
        }
    }

    #[test]
    fn test_injected_rng() {
        let tuning = Tuning::default();
        let mut a = ObstacleGenerator::from_rng(Pcg32::seed_from_u64(9));
        let mut b = ObstacleGenerator::new(9);
        assert_eq!(a.spawn(&tuning, 120.0), b.spawn(&tuning, 120.0));
    }

    #[test]
    fn test_spawn_position() {
        let tuning = Tuning::default();
        let mut generator = ObstacleGenerator::new(5);
        let spawn = generator.spawn(&tuning, 140.0);
        assert_eq!(spawn.obstacle.x, tuning.field_width);
        assert_eq!(spawn.obstacle.width, tuning.obstacle_width);
        let center = spawn.obstacle.gap_center();
        assert!((150.0..=450.0).contains(&center));
    }

    #[test]
    fn test_bonus_always_and_never() {
        let mut always = Tuning::default();
        always.bonus_chance = 1.0;
        let mut never = Tuning::default();
        never.bonus_chance = 0.0;

        let mut generator = ObstacleGenerator::new(77);
        for _ in 0..10 {
            let spawn = generator.spawn(&always, 160.0);
            let bonus = spawn.bonus.expect("bonus chance is 1");
            // Centred on the gate horizontally and on the gap vertically
            let center = bonus.rect.center();
            assert!((center.x - (spawn.obstacle.x + spawn.obstacle.width / 2.0)).abs() < 1e-3);
            assert!((center.y - spawn.obstacle.gap_center()).abs() < 1e-3);
            assert_eq!(bonus.rect.size.x, always.bonus_size);

            assert!(generator.spawn(&never, 160.0).bonus.is_none());
        }
    }

    #[test]
    fn test_bonus_rate_roughly_thirty_percent() {
        let tuning = Tuning::default();
        let mut generator = ObstacleGenerator::new(2024);
        let hits = (0..2000)
            .filter(|_| generator.spawn(&tuning, 160.0).bonus.is_some())
            .count();
        assert!((450..=750).contains(&hits), "got {hits} bonuses out of 2000");
    }

    #[test]
    fn test_default_tier_gaps_exact() {
        let tuning = Tuning::default();
        let mut generator = ObstacleGenerator::new(21);
        for gap in [160.0, 140.0, 120.0, 100.0] {
            for _ in 0..1000 {
                let obstacle = generator.spawn(&tuning, gap).obstacle;
                assert_eq!(obstacle.lower().top() - obstacle.upper().bottom(), gap);
                assert!((150.0..=450.0).contains(&obstacle.gap_center()));
            }
        }
    }

    #[test]
    fn test_short_field_uses_midpoint() {
        let mut tuning = Tuning::default();
        tuning.field_height = 200.0;
        let mut generator = ObstacleGenerator::new(3);
        let spawn = generator.spawn(&tuning, 80.0);
        assert_eq!(spawn.obstacle.gap_center(), 100.0);
    }

    proptest! {
        #[test]
        fn prop_gap_is_exact(seed in any::<u64>(), half_px in 0u32..600) {
            let gap = half_px as f32 * 0.5;
            let tuning = Tuning::default();
            let mut generator = ObstacleGenerator::new(seed);
            for _ in 0..20 {
                let spawn = generator.spawn(&tuning, gap);
                let obstacle = &spawn.obstacle;
                prop_assert_eq!(obstacle.lower().top() - obstacle.upper().bottom(), gap);
                prop_assert_eq!(obstacle.gap(), gap);
                prop_assert_eq!(obstacle.gap_center().fract(), 0.0);
                prop_assert!(obstacle.upper().size.y >= 0.0);
                prop_assert!(obstacle.lower().size.y >= 0.0);
            }
        }
    }
}
