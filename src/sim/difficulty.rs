//! Score-driven difficulty tiers
//!
//! Tiers are ordered by threshold; the active tier is the last one whose
//! threshold the score has reached.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Color, palette};

/// One difficulty bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    /// Score at which this tier becomes active
    pub threshold: u64,
    /// Horizontal pixels per tick for gates and bonuses
    pub scroll_speed: f32,
    /// Vertical clearance of newly spawned gates
    pub gap_size: f32,
    /// Multiplier on the base gravity
    #[serde(default = "default_gravity_scale")]
    pub gravity_scale: f32,
    /// Background tint
    pub background: Color,
}

fn default_gravity_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DifficultyTableError {
    #[error("difficulty table has no tiers")]
    Empty,
    #[error("first tier threshold must be 0, got {0}")]
    FirstThreshold(u64),
    #[error("tier {index} threshold {threshold} does not exceed the previous tier")]
    NotAscending { index: usize, threshold: u64 },
    #[error("tier {0} has a negative gap size or scroll speed")]
    NegativeValue(usize),
}

/// Validated, immutable list of tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DifficultyTier>", into = "Vec<DifficultyTier>")]
pub struct DifficultyTable {
    tiers: Vec<DifficultyTier>,
}

impl DifficultyTable {
    pub fn new(tiers: Vec<DifficultyTier>) -> Result<Self, DifficultyTableError> {
        let first = tiers.first().ok_or(DifficultyTableError::Empty)?;
        if first.threshold != 0 {
            return Err(DifficultyTableError::FirstThreshold(first.threshold));
        }
        for (index, tier) in tiers.iter().enumerate() {
            if tier.gap_size < 0.0 || tier.scroll_speed < 0.0 {
                return Err(DifficultyTableError::NegativeValue(index));
            }
            if index > 0 && tier.threshold <= tiers[index - 1].threshold {
                return Err(DifficultyTableError::NotAscending {
                    index,
                    threshold: tier.threshold,
                });
            }
        }
        Ok(Self { tiers })
    }

    /// Index of the highest tier whose threshold is <= score
    pub fn tier_index(&self, score: u64) -> usize {
        // Tier 0 always matches since its threshold is 0
        self.tiers
            .iter()
            .rposition(|t| t.threshold <= score)
            .unwrap_or(0)
    }

    pub fn tier_for(&self, score: u64) -> &DifficultyTier {
        &self.tiers[self.tier_index(score)]
    }

    /// The starting tier
    pub fn lowest(&self) -> &DifficultyTier {
        &self.tiers[0]
    }

    pub fn tiers(&self) -> &[DifficultyTier] {
        &self.tiers
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        let tier = |threshold, scroll_speed, gap_size, background| DifficultyTier {
            threshold,
            scroll_speed,
            gap_size,
            gravity_scale: 1.0,
            background,
        };
        Self {
            tiers: vec![
                tier(0, 4.0, 160.0, palette::SKY),
                tier(5, 5.0, 140.0, palette::LIGHT_BLUE),
                tier(10, 6.0, 120.0, palette::LIGHT_PINK),
                tier(15, 7.0, 100.0, palette::LIGHT_GREEN),
            ],
        }
    }
}

impl TryFrom<Vec<DifficultyTier>> for DifficultyTable {
    type Error = DifficultyTableError;

    fn try_from(tiers: Vec<DifficultyTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<DifficultyTable> for Vec<DifficultyTier> {
    fn from(table: DifficultyTable) -> Self {
        table.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_table_lookup() {
        let table = DifficultyTable::default();
        assert_eq!(table.tier_index(0), 0);
        assert_eq!(table.tier_index(4), 0);
        assert_eq!(table.tier_index(5), 1);
        assert_eq!(table.tier_index(14), 2);
        assert_eq!(table.tier_index(15), 3);
        assert_eq!(table.tier_index(10_000), 3);

        let tier = table.tier_for(7);
        assert_eq!(tier.scroll_speed, 5.0);
        assert_eq!(tier.gap_size, 140.0);
        assert_eq!(tier.background, palette::LIGHT_BLUE);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            DifficultyTable::new(Vec::new()),
            Err(DifficultyTableError::Empty)
        );

        let mut tiers = DifficultyTable::default().tiers().to_vec();
        tiers[0].threshold = 1;
        assert_eq!(
            DifficultyTable::new(tiers),
            Err(DifficultyTableError::FirstThreshold(1))
        );

        let mut tiers = DifficultyTable::default().tiers().to_vec();
        tiers[2].threshold = 5;
        assert_eq!(
            DifficultyTable::new(tiers),
            Err(DifficultyTableError::NotAscending {
                index: 2,
                threshold: 5
            })
        );

        let mut tiers = DifficultyTable::default().tiers().to_vec();
        tiers[3].gap_size = -1.0;
        assert_eq!(
            DifficultyTable::new(tiers),
            Err(DifficultyTableError::NegativeValue(3))
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[{"threshold":3,"scroll_speed":4.0,"gap_size":100.0,"background":{"r":0,"g":0,"b":0}}]"#;
        assert!(serde_json::from_str::<DifficultyTable>(json).is_err());

        let json = r#"[{"threshold":0,"scroll_speed":4.0,"gap_size":100.0,"background":{"r":0,"g":0,"b":0}}]"#;
        let table: DifficultyTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.tiers().len(), 1);
        assert_eq!(table.lowest().gravity_scale, 1.0);
    }

    proptest! {
        #[test]
        fn prop_tier_index_monotonic(a in 0u64..1000, b in 0u64..1000) {
            let table = DifficultyTable::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(table.tier_index(lo) <= table.tier_index(hi));
        }

        #[test]
        fn prop_tier_threshold_reached(score in 0u64..1000) {
            let table = DifficultyTable::default();
            let index = table.tier_index(score);
            prop_assert!(table.tiers()[index].threshold <= score);
            if let Some(next) = table.tiers().get(index + 1) {
                prop_assert!(next.threshold > score);
            }
        }
    }
}
