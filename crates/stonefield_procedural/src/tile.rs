//! # Tiles
//!
//! A tile is one lattice cell: a kind plus the grid coordinate it was
//! classified at. Classification turns a noise value into a kind.

use serde::{Deserialize, Serialize};

use crate::seed::WorldSeed;

/// Tile material.
///
/// `Empty` is the only non-solid kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TileKind {
    /// Air.
    #[default]
    Empty = 0,
    /// Solid stone.
    Stone = 1,
    /// Solid grass.
    Grass = 2,
}

impl TileKind {
    /// Returns true for every kind except `Empty`.
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Numeric id, used as the atlas column.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// One classified cell.
///
/// The coordinate is informational; lookups always go through the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile {
    kind: TileKind,
    x: u32,
    y: u32,
    z: u32,
}

impl Tile {
    /// Creates a tile.
    #[inline]
    #[must_use]
    pub const fn new(kind: TileKind, x: u32, y: u32, z: u32) -> Self {
        Self { kind, x, y, z }
    }

    /// The tile's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Grid coordinate recorded at classification time.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }

    /// Shorthand for `kind().is_solid()`.
    #[inline]
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        self.kind.is_solid()
    }
}

/// How solid cells pick their kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TilePolicy {
    /// Every solid cell is stone.
    #[default]
    StoneOnly,
    /// A seeded fraction of solid cells are grass, the rest stone.
    SeededMix {
        /// Fraction of solid cells that become grass, in `[0, 1]`.
        grass_ratio: f32,
    },
}

/// Maps noise values to tile kinds.
///
/// A value strictly above `threshold` is empty; anything at or below it is
/// solid. Raising the threshold can only add solid cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileClassifier {
    threshold: f32,
    policy: TilePolicy,
    seed: WorldSeed,
}

impl TileClassifier {
    /// Classifier that produces only stone and empty cells.
    #[must_use]
    pub const fn stone(threshold: f32) -> Self {
        Self::new(threshold, TilePolicy::StoneOnly, WorldSeed::new(0))
    }

    /// Creates a classifier with an explicit policy.
    ///
    /// `seed` only matters for [`TilePolicy::SeededMix`].
    #[must_use]
    pub const fn new(threshold: f32, policy: TilePolicy, seed: WorldSeed) -> Self {
        Self {
            threshold,
            policy,
            seed,
        }
    }

    /// The solid/empty cut-off.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    /// The kind policy.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> TilePolicy {
        self.policy
    }

    /// Kind of the cell at `(x, y, z)` holding `value`.
    #[must_use]
    pub fn classify(&self, value: f32, x: u32, y: u32, z: u32) -> TileKind {
        if value > self.threshold {
            return TileKind::Empty;
        }

        match self.policy {
            TilePolicy::StoneOnly => TileKind::Stone,
            TilePolicy::SeededMix { grass_ratio } => {
                let roll = self.seed.derive(cell_key(x, y, z)).unit();
                if roll < f64::from(grass_ratio) {
                    TileKind::Grass
                } else {
                    TileKind::Stone
                }
            }
        }
    }
}

/// Packs a cell coordinate into a seed purpose.
#[inline]
const fn cell_key(x: u32, y: u32, z: u32) -> u64 {
    let mut key = x as u64;
    key = key.wrapping_mul(0x0000_0100_0000_01b3) ^ y as u64;
    key = key.wrapping_mul(0x0000_0100_0000_01b3) ^ z as u64;
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        let classifier = TileClassifier::stone(0.5);
        assert_eq!(classifier.classify(0.5, 0, 0, 0), TileKind::Stone);
        assert_eq!(classifier.classify(0.4999, 0, 0, 0), TileKind::Stone);
        assert_eq!(classifier.classify(0.5001, 0, 0, 0), TileKind::Empty);
        assert_eq!(classifier.classify(0.0, 0, 0, 0), TileKind::Stone);
        assert_eq!(classifier.classify(1.0, 0, 0, 0), TileKind::Empty);
    }

    #[test]
    fn test_extreme_thresholds() {
        for value in [0.0, 0.25, 0.75, 1.0] {
            assert!(TileClassifier::stone(1.0).classify(value, 1, 2, 3).is_solid());
        }
        assert!(TileClassifier::stone(-0.1).classify(0.0, 0, 0, 0) == TileKind::Empty);
    }

    #[test]
    fn test_kind_ids() {
        assert_eq!(TileKind::Empty.id(), 0);
        assert_eq!(TileKind::Stone.id(), 1);
        assert_eq!(TileKind::Grass.id(), 2);
        assert!(!TileKind::Empty.is_solid());
        assert!(TileKind::Stone.is_solid());
        assert!(TileKind::Grass.is_solid());
        assert_eq!(TileKind::default(), TileKind::Empty);
    }

    #[test]
    fn test_seeded_mix_is_deterministic() {
        let policy = TilePolicy::SeededMix { grass_ratio: 0.5 };
        let a = TileClassifier::new(0.5, policy, WorldSeed::new(77));
        let b = TileClassifier::new(0.5, policy, WorldSeed::new(77));

        let mut grass = 0;
        let mut stone = 0;
        for x in 0..16 {
            for z in 0..16 {
                let kind = a.classify(0.2, x, 3, z);
                assert_eq!(kind, b.classify(0.2, x, 3, z));
                match kind {
                    TileKind::Grass => grass += 1,
                    TileKind::Stone => stone += 1,
                    TileKind::Empty => panic!("solid value classified as empty"),
                }
            }
        }
        assert!(grass > 0 && stone > 0, "A 0.5 ratio should produce both kinds");
    }

    #[test]
    fn test_seeded_mix_extremes() {
        let all_grass = TileClassifier::new(0.5, TilePolicy::SeededMix { grass_ratio: 1.0 }, WorldSeed::new(3));
        let no_grass = TileClassifier::new(0.5, TilePolicy::SeededMix { grass_ratio: 0.0 }, WorldSeed::new(3));
        for x in 0..8 {
            assert_eq!(all_grass.classify(0.1, x, 0, 0), TileKind::Grass);
            assert_eq!(no_grass.classify(0.1, x, 0, 0), TileKind::Stone);
            assert_eq!(all_grass.classify(0.9, x, 0, 0), TileKind::Empty);
        }
    }

    #[test]
    fn test_tile_accessors() {
        let tile = Tile::new(TileKind::Grass, 4, 5, 6);
        assert_eq!(tile.kind(), TileKind::Grass);
        assert_eq!(tile.coord(), [4, 5, 6]);
        assert!(tile.is_solid());
    }
}
