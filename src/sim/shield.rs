//! Shields
//!
//! A shield is only a construction helper: its bit pattern is expanded into
//! `ShieldBit` entities, and those are what live in the registry.

use glam::Vec2;

use super::entity::Entity;
use crate::consts::SHIELD_BIT_SIZE;

/// Bunker outline, row-major, 1 = solid
pub const SHIELD_PATTERN: [[u8; 10]; 10] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 0, 0, 1, 1, 1, 1],
    [1, 1, 1, 0, 0, 0, 0, 1, 1, 1],
    [1, 1, 1, 0, 0, 0, 0, 1, 1, 1],
    [1, 1, 1, 0, 0, 0, 0, 1, 1, 1],
    [1, 1, 1, 0, 0, 0, 0, 1, 1, 1],
];

/// One bunker's worth of bits
#[derive(Debug, Clone)]
pub struct Shield {
    pub bits: Vec<Entity>,
}

impl Shield {
    /// Standard bunker centered on `center`
    pub fn new(center: Vec2) -> Self {
        Self::with_pattern(center, &SHIELD_PATTERN)
    }

    /// Expand a pattern around `center`, one bit per solid cell
    pub fn with_pattern(center: Vec2, pattern: &[[u8; 10]; 10]) -> Self {
        let bit = Vec2::splat(SHIELD_BIT_SIZE);
        let extent = Vec2::new(pattern[0].len() as f32, pattern.len() as f32) * bit;
        let origin = center - bit / 2.0 - extent / 2.0;

        let bits = pattern
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells.iter().enumerate().filter_map(move |(col, &cell)| {
                    (cell == 1).then(|| {
                        Entity::shield_bit(origin + Vec2::new(col as f32, row as f32) * bit)
                    })
                })
            })
            .collect();

        Self { bits }
    }

    pub fn into_bits(self) -> Vec<Entity> {
        self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_pattern_bit_count() {
        let ones: usize = SHIELD_PATTERN
            .iter()
            .map(|row| row.iter().filter(|&&c| c == 1).count())
            .sum();
        let shield = Shield::new(Vec2::new(150.0, 260.0));
        assert_eq!(ones, 82);
        assert_eq!(shield.bits.len(), ones);
    }

    #[test]
    fn test_bit_offsets() {
        let mut pattern = [[0u8; 10]; 10];
        pattern[0][0] = 1;
        pattern[9][9] = 1;
        pattern[2][5] = 1;

        let shield = Shield::with_pattern(Vec2::new(100.0, 200.0), &pattern);
        let centers: Vec<_> = shield.into_bits().iter().map(|b| b.center).collect();

        // origin = center - 1.5 - 15
        assert_eq!(
            centers,
            vec![
                Vec2::new(83.5, 183.5),
                Vec2::new(98.5, 189.5),
                Vec2::new(110.5, 210.5),
            ]
        );
    }

    #[test]
    fn test_empty_pattern() {
        let shield = Shield::with_pattern(Vec2::new(100.0, 200.0), &[[0; 10]; 10]);
        assert!(shield.bits.is_empty());
    }
}
