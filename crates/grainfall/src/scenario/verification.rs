//! Verification conditions checked against the world after a run

use grainfall_core::prelude::{MaterialKind, World};
use serde::{Deserialize, Serialize};

/// Conditions that can be verified against world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerificationCondition {
    /// Assert the material at a specific cell
    MaterialAt {
        x: i32,
        y: i32,
        material: MaterialKind,
    },

    /// Assert a cell's structural stability flag
    Stable { x: i32, y: i32, expected: bool },

    /// Assert at least `count` cells of a material anywhere
    CountAtLeast { material: MaterialKind, count: usize },

    /// Assert every cell of an inclusive rectangle is air
    RegionEmpty { x0: i32, y0: i32, x1: i32, y1: i32 },
}

/// Result of a verification check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
}

impl VerificationCondition {
    /// Evaluate condition against world state
    pub fn evaluate(&self, world: &World) -> VerificationResult {
        match *self {
            VerificationCondition::MaterialAt { x, y, material } => {
                let actual = world.get_cell(x, y).map(|c| c.kind);
                VerificationResult {
                    passed: actual == Some(material),
                    message: format!(
                        "Material at ({}, {}): expected {:?}, got {:?}",
                        x, y, material, actual
                    ),
                }
            }

            VerificationCondition::Stable { x, y, expected } => {
                let actual = world.get_cell(x, y).map(|c| c.stable);
                VerificationResult {
                    passed: actual == Some(expected),
                    message: format!(
                        "Stability at ({}, {}): expected {}, got {:?}",
                        x, y, expected, actual
                    ),
                }
            }

            VerificationCondition::CountAtLeast { material, count } => {
                let actual = world
                    .grid()
                    .cells()
                    .iter()
                    .filter(|c| c.kind == material)
                    .count();
                VerificationResult {
                    passed: actual >= count,
                    message: format!(
                        "Count of {:?}: expected at least {}, got {}",
                        material, count, actual
                    ),
                }
            }

            VerificationCondition::RegionEmpty { x0, y0, x1, y1 } => {
                let mut total = 0;
                let mut occupied = 0;
                for y in y0.min(y1)..=y0.max(y1) {
                    for x in x0.min(x1)..=x0.max(x1) {
                        if let Some(cell) = world.get_cell(x, y) {
                            total += 1;
                            if !cell.is_air() {
                                occupied += 1;
                            }
                        }
                    }
                }
                VerificationResult {
                    passed: occupied == 0,
                    message: format!(
                        "Region ({}, {})-({}, {}) empty: {} occupied / {} total cells",
                        x0, y0, x1, y1, occupied, total
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_at() {
        let mut world = World::new(4, 4);
        world.set_cell(1, 2, MaterialKind::Coal);

        let hit = VerificationCondition::MaterialAt {
            x: 1,
            y: 2,
            material: MaterialKind::Coal,
        };
        let miss = VerificationCondition::MaterialAt {
            x: 9,
            y: 9,
            material: MaterialKind::Air,
        };

        assert!(hit.evaluate(&world).passed);
        assert!(!miss.evaluate(&world).passed);
    }

    #[test]
    fn test_stable_flag() {
        let mut world = World::new(4, 4);
        world.set_cell(0, 3, MaterialKind::Stone);
        world.update_stability();

        let condition = VerificationCondition::Stable {
            x: 0,
            y: 3,
            expected: true,
        };
        assert!(condition.evaluate(&world).passed);
    }

    #[test]
    fn test_count_and_region() {
        let mut world = World::new(6, 6);
        world.set_cell(5, 5, MaterialKind::Water);
        world.set_cell(4, 5, MaterialKind::Water);

        let count = VerificationCondition::CountAtLeast {
            material: MaterialKind::Water,
            count: 2,
        };
        let empty_top = VerificationCondition::RegionEmpty {
            x0: 0,
            y0: 0,
            x1: 5,
            y1: 4,
        };
        let empty_bottom = VerificationCondition::RegionEmpty {
            x0: 0,
            y0: 5,
            x1: 5,
            y1: 5,
        };

        assert!(count.evaluate(&world).passed);
        assert!(empty_top.evaluate(&world).passed);

        let result = empty_bottom.evaluate(&world);
        assert!(!result.passed);
        assert!(result.message.contains("2 occupied"));
    }
}
