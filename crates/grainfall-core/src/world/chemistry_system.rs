//! Chemistry system - applies the reaction table to a cell and its neighbours

use super::grid::{Grid, ORTHOGONAL};
use crate::simulation::{Product, ReactionRegistry};
use crate::world::{SimStats, WorldRng};

/// Handles neighbour reactions: quenching, ignition, burning, corrosion
pub struct ChemistrySystem;

impl ChemistrySystem {
    /// Scan the 4 neighbours (up, down, left, right) and apply the first
    /// reaction that matches and passes its gate. Returns whether one fired.
    pub fn apply_reactions<R: WorldRng>(
        grid: &mut Grid,
        registry: &ReactionRegistry,
        x: i32,
        y: i32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> bool {
        let Some(kind) = grid.kind_at(x, y) else {
            return false;
        };

        for (dx, dy) in ORTHOGONAL {
            let (nx, ny) = (x + dx, y + dy);
            let Some(neighbor_kind) = grid.kind_at(nx, ny) else {
                continue;
            };

            for reaction in registry.candidates(kind, neighbor_kind) {
                if !rng.check_probability(reaction.probability) {
                    continue;
                }

                if let Some(product) = reaction.cell_becomes {
                    Self::apply_product(grid, x, y, product);
                }
                if let Some(product) = reaction.neighbor_becomes {
                    Self::apply_product(grid, nx, ny, product);
                }

                log::trace!("Reaction {} at ({}, {})", reaction.name, x, y);
                stats.record_reaction();
                return true;
            }
        }

        false
    }

    fn apply_product(grid: &mut Grid, x: i32, y: i32, product: Product) {
        match product.temperature {
            Some(temperature) => grid.convert_with_temperature(x, y, product.kind, temperature),
            None => grid.convert(x, y, product.kind),
        };
    }
}
