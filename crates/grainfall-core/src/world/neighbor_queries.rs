//! Neighbor cell query utilities

use super::grid::{Grid, ORTHOGONAL};
use crate::simulation::{Cell, MaterialKind};

/// Stateless helpers for reading around a coordinate
pub struct NeighborQueries;

impl NeighborQueries {
    /// Order: NW, N, NE, W, E, SW, S, SE
    const EIGHT: [(i32, i32); 8] = [
        (-1, -1), // NW
        (0, -1),  // N
        (1, -1),  // NE
        (-1, 0),  // W
        (1, 0),   // E
        (-1, 1),  // SW
        (0, 1),   // S
        (1, 1),   // SE
    ];

    /// Number of pump cells among the 8 neighbours. A liquid next to at
    /// least one pump is held in place and lifted.
    pub fn pump_force(grid: &Grid, x: i32, y: i32) -> u32 {
        Self::EIGHT
            .iter()
            .filter(|(dx, dy)| grid.kind_at(x + dx, y + dy) == Some(MaterialKind::Pump))
            .count() as u32
    }

    /// First orthogonal neighbour (up, down, left, right) matching `predicate`
    pub fn find_orthogonal<P>(grid: &Grid, x: i32, y: i32, predicate: P) -> Option<(i32, i32)>
    where
        P: Fn(&Cell) -> bool,
    {
        ORTHOGONAL.iter().find_map(|(dx, dy)| {
            grid.get_cell(x + dx, y + dy)
                .filter(|cell| predicate(cell))
                .map(|_| (x + dx, y + dy))
        })
    }

    pub fn has_orthogonal<P>(grid: &Grid, x: i32, y: i32, predicate: P) -> bool
    where
        P: Fn(&Cell) -> bool,
    {
        Self::find_orthogonal(grid, x, y, predicate).is_some()
    }
}
