//! Structural stability propagation and falling support overlays
//!
//! Stone-like cells and support overlays are stable when they connect to the
//! ground through a 4-directional chain of stable stone-like cells and stable
//! overlays. Grounding comes from the bottom row, from resting on a solid
//! non-stone-like material (stone-like cells), or from resting on any solid
//! material (overlays).
//!
//! Connections run between neighbouring coordinates only; diagonal contact
//! never transfers stability.

use glam::IVec2;
use std::collections::VecDeque;

use crate::world::{Grid, ORTHOGONAL};

/// Outcome of one propagation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StabilityReport {
    /// Stone-like cells left stable
    pub stable_cells: usize,
    /// Support overlays left stable
    pub stable_supports: usize,
    /// Longest chain, in steps, from a grounded seed
    pub waves: usize,
}

/// Recomputes stability over the whole grid
pub struct StructuralIntegritySystem;

impl StructuralIntegritySystem {
    /// Full recompute: reset, seed grounded cells bottom-up, then flood outward.
    ///
    /// The flood visits every coordinate at most once, so the pass is linear
    /// in grid area however long the chains are. The queue only grows when a
    /// stable flag turns on, and flags never turn off during the flood, so the
    /// pass always terminates and needs no cap on the number of waves.
    pub fn update_stability(grid: &mut Grid) -> StabilityReport {
        for cell in grid.cells_mut() {
            if cell.is_stone_like() {
                cell.stable = false;
            }
            if cell.has_support {
                cell.support_stable = false;
            }
        }

        let mut report = StabilityReport::default();
        let mut queue: VecDeque<(IVec2, usize)> = VecDeque::new();

        for y in (0..grid.height()).rev() {
            for x in 0..grid.width() {
                let below = grid.get_cell(x, y + 1).copied();
                let Some(cell) = grid.get_cell_mut(x, y) else {
                    continue;
                };

                let on_floor = below.is_none();
                let mut seeded = false;

                if cell.is_stone_like()
                    && (on_floor || below.is_some_and(|b| b.is_solid() && !b.is_stone_like()))
                {
                    cell.stable = true;
                    report.stable_cells += 1;
                    seeded = true;
                }

                if cell.has_support && (on_floor || below.is_some_and(|b| b.is_solid())) {
                    cell.support_stable = true;
                    report.stable_supports += 1;
                    seeded = true;
                }

                if seeded {
                    queue.push_back((IVec2::new(x, y), 0));
                }
            }
        }

        while let Some((pos, depth)) = queue.pop_front() {
            report.waves = report.waves.max(depth);

            for (dx, dy) in ORTHOGONAL {
                let Some(neighbor) = grid.get_cell_mut(pos.x + dx, pos.y + dy) else {
                    continue;
                };

                let mut reached = false;
                if neighbor.is_stone_like() && !neighbor.stable {
                    neighbor.stable = true;
                    report.stable_cells += 1;
                    reached = true;
                }
                if neighbor.has_support && !neighbor.support_stable {
                    neighbor.support_stable = true;
                    report.stable_supports += 1;
                    reached = true;
                }

                if reached {
                    queue.push_back((neighbor.pos, depth + 1));
                }
            }
        }

        log::debug!(
            "Stability pass: {} stable cells, {} stable supports, {} waves",
            report.stable_cells,
            report.stable_supports,
            report.waves
        );

        report
    }

    /// Drop every unstable overlay one row where the coordinate below is open
    /// (in bounds, no overlay, not solid). Rows are visited bottom to top so an
    /// overlay moves at most once per call. Returns how many moved.
    pub fn settle_supports(grid: &mut Grid) -> usize {
        let mut moved = 0;

        for y in (0..grid.height()).rev() {
            for x in 0..grid.width() {
                let falling = grid
                    .get_cell(x, y)
                    .is_some_and(|c| c.has_support && !c.support_stable);
                if !falling {
                    continue;
                }

                let open = grid
                    .get_cell(x, y + 1)
                    .is_some_and(|below| !below.has_support && !below.is_solid());
                if open && grid.move_support(x, y, x, y + 1) {
                    moved += 1;
                }
            }
        }

        moved
    }
}
