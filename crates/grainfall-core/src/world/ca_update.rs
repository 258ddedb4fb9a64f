//! Cellular automata update logic - material movement physics
//!
//! Every rule returns the cell's new coordinate when it moved it, so the
//! scheduler can stop evaluating a cell that already changed place.

use glam::IVec2;

use super::grid::Grid;
use super::neighbor_queries::NeighborQueries;
use crate::simulation::MaterialKind;
use crate::world::{SimStats, WorldRng};

/// Extra gate on lava spreading, on top of the fluid rate
const LAVA_FLOW_CHANCE: f32 = 0.3;

/// Uplift chance next to pumps: base + step per pump, capped
const PUMP_UPLIFT_BASE: f32 = 0.3;
const PUMP_UPLIFT_STEP: f32 = 0.25;
const PUMP_UPLIFT_MAX: f32 = 0.95;

/// Chance a liquid takes an open spread target when it reaches it
const SPREAD_CHANCE: f32 = 0.5;

/// Chance a gas blocked from rising drifts into air on one side
const GAS_DRIFT_CHANCE: f32 = 0.3;

/// Spread targets in the order they are tried: left, right, down-left, down-right
const SPREAD_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (-1, 1), (1, 1)];

/// Cellular automata updater - handles material movement physics
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Carry an item resting on a conveyor one step in the belt's direction.
    ///
    /// Items wait `delay` steps between moves. A blocked item keeps counting
    /// its cooldown down and tries again once it reaches zero.
    pub fn apply_conveyor(
        grid: &mut Grid,
        x: i32,
        y: i32,
        delay: i32,
        stats: &mut dyn SimStats,
    ) -> Option<IVec2> {
        let cell = *grid.get_cell(x, y)?;
        if cell.is_conveyor() {
            return None;
        }
        let direction = grid.kind_at(x, y + 1)?.conveyor_direction()?;

        if cell.conveyor_cooldown <= 0 {
            let (dx, dy) = direction.offset();
            let (tx, ty) = (x + dx, y + dy);

            let open = grid.get_cell(tx, ty).is_some_and(|target| target.is_gas());
            if open && let Some(moved) = Self::try_move(grid, x, y, tx, ty, stats) {
                if let Some(item) = grid.get_cell_mut(moved.x, moved.y) {
                    item.conveyor_cooldown = delay;
                }
                return Some(moved);
            }
        }

        if let Some(item) = grid.get_cell_mut(x, y) {
            item.conveyor_cooldown = (item.conveyor_cooldown - 1).max(0);
        }
        None
    }

    /// Fall straight down through air or anything lighter that is not solid.
    ///
    /// Stone-like cells hold while stable or while standing on a support
    /// overlay, and never slide. Liquids held by a pump do not fall. Other
    /// solids that cannot fall may slide diagonally on about half of the
    /// evaluations, picked by a coordinate hash mixed with `tick`.
    pub fn apply_gravity(
        grid: &mut Grid,
        x: i32,
        y: i32,
        tick: u64,
        stats: &mut dyn SimStats,
    ) -> Option<IVec2> {
        let cell = *grid.get_cell(x, y)?;
        if !(cell.is_solid() || cell.is_liquid()) {
            return None;
        }
        let below = *grid.get_cell(x, y + 1)?;

        if cell.is_stone_like() && (cell.stable || below.has_support) {
            return None;
        }
        if cell.is_liquid() && NeighborQueries::pump_force(grid, x, y) > 0 {
            return None;
        }

        let lighter = (below.is_liquid() || below.is_gas()) && cell.density() > below.density();
        if below.is_air() || lighter {
            return Self::try_move(grid, x, y, x, y + 1, stats);
        }

        if cell.is_solid() && !cell.is_stone_like() {
            let selector = ((x + y * grid.width()) as u64).wrapping_add(tick) % 4;
            if selector < 2 {
                let dx = if selector == 0 { -1 } else { 1 };
                let open = |kind: Option<MaterialKind>| {
                    kind.is_some_and(|k| k.is_air() || k.is_liquid())
                };
                if open(grid.kind_at(x + dx, y + 1)) && open(grid.kind_at(x + dx, y + 2)) {
                    return Self::try_move(grid, x, y, x + dx, y + 1, stats);
                }
            }
        }

        None
    }

    /// Update liquid material (pump uplift, then sideways and diagonal spread)
    pub fn update_liquid<R: WorldRng>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> Option<IVec2> {
        let cell = *grid.get_cell(x, y)?;
        if !cell.is_liquid() {
            return None;
        }
        if cell.kind == MaterialKind::Lava && !rng.check_probability(LAVA_FLOW_CHANCE) {
            return None;
        }

        let pump_force = NeighborQueries::pump_force(grid, x, y);
        if pump_force > 0 && grid.kind_at(x, y - 1) == Some(MaterialKind::Air) {
            let uplift =
                (PUMP_UPLIFT_BASE + pump_force as f32 * PUMP_UPLIFT_STEP).min(PUMP_UPLIFT_MAX);
            if rng.check_probability(uplift) {
                return Self::try_move(grid, x, y, x, y - 1, stats);
            }
        }

        for (dx, dy) in SPREAD_DIRECTIONS {
            let Some(target) = grid.get_cell(x + dx, y + dy) else {
                continue;
            };
            let open = target.is_air() || (target.is_liquid() && cell.density() > target.density());
            if open && rng.check_probability(SPREAD_CHANCE) {
                return Self::try_move(grid, x, y, x + dx, y + dy, stats);
            }
        }

        None
    }

    /// Update gas material (rises through air or denser gas, otherwise drifts sideways)
    pub fn update_gas<R: WorldRng>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> Option<IVec2> {
        let cell = *grid.get_cell(x, y)?;
        if !cell.is_gas() || cell.is_air() {
            return None;
        }

        let rises = grid
            .get_cell(x, y - 1)
            .is_some_and(|above| above.is_air() || (above.is_gas() && above.density() > cell.density()));
        if rises {
            return Self::try_move(grid, x, y, x, y - 1, stats);
        }

        for dx in [-1, 1] {
            if grid.kind_at(x + dx, y) == Some(MaterialKind::Air)
                && rng.check_probability(GAS_DRIFT_CHANCE)
            {
                return Self::try_move(grid, x, y, x + dx, y, stats);
            }
        }

        None
    }

    /// Swap two coordinates, counting the move
    fn try_move(
        grid: &mut Grid,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
        stats: &mut dyn SimStats,
    ) -> Option<IVec2> {
        if grid.swap(from_x, from_y, to_x, to_y) {
            stats.record_pixel_moved();
            Some(IVec2::new(to_x, to_y))
        } else {
            None
        }
    }
}
