//! World - owns the grid and schedules the rules

use glam::IVec2;
use rand_xoshiro::Xoshiro256StarStar;

use super::ca_update::CellularAutomataUpdater;
use super::chemistry_system::ChemistrySystem;
use super::grid::{Grid, UpdateRegion};
use super::neighbor_queries::NeighborQueries;
use super::persistence::{PersistenceSystem, SnapshotError, WorldSnapshot};
use super::rng_trait::world_rng;
use super::sim_config::SimConfig;
use super::stats::CountingStats;
use crate::simulation::{
    Cell, MaterialKind, ReactionRegistry, StabilityReport, StateChangeSystem,
    StructuralIntegritySystem, TemperatureSimulator,
};
use crate::world::WorldRng;

/// The simulated world: a fixed-size grid plus everything needed to advance it
pub struct World {
    grid: Grid,

    /// Scheduler and rule-sampling policy
    config: SimConfig,

    /// Chemical reaction table
    reactions: ReactionRegistry,

    rng: Xoshiro256StarStar,

    /// Counters of the most recent step
    last_tick_stats: CountingStats,
    /// Counters since construction
    total_stats: CountingStats,

    /// `tick()` calls since the last step
    frame_counter: u32,
    /// Steps since the last stability pass
    stability_counter: u32,
    /// Steps run so far; drives the sweep direction and the slide selector
    tick_count: u64,

    /// Coordinates that received a moved cell during the current step
    moved: Vec<bool>,

    last_stability: Option<StabilityReport>,

    /// Render scale carried through snapshots for the host
    cell_size: Option<u32>,
}

impl World {
    /// An all-air world with default configuration
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(width, height, SimConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: SimConfig) -> Self {
        log::info!("Creating {}x{} world", width, height);

        let grid = Grid::new(width, height);
        let moved = vec![false; grid.cells().len()];

        Self {
            grid,
            rng: world_rng(config.seed),
            config,
            reactions: ReactionRegistry::new(),
            last_tick_stats: CountingStats::default(),
            total_stats: CountingStats::default(),
            frame_counter: 0,
            stability_counter: 0,
            tick_count: 0,
            moved,
            last_stability: None,
            cell_size: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// Read-only view of the grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replace the reaction table
    pub fn set_reactions(&mut self, reactions: ReactionRegistry) {
        self.reactions = reactions;
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.grid.get_cell(x, y)
    }

    pub fn set_cell(&mut self, x: i32, y: i32, kind: MaterialKind) -> bool {
        self.grid.set_cell(x, y, kind)
    }

    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        self.grid.swap(x1, y1, x2, y2)
    }

    pub fn mark_active(&mut self, x: i32, y: i32) {
        self.grid.mark_active(x, y);
    }

    pub fn set_support(&mut self, x: i32, y: i32, has_support: bool) -> bool {
        self.grid.set_support(x, y, has_support)
    }

    pub fn set_update_region(
        &mut self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        buffer: i32,
    ) {
        self.grid
            .set_update_region(start_x, start_y, end_x, end_y, buffer);
    }

    /// Restrict evaluation to a viewport grown by the configured buffer
    pub fn set_viewport(&mut self, start_x: i32, start_y: i32, end_x: i32, end_y: i32) {
        let buffer = self.config.update_region_buffer;
        self.grid
            .set_update_region(start_x, start_y, end_x, end_y, buffer);
    }

    pub fn clear_update_region(&mut self) {
        self.grid.clear_update_region();
    }

    pub fn update_region(&self) -> Option<UpdateRegion> {
        self.grid.update_region()
    }

    /// Number of pumps among the 8 neighbours of a coordinate
    pub fn pump_force(&self, x: i32, y: i32) -> u32 {
        NeighborQueries::pump_force(&self.grid, x, y)
    }

    pub fn is_stability_dirty(&self) -> bool {
        self.grid.is_stability_dirty()
    }

    pub fn active_cell_count(&self) -> usize {
        self.grid.active_cell_count()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Counters of the most recent step
    pub fn last_tick_stats(&self) -> CountingStats {
        self.last_tick_stats
    }

    /// Counters since construction
    pub fn stats(&self) -> CountingStats {
        self.total_stats
    }

    /// Result of the most recent stability pass, if any ran yet
    pub fn last_stability(&self) -> Option<StabilityReport> {
        self.last_stability
    }

    /// Advance the simulation, throttled to one step every `frame_skip` calls.
    /// Returns whether a step ran.
    pub fn tick(&mut self) -> bool {
        self.frame_counter += 1;
        if self.frame_counter < self.config.frame_skip.max(1) {
            return false;
        }
        self.frame_counter = 0;

        self.step();
        true
    }

    /// Run one full step regardless of throttling
    pub fn step(&mut self) {
        let mut stats = CountingStats::default();
        let width = self.grid.width();
        let height = self.grid.height();

        self.moved.fill(false);

        let period = u64::from(self.config.sweep_alternation_period.max(1));
        let left_to_right = (self.tick_count / period) % 2 == 0;

        // Bottom to top so falling cells are not revisited in the same step
        for y in (0..height).rev() {
            for i in 0..width {
                let x = if left_to_right { i } else { width - 1 - i };
                if self.moved[(y * width + x) as usize] {
                    continue;
                }
                self.update_cell(x, y, &mut stats);
            }
        }

        let settled = StructuralIntegritySystem::settle_supports(&mut self.grid);
        if settled > 0 {
            log::trace!("{} support overlays fell", settled);
        }

        let evicted = self
            .grid
            .prune_active(self.config.active_cell_cap, self.config.active_prune_batch);
        if evicted > 0 {
            log::debug!(
                "Pruned {} active cells ({} remain)",
                evicted,
                self.grid.active_cell_count()
            );
        }

        self.stability_counter += 1;
        if self.stability_counter >= self.config.stability_interval || self.grid.is_stability_dirty()
        {
            self.update_stability();
        }

        self.tick_count += 1;
        self.last_tick_stats = stats;
        self.total_stats.merge(&stats);
    }

    /// Recompute structural stability now
    pub fn update_stability(&mut self) -> StabilityReport {
        let report = StructuralIntegritySystem::update_stability(&mut self.grid);
        self.grid.clear_stability_dirty();
        self.stability_counter = 0;
        self.last_stability = Some(report);
        report
    }

    /// Apply the rule chain to one coordinate
    fn update_cell(&mut self, x: i32, y: i32, stats: &mut CountingStats) {
        let Some(cell) = self.grid.get_cell(x, y).copied() else {
            log::warn!("Invalid cell at ({}, {})", x, y);
            self.grid.deactivate(x, y);
            return;
        };

        if cell.is_air() || !self.grid.is_eligible(x, y) {
            return;
        }

        let mut destination = CellularAutomataUpdater::apply_conveyor(
            &mut self.grid,
            x,
            y,
            self.config.conveyor_delay,
            stats,
        );
        if destination.is_none() {
            destination =
                CellularAutomataUpdater::apply_gravity(&mut self.grid, x, y, self.tick_count, stats);
        }
        if let Some(dest) = destination {
            self.mark_moved(dest);
            return;
        }

        let rates = self.config.rates;
        let mut pos = IVec2::new(x, y);

        if cell.is_liquid()
            && self.rng.check_probability(rates.fluid)
            && let Some(dest) =
                CellularAutomataUpdater::update_liquid(&mut self.grid, x, y, stats, &mut self.rng)
        {
            self.mark_moved(dest);
            pos = dest;
        }

        if cell.is_gas()
            && self.rng.check_probability(rates.gas)
            && let Some(dest) =
                CellularAutomataUpdater::update_gas(&mut self.grid, x, y, stats, &mut self.rng)
        {
            self.mark_moved(dest);
            pos = dest;
        }

        if self.rng.check_probability(rates.reactions) {
            ChemistrySystem::apply_reactions(
                &mut self.grid,
                &self.reactions,
                pos.x,
                pos.y,
                stats,
                &mut self.rng,
            );
        }

        if self.rng.check_probability(rates.heat) {
            TemperatureSimulator::transfer(&mut self.grid, pos.x, pos.y);
        }

        if self.rng.check_probability(rates.phase) {
            StateChangeSystem::apply_phase_change(&mut self.grid, pos.x, pos.y, stats, &mut self.rng);
        }

        if self.rng.check_probability(rates.special) {
            StateChangeSystem::apply_special_behaviors(
                &mut self.grid,
                pos.x,
                pos.y,
                stats,
                &mut self.rng,
            );
        }
    }

    fn mark_moved(&mut self, pos: IVec2) {
        let index = (pos.y * self.grid.width() + pos.x) as usize;
        if let Some(slot) = self.moved.get_mut(index) {
            *slot = true;
        }
    }

    /// Sparse snapshot of every non-default cell
    pub fn serialize(&self) -> WorldSnapshot {
        let mut snapshot = PersistenceSystem::snapshot(&self.grid);
        snapshot.cell_size = self.cell_size;
        snapshot
    }

    pub fn serialize_json(&self) -> Result<String, SnapshotError> {
        PersistenceSystem::to_json(&self.serialize())
    }

    /// Replace the grid's contents with a snapshot. On error nothing changes.
    pub fn load(&mut self, snapshot: &WorldSnapshot) -> Result<(), SnapshotError> {
        PersistenceSystem::restore(&mut self.grid, snapshot)?;
        if snapshot.cell_size.is_some() {
            self.cell_size = snapshot.cell_size;
        }
        Ok(())
    }

    pub fn load_json(&mut self, json: &str) -> Result<(), SnapshotError> {
        let snapshot = PersistenceSystem::from_json(json)?;
        self.load(&snapshot)
    }
}
