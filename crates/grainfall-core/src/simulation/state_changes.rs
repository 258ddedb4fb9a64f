//! State change system
//!
//! Handles material transitions driven by temperature and age:
//! - Freezing and melting (water <-> ice at 0°)
//! - Boiling and condensing (water <-> steam at 100°)
//! - Lava cooling into stone below 500°
//! - Fire burning out, smoke dispersing, steam condensing as it cools

use crate::simulation::{AMBIENT_TEMPERATURE, Cell, MaterialKind};
use crate::world::{Grid, NeighborQueries, SimStats, WorldRng};

/// Temperature condition a transition waits for
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Threshold {
    /// Strictly below
    Below(f32),
    /// Strictly above
    Above(f32),
}

impl Threshold {
    #[inline]
    pub fn holds(self, temperature: f32) -> bool {
        match self {
            Threshold::Below(t) => temperature < t,
            Threshold::Above(t) => temperature > t,
        }
    }
}

/// One temperature-driven transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseTransition {
    pub from: MaterialKind,
    pub to: MaterialKind,
    pub threshold: Threshold,
    /// Chance per evaluation once the threshold holds
    pub probability: f32,
    /// Temperature the new material starts at; `None` keeps the current one
    pub temperature: Option<f32>,
}

/// Checked in order, the first one that applies wins
pub const PHASE_TRANSITIONS: [PhaseTransition; 5] = [
    PhaseTransition {
        from: MaterialKind::Water,
        to: MaterialKind::Ice,
        threshold: Threshold::Below(0.0),
        probability: 1.0,
        temperature: None,
    },
    PhaseTransition {
        from: MaterialKind::Ice,
        to: MaterialKind::Water,
        threshold: Threshold::Above(0.0),
        probability: 1.0,
        temperature: None,
    },
    PhaseTransition {
        from: MaterialKind::Water,
        to: MaterialKind::Steam,
        threshold: Threshold::Above(100.0),
        probability: 1.0,
        temperature: None,
    },
    PhaseTransition {
        from: MaterialKind::Steam,
        to: MaterialKind::Water,
        threshold: Threshold::Below(100.0),
        probability: 1.0,
        temperature: None,
    },
    PhaseTransition {
        from: MaterialKind::Lava,
        to: MaterialKind::Stone,
        threshold: Threshold::Below(500.0),
        probability: 0.01,
        temperature: Some(AMBIENT_TEMPERATURE),
    },
];

const FIRE_BURNOUT_CHANCE: f32 = 0.005;
const FIRE_BURNOUT_TEMPERATURE: f32 = 100.0;

/// Smoke older than this may disperse
const SMOKE_LIFETIME: u32 = 300;
const SMOKE_DISPERSE_CHANCE: f32 = 0.002;

const STEAM_CONDENSE_TEMPERATURE: f32 = 50.0;
const STEAM_CONDENSE_CHANCE: f32 = 0.01;

/// System for checking and applying state changes
pub struct StateChangeSystem;

impl StateChangeSystem {
    /// The transition that applies to `cell` right now, ignoring its probability
    pub fn transition_for(cell: &Cell) -> Option<&'static PhaseTransition> {
        PHASE_TRANSITIONS
            .iter()
            .find(|t| t.from == cell.kind && t.threshold.holds(cell.temperature))
    }

    /// Apply at most one phase transition. Returns true if the material changed.
    pub fn apply_phase_change<R: WorldRng>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> bool {
        let Some(transition) = grid.get_cell(x, y).and_then(Self::transition_for) else {
            return false;
        };
        if !rng.check_probability(transition.probability) {
            return false;
        }

        match transition.temperature {
            Some(t) => grid.convert_with_temperature(x, y, transition.to, t),
            None => grid.convert(x, y, transition.to),
        };
        stats.record_state_change();
        true
    }

    /// Advance the cell's age, then run the age- and fuel-dependent rules
    pub fn apply_special_behaviors<R: WorldRng>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> bool {
        let Some(cell) = grid.get_cell_mut(x, y) else {
            return false;
        };
        cell.age = cell.age.saturating_add(1);
        let cell = *cell;

        let changed = match cell.kind {
            MaterialKind::Fire => {
                !NeighborQueries::has_orthogonal(grid, x, y, Cell::is_flammable)
                    && rng.check_probability(FIRE_BURNOUT_CHANCE)
                    && grid.convert_with_temperature(
                        x,
                        y,
                        MaterialKind::Smoke,
                        FIRE_BURNOUT_TEMPERATURE,
                    )
            }
            MaterialKind::Smoke => {
                cell.age > SMOKE_LIFETIME
                    && rng.check_probability(SMOKE_DISPERSE_CHANCE)
                    && grid.convert(x, y, MaterialKind::Air)
            }
            MaterialKind::Steam => {
                cell.temperature < STEAM_CONDENSE_TEMPERATURE
                    && rng.check_probability(STEAM_CONDENSE_CHANCE)
                    && grid.convert(x, y, MaterialKind::Water)
            }
            _ => false,
        };

        if changed {
            stats.record_state_change();
        }
        changed
    }
}
