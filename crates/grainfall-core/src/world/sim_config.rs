//! Simulation policy knobs
//!
//! None of these affect correctness; they trade per-tick cost against how
//! quickly the world reacts. All of them deserialize with defaults so a
//! partial config file is fine.

use serde::{Deserialize, Serialize};

/// Scheduler and rule-sampling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Run one step every `frame_skip` calls to `tick()` (1 = every call)
    pub frame_skip: u32,
    /// Recompute structural stability at least this often (in steps)
    pub stability_interval: u32,
    /// Active-set size that triggers pruning
    pub active_cell_cap: usize,
    /// How many coordinates one prune evicts
    pub active_prune_batch: usize,
    /// Steps an item waits on a conveyor between moves
    pub conveyor_delay: i32,
    /// Margin added around a viewport when none is given explicitly
    pub update_region_buffer: i32,
    /// Steps before the row sweep direction flips
    pub sweep_alternation_period: u32,
    /// Per-rule evaluation probabilities
    pub rates: RuleRates,
    /// RNG seed; entropy when unset
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frame_skip: 2,
            stability_interval: 3,
            active_cell_cap: 1000,
            active_prune_batch: 500,
            conveyor_delay: 3,
            update_region_buffer: 10,
            sweep_alternation_period: 1,
            rates: RuleRates::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Every call to `tick()` steps, and every optional rule always runs.
    /// Useful for tests that want rule effects without sampling noise.
    pub fn eager() -> Self {
        Self {
            frame_skip: 1,
            rates: RuleRates::always(),
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Probability that each optional rule is evaluated for a cell in one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleRates {
    pub fluid: f32,
    pub gas: f32,
    pub reactions: f32,
    pub heat: f32,
    pub phase: f32,
    pub special: f32,
}

impl Default for RuleRates {
    fn default() -> Self {
        Self {
            fluid: 0.7,
            gas: 0.5,
            reactions: 0.3,
            heat: 0.5,
            phase: 0.2,
            special: 0.1,
        }
    }
}

impl RuleRates {
    pub fn always() -> Self {
        Self {
            fluid: 1.0,
            gas: 1.0,
            reactions: 1.0,
            heat: 1.0,
            phase: 1.0,
            special: 1.0,
        }
    }

    pub fn never() -> Self {
        Self {
            fluid: 0.0,
            gas: 0.0,
            reactions: 0.0,
            heat: 0.0,
            phase: 0.0,
            special: 0.0,
        }
    }
}
