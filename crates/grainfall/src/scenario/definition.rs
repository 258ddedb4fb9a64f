//! Scenario definition and RON file loading

use anyhow::{Context, Result};
use grainfall_core::prelude::{MaterialKind, World};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::verification::VerificationCondition;

/// Top-level scenario definition loaded from RON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Scenario name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    pub width: u32,
    pub height: u32,

    /// Painted onto an empty world before the first tick
    #[serde(default)]
    pub setup: Vec<ScenarioAction>,

    /// Calls to `tick()` after setup
    #[serde(default)]
    pub ticks: u64,

    /// Verification checks to run after the ticks
    #[serde(default)]
    pub verify: Vec<VerificationCondition>,
}

/// One edit applied to the world during setup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScenarioAction {
    /// Set a single cell
    Place {
        x: i32,
        y: i32,
        material: MaterialKind,
    },

    /// Set every cell of an inclusive rectangle
    Fill {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        material: MaterialKind,
    },

    /// Add a support overlay
    Support { x: i32, y: i32 },

    /// Restrict evaluation to a viewport plus the configured margin
    Viewport { x0: i32, y0: i32, x1: i32, y1: i32 },
}

impl ScenarioAction {
    /// Apply to the world. Returns how many cells were touched.
    pub fn apply(&self, world: &mut World) -> usize {
        match *self {
            ScenarioAction::Place { x, y, material } => usize::from(world.set_cell(x, y, material)),
            ScenarioAction::Fill {
                x0,
                y0,
                x1,
                y1,
                material,
            } => {
                let mut touched = 0;
                for y in y0.min(y1)..=y0.max(y1) {
                    for x in x0.min(x1)..=x0.max(x1) {
                        touched += usize::from(world.set_cell(x, y, material));
                    }
                }
                touched
            }
            ScenarioAction::Support { x, y } => usize::from(world.set_support(x, y, true)),
            ScenarioAction::Viewport { x0, y0, x1, y1 } => {
                world.set_viewport(x0, y0, x1, y1);
                0
            }
        }
    }
}

impl ScenarioDefinition {
    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        let scenario = ron::from_str(&content)
            .with_context(|| format!("Failed to parse RON scenario: {}", path.display()))?;

        Ok(scenario)
    }

    /// Save scenario to RON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize scenario to RON")?;

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write scenario file: {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Paint the setup actions onto `world`
    pub fn apply_setup(&self, world: &mut World) {
        let touched: usize = self.setup.iter().map(|action| action.apply(world)).sum();
        log::debug!(
            "Scenario '{}' setup touched {} cells in {} actions",
            self.name,
            touched,
            self.setup.len()
        );
    }
}
