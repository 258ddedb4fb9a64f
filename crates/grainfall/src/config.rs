//! Driver configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `grainfall.ron` file (if exists)
//! 3. Environment variables prefixed with `GRAINFALL_`
//!
//! Example environment variable: `GRAINFALL_SIM__RATES__FLUID=0.9`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use grainfall_core::prelude::SimConfig;
use serde::{Deserialize, Serialize};

/// Everything the driver reads before building a world
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub sim: SimConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// Size of a fresh world and how long to run it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub width: u32,
    pub height: u32,
    /// Calls to `tick()`; with frame skipping fewer steps actually run
    pub ticks: u64,
    /// Log a stats line every this many ticks (0 disables)
    pub report_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 150,
            ticks: 600,
            report_every: 100,
        }
    }
}

impl AppConfig {
    /// Load `grainfall.ron` from the working directory, then the environment
    pub fn load() -> Result<Self> {
        Self::load_from("grainfall")
    }

    /// Same as [`AppConfig::load`] with an explicit file stem
    pub fn load_from(file_stem: &str) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("run.width", 200_i64)?
            .set_default("run.height", 150_i64)?
            .set_default("run.ticks", 600_i64)?
            .set_default("run.report_every", 100_i64)?
            .set_default("sim.frame_skip", 2_i64)?
            .set_default("sim.stability_interval", 3_i64)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(file_stem)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (GRAINFALL_RUN__TICKS, etc.)
            .add_source(
                Environment::with_prefix("GRAINFALL")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
