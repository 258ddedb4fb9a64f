use anyhow::{Context, bail};
use clap::Parser;
use grainfall::AppConfig;
use grainfall::scenario::{self, ScenarioDefinition, ScenarioExecutor};
use grainfall_core::prelude::World;
use grainfall_core::world::PersistenceSystem;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Load the initial world from a JSON snapshot
    #[arg(long, conflicts_with_all = ["scene", "scenario"])]
    snapshot: Option<PathBuf>,

    /// Built-in demo scene: bridge, reservoir, volcano
    #[arg(long, conflicts_with = "scenario")]
    scene: Option<String>,

    /// Run a RON scenario file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of ticks to run (overrides config and scenario)
    #[arg(long)]
    ticks: Option<u64>,

    /// Width of a fresh world
    #[arg(long)]
    width: Option<u32>,

    /// Height of a fresh world
    #[arg(long)]
    height: Option<u32>,

    /// Seed the simulation RNG for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final world as a JSON snapshot
    #[arg(long)]
    output: Option<PathBuf>,

    /// List built-in scenes and exit
    #[arg(long)]
    list_scenes: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.list_scenes {
        for name in scenario::SCENE_NAMES {
            if let Some(scene) = scenario::builtin(name) {
                println!("{:<10} {}", name, scene.description);
            }
        }
        return Ok(());
    }

    let mut config = AppConfig::load()?;
    if let Some(seed) = args.seed {
        config.sim.seed = Some(seed);
    }
    if let Some(width) = args.width {
        config.run.width = width;
    }
    if let Some(height) = args.height {
        config.run.height = height;
    }

    let executor = ScenarioExecutor::new(config.run.report_every);

    let scenario = match (&args.scene, &args.scenario) {
        (Some(name), _) => Some(scenario::builtin(name).with_context(|| {
            format!(
                "Unknown scene '{}', expected one of: {}",
                name,
                scenario::SCENE_NAMES.join(", ")
            )
        })?),
        (None, Some(path)) => Some(ScenarioDefinition::from_file(path)?),
        (None, None) => None,
    };

    let world = if let Some(mut scenario) = scenario {
        if let Some(ticks) = args.ticks {
            scenario.ticks = ticks;
        }

        let (world, report) = executor.execute_scenario(&scenario, config.sim.clone());
        log::info!("{}", report.summary());

        if !report.success() {
            if let Some(path) = &args.output {
                write_snapshot(&world, path)?;
            }
            bail!("Scenario '{}' failed its checks", report.scenario_name);
        }
        world
    } else {
        let mut world = match &args.snapshot {
            Some(path) => load_snapshot(path, &config)?,
            None => {
                log::info!(
                    "Starting empty {}x{} world",
                    config.run.width,
                    config.run.height
                );
                World::with_config(config.run.width, config.run.height, config.sim.clone())
            }
        };

        let ticks = args.ticks.unwrap_or(config.run.ticks);
        let steps = executor.run_ticks(&mut world, ticks);
        let stats = world.stats();
        log::info!(
            "Ran {} ticks ({} steps): {} moves, {} reactions, {} state changes",
            ticks,
            steps,
            stats.pixels_moved,
            stats.reactions,
            stats.state_changes
        );
        world
    };

    if let Some(path) = &args.output {
        write_snapshot(&world, path)?;
    }

    Ok(())
}

/// Build a world sized to the snapshot and restore it
fn load_snapshot(path: &Path, config: &AppConfig) -> anyhow::Result<World> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let snapshot = PersistenceSystem::from_json(&json)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;

    let mut world = World::with_config(snapshot.width, snapshot.height, config.sim.clone());
    world
        .load(&snapshot)
        .with_context(|| format!("Failed to restore snapshot: {}", path.display()))?;
    Ok(world)
}

fn write_snapshot(world: &World, path: &Path) -> anyhow::Result<()> {
    let json = world
        .serialize_json()
        .context("Failed to serialize world")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
    log::info!("Wrote snapshot to {}", path.display());
    Ok(())
}
