//! Runs a world for a number of ticks and checks the outcome

use grainfall_core::prelude::{SimConfig, World};
use grainfall_core::simulation::StabilityReport;
use grainfall_core::world::CountingStats;

use super::definition::ScenarioDefinition;
use super::verification::VerificationResult;

/// Outcome of one run
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub scenario_name: String,
    /// Calls to `tick()`
    pub ticks: u64,
    /// Steps that actually ran
    pub steps: u64,
    pub stats: CountingStats,
    pub stability: Option<StabilityReport>,
    pub results: Vec<VerificationResult>,
}

impl ExecutionReport {
    /// Every verification passed (vacuously true with none)
    pub fn success(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn summary(&self) -> String {
        let passed = self.results.iter().filter(|r| r.passed).count();
        let mut summary = format!(
            "{}: {} ticks ({} steps), {} moves, {} reactions, {} state changes",
            self.scenario_name,
            self.ticks,
            self.steps,
            self.stats.pixels_moved,
            self.stats.reactions,
            self.stats.state_changes
        );
        if let Some(stability) = self.stability {
            summary.push_str(&format!(
                ", {} stable cells, {} stable supports",
                stability.stable_cells, stability.stable_supports
            ));
        }
        if !self.results.is_empty() {
            summary.push_str(&format!(", {}/{} checks passed", passed, self.results.len()));
        }
        summary
    }
}

/// Drives worlds and scenarios, logging progress as it goes
pub struct ScenarioExecutor {
    /// Log a stats line every this many ticks (0 disables)
    report_every: u64,
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ScenarioExecutor {
    pub fn new(report_every: u64) -> Self {
        Self { report_every }
    }

    /// Call `tick()` `ticks` times. Returns how many steps ran.
    pub fn run_ticks(&self, world: &mut World, ticks: u64) -> u64 {
        let start = world.tick_count();
        for tick in 1..=ticks {
            world.tick();

            if self.report_every > 0 && tick % self.report_every == 0 {
                let stats = world.stats();
                log::info!(
                    "Tick {}/{}: {} active cells, {} moves, {} reactions",
                    tick,
                    ticks,
                    world.active_cell_count(),
                    stats.pixels_moved,
                    stats.reactions
                );
            }
        }
        world.tick_count() - start
    }

    /// Build the scenario's world, run it, and evaluate its checks
    pub fn execute_scenario(
        &self,
        scenario: &ScenarioDefinition,
        config: SimConfig,
    ) -> (World, ExecutionReport) {
        log::info!("Running scenario '{}'", scenario.name);
        if !scenario.description.is_empty() {
            log::debug!("{}", scenario.description);
        }

        let mut world = World::with_config(scenario.width, scenario.height, config);
        scenario.apply_setup(&mut world);
        world.update_stability();

        let steps = self.run_ticks(&mut world, scenario.ticks);

        let results: Vec<VerificationResult> = scenario
            .verify
            .iter()
            .map(|condition| condition.evaluate(&world))
            .collect();
        for result in &results {
            if result.passed {
                log::debug!("PASS {}", result.message);
            } else {
                log::warn!("FAIL {}", result.message);
            }
        }

        let report = ExecutionReport {
            scenario_name: scenario.name.clone(),
            ticks: scenario.ticks,
            steps,
            stats: world.stats(),
            stability: world.last_stability(),
            results,
        };
        (world, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{ScenarioAction, VerificationCondition};
    use grainfall_core::prelude::MaterialKind;

    fn drop_scenario() -> ScenarioDefinition {
        ScenarioDefinition {
            name: "drop".to_string(),
            description: String::new(),
            width: 8,
            height: 8,
            setup: vec![ScenarioAction::Place {
                x: 3,
                y: 0,
                material: MaterialKind::Sand,
            }],
            ticks: 20,
            verify: vec![
                VerificationCondition::MaterialAt {
                    x: 3,
                    y: 7,
                    material: MaterialKind::Sand,
                },
                VerificationCondition::MaterialAt {
                    x: 3,
                    y: 0,
                    material: MaterialKind::Sand,
                },
            ],
        }
    }

    #[test]
    fn test_run_ticks_respects_frame_skip() {
        let mut world = World::with_config(4, 4, SimConfig::default().with_seed(1));
        let steps = ScenarioExecutor::default().run_ticks(&mut world, 10);
        assert_eq!(steps, 5);
    }

    #[test]
    fn test_execute_scenario_reports_checks() {
        let config = SimConfig {
            frame_skip: 1,
            ..SimConfig::default().with_seed(3)
        };
        let (world, report) = ScenarioExecutor::default().execute_scenario(&drop_scenario(), config);

        assert_eq!(report.steps, 20);
        assert_eq!(world.tick_count(), 20);
        assert!(report.results[0].passed);
        assert!(!report.results[1].passed);
        assert!(!report.success());
        assert!(report.summary().contains("1/2 checks passed"));
    }
}
