//! Scripted runs: a setup painted onto an empty world, a number of ticks,
//! and conditions checked afterwards

mod definition;
mod executor;
mod scenes;
mod verification;

pub use definition::{ScenarioAction, ScenarioDefinition};
pub use executor::{ExecutionReport, ScenarioExecutor};
pub use scenes::{SCENE_NAMES, builtin};
pub use verification::{VerificationCondition, VerificationResult};
