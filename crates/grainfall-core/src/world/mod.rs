//! World management - grid storage, scheduling, snapshots

mod ca_update;
mod chemistry_system;
mod grid;
mod neighbor_queries;
pub mod persistence;
pub mod rng_trait;
pub mod sim_config;
pub mod stats;
#[allow(clippy::module_inception)]
mod world;

pub use ca_update::CellularAutomataUpdater;
pub use chemistry_system::ChemistrySystem;
pub use grid::{Grid, UpdateRegion};
pub(crate) use grid::ORTHOGONAL;
pub use neighbor_queries::NeighborQueries;
pub use persistence::{CellRecord, PersistenceSystem, SnapshotError, WorldSnapshot};
pub use rng_trait::WorldRng;
pub use sim_config::{RuleRates, SimConfig};
pub use stats::{CountingStats, NoopStats, SimStats};
pub use world::World;
