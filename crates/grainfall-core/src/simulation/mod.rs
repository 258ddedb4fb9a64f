//! Simulation rules - reactions, heat, phase changes, structural stability

pub mod reactions;
pub mod state_changes;
pub mod structural;
pub mod temperature;

pub use grainfall_simulation::{
    AMBIENT_TEMPERATURE, Cell, Direction, MaterialDef, MaterialKind, Materials, Phase,
};

pub use reactions::{Operand, Product, Reaction, ReactionRegistry};
pub use state_changes::StateChangeSystem;
pub use structural::{StabilityReport, StructuralIntegritySystem};
pub use temperature::TemperatureSimulator;
