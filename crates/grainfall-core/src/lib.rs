//! # grainfall-core
//!
//! The simulation engine of a falling-sand sandbox: a fixed-size grid of typed
//! cells that fall, flow, react, exchange heat, change phase and hold together
//! as supported structures.
//!
//! External code (rendering, player, crafting, level layout) only touches the
//! [`World`](world::World) through its accessors, `tick`, and the snapshot codec.

pub mod simulation;
pub mod world;

pub use world::World;

/// Common imports for collaborators
pub mod prelude {
    pub use crate::simulation::{AMBIENT_TEMPERATURE, Cell, MaterialKind, Phase};
    pub use crate::world::{
        Grid, SimConfig, SnapshotError, UpdateRegion, World, WorldSnapshot,
    };
    pub use glam::IVec2;
}
