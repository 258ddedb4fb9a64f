//! Material data for the grainfall simulator
//!
//! This crate provides the foundational data types the engine runs on:
//! - Material kinds and their static properties (MaterialKind, MaterialDef, Materials)
//! - Phase classes and conveyor directions (Phase, Direction)
//! - The per-coordinate cell record (Cell)

mod cell;
mod materials;

pub use cell::{AMBIENT_TEMPERATURE, Cell};
pub use materials::{Direction, MaterialDef, MaterialKind, Materials, Phase};
