//! Headless driver for the grainfall simulator
//!
//! Loads layered configuration, builds a world from a snapshot, a built-in
//! scene or a RON scenario file, runs it and writes the result.

pub mod config;
pub mod scenario;

pub use config::AppConfig;
