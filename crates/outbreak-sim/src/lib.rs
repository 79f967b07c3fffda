//! Simulation engine for OUTBREAK.
//!
//! Owns the hecs ECS world, runs systems once per variable-length tick,
//! and produces `FrameSnapshot`s for the presentation layer.

pub mod economy;
pub mod engine;
pub mod persistence;
pub mod player;
pub mod session;
pub mod systems;
pub mod wave;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use outbreak_core as core;

#[cfg(test)]
mod tests;
