//! OUTBREAK headless runner.
//!
//! Wires the simulation engine to a game-loop thread, a JSON save file, and
//! a scripted autopilot standing in for touch input.

pub mod bot;
pub mod config;
pub mod game_loop;
pub mod state;

pub use outbreak_core as core;
