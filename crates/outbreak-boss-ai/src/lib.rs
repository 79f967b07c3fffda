//! Boss behavior for OUTBREAK.
//!
//! Volley timing, projectile fan geometry, and stand-off steering for the
//! boss archetype, evaluated once per tick by the simulation.

pub mod pattern;

pub use outbreak_core as core;
