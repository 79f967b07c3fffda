//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` and `&mut Session`.
//! They do not own state. Entity state lives in components, everything else
//! in the session.

pub mod cleanup;
pub mod combat;
pub mod drops;
pub mod enemies;
pub mod player;
pub mod projectiles;
pub mod snapshot;
pub mod wave_spawner;
