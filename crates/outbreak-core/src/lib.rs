//! Core types and definitions for the OUTBREAK combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, frame and save snapshots, events, and constants.
//! It has no dependency on any runtime, renderer, or storage backend.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod save;
pub mod state;
pub mod types;
