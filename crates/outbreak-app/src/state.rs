//! Messages and results shared between `main` and the game loop thread.

use serde::Serialize;

use outbreak_core::commands::PlayerCommand;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// What the loop did before it stopped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoopSummary {
    pub ticks: u64,
    /// Sessions started (new game or continue).
    pub sessions: u32,
    pub game_overs: u32,
    pub best_wave: u32,
    pub kills: u32,
    pub coins: u32,
    /// Successful writes to the save gateway.
    pub saves: u32,
}
