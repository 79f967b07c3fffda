//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::save::SaveSnapshot;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Movement ---
    /// Set the movement intent. Magnitude is clamped to 1.
    Move { x: f32, y: f32 },

    // --- Combat ---
    /// Melee swing.
    Attack,
    /// Fire the gun.
    Shoot,
    /// Use whichever attack the equipped weapon provides.
    Primary,
    /// Shockwave.
    Skill,
    /// Toggle between melee and gun.
    SwapWeapon,

    // --- Shop ---
    Purchase { upgrade: UpgradeKind },
    SetMap { map: MapId },
    SetSkin { skin: Skin },

    // --- Session ---
    /// Start over at wave 1 keeping coins and upgrades.
    NewGame,
    /// Resume from a save, or start fresh when there is none.
    Continue { save: Option<SaveSnapshot> },
    Pause,
    Resume,
}
