//! Events emitted by the simulation for UI toasts and camera feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Session started (new game or continue).
    Go,
    /// Wave counter advanced.
    WaveUp { wave: u32 },
    /// A boss was spawned.
    BossIncoming,
    /// The boss died.
    BossDown,
    /// Player health reached zero.
    GameOver { wave: u32, kills: u32 },
    /// A shop purchase was refused.
    PurchaseRejected {
        upgrade: UpgradeKind,
        cost: u32,
        balance: u32,
        reason: RejectReason,
    },
    /// A shop purchase went through.
    PurchaseCompleted {
        upgrade: UpgradeKind,
        cost: u32,
        level: u32,
    },
    GunUnlocked,
    /// Tried to equip or fire the gun before buying it.
    GunLocked,
    WeaponSwapped { weapon: Weapon },
    /// Skill pressed while still cooling down.
    SkillCooldown { remaining: f32 },
    /// Melee swing connected with nothing.
    Miss,
    MapChanged { map: MapId },
    SkinChanged { skin: Skin },
    Paused,
}

/// Camera shake request. Presentation is external.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeRequest {
    pub power: f32,
    pub duration: f32,
}

impl From<(f32, f32)> for ShakeRequest {
    fn from((power, duration): (f32, f32)) -> Self {
        Self { power, duration }
    }
}
