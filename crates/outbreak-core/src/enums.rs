//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy behavioral and stat class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Baseline shambler.
    #[default]
    Walker,
    /// Fast, fragile, hits softer.
    Runner,
    /// Slow bruiser with extra health and coins.
    Tank,
    /// One per boss wave. Fires projectile fans and holds a stand-off distance.
    Boss,
}

/// Equipped player weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Melee,
    Gun,
}

impl Weapon {
    pub fn toggled(self) -> Self {
        match self {
            Self::Melee => Self::Gun,
            Self::Gun => Self::Melee,
        }
    }
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Boss,
}

/// World pickup or decorative particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropKind {
    Coin,
    Blood,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Active,
    Paused,
    GameOver,
}

/// Purchasable upgrade axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKind {
    Dmg,
    Hp,
    Crit,
    Gun,
    Fire,
    Regen,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::Dmg,
        UpgradeKind::Hp,
        UpgradeKind::Crit,
        UpgradeKind::Gun,
        UpgradeKind::Fire,
        UpgradeKind::Regen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dmg => "dmg",
            Self::Hp => "hp",
            Self::Crit => "crit",
            Self::Gun => "gun",
            Self::Fire => "fire",
            Self::Regen => "regen",
        }
    }
}

/// Why a purchase was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    InsufficientCoins,
    AlreadyOwned,
}

/// Backdrop selection. Cosmetic only; the simulation just carries it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapId {
    #[default]
    City,
    Night,
    Ruins,
    Toxic,
}

impl MapId {
    /// Parse a map key, falling back to the default map for unknown keys.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "night" => Self::Night,
            "ruins" => Self::Ruins,
            "toxic" => Self::Toxic,
            _ => Self::City,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Night => "night",
            Self::Ruins => "ruins",
            Self::Toxic => "toxic",
        }
    }
}

/// Player tint selection. Cosmetic only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    #[default]
    Default,
    Red,
    Green,
    Gold,
}

impl Skin {
    /// Parse a skin key, falling back to the default skin for unknown keys.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "red" => Self::Red,
            "green" => Self::Green,
            "gold" => Self::Gold,
            _ => Self::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Red => "red",
            Self::Green => "green",
            Self::Gold => "gold",
        }
    }
}
