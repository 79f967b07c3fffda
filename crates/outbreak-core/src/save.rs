//! Serializable subset of session state handed to the persistence gateway.
//!
//! Layout: `{ map, skin, upgrades: {dmg, hp, crit, gun, fire, regen},
//! world: {wave, kills, coins} }`. Older saves used the key `up` for the
//! upgrade block and stored `gun` as `0`/`1`; both are accepted on read.

use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{MapId, Skin, UpgradeKind};

/// Persisted session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    #[serde(default, deserialize_with = "lenient_map")]
    pub map: MapId,
    #[serde(default, deserialize_with = "lenient_skin")]
    pub skin: Skin,
    #[serde(default, alias = "up")]
    pub upgrades: UpgradeLevels,
    #[serde(default)]
    pub world: WorldProgress,
}

/// Purchased upgrade levels. Levels only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeLevels {
    pub dmg: u32,
    pub hp: u32,
    pub crit: u32,
    #[serde(deserialize_with = "flag")]
    pub gun: bool,
    pub fire: u32,
    pub regen: u32,
}

impl UpgradeLevels {
    /// Current level on an axis. The gun counts as level 0 or 1.
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Dmg => self.dmg,
            UpgradeKind::Hp => self.hp,
            UpgradeKind::Crit => self.crit,
            UpgradeKind::Gun => u32::from(self.gun),
            UpgradeKind::Fire => self.fire,
            UpgradeKind::Regen => self.regen,
        }
    }

    /// Raise an axis by one level.
    pub fn increment(&mut self, kind: UpgradeKind) {
        match kind {
            UpgradeKind::Dmg => self.dmg = self.dmg.saturating_add(1),
            UpgradeKind::Hp => self.hp = self.hp.saturating_add(1),
            UpgradeKind::Crit => self.crit = self.crit.saturating_add(1),
            UpgradeKind::Gun => self.gun = true,
            UpgradeKind::Fire => self.fire = self.fire.saturating_add(1),
            UpgradeKind::Regen => self.regen = self.regen.saturating_add(1),
        }
    }
}

/// Run progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldProgress {
    #[serde(default = "first_wave")]
    pub wave: u32,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub coins: u32,
}

impl Default for WorldProgress {
    fn default() -> Self {
        Self {
            wave: first_wave(),
            kills: 0,
            coins: 0,
        }
    }
}

fn first_wave() -> u32 {
    1
}

fn lenient_map<'de, D: Deserializer<'de>>(d: D) -> Result<MapId, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.map(|s| MapId::parse(&s)).unwrap_or_default())
}

fn lenient_skin<'de, D: Deserializer<'de>>(d: D) -> Result<Skin, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.map(|s| Skin::parse(&s)).unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(f64),
}

fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Option::<Flag>::deserialize(d)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Number(n)) => n != 0.0,
        None => false,
    })
}
