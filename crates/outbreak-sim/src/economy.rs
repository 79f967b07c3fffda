//! Coin balance, upgrade purchases, and the stats they derive.

use thiserror::Error;

use outbreak_core::constants::*;
use outbreak_core::enums::UpgradeKind;
use outbreak_core::save::UpgradeLevels;

/// Why a purchase did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("{upgrade:?} costs {cost} but only {balance} coins are available")]
    InsufficientCoins {
        upgrade: UpgradeKind,
        cost: u32,
        balance: u32,
    },
    #[error("{0:?} is already owned")]
    AlreadyOwned(UpgradeKind),
}

/// Price of the next level on an axis, given the current levels.
/// Returns None when the axis cannot be bought again (the gun once owned).
pub fn upgrade_cost(kind: UpgradeKind, levels: &UpgradeLevels) -> Option<u32> {
    let level = levels.level(kind);
    let cost = match kind {
        UpgradeKind::Dmg => stepped(10, 12, level),
        UpgradeKind::Hp => stepped(12, 14, level),
        UpgradeKind::Crit => stepped(15, 9, level),
        UpgradeKind::Gun if levels.gun => return None,
        UpgradeKind::Gun => GUN_PRICE,
        UpgradeKind::Fire => stepped(25, 20, level),
        UpgradeKind::Regen => stepped(30, 24, level),
    };
    Some(cost)
}

/// `base + step * level`, pinned at `u32::MAX` for levels no save should hold.
fn stepped(base: u32, step: u32, level: u32) -> u32 {
    step.saturating_mul(level).saturating_add(base)
}

/// Chance for a qualifying hit to crit.
pub fn crit_probability(crit_level: u32) -> f32 {
    (crit_level as f32 * CRIT_PERCENT_PER_LEVEL / 100.0).clamp(0.0, CRIT_MAX_PROBABILITY)
}

/// Seconds between gun shots.
pub fn fire_cooldown(fire_level: u32) -> f32 {
    (GUN_BASE_COOLDOWN - fire_level as f32 * GUN_COOLDOWN_PER_FIRE_LEVEL)
        .clamp(GUN_MIN_COOLDOWN, GUN_BASE_COOLDOWN)
}

/// Stats recomputed whenever an upgrade level changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub max_health: f32,
    /// Health per second. Zero without any regen level.
    pub regen_per_sec: f32,
    pub crit_probability: f32,
    pub fire_cooldown: f32,
    pub bullet_speed: f32,
    pub gun_unlocked: bool,
}

impl DerivedStats {
    pub fn from_levels(levels: &UpgradeLevels) -> Self {
        let regen_per_sec = if levels.regen > 0 {
            REGEN_BASE + REGEN_PER_LEVEL * levels.regen as f32
        } else {
            0.0
        };
        Self {
            max_health: BASE_MAX_HEALTH + MAX_HEALTH_PER_HP_LEVEL * levels.hp as f32,
            regen_per_sec,
            crit_probability: crit_probability(levels.crit),
            fire_cooldown: fire_cooldown(levels.fire),
            bullet_speed: BULLET_BASE_SPEED + BULLET_SPEED_PER_FIRE_LEVEL * levels.fire as f32,
            gun_unlocked: levels.gun,
        }
    }
}

impl Default for DerivedStats {
    fn default() -> Self {
        Self::from_levels(&UpgradeLevels::default())
    }
}

/// Coin balance and purchased levels.
#[derive(Debug, Clone, Default)]
pub struct Economy {
    pub coins: u32,
    pub upgrades: UpgradeLevels,
}

impl Economy {
    pub fn cost_of(&self, kind: UpgradeKind) -> Option<u32> {
        upgrade_cost(kind, &self.upgrades)
    }

    pub fn can_afford(&self, kind: UpgradeKind) -> bool {
        self.cost_of(kind).is_some_and(|cost| self.coins >= cost)
    }

    /// Buy the next level. Returns the price paid; on error nothing changes.
    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<u32, PurchaseError> {
        let cost = self.cost_of(kind).ok_or(PurchaseError::AlreadyOwned(kind))?;
        if self.coins < cost {
            return Err(PurchaseError::InsufficientCoins {
                upgrade: kind,
                cost,
                balance: self.coins,
            });
        }
        self.coins -= cost;
        self.upgrades.increment(kind);
        Ok(cost)
    }

    pub fn credit(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub fn stats(&self) -> DerivedStats {
        DerivedStats::from_levels(&self.upgrades)
    }
}
