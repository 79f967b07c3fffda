//! ECS components attached to hecs entities.
//!
//! Components are plain data structs with no methods; logic lives in the
//! simulation systems. The player is not an entity, it is owned directly by
//! the engine.

use glam::Vec2;

use crate::enums::*;

/// Stable identifier allocated by the engine. Render views sort by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// Top-left corner for bodies, exact point for projectiles and drops.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position(pub Vec2);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);

/// Body size (width, height).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox(pub Vec2);

/// Hostile unit state.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub archetype: Archetype,
    pub health: f32,
    pub max_health: f32,
    /// Damage per second dealt while overlapping the player.
    pub contact_damage: f32,
    /// Coins dropped on death.
    pub coin_value: u32,
    /// Remaining hit-flash time.
    pub hit_flash: f32,
    /// Remaining death-drift time. Only meaningful once health <= 0.
    pub death_timer: f32,
}

/// Boss-only volley timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BossPattern {
    pub shoot_timer: f32,
}

/// Bullet fired by the player or the boss.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub side: Side,
    /// Remaining lifetime in seconds.
    pub life: f32,
}

/// Coin pickup or blood particle.
#[derive(Debug, Clone, Copy)]
pub struct Drop {
    pub kind: DropKind,
    pub age: f32,
    /// Lifetime in seconds. Negative for short-lived effects; compared by magnitude.
    pub life: f32,
}
