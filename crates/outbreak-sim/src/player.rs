//! Player data model.
//!
//! Owned by the session directly, NOT as an ECS entity.

use glam::Vec2;

use outbreak_core::constants::*;
use outbreak_core::enums::Weapon;
use outbreak_core::types::{Rect, Viewport};

#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner.
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    /// +1 facing right, -1 facing left.
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub weapon: Weapon,

    // --- Timers (decrement to zero) ---
    pub attack_cooldown: f32,
    pub skill_cooldown: f32,
    pub gun_cooldown: f32,
    pub invulnerable: f32,
}

impl Player {
    /// Fresh player standing on the ground at the start position.
    pub fn spawn(viewport: &Viewport, max_health: f32) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            position: Vec2::new(PLAYER_START_X, viewport.floor_y() - size.y),
            velocity: Vec2::ZERO,
            size,
            facing: 1.0,
            health: max_health,
            max_health,
            weapon: Weapon::Melee,
            attack_cooldown: 0.0,
            skill_cooldown: 0.0,
            gun_cooldown: 0.0,
            invulnerable: 0.0,
        }
    }

    pub fn body(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Reach of a melee swing, in front of the player.
    pub fn melee_hitbox(&self) -> Rect {
        let (x, y) = (self.position.x, self.position.y);
        let (w, h) = (self.size.x, self.size.y);
        let left = if self.facing > 0.0 { x + w * 0.65 } else { x - w * 0.25 };
        Rect::new(left, y + h * 0.25, w * 0.62, h * 0.45)
    }

    /// Where gun bullets leave the barrel.
    pub fn muzzle(&self) -> Vec2 {
        let fx = if self.facing > 0.0 { 0.75 } else { 0.25 };
        self.body().point_at(fx, 0.45)
    }

    /// Coin pickup anchor.
    pub fn torso(&self) -> Vec2 {
        self.body().point_at(0.5, 0.65)
    }

    /// Apply damage and clamp at zero. Returns true if this blow was lethal.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        !self.is_alive()
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, self.max_health);
    }

    /// Change the health cap, keeping health within it.
    pub fn set_max_health(&mut self, max_health: f32) {
        self.max_health = max_health;
        self.health = self.health.min(max_health);
    }

    pub fn tick_timers(&mut self, dt: f32) {
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        self.skill_cooldown = (self.skill_cooldown - dt).max(0.0);
        self.gun_cooldown = (self.gun_cooldown - dt).max(0.0);
        self.invulnerable = (self.invulnerable - dt).max(0.0);
    }
}
