//! Boss attack pattern.
//!
//! Pure functions that compute the next volley timer, horizontal velocity and
//! an optional projectile fan from the boss and player bodies.
//! No ECS dependency; operates on plain data.

use glam::Vec2;

use outbreak_core::constants::*;
use outbreak_core::types::Rect;

/// Input to the pattern for a single boss.
#[derive(Debug, Clone, Copy)]
pub struct BossContext {
    pub body: Rect,
    pub shoot_timer: f32,
    pub wave: u32,
    pub player: Rect,
    /// +1 when the player faces right, -1 when facing left.
    pub player_facing: f32,
    pub dt: f32,
}

/// A fan of projectiles fired from one origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volley {
    pub origin: Vec2,
    pub velocities: [Vec2; BOSS_VOLLEY_SIZE],
}

/// Output from the pattern.
#[derive(Debug, Clone, Copy)]
pub struct BossUpdate {
    pub shoot_timer: f32,
    pub velocity_x: f32,
    pub volley: Option<Volley>,
}

/// Evaluate one tick of the boss pattern.
pub fn evaluate(ctx: &BossContext) -> BossUpdate {
    let mut shoot_timer = ctx.shoot_timer - ctx.dt;
    let volley = if shoot_timer <= 0.0 {
        shoot_timer = volley_interval(ctx.wave);
        Some(fan(ctx.body, ctx.player))
    } else {
        None
    };

    BossUpdate {
        shoot_timer,
        velocity_x: standoff_velocity(ctx),
        volley,
    }
}

/// Seconds between volleys at a given wave. Shrinks with the wave, floored.
pub fn volley_interval(wave: u32) -> f32 {
    (BOSS_VOLLEY_BASE_INTERVAL - wave as f32 * BOSS_VOLLEY_INTERVAL_PER_WAVE)
        .max(BOSS_VOLLEY_MIN_INTERVAL)
}

/// Projectile fan centered on the player's chest.
pub fn fan(boss: Rect, player: Rect) -> Volley {
    let origin = boss.point_at(0.25, 0.45);
    let target = player.point_at(0.5, 0.55);
    let aim = target - origin;
    let base_angle = aim.y.atan2(aim.x);

    let half = (BOSS_VOLLEY_SIZE / 2) as i32;
    let mut velocities = [Vec2::ZERO; BOSS_VOLLEY_SIZE];
    for (slot, k) in velocities.iter_mut().zip(-half..=half) {
        let angle = base_angle + k as f32 * BOSS_VOLLEY_SPREAD;
        *slot = Vec2::new(angle.cos(), angle.sin()) * BOSS_PROJECTILE_SPEED;
    }

    Volley { origin, velocities }
}

/// Horizontal velocity that steers the boss toward a point ahead of the player.
pub fn standoff_velocity(ctx: &BossContext) -> f32 {
    let offset = if ctx.player_facing > 0.0 {
        BOSS_STANDOFF
    } else {
        -BOSS_STANDOFF
    };
    let target_x = ctx.player.x + offset;
    ((target_x - ctx.body.x) * BOSS_STEER_GAIN).clamp(BOSS_MIN_VX, BOSS_MAX_VX)
}
