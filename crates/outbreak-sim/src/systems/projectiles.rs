//! Bullet flight and hit resolution for both sides.

use glam::Vec2;
use hecs::{Entity, World};

use outbreak_core::components::{EntityId, Position, Projectile, Velocity};
use outbreak_core::constants::*;
use outbreak_core::enums::Side;

use crate::session::Session;
use crate::systems::{cleanup, combat, player};
use crate::world_setup;

/// Move every bullet of `side` and count down its lifetime.
/// Returns (entity, position, life) in spawn order.
fn advance(world: &mut World, side: Side, dt: f32) -> Vec<(Entity, Vec2, f32)> {
    let mut moved: Vec<(EntityId, Entity, Vec2, f32)> = Vec::new();
    for (entity, (id, proj, pos, vel)) in
        world.query_mut::<(&EntityId, &mut Projectile, &mut Position, &Velocity)>()
    {
        if proj.side != side {
            continue;
        }
        pos.0 += vel.0 * dt;
        proj.life -= dt;
        moved.push((*id, entity, pos.0, proj.life));
    }
    moved.sort_by_key(|(id, ..)| *id);
    moved
        .into_iter()
        .map(|(_, entity, at, life)| (entity, at, life))
        .collect()
}

/// Player bullets: first living enemy containing the bullet takes the hit.
pub fn run_player_bullets(
    world: &mut World,
    session: &mut Session,
    dt: f32,
    despawn_buffer: &mut Vec<Entity>,
) {
    let bullets = advance(world, Side::Player, dt);
    let min_x = -PLAYER_BULLET_MARGIN;
    let max_x = session.viewport.width + PLAYER_BULLET_MARGIN;

    for (bullet, at, life) in bullets {
        let target = combat::living_targets(world)
            .into_iter()
            .find(|(_, body)| body.contains_point(at));

        if let Some((enemy, _)) = target {
            let base = combat::gun_damage(session.wave.wave, session.economy.upgrades.dmg);
            let damage = combat::roll_crit(session, base, GUN_CRIT_MULT);
            combat::apply_damage(world, session, enemy, damage, GUN_HIT_FLASH);
            world_setup::spawn_blood(world, session, at, BULLET_BLOOD_COUNT);
            despawn_buffer.push(bullet);
        } else if life <= 0.0 || at.x < min_x || at.x > max_x {
            despawn_buffer.push(bullet);
        }
    }

    cleanup::flush(world, despawn_buffer);
}

/// Boss projectiles: strike the player when strictly inside the player's body.
pub fn run_boss_projectiles(
    world: &mut World,
    session: &mut Session,
    dt: f32,
    despawn_buffer: &mut Vec<Entity>,
) {
    let bullets = advance(world, Side::Boss, dt);
    let viewport = session.viewport;
    let damage = BOSS_PROJECTILE_BASE_DAMAGE + session.wave.wave as f32 * BOSS_PROJECTILE_DAMAGE_PER_WAVE;

    for (bullet, at, life) in bullets {
        let can_hit = session.player.is_alive() && session.player.invulnerable <= 0.0;
        if can_hit && session.player.body().contains_point(at) {
            player::hurt(session, damage, BOSS_PROJECTILE_INVULNERABILITY, SHAKE_BOSS_HIT);
            world_setup::spawn_blood(world, session, at, PLAYER_HIT_BLOOD_COUNT);
            despawn_buffer.push(bullet);
        } else if life <= 0.0 || !viewport.contains_with_margin(at, BOSS_PROJECTILE_MARGIN) {
            despawn_buffer.push(bullet);
        }
    }

    cleanup::flush(world, despawn_buffer);
}
