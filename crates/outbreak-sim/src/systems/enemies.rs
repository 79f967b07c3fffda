//! Enemy movement, boss pattern, contact damage, recycling, and death drift.

use hecs::{Entity, World};
use rand::Rng;

use outbreak_boss_ai::pattern::{self, BossContext, Volley};
use outbreak_core::components::{BossPattern, Enemy, Hitbox, Position, Velocity};
use outbreak_core::constants::*;
use outbreak_core::enums::Side;
use outbreak_core::types::Rect;

use crate::session::Session;
use crate::systems::{cleanup, player};
use crate::world_setup;

pub fn run(world: &mut World, session: &mut Session, dt: f32, despawn_buffer: &mut Vec<Entity>) {
    let floor_y = session.floor_y();
    let width = session.viewport.width;
    let wave = session.wave.wave;
    let mut volleys: Vec<Volley> = Vec::new();

    for (entity, (enemy, pos, vel, hitbox, boss)) in world.query_mut::<(
        &mut Enemy,
        &mut Position,
        &mut Velocity,
        &Hitbox,
        Option<&mut BossPattern>,
    )>() {
        enemy.hit_flash = (enemy.hit_flash - dt).max(0.0);

        if enemy.health <= 0.0 {
            pos.0.x += vel.0.x * dt * DEATH_DRIFT_FACTOR;
            enemy.death_timer -= dt;
            if enemy.death_timer <= 0.0 {
                despawn_buffer.push(entity);
            }
            continue;
        }

        pos.0.x += vel.0.x * dt;
        pos.0.y = floor_y - hitbox.0.y;

        if let Some(boss) = boss {
            let update = pattern::evaluate(&BossContext {
                body: Rect::from_origin_size(pos.0, hitbox.0),
                shoot_timer: boss.shoot_timer,
                wave,
                player: session.player.body(),
                player_facing: session.player.facing,
                dt,
            });
            boss.shoot_timer = update.shoot_timer;
            vel.0.x = update.velocity_x;
            volleys.extend(update.volley);
        }

        let body = Rect::from_origin_size(pos.0, hitbox.0);
        if session.player.body().overlaps(&body) {
            player::hurt(
                session,
                dt * enemy.contact_damage,
                CONTACT_INVULNERABILITY,
                SHAKE_CONTACT,
            );
        }

        if pos.0.x < -hitbox.0.x * ENEMY_RECYCLE_WIDTHS {
            pos.0.x = width
                + session
                    .rng
                    .gen_range(ENEMY_RECYCLE_MIN_OFFSET..ENEMY_RECYCLE_MAX_OFFSET);
        }
    }

    for volley in volleys {
        for velocity in volley.velocities {
            world_setup::spawn_projectile(
                world,
                session,
                Side::Boss,
                volley.origin,
                velocity,
                BOSS_PROJECTILE_LIFE,
            );
        }
        session.outbox.shake(SHAKE_BOSS_VOLLEY);
    }

    cleanup::flush(world, despawn_buffer);
}
