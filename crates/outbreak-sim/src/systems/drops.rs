//! Ballistic drops: coin pickup, expiry, and out-of-bounds removal.

use hecs::{Entity, World};

use outbreak_core::components::{Drop, Position, Velocity};
use outbreak_core::constants::*;
use outbreak_core::enums::DropKind;

use crate::session::Session;
use crate::systems::cleanup;

fn gravity_scale(kind: DropKind) -> f32 {
    match kind {
        DropKind::Coin => COIN_GRAVITY_SCALE,
        DropKind::Blood => BLOOD_GRAVITY_SCALE,
    }
}

pub fn run(world: &mut World, session: &mut Session, dt: f32, despawn_buffer: &mut Vec<Entity>) {
    let torso = session.player.torso();
    let width = session.viewport.width;
    let bottom = session.viewport.height + DROP_MARGIN;
    let mut collected = 0u32;

    for (entity, (drop, pos, vel)) in world.query_mut::<(&mut Drop, &mut Position, &mut Velocity)>() {
        drop.age += dt;
        pos.0 += vel.0 * dt;
        vel.0.y += GRAVITY * dt * gravity_scale(drop.kind);

        if drop.kind == DropKind::Coin && pos.0.distance(torso) < COIN_PICKUP_RADIUS {
            collected += 1;
            despawn_buffer.push(entity);
        } else if drop.age >= drop.life.abs()
            || pos.0.x < -DROP_MARGIN
            || pos.0.x > width + DROP_MARGIN
            || pos.0.y > bottom
        {
            despawn_buffer.push(entity);
        }
    }

    if collected > 0 {
        session.economy.credit(collected);
        session.outbox.request_save();
    }

    cleanup::flush(world, despawn_buffer);
}
