//! Entity spawn factories.
//!
//! Creates enemies, projectiles, and drops with their component bundles.
//! Every entity gets a stable `EntityId` from the session.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use outbreak_core::components::*;
use outbreak_core::constants::*;
use outbreak_core::enums::*;

use crate::session::Session;

/// Stat block for an archetype at a given wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeProfile {
    /// Leftward speed range (min, max).
    pub speed: (f32, f32),
    pub size: Vec2,
    pub max_health: f32,
    pub contact_damage: f32,
    pub coin_value: u32,
}

/// Get the profile for an archetype. Health and contact damage scale with the wave.
pub fn archetype_profile(archetype: Archetype, wave: u32) -> ArchetypeProfile {
    let base_health = ENEMY_BASE_HEALTH + wave as f32 * ENEMY_HEALTH_PER_WAVE;
    let base_damage = ENEMY_BASE_CONTACT_DAMAGE + wave as f32 * ENEMY_CONTACT_DAMAGE_PER_WAVE;

    let (speed, size, health_mult, damage_mult, coin_value) = match archetype {
        Archetype::Walker => ((48.0, 92.0), Vec2::new(96.0, 160.0), 1.0, 1.0, 1),
        Archetype::Runner => ((110.0, 150.0), Vec2::new(96.0, 160.0), 0.75, 0.8, 1),
        Archetype::Tank => ((28.0, 55.0), Vec2::new(112.0, 170.0), 1.8, 1.25, 3),
        Archetype::Boss => ((26.0, 40.0), Vec2::new(160.0, 220.0), 7.5, 2.2, 12),
    };

    ArchetypeProfile {
        speed,
        size,
        max_health: base_health * health_mult,
        contact_damage: base_damage * damage_mult,
        coin_value,
    }
}

/// Spawn an enemy just past the right edge, standing on the ground.
pub fn spawn_enemy(world: &mut World, session: &mut Session, archetype: Archetype) -> Entity {
    let entry_x = session.viewport.width + session.rng.gen_range(0.0..ENEMY_ENTRY_SPREAD);
    spawn_enemy_at(world, session, archetype, entry_x)
}

/// Spawn an enemy at a given x. Speed is still rolled from the archetype range.
pub fn spawn_enemy_at(
    world: &mut World,
    session: &mut Session,
    archetype: Archetype,
    x: f32,
) -> Entity {
    let profile = archetype_profile(archetype, session.wave.wave);
    let speed = session.rng.gen_range(profile.speed.0..profile.speed.1);
    let id = session.next_id();
    let enemy = Enemy {
        archetype,
        health: profile.max_health,
        max_health: profile.max_health,
        contact_damage: profile.contact_damage,
        coin_value: profile.coin_value,
        hit_flash: 0.0,
        death_timer: 0.0,
    };
    let body = (
        id,
        Position(Vec2::new(x, session.floor_y() - profile.size.y)),
        Velocity(Vec2::new(-speed, 0.0)),
        Hitbox(profile.size),
        enemy,
    );

    log::debug!(
        "spawned {archetype:?} #{} at x={x:.0} wave={}",
        id.0,
        session.wave.wave
    );

    if archetype == Archetype::Boss {
        session.wave.boss_alive = true;
        session.wave.boss_health = profile.max_health;
        session.wave.boss_health_max = profile.max_health;
        let mut builder = hecs::EntityBuilder::new();
        builder.add_bundle(body).add(BossPattern::default());
        world.spawn(builder.build())
    } else {
        world.spawn(body)
    }
}

/// Spawn a bullet for either side.
pub fn spawn_projectile(
    world: &mut World,
    session: &mut Session,
    side: Side,
    origin: Vec2,
    velocity: Vec2,
    life: f32,
) -> Entity {
    let id = session.next_id();
    world.spawn((
        id,
        Position(origin),
        Velocity(velocity),
        Projectile { side, life },
    ))
}

/// Scatter `count` coins around `at`.
pub fn spawn_coins(world: &mut World, session: &mut Session, at: Vec2, count: u32) {
    for _ in 0..count {
        let rng = &mut session.rng;
        let offset = Vec2::new(rng.gen_range(-12.0..12.0), rng.gen_range(-10.0..10.0));
        let velocity = Vec2::new(rng.gen_range(-110.0..110.0), rng.gen_range(-260.0..-140.0));
        let life = rng.gen_range(0.8..1.5);
        spawn_drop(world, session, DropKind::Coin, at + offset, velocity, life);
    }
}

/// Spray `count` blood particles around `at`.
pub fn spawn_blood(world: &mut World, session: &mut Session, at: Vec2, count: usize) {
    for _ in 0..count {
        let rng = &mut session.rng;
        let offset = Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        let velocity = Vec2::new(rng.gen_range(-240.0..240.0), rng.gen_range(-360.0..-120.0));
        let life = -rng.gen_range(0.25..0.55);
        spawn_drop(world, session, DropKind::Blood, at + offset, velocity, life);
    }
}

fn spawn_drop(
    world: &mut World,
    session: &mut Session,
    kind: DropKind,
    at: Vec2,
    velocity: Vec2,
    life: f32,
) -> Entity {
    let id = session.next_id();
    world.spawn((
        id,
        Position(at),
        Velocity(velocity),
        Drop {
            kind,
            age: 0.0,
            life,
        },
    ))
}
