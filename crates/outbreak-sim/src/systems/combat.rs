//! Combat resolver: player actions and the single damage path.
//!
//! Every damage source (melee, bullets, shockwave) funnels through
//! `apply_damage`, which ignores enemies that are already dead. The blow that
//! brings an enemy to zero is the only one that books the kill.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use outbreak_core::components::{EntityId, Enemy, Hitbox, Position};
use outbreak_core::constants::*;
use outbreak_core::enums::{Archetype, Side, Weapon};
use outbreak_core::events::GameEvent;
use outbreak_core::types::Rect;

use crate::session::Session;
use crate::world_setup;

pub fn melee_damage(wave: u32, dmg_level: u32) -> f32 {
    MELEE_BASE_DAMAGE + wave as f32 * MELEE_DAMAGE_PER_WAVE + dmg_level as f32
}

pub fn gun_damage(wave: u32, dmg_level: u32) -> f32 {
    GUN_BASE_DAMAGE + wave as f32 * GUN_DAMAGE_PER_WAVE + dmg_level as f32 * GUN_DAMAGE_PER_DMG_LEVEL
}

pub fn skill_damage(wave: u32, dmg_level: u32) -> f32 {
    SKILL_BASE_DAMAGE
        + wave as f32 * SKILL_DAMAGE_PER_WAVE
        + dmg_level as f32 * SKILL_DAMAGE_PER_DMG_LEVEL
}

/// Roll a crit from the session RNG.
pub fn roll_crit(session: &mut Session, base: f32, multiplier: f32) -> f32 {
    if session.rng.gen::<f32>() < session.stats.crit_probability {
        base * multiplier
    } else {
        base
    }
}

/// Living enemies in spawn order, with their bodies.
pub fn living_targets(world: &mut World) -> Vec<(Entity, Rect)> {
    let mut targets: Vec<(EntityId, Entity, Rect)> = world
        .query_mut::<(&EntityId, &Enemy, &Position, &Hitbox)>()
        .into_iter()
        .filter(|(_, (_, enemy, _, _))| enemy.health > 0.0)
        .map(|(entity, (id, _, pos, hitbox))| {
            (*id, entity, Rect::from_origin_size(pos.0, hitbox.0))
        })
        .collect();
    targets.sort_by_key(|(id, _, _)| *id);
    targets
        .into_iter()
        .map(|(_, entity, body)| (entity, body))
        .collect()
}

/// Damage an enemy. Dead or missing enemies are ignored.
pub fn apply_damage(
    world: &mut World,
    session: &mut Session,
    entity: Entity,
    amount: f32,
    flash: f32,
) {
    let (archetype, body, coin_value, health) = {
        let Ok((enemy, pos, hitbox)) =
            world.query_one_mut::<(&mut Enemy, &Position, &Hitbox)>(entity)
        else {
            return;
        };
        if enemy.health <= 0.0 {
            return;
        }
        enemy.health -= amount;
        enemy.hit_flash = flash;
        if enemy.health <= 0.0 {
            enemy.death_timer = DEATH_DRIFT_SECS;
        }
        (
            enemy.archetype,
            Rect::from_origin_size(pos.0, hitbox.0),
            enemy.coin_value,
            enemy.health,
        )
    };

    if archetype == Archetype::Boss {
        session.wave.boss_health = health.max(0.0);
    }
    if health > 0.0 {
        return;
    }

    session.wave.kills = session.wave.kills.saturating_add(1);
    session.outbox.shake(SHAKE_KILL);
    world_setup::spawn_coins(world, session, body.point_at(0.5, 0.45), coin_value);
    world_setup::spawn_blood(world, session, body.point_at(0.5, 0.55), DEATH_BLOOD_COUNT);

    if archetype == Archetype::Boss {
        session.wave.boss_alive = false;
        session.outbox.notify(GameEvent::BossDown);
        session.outbox.request_save();
        log::info!("boss down at wave {}", session.wave.wave);
    }
}

/// Melee swing. Returns false if the swing did not happen.
pub fn melee(world: &mut World, session: &mut Session) -> bool {
    let player = &mut session.player;
    if player.weapon != Weapon::Melee || player.attack_cooldown > 0.0 {
        return false;
    }
    player.attack_cooldown = MELEE_COOLDOWN;
    let reach = player.melee_hitbox();
    session.outbox.shake(SHAKE_MELEE);

    let base = melee_damage(session.wave.wave, session.economy.upgrades.dmg);
    let targets: Vec<(Entity, Rect)> = living_targets(world)
        .into_iter()
        .filter(|(_, body)| body.overlaps(&reach))
        .collect();

    for &(entity, body) in &targets {
        let damage = roll_crit(session, base, MELEE_CRIT_MULT);
        apply_damage(world, session, entity, damage, MELEE_HIT_FLASH);
        world_setup::spawn_blood(world, session, body.point_at(0.55, 0.55), HIT_BLOOD_COUNT);
    }
    if targets.is_empty() {
        session.outbox.notify(GameEvent::Miss);
    }
    true
}

/// Fire one bullet. Returns false if no shot was fired.
pub fn shoot(world: &mut World, session: &mut Session) -> bool {
    let player = &mut session.player;
    if !session.stats.gun_unlocked || player.weapon != Weapon::Gun || player.gun_cooldown > 0.0 {
        return false;
    }
    player.gun_cooldown = session.stats.fire_cooldown;
    let origin = player.muzzle();
    let velocity = Vec2::new(player.facing.signum() * session.stats.bullet_speed, 0.0);
    session.outbox.shake(SHAKE_GUN);

    world_setup::spawn_projectile(world, session, Side::Player, origin, velocity, PLAYER_BULLET_LIFE);
    true
}

/// Shockwave around the player. Returns false while cooling down.
pub fn skill(world: &mut World, session: &mut Session) -> bool {
    let remaining = session.player.skill_cooldown;
    if remaining > 0.0 {
        session.outbox.notify(GameEvent::SkillCooldown { remaining });
        return false;
    }
    session.player.skill_cooldown = SKILL_COOLDOWN;
    session.outbox.shake(SHAKE_SKILL);

    let center_x = session.player.body().center_x();
    let damage = skill_damage(session.wave.wave, session.economy.upgrades.dmg);
    let targets: Vec<(Entity, Rect)> = living_targets(world)
        .into_iter()
        .filter(|(_, body)| (body.center_x() - center_x).abs() < SKILL_RADIUS)
        .collect();

    for (entity, body) in targets {
        apply_damage(world, session, entity, damage, SKILL_HIT_FLASH);
        world_setup::spawn_blood(world, session, body.point_at(0.55, 0.55), HIT_BLOOD_COUNT);
    }
    true
}

/// Melee or shoot depending on the equipped weapon.
pub fn primary(world: &mut World, session: &mut Session) -> bool {
    match session.player.weapon {
        Weapon::Melee => melee(world, session),
        Weapon::Gun => shoot(world, session),
    }
}

/// Toggle the weapon. Refused with `GunLocked` until the gun is bought.
pub fn swap_weapon(session: &mut Session) -> bool {
    if !session.stats.gun_unlocked {
        session.outbox.notify(GameEvent::GunLocked);
        return false;
    }
    let weapon = session.player.weapon.toggled();
    session.player.weapon = weapon;
    session.outbox.notify(GameEvent::WeaponSwapped { weapon });
    true
}
