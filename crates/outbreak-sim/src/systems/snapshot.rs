//! Snapshot system: queries the ECS world and builds a `FrameSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use outbreak_core::components::*;
use outbreak_core::constants::SKILL_COOLDOWN;
use outbreak_core::enums::GamePhase;
use outbreak_core::state::*;
use outbreak_core::types::SimTime;

use crate::session::{Outbox, Session};

/// Build a complete frame snapshot from the current world and session.
pub fn build_snapshot(
    world: &World,
    session: &Session,
    time: &SimTime,
    phase: GamePhase,
    outbox: Outbox,
) -> FrameSnapshot {
    FrameSnapshot {
        time: *time,
        phase,
        map: session.map,
        skin: session.skin,
        world: build_wave(session),
        player: build_player(session),
        enemies: build_enemies(world),
        bullets: build_bullets(world),
        drops: build_drops(world),
        events: outbox.events,
        shakes: outbox.shakes,
        save_requested: outbox.save_requested,
    }
}

fn build_wave(session: &Session) -> WaveView {
    let wave = &session.wave;
    WaveView {
        wave: wave.wave,
        kills: wave.kills,
        coins: session.economy.coins,
        boss_alive: wave.boss_alive,
        boss_health: wave.boss_health,
        boss_health_max: wave.boss_health_max,
        scroll: wave.scroll,
        floor_y: session.floor_y(),
    }
}

fn build_player(session: &Session) -> PlayerView {
    let player = &session.player;
    PlayerView {
        position: player.position,
        velocity: player.velocity,
        size: player.size,
        facing: player.facing,
        health: player.health,
        max_health: player.max_health,
        weapon: player.weapon,
        gun_unlocked: session.stats.gun_unlocked,
        invulnerable: player.invulnerable > 0.0,
        attack_cooldown: player.attack_cooldown,
        skill_cooldown: player.skill_cooldown,
        gun_cooldown: player.gun_cooldown,
        skill_charge: 1.0 - (player.skill_cooldown / SKILL_COOLDOWN).clamp(0.0, 1.0),
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&EntityId, &Enemy, &Position, &Velocity, &Hitbox)>()
        .iter()
        .map(|(_, (id, enemy, pos, vel, hitbox))| EnemyView {
            id: id.0,
            archetype: enemy.archetype,
            position: pos.0,
            size: hitbox.0,
            velocity: vel.0,
            health: enemy.health.max(0.0),
            max_health: enemy.max_health,
            flashing: enemy.hit_flash > 0.0,
            alive: enemy.health > 0.0,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<BulletView> = world
        .query::<(&EntityId, &Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(_, (id, proj, pos, vel))| BulletView {
            id: id.0,
            side: proj.side,
            position: pos.0,
            velocity: vel.0,
        })
        .collect();
    bullets.sort_by_key(|b| b.id);
    bullets
}

fn build_drops(world: &World) -> Vec<DropView> {
    let mut drops: Vec<DropView> = world
        .query::<(&EntityId, &Drop, &Position)>()
        .iter()
        .map(|(_, (id, drop, pos))| DropView {
            id: id.0,
            kind: drop.kind,
            position: pos.0,
        })
        .collect();
    drops.sort_by_key(|d| d.id);
    drops
}
