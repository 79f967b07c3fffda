//! Wave scheduler and spawn director.
//!
//! The scheduler accumulates time while the field is under-populated and asks
//! the director for one enemy every `SPAWN_INTERVAL`. The director applies an
//! ordered rule list: boss waves force a boss, otherwise a single uniform
//! sample picks tank, runner, or walker.

use hecs::World;
use rand::Rng;

use outbreak_core::components::Enemy;
use outbreak_core::constants::*;
use outbreak_core::enums::Archetype;
use outbreak_core::events::GameEvent;

use crate::session::Session;
use crate::world_setup;

/// Living enemies the field holds before the scheduler stops accumulating.
pub fn target_population(wave: u32) -> usize {
    BASE_POPULATION.saturating_add(wave as usize)
}

/// Whether this wave forces a boss onto an empty boss slot.
pub fn is_boss_wave(wave: u32) -> bool {
    wave % BOSS_WAVE_PERIOD == 0
}

/// Map a uniform sample in [0, 1) to a regular archetype.
pub fn archetype_for_sample(wave: u32, sample: f32) -> Archetype {
    if wave >= TANK_MIN_WAVE && sample < TANK_THRESHOLD {
        Archetype::Tank
    } else if wave >= RUNNER_MIN_WAVE && sample < RUNNER_THRESHOLD {
        Archetype::Runner
    } else {
        Archetype::Walker
    }
}

/// Run the ordered rule list. `None` means nothing spawns.
/// The sample is drawn only when no boss is forced.
pub fn choose_archetype(wave: u32, boss_alive: bool, rng: &mut impl Rng) -> Option<Archetype> {
    if boss_alive {
        return None;
    }
    if is_boss_wave(wave) {
        return Some(Archetype::Boss);
    }
    Some(archetype_for_sample(wave, rng.gen::<f32>()))
}

pub fn living_enemy_count(world: &mut World) -> usize {
    world
        .query_mut::<&Enemy>()
        .into_iter()
        .filter(|(_, enemy)| enemy.health > 0.0)
        .count()
}

fn living_boss_present(world: &mut World) -> bool {
    world
        .query_mut::<&Enemy>()
        .into_iter()
        .any(|(_, enemy)| enemy.archetype == Archetype::Boss && enemy.health > 0.0)
}

/// Ask the director for one enemy and spawn it.
pub fn spawn_next(world: &mut World, session: &mut Session) -> Option<Archetype> {
    let boss_blocked = session.wave.boss_alive || living_boss_present(world);
    let archetype = choose_archetype(session.wave.wave, boss_blocked, &mut session.rng)?;
    world_setup::spawn_enemy(world, session, archetype);

    if archetype == Archetype::Boss {
        session.outbox.notify(GameEvent::BossIncoming);
        session.outbox.shake(SHAKE_BOSS_INCOMING);
        log::info!("boss incoming at wave {}", session.wave.wave);
    }
    Some(archetype)
}

/// Scheduler step: accumulate while under-populated, spawn when the interval elapses.
pub fn run(world: &mut World, session: &mut Session, dt: f32) {
    if session.wave.boss_alive {
        return;
    }
    if living_enemy_count(world) >= target_population(session.wave.wave) {
        return;
    }

    session.wave.spawn_accumulator += dt;
    if session.wave.spawn_accumulator > SPAWN_INTERVAL {
        session.wave.spawn_accumulator = 0.0;
        spawn_next(world, session);
    }
}

/// Advance the wave by one when the kill target is met. Returns true if it advanced.
pub fn check_wave_advance(session: &mut Session) -> bool {
    if session.wave.kills < session.wave.kill_target() {
        return false;
    }
    session.wave.wave = session.wave.wave.saturating_add(1);
    session.outbox.notify(GameEvent::WaveUp {
        wave: session.wave.wave,
    });
    session.outbox.request_save();
    log::debug!(
        "wave {} reached with {} kills",
        session.wave.wave,
        session.wave.kills
    );
    true
}
