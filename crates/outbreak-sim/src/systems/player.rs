//! Player movement, regeneration, timers, and defeat check.

use outbreak_core::constants::*;
use outbreak_core::events::GameEvent;

use crate::session::Session;

/// Passive regeneration. Runs before spawning, like the world clock.
pub fn regenerate(session: &mut Session, dt: f32) {
    let rate = session.stats.regen_per_sec;
    if rate > 0.0 && session.player.is_alive() {
        session.player.heal(dt * rate);
    }
}

/// Integrate movement, pin to the ground, and count down timers.
pub fn run(session: &mut Session, dt: f32) {
    let floor_y = session.floor_y();
    let width = session.viewport.width;
    let intent = session.intent;
    let max_health = session.stats.max_health;
    let player = &mut session.player;

    player.position.y = floor_y - player.size.y;
    player.set_max_health(max_health);

    player.velocity.x = intent.x * PLAYER_SPEED;
    player.velocity.y = 0.0;
    if player.velocity.x.abs() > FACING_DEADZONE {
        player.facing = player.velocity.x.signum();
    }
    let max_x = (width - player.size.x - PLAYER_EDGE_MARGIN).max(PLAYER_EDGE_MARGIN);
    player.position.x =
        (player.position.x + player.velocity.x * dt).clamp(PLAYER_EDGE_MARGIN, max_x);

    player.tick_timers(dt);
}

/// Damage the player unless invulnerable. Returns true if it landed.
pub fn hurt(session: &mut Session, amount: f32, invulnerability: f32, shake: (f32, f32)) -> bool {
    let player = &mut session.player;
    if player.invulnerable > 0.0 || !player.is_alive() {
        return false;
    }
    player.take_damage(amount);
    player.invulnerable = invulnerability;
    session.outbox.shake(shake);
    true
}

/// Flip to game over if the player has no health left. Returns true on the flip.
pub fn check_defeat(session: &mut Session) -> bool {
    if session.player.is_alive() {
        return false;
    }
    session.outbox.notify(GameEvent::GameOver {
        wave: session.wave.wave,
        kills: session.wave.kills,
    });
    session.outbox.request_save();
    log::info!(
        "player down at wave {} with {} kills",
        session.wave.wave,
        session.wave.kills
    );
    true
}
