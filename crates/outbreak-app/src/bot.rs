//! Scripted autopilot.
//!
//! Reads the latest frame and emits the commands a touch player would:
//! walk toward the nearest living enemy, swing or shoot when in reach, pop
//! the shockwave into a crowd, spend coins, and restart after a game over.

use outbreak_core::commands::PlayerCommand;
use outbreak_core::constants::SKILL_RADIUS;
use outbreak_core::enums::{GamePhase, UpgradeKind, Weapon};
use outbreak_core::state::{EnemyView, FrameSnapshot};
use outbreak_sim::economy::Economy;

/// Stop walking once the nearest enemy is this close (center to center).
const MELEE_GAP: f32 = 90.0;
/// Swing while the enemy center is this close in front.
const MELEE_REACH: f32 = 115.0;
/// Keep this distance when shooting.
const GUN_GAP: f32 = 320.0;
/// Switch to the gun beyond this distance.
const GUN_SWITCH_RANGE: f32 = 260.0;
/// Enemies in shockwave range before the skill is worth using.
const SKILL_CROWD: usize = 2;
/// Frames to wait on the game-over screen.
const RESTART_DELAY_FRAMES: u32 = 90;

#[derive(Debug, Default)]
pub struct Autopilot {
    game_over_frames: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands for the next tick.
    pub fn decide(&mut self, frame: &FrameSnapshot, economy: &Economy) -> Vec<PlayerCommand> {
        match frame.phase {
            GamePhase::GameOver => {
                self.game_over_frames += 1;
                if self.game_over_frames >= RESTART_DELAY_FRAMES {
                    self.game_over_frames = 0;
                    vec![PlayerCommand::NewGame]
                } else {
                    Vec::new()
                }
            }
            GamePhase::Active => {
                self.game_over_frames = 0;
                let mut commands = Vec::new();
                if let Some(upgrade) = next_purchase(economy) {
                    commands.push(PlayerCommand::Purchase { upgrade });
                }
                commands.extend(fight(frame));
                commands
            }
            GamePhase::Menu | GamePhase::Paused => Vec::new(),
        }
    }
}

/// The gun first once affordable, otherwise the cheapest affordable level.
pub fn next_purchase(economy: &Economy) -> Option<UpgradeKind> {
    if economy.can_afford(UpgradeKind::Gun) {
        return Some(UpgradeKind::Gun);
    }
    UpgradeKind::ALL
        .into_iter()
        .filter(|kind| economy.can_afford(*kind))
        .min_by_key(|kind| economy.cost_of(*kind))
}

fn center_x(enemy: &EnemyView) -> f32 {
    enemy.position.x + enemy.size.x * 0.5
}

fn fight(frame: &FrameSnapshot) -> Vec<PlayerCommand> {
    let player = &frame.player;
    let player_x = player.position.x + player.size.x * 0.5;
    let living = || frame.enemies.iter().filter(|e| e.alive);

    let Some(target) = living().min_by(|a, b| {
        (center_x(a) - player_x)
            .abs()
            .total_cmp(&(center_x(b) - player_x).abs())
    }) else {
        return vec![PlayerCommand::Move { x: 0.0, y: 0.0 }];
    };

    let dx = center_x(target) - player_x;
    let facing_target = dx.abs() < 1.0 || dx.signum() == player.facing.signum();
    let mut commands = Vec::new();

    let crowd = living()
        .filter(|e| (center_x(e) - player_x).abs() < SKILL_RADIUS)
        .count();
    if crowd >= SKILL_CROWD && player.skill_charge >= 1.0 {
        commands.push(PlayerCommand::Skill);
    }

    let want_gun = player.gun_unlocked && dx.abs() > GUN_SWITCH_RANGE;
    if player.gun_unlocked && want_gun != (player.weapon == Weapon::Gun) {
        commands.push(PlayerCommand::SwapWeapon);
    }

    let gap = if want_gun { GUN_GAP } else { MELEE_GAP };
    let step = if dx.abs() > gap || !facing_target {
        dx.signum()
    } else {
        0.0
    };
    commands.push(PlayerCommand::Move { x: step, y: 0.0 });

    let in_reach = if want_gun { true } else { dx.abs() < MELEE_REACH };
    if facing_target && in_reach {
        commands.push(PlayerCommand::Primary);
    }
    commands
}
