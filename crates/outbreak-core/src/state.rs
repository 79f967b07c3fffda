//! Per-tick frame snapshot for presentation.
//!
//! Built by the engine after every `tick` call. Everything here is read-only
//! data; the presentation layer never mutates simulation state through it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{GameEvent, ShakeRequest};
use crate::types::SimTime;

/// Complete frame state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub map: MapId,
    pub skin: Skin,
    pub world: WaveView,
    pub player: PlayerView,
    /// Sorted by id.
    pub enemies: Vec<EnemyView>,
    /// Sorted by id.
    pub bullets: Vec<BulletView>,
    /// Sorted by id.
    pub drops: Vec<DropView>,
    /// Notifications raised since the previous snapshot.
    pub events: Vec<GameEvent>,
    /// Camera shake requests raised since the previous snapshot.
    pub shakes: Vec<ShakeRequest>,
    /// The outer loop should hand `make_snapshot()` to the persistence gateway.
    pub save_requested: bool,
}

/// Wave, score, and boss bar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave: u32,
    pub kills: u32,
    pub coins: u32,
    pub boss_alive: bool,
    pub boss_health: f32,
    pub boss_health_max: f32,
    pub scroll: f32,
    pub floor_y: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub weapon: Weapon,
    pub gun_unlocked: bool,
    pub invulnerable: bool,
    pub attack_cooldown: f32,
    pub skill_cooldown: f32,
    pub gun_cooldown: f32,
    /// Skill readiness in [0, 1]; 1 means ready.
    pub skill_charge: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub archetype: Archetype,
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub flashing: bool,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub id: u32,
    pub side: Side,
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropView {
    pub id: u32,
    pub kind: DropKind,
    pub position: Vec2,
}
