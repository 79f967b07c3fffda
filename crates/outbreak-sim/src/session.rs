//! Per-session state that lives outside the ECS world.
//!
//! Systems receive `&mut World` for entities and `&mut Session` for
//! everything else: player, wave progress, economy, RNG, and the outbox of
//! events and shake requests raised during the tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use outbreak_core::components::EntityId;
use outbreak_core::enums::{MapId, Skin};
use outbreak_core::events::{GameEvent, ShakeRequest};
use outbreak_core::types::Viewport;

use crate::economy::{DerivedStats, Economy};
use crate::player::Player;
use crate::wave::WaveState;

/// Feedback collected during a tick and handed out with the frame snapshot.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    pub events: Vec<GameEvent>,
    pub shakes: Vec<ShakeRequest>,
    pub save_requested: bool,
}

impl Outbox {
    pub fn notify(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn shake(&mut self, request: impl Into<ShakeRequest>) {
        self.shakes.push(request.into());
    }

    pub fn request_save(&mut self) {
        self.save_requested = true;
    }

    pub fn take(&mut self) -> Outbox {
        std::mem::take(self)
    }
}

pub struct Session {
    pub viewport: Viewport,
    pub rng: ChaCha8Rng,
    pub player: Player,
    pub wave: WaveState,
    pub economy: Economy,
    pub stats: DerivedStats,
    pub map: MapId,
    pub skin: Skin,
    /// Movement intent, magnitude at most 1.
    pub intent: Vec2,
    pub outbox: Outbox,
    next_entity_id: u32,
}

impl Session {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let stats = DerivedStats::default();
        Self {
            viewport,
            rng: ChaCha8Rng::seed_from_u64(seed),
            player: Player::spawn(&viewport, stats.max_health),
            wave: WaveState::default(),
            economy: Economy::default(),
            stats,
            map: MapId::default(),
            skin: Skin::default(),
            intent: Vec2::ZERO,
            outbox: Outbox::default(),
            next_entity_id: 0,
        }
    }

    /// Allocate the next stable entity id.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.wrapping_add(1);
        id
    }

    /// Recompute derived stats after an upgrade level changed.
    pub fn refresh_stats(&mut self) {
        self.stats = self.economy.stats();
        self.player.set_max_health(self.stats.max_health);
    }

    /// Ground line for the current viewport.
    pub fn floor_y(&self) -> f32 {
        self.viewport.floor_y()
    }
}
