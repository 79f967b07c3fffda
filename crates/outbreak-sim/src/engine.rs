//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the session, processes
//! player commands, runs all systems in a fixed order, and produces
//! `FrameSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::World;
use serde::{Deserialize, Serialize};

use outbreak_core::commands::PlayerCommand;
use outbreak_core::constants::*;
use outbreak_core::enums::{GamePhase, MapId, RejectReason, Skin, UpgradeKind};
use outbreak_core::events::GameEvent;
use outbreak_core::save::{SaveSnapshot, WorldProgress};
use outbreak_core::state::FrameSnapshot;
use outbreak_core::types::{SimTime, Viewport};

use crate::economy::{Economy, PurchaseError};
use crate::player::Player;
use crate::session::Session;
use crate::systems;
use crate::wave::WaveState;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Playfield size.
    pub viewport: Viewport,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            viewport: Viewport::default(),
        }
    }
}

/// Clamp a frame delta into the range a single tick may integrate.
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_DT)
    } else {
        0.0
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    session: Session,
    time: SimTime,
    phase: GamePhase,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. Starts at the menu.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            session: Session::new(config.seed, config.viewport),
            time: SimTime::default(),
            phase: GamePhase::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::with_capacity(64),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds (clamped) and return the resulting snapshot.
    pub fn tick(&mut self, dt: f32) -> FrameSnapshot {
        let dt = clamp_dt(dt);
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(dt);
            self.time.advance(dt);
            log::trace!(
                "tick {} dt={dt:.4} entities={}",
                self.time.tick,
                self.world.len()
            );
        }

        self.frame_snapshot()
    }

    /// Build a snapshot without advancing, handing out pending events.
    pub fn frame_snapshot(&mut self) -> FrameSnapshot {
        let outbox = self.session.outbox.take();
        systems::snapshot::build_snapshot(&self.world, &self.session, &self.time, self.phase, outbox)
    }

    /// Drain events raised by direct calls since the last snapshot.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.session.outbox.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.session.player
    }

    pub fn wave(&self) -> &WaveState {
        &self.session.wave
    }

    pub fn economy(&self) -> &Economy {
        &self.session.economy
    }

    pub fn map(&self) -> MapId {
        self.session.map
    }

    pub fn skin(&self) -> Skin {
        self.session.skin
    }

    pub fn viewport(&self) -> Viewport {
        self.session.viewport
    }

    /// Direct access to the session for tests that stage a scenario.
    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut World, &mut Session) {
        (&mut self.world, &mut self.session)
    }

    // --- Direct actions ---

    /// Set the movement intent. Magnitude is clamped to 1.
    pub fn set_move_intent(&mut self, x: f32, y: f32) {
        let intent = Vec2::new(x, y);
        self.session.intent = if intent.is_finite() {
            intent.clamp_length_max(1.0)
        } else {
            Vec2::ZERO
        };
    }

    pub fn attack(&mut self) -> bool {
        self.is_active() && systems::combat::melee(&mut self.world, &mut self.session)
    }

    pub fn shoot(&mut self) -> bool {
        self.is_active() && systems::combat::shoot(&mut self.world, &mut self.session)
    }

    pub fn primary(&mut self) -> bool {
        self.is_active() && systems::combat::primary(&mut self.world, &mut self.session)
    }

    pub fn skill(&mut self) -> bool {
        self.is_active() && systems::combat::skill(&mut self.world, &mut self.session)
    }

    pub fn swap_weapon(&mut self) -> bool {
        self.is_active() && systems::combat::swap_weapon(&mut self.session)
    }

    /// Buy one level. Allowed in any phase.
    pub fn purchase(&mut self, upgrade: UpgradeKind) -> bool {
        let session = &mut self.session;
        match session.economy.purchase(upgrade) {
            Ok(cost) => {
                session.refresh_stats();
                if upgrade == UpgradeKind::Hp {
                    session.player.heal(HP_PURCHASE_HEAL);
                }
                let level = session.economy.upgrades.level(upgrade);
                session.outbox.notify(GameEvent::PurchaseCompleted {
                    upgrade,
                    cost,
                    level,
                });
                if upgrade == UpgradeKind::Gun {
                    session.outbox.notify(GameEvent::GunUnlocked);
                }
                session.outbox.request_save();
                log::info!("bought {} level {level} for {cost}", upgrade.as_str());
                true
            }
            Err(e) => {
                let (cost, reason) = match e {
                    PurchaseError::InsufficientCoins { cost, .. } => {
                        (cost, RejectReason::InsufficientCoins)
                    }
                    PurchaseError::AlreadyOwned(_) => (GUN_PRICE, RejectReason::AlreadyOwned),
                };
                session.outbox.notify(GameEvent::PurchaseRejected {
                    upgrade,
                    cost,
                    balance: session.economy.coins,
                    reason,
                });
                log::debug!("purchase refused: {e}");
                false
            }
        }
    }

    pub fn set_map(&mut self, map: MapId) {
        self.session.map = map;
        self.session.outbox.notify(GameEvent::MapChanged { map });
        self.session.outbox.request_save();
    }

    pub fn set_skin(&mut self, skin: Skin) {
        self.session.skin = skin;
        self.session.outbox.notify(GameEvent::SkinChanged { skin });
        self.session.outbox.request_save();
    }

    /// Start over at wave 1, keeping coins and upgrades.
    pub fn new_game(&mut self) {
        self.session.wave = WaveState::default();
        self.start_session();
    }

    /// Resume from a save, or start fresh without one.
    pub fn continue_game(&mut self, save: Option<SaveSnapshot>) {
        match save {
            Some(snapshot) => self.load_snapshot(&snapshot),
            None => self.session.wave = WaveState::default(),
        }
        self.start_session();
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Active {
            self.phase = GamePhase::Paused;
            self.session.outbox.notify(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Active;
        }
    }

    // --- Persistence ---

    /// Serializable subset of the session.
    pub fn make_snapshot(&self) -> SaveSnapshot {
        SaveSnapshot {
            map: self.session.map,
            skin: self.session.skin,
            upgrades: self.session.economy.upgrades,
            world: WorldProgress {
                wave: self.session.wave.wave,
                kills: self.session.wave.kills,
                coins: self.session.economy.coins,
            },
        }
    }

    /// Apply a saved session. Entities are untouched; the next session start clears them.
    pub fn load_snapshot(&mut self, snapshot: &SaveSnapshot) {
        let session = &mut self.session;
        session.map = snapshot.map;
        session.skin = snapshot.skin;
        session.economy.upgrades = snapshot.upgrades;
        session.economy.coins = snapshot.world.coins;
        session.wave.wave = snapshot.world.wave.max(1);
        session.wave.kills = snapshot.world.kills;
        session.refresh_stats();
    }

    fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    fn start_session(&mut self) {
        self.world.clear();
        self.despawn_buffer.clear();
        self.time = SimTime::default();

        let session = &mut self.session;
        session.wave.restart_run();
        session.refresh_stats();
        session.player = Player::spawn(&session.viewport, session.stats.max_health);
        session.intent = Vec2::ZERO;
        self.phase = GamePhase::Active;

        for _ in 0..INITIAL_SPAWNS {
            systems::wave_spawner::spawn_next(&mut self.world, &mut self.session);
        }
        self.session.outbox.notify(GameEvent::Go);
        self.session.outbox.request_save();
        log::info!(
            "session started at wave {} with {} coins",
            self.session.wave.wave,
            self.session.economy.coins
        );
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Move { x, y } => self.set_move_intent(x, y),
            PlayerCommand::Attack => {
                self.attack();
            }
            PlayerCommand::Shoot => {
                self.shoot();
            }
            PlayerCommand::Primary => {
                self.primary();
            }
            PlayerCommand::Skill => {
                self.skill();
            }
            PlayerCommand::SwapWeapon => {
                self.swap_weapon();
            }
            PlayerCommand::Purchase { upgrade } => {
                self.purchase(upgrade);
            }
            PlayerCommand::SetMap { map } => self.set_map(map),
            PlayerCommand::SetSkin { skin } => self.set_skin(skin),
            PlayerCommand::NewGame => self.new_game(),
            PlayerCommand::Continue { save } => self.continue_game(save),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let world = &mut self.world;
        let session = &mut self.session;
        let despawn = &mut self.despawn_buffer;

        // 1. World clock and regeneration
        session.wave.elapsed += dt;
        session.wave.scroll += SCROLL_SPEED * dt;
        systems::player::regenerate(session, dt);
        // 2. Spawn scheduler
        systems::wave_spawner::run(world, session, dt);
        // 3. Wave progression
        systems::wave_spawner::check_wave_advance(session);
        // 4. Player movement and timers
        systems::player::run(session, dt);
        // 5. Player bullets
        systems::projectiles::run_player_bullets(world, session, dt, despawn);
        // 6. Boss projectiles
        systems::projectiles::run_boss_projectiles(world, session, dt, despawn);
        // 7. Enemies, boss pattern, contact damage
        systems::enemies::run(world, session, dt, despawn);
        // 8. Drops
        systems::drops::run(world, session, dt, despawn);
        // 9. Defeat
        if systems::player::check_defeat(session) {
            self.phase = GamePhase::GameOver;
        }
    }
}
