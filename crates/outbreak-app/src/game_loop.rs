//! Game loop thread: runs the simulation engine at a fixed rate and persists
//! the session whenever the engine asks for it.
//!
//! The engine is created inside the thread so it never crosses a thread
//! boundary. Commands arrive via `mpsc` channel; the thread returns a
//! `LoopSummary` when it stops.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use outbreak_core::commands::PlayerCommand;
use outbreak_core::events::GameEvent;
use outbreak_core::state::FrameSnapshot;
use outbreak_sim::engine::SimulationEngine;
use outbreak_sim::persistence::{self, PersistenceGateway};

use crate::bot::Autopilot;
use crate::config::AppConfig;
use crate::state::{GameLoopCommand, LoopSummary};

/// Engine, save slot, and optional autopilot driven one frame at a time.
pub struct Runner<G: PersistenceGateway> {
    engine: SimulationEngine,
    gateway: G,
    autopilot: Option<Autopilot>,
    summary: LoopSummary,
    last_frame: Option<FrameSnapshot>,
}

impl<G: PersistenceGateway> Runner<G> {
    /// Build the engine and queue a continue from whatever the gateway holds.
    pub fn new(config: &AppConfig, gateway: G) -> Self {
        let mut engine = SimulationEngine::new(config.sim);
        let save = persistence::load_or_default(&gateway);
        if save.is_some() {
            log::info!("resuming saved session");
        }
        engine.queue_command(PlayerCommand::Continue { save });
        Self {
            engine,
            gateway,
            autopilot: config.autopilot.then(Autopilot::new),
            summary: LoopSummary::default(),
            last_frame: None,
        }
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.engine.queue_command(command);
    }

    /// Advance one frame of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> &FrameSnapshot {
        if let (Some(bot), Some(frame)) = (self.autopilot.as_mut(), self.last_frame.as_ref()) {
            let commands = bot.decide(frame, self.engine.economy());
            self.engine.queue_commands(commands);
        }

        let frame = self.engine.tick(dt);
        if frame.save_requested {
            self.persist();
        }
        self.record(&frame);
        self.last_frame.insert(frame)
    }

    /// Write the current session one last time.
    pub fn finish(mut self) -> LoopSummary {
        self.persist();
        self.summary
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn summary(&self) -> &LoopSummary {
        &self.summary
    }

    fn persist(&mut self) {
        let snapshot = self.engine.make_snapshot();
        match self.gateway.save(&snapshot) {
            Ok(()) => self.summary.saves += 1,
            Err(e) => log::warn!("save failed: {e}"),
        }
    }

    fn record(&mut self, frame: &FrameSnapshot) {
        let summary = &mut self.summary;
        summary.ticks += 1;
        summary.kills = frame.world.kills;
        summary.coins = frame.world.coins;
        summary.best_wave = summary.best_wave.max(frame.world.wave);
        for event in &frame.events {
            match event {
                GameEvent::Go => summary.sessions += 1,
                GameEvent::GameOver { wave, kills } => {
                    summary.game_overs += 1;
                    log::info!("game over at wave {wave} with {kills} kills");
                }
                GameEvent::BossIncoming => log::info!("boss incoming"),
                GameEvent::WaveUp { wave } => log::debug!("wave {wave}"),
                _ => {}
            }
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the summary on join.
pub fn spawn_game_loop(
    config: AppConfig,
    gateway: Box<dyn PersistenceGateway + Send>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("outbreak-game-loop".into())
        .spawn(move || run_game_loop(&config, gateway, cmd_rx))?;

    Ok((cmd_tx, handle))
}

/// Nominal duration of one tick.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: &AppConfig,
    gateway: Box<dyn PersistenceGateway + Send>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
) -> LoopSummary {
    let mut runner = Runner::new(config, gateway);
    let tick = tick_duration(config.tick_rate);
    let mut last_frame = Instant::now();
    let mut next_tick_time = last_frame;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => runner.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    return runner.finish();
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance by the measured frame time; the engine clamps long frames
        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32();
        last_frame = now;
        runner.step(dt);

        // 3. Sleep until next tick
        next_tick_time += tick;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
