//! Wave progress and boss bar state tracked by the session.

/// Running wave state.
#[derive(Debug, Clone)]
pub struct WaveState {
    pub wave: u32,
    pub kills: u32,
    /// Seconds accumulated toward the next spawn.
    pub spawn_accumulator: f32,
    pub boss_alive: bool,
    pub boss_health: f32,
    pub boss_health_max: f32,
    /// Seconds of active play this session.
    pub elapsed: f32,
    /// Background scroll offset.
    pub scroll: f32,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            wave: 1,
            kills: 0,
            spawn_accumulator: 0.0,
            boss_alive: false,
            boss_health: 0.0,
            boss_health_max: 0.0,
            elapsed: 0.0,
            scroll: 0.0,
        }
    }
}

impl WaveState {
    /// Keep wave and kills, clear everything tied to the current run.
    pub fn restart_run(&mut self) {
        *self = Self {
            wave: self.wave.max(1),
            kills: self.kills,
            ..Self::default()
        };
    }

    /// Kills needed to leave the current wave.
    pub fn kill_target(&self) -> u32 {
        self.wave
            .saturating_mul(outbreak_core::constants::KILLS_PER_WAVE)
    }
}
