//! Runner configuration.
//!
//! Loaded from a JSON file. Missing fields take their defaults; a missing or
//! unreadable file logs a warning and falls back to defaults entirely.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use outbreak_sim::engine::SimConfig;

pub const DEFAULT_CONFIG_PATH: &str = "outbreak.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    /// Loop frequency in Hz.
    pub tick_rate: u32,
    pub save_path: PathBuf,
    /// Wall-clock seconds to run before shutting down.
    pub run_seconds: f64,
    /// Drive the player with the scripted autopilot.
    pub autopilot: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            tick_rate: 60,
            save_path: PathBuf::from("outbreak_save.json"),
            run_seconds: 30.0,
            autopilot: true,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.tick_rate = config.tick_rate.clamp(1, 1000);
        Ok(config)
    }

    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("config {} not readable ({e}), using defaults", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("config {} is invalid ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }
}
