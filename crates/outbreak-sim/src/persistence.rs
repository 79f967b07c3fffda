//! Persistence gateway: reads and writes the `SaveSnapshot`.
//!
//! The engine never touches storage itself. It raises `save_requested` in the
//! frame snapshot and the outer loop hands `make_snapshot()` to a gateway.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use outbreak_core::save::SaveSnapshot;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Storage backend for a single save slot.
pub trait PersistenceGateway {
    /// Read the stored snapshot. `Ok(None)` when nothing has been saved.
    fn load(&self) -> Result<Option<SaveSnapshot>, PersistError>;
    fn save(&mut self, snapshot: &SaveSnapshot) -> Result<(), PersistError>;
    fn clear(&mut self) -> Result<(), PersistError>;
}

pub fn encode(snapshot: &SaveSnapshot) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn decode(json: &str) -> Result<SaveSnapshot, PersistError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a snapshot, treating any failure as "no save".
pub fn load_or_default(gateway: &dyn PersistenceGateway) -> Option<SaveSnapshot> {
    match gateway.load() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::warn!("ignoring unreadable save: {e}");
            None
        }
    }
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PersistenceGateway for JsonFileGateway {
    fn load(&self) -> Result<Option<SaveSnapshot>, PersistError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        decode(&json).map(Some)
    }

    fn save(&mut self, snapshot: &SaveSnapshot) -> Result<(), PersistError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let json = encode(snapshot)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        log::debug!("saved session to {}", self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-memory slot holding the encoded JSON, for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    raw: Option<String>,
    writes: u32,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with raw text, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            writes: 0,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self) -> Result<Option<SaveSnapshot>, PersistError> {
        self.raw.as_deref().map(decode).transpose()
    }

    fn save(&mut self, snapshot: &SaveSnapshot) -> Result<(), PersistError> {
        self.raw = Some(encode(snapshot)?);
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        self.raw = None;
        Ok(())
    }
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for Box<G> {
    fn load(&self) -> Result<Option<SaveSnapshot>, PersistError> {
        (**self).load()
    }

    fn save(&mut self, snapshot: &SaveSnapshot) -> Result<(), PersistError> {
        (**self).save(snapshot)
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        (**self).clear()
    }
}
