//! File-backed history source.
//!
//! Each setup's history lives in `<directory>/<setup-uuid>.json` as a JSON
//! array of versioned event envelopes (see `setup_core::events::codec`):
//!
//! ```json
//! [
//!   { "type": "SETUP_ADDED",    "version": 1, "payload": { ... } },
//!   { "type": "SCREEN_UPDATED", "version": 1, "payload": { ... } }
//! ]
//! ```

use std::path::{Path, PathBuf};

use setup_core::{decode_history, DomainEvent, SetupUuid};
use tracing::debug;

use crate::application::setup_service::{HistoryError, HistorySource};

/// A [`HistorySource`] reading one JSON file per setup.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    directory: PathBuf,
}

impl JsonFileHistory {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the history file of `setup`.
    pub fn path_for(&self, setup: &SetupUuid) -> PathBuf {
        self.directory.join(format!("{setup}.json"))
    }
}

impl HistorySource for JsonFileHistory {
    fn load(&self, setup: &SetupUuid) -> Result<Vec<DomainEvent>, HistoryError> {
        let path = self.path_for(setup);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(HistoryError::NotFound(setup.clone()))
            }
            Err(source) => return Err(HistoryError::Io { path, source }),
        };

        let events = decode_history(&content).map_err(|source| HistoryError::Malformed {
            setup: setup.clone(),
            source,
        })?;
        debug!(%setup, path = %path.display(), events = events.len(), "history loaded");
        Ok(events)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
