//! Versioned persistence of the political state
//!
//! Saves are pretty-printed JSON with an explicit format version.
//! Loading is deliberately forgiving: a missing, corrupt, or
//! wrong-version save starts the game fresh instead of refusing to
//! start it.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::committee::Committee;
use crate::core::Result;
use crate::relations::RelationshipGraph;

/// Format version written into every save
pub const SAVE_VERSION: u32 = 1;

/// Everything that survives a shutdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
    pub version: u32,
    #[serde(default)]
    pub committee: Committee,
    #[serde(default)]
    pub relations: RelationshipGraph,
}

impl Default for SaveState {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            committee: Committee::default(),
            relations: RelationshipGraph::default(),
        }
    }
}

impl SaveState {
    pub fn new(committee: Committee, relations: RelationshipGraph) -> Self {
        Self {
            version: SAVE_VERSION,
            committee,
            relations,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a save, rejecting unknown format versions
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<SaveState>(json) {
            Ok(state) if state.version == SAVE_VERSION => Some(state),
            Ok(state) => {
                tracing::warn!("unsupported save version {}", state.version);
                None
            }
            Err(e) => {
                tracing::warn!("unreadable save: {}", e);
                None
            }
        }
    }
}

/// Write the state to disk
pub fn save_state(path: &Path, state: &SaveState) -> Result<()> {
    fs::write(path, state.to_json()?)?;
    tracing::info!("state saved to {}", path.display());
    Ok(())
}

/// Read the state from disk, falling back to a fresh default
pub fn load_state(path: &Path) -> SaveState {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("no save at {}; starting fresh", path.display());
            return SaveState::default();
        }
        Err(e) => {
            tracing::warn!("could not read save at {}: {}; starting fresh", path.display(), e);
            return SaveState::default();
        }
    };
    SaveState::from_json(&contents).unwrap_or_else(|| {
        tracing::warn!("discarding save at {}; starting fresh", path.display());
        SaveState::default()
    })
}
