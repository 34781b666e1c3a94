//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for characters (NPCs in the registry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl CharacterId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for factions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u32);

impl FactionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for agenda items (assigned at submission)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgendaItemId(pub Uuid);

impl AgendaItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AgendaItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game turn counter (simulation time unit)
pub type Turn = u32;
