//! GameContext - the slice of game state the committee systems read
//!
//! The surrounding game owns the real registries; this container carries
//! the values the committee, election, and voting logic consume: the
//! character roster, per-faction power, national stability, and the turn.

use ahash::AHashMap;

use crate::context::character::Character;
use crate::core::types::{CharacterId, FactionId, Turn};

/// External game state consumed by committee and relationship logic
#[derive(Debug, Clone, Default)]
pub struct GameContext {
    /// All known characters, keyed by id
    pub characters: AHashMap<CharacterId, Character>,
    /// Political power per faction (arbitrary positive scale)
    pub faction_power: AHashMap<FactionId, f32>,
    /// National stability, 0..=100
    pub stability: u32,
    /// Current game turn
    pub turn: Turn,
}

impl GameContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a character in the registry view
    pub fn insert_character(&mut self, character: Character) {
        self.characters.insert(character.id, character);
    }

    /// Get a character by ID
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Get a mutable character by ID
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// Faction power, 0.0 for unknown factions
    pub fn faction_power(&self, id: FactionId) -> f32 {
        self.faction_power.get(&id).copied().unwrap_or(0.0)
    }

    /// Faction of a character, if both exist
    pub fn faction_of(&self, id: CharacterId) -> Option<FactionId> {
        self.character(id).and_then(|c| c.faction)
    }

    /// Display name for narrative lines, falling back to the raw id
    pub fn name_of(&self, id: CharacterId) -> String {
        self.character(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("#{}", id.0))
    }
}
