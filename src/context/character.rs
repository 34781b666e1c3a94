//! Character registry records consumed by committee logic
//!
//! Characters are owned by the surrounding game state; this module only
//! defines the view the committee and relationship systems read.

use serde::{Deserialize, Serialize};

use crate::core::types::{CharacterId, FactionId};

/// Personality traits driving vote and election behavior (each 0..=100)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Personality {
    pub ambition: u32,
    pub paranoia: u32,
    pub ruthlessness: u32,
    pub competence: u32,
    pub loyalty: u32,
}

impl Personality {
    pub fn new(ambition: u32, paranoia: u32, ruthlessness: u32, competence: u32, loyalty: u32) -> Self {
        Self {
            ambition,
            paranoia,
            ruthlessness,
            competence,
            loyalty,
        }
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::new(50, 50, 50, 50, 50)
    }
}

/// One registry entry: an NPC as the committee systems see them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// Dead characters never vote, sit, or stand for election
    pub alive: bool,
    pub under_investigation: bool,
    pub detained: bool,
    /// Rank in the state hierarchy (0 = nobody, 10 = paramount)
    pub position_index: u32,
    pub faction: Option<FactionId>,
    pub personality: Personality,
    /// Turns accrued at senior rank, for the seniority requirement
    pub turns_at_senior_rank: u32,
}

impl Character {
    pub fn new(id: CharacterId, name: impl Into<String>, faction: Option<FactionId>) -> Self {
        Self {
            id,
            name: name.into(),
            alive: true,
            under_investigation: false,
            detained: false,
            position_index: 0,
            faction,
            personality: Personality::default(),
            turns_at_senior_rank: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character_is_available() {
        let c = Character::new(CharacterId(1), "Chen Wei", Some(FactionId(1)));
        assert!(c.alive);
        assert!(!c.under_investigation);
        assert!(!c.detained);
        assert_eq!(c.position_index, 0);
    }

    #[test]
    fn test_default_personality_is_neutral() {
        let p = Personality::default();
        assert_eq!(p.ambition, 50);
        assert_eq!(p.loyalty, 50);
    }
}
