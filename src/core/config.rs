//! Game-balance tuning with documented constants
//!
//! Election weights and vote thresholds are balance knobs, not correctness
//! requirements. Defaults carry the shipped values; a scenario TOML file
//! can override any group. No global config: callers pass `&Tuning` down.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::core::error::Result;

/// Election scoring weights and the Party Congress cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionTuning {
    /// Multiplier applied to the candidate's faction power
    pub faction_power_weight: f32,
    /// Endorsement bonus when sharing the outgoing chair's faction
    pub chair_faction_bonus: f32,
    /// Endorsement bonus when a chair exists but factions differ
    pub chair_present_bonus: f32,
    /// Scale of the competence term (competence/100 * weight)
    pub competence_weight: f32,
    /// Scale of the loyalty term (loyalty/100 * weight)
    pub loyalty_weight: f32,
    /// Per-step value of position index
    pub position_weight: f32,
    /// Cap on the position-index term
    pub position_cap: f32,
    /// Half-width of the uniform random perturbation
    pub random_band: f32,
    /// Turns between Party Congress elections
    pub congress_interval: u32,
}

impl Default for ElectionTuning {
    fn default() -> Self {
        Self {
            faction_power_weight: 0.4,
            chair_faction_bonus: 30.0,
            chair_present_bonus: 10.0,
            competence_weight: 15.0,
            loyalty_weight: 5.0,
            position_weight: 1.5,
            position_cap: 10.0,
            random_band: 5.0,
            congress_interval: 20,
        }
    }
}

/// Per-member vote scoring thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteTuning {
    /// Neutral starting score before any alignment terms
    pub baseline: f32,
    /// Scores above this cast a vote in favor
    pub for_threshold: f32,
    /// Scores below this cast a vote against
    pub against_threshold: f32,
    /// Bonus when the sponsor shares the voter's faction
    pub sponsor_faction_bonus: f32,
    /// Half-width of the uniform random perturbation
    pub random_band: f32,
    /// Chance of a principled abstention on routine items (0.0 to 1.0)
    pub routine_abstain_chance: f64,
}

impl Default for VoteTuning {
    fn default() -> Self {
        Self {
            baseline: 50.0,
            for_threshold: 60.0,
            against_threshold: 40.0,
            sponsor_faction_bonus: 20.0,
            random_band: 15.0,
            routine_abstain_chance: 0.2,
        }
    }
}

/// Complete balance configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tuning {
    #[serde(default)]
    pub election: ElectionTuning,
    #[serde(default)]
    pub voting: VoteTuning,
}

impl Tuning {
    /// Load tuning from a TOML file
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(toml::from_str(&contents)?)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.voting.against_threshold >= self.voting.for_threshold {
            return Err(format!(
                "against_threshold ({}) should be < for_threshold ({})",
                self.voting.against_threshold, self.voting.for_threshold
            ));
        }

        if self.election.random_band < 0.0 || self.voting.random_band < 0.0 {
            return Err("Random bands must be non-negative".into());
        }

        if self.election.congress_interval == 0 {
            return Err("congress_interval must be at least 1 turn".into());
        }

        if !(0.0..=1.0).contains(&self.voting.routine_abstain_chance) {
            return Err(format!(
                "routine_abstain_chance ({}) must be within 0.0..=1.0",
                self.voting.routine_abstain_chance
            ));
        }

        Ok(())
    }
}
