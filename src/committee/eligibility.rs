//! Standing Committee eligibility screening
//!
//! Every check runs; the report carries the full list of unmet
//! requirements so callers can explain a rejection, not just detect it.

use serde::{Deserialize, Serialize};

use crate::context::GameContext;
use crate::core::types::CharacterId;

// ==================== ELIGIBILITY THRESHOLDS ====================

/// Position index marking Senior Politburo rank
pub const SENIOR_POSITION_INDEX: u32 = 5;
/// Turns a candidate must have held senior rank
pub const MIN_TURNS_AT_SENIOR_RANK: u32 = 12;
/// Floor on candidate competence
pub const MIN_COMPETENCE: u32 = 50;
/// Floor on candidate loyalty
pub const MIN_LOYALTY: u32 = 40;

/// Outcome of screening one character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    /// Every unmet requirement, or a single affirmative line when eligible
    pub reasons: Vec<String>,
}

/// Screen a character for Standing Committee candidacy
///
/// Accumulates every failed requirement rather than stopping at the first.
pub fn is_eligible(id: CharacterId, ctx: &GameContext) -> EligibilityReport {
    let character = match ctx.character(id) {
        Some(character) => character,
        None => {
            return EligibilityReport {
                eligible: false,
                reasons: vec!["not present in the cadre registry".to_string()],
            }
        }
    };

    let mut reasons = Vec::new();

    if !character.alive {
        reasons.push("is deceased".to_string());
    }
    if character.position_index < SENIOR_POSITION_INDEX {
        reasons.push(format!(
            "position index {} is below the Senior Politburo threshold of {}",
            character.position_index, SENIOR_POSITION_INDEX
        ));
    }
    if character.turns_at_senior_rank < MIN_TURNS_AT_SENIOR_RANK {
        reasons.push(format!(
            "only {} of {} required turns at senior rank",
            character.turns_at_senior_rank, MIN_TURNS_AT_SENIOR_RANK
        ));
    }
    if character.under_investigation {
        reasons.push("is under investigation by the discipline commission".to_string());
    }
    if character.detained {
        reasons.push("is in detention".to_string());
    }
    if character.personality.competence < MIN_COMPETENCE {
        reasons.push(format!(
            "competence {} is below the required {}",
            character.personality.competence, MIN_COMPETENCE
        ));
    }
    if character.personality.loyalty < MIN_LOYALTY {
        reasons.push(format!(
            "loyalty {} is below the required {}",
            character.personality.loyalty, MIN_LOYALTY
        ));
    }
    if character.faction.is_none() {
        reasons.push("holds no faction affiliation".to_string());
    }

    if reasons.is_empty() {
        EligibilityReport {
            eligible: true,
            reasons: vec!["meets all Standing Committee requirements".to_string()],
        }
    } else {
        EligibilityReport {
            eligible: false,
            reasons,
        }
    }
}
