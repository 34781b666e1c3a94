//! Party Congress elections and between-congress vacancy filling

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::committee::eligibility::is_eligible;
use crate::committee::roster::{Chair, Committee, FULL_SEATS, MAX_SEATS};
use crate::context::{Character, GameContext};
use crate::core::config::ElectionTuning;
use crate::core::types::{CharacterId, FactionId, Turn};

/// Position index a chair candidate needs; below this the top scorer presides
pub const CHAIR_POSITION_INDEX: u32 = 8;

/// Result of one Party Congress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionOutcome {
    /// Everyone seated, full members first, in score order
    pub elected: Vec<CharacterId>,
    /// Previous members who lost their seats
    pub removed: Vec<CharacterId>,
    /// Structured summary line for external prose generation
    pub narrative: String,
}

/// Whether a Party Congress falls on this turn
pub fn congress_due(turn: Turn, tuning: &ElectionTuning) -> bool {
    turn != 0 && turn % tuning.congress_interval == 0
}

/// Election score for one candidate
///
/// Weighted sum of faction power, chair endorsement, competence, loyalty,
/// and position index, with a uniform random perturbation, floored at 0.
pub(crate) fn election_score(
    candidate: &Character,
    ctx: &GameContext,
    outgoing_chair_faction: Option<FactionId>,
    chair_exists: bool,
    tuning: &ElectionTuning,
    rng: &mut impl Rng,
) -> f32 {
    let mut score = 0.0;

    if let Some(faction) = candidate.faction {
        score += ctx.faction_power(faction) * tuning.faction_power_weight;
    }

    if chair_exists {
        let shares_chair_faction = match (outgoing_chair_faction, candidate.faction) {
            (Some(chair_faction), Some(faction)) => chair_faction == faction,
            _ => false,
        };
        score += if shares_chair_faction {
            tuning.chair_faction_bonus
        } else {
            tuning.chair_present_bonus
        };
    }

    score += candidate.personality.competence as f32 / 100.0 * tuning.competence_weight;
    score += candidate.personality.loyalty as f32 / 100.0 * tuning.loyalty_weight;
    score += (candidate.position_index as f32 * tuning.position_weight).min(tuning.position_cap);

    if tuning.random_band > 0.0 {
        score += rng.gen_range(-tuning.random_band..=tuning.random_band);
    }

    score.max(0.0)
}

/// Hold a Party Congress, reseating the committee from scratch
///
/// Scores every eligible candidate, seats the top 7 (first 5 as full
/// members), and picks the chair: the first elected member at or above
/// the chair rank, else the top scorer. Fewer than 7 eligible candidates
/// seat fewer; seats stay vacant. Mutates only the membership fields and
/// the derived faction balance.
pub fn run_election(
    committee: &mut Committee,
    ctx: &GameContext,
    turn: Turn,
    tuning: &ElectionTuning,
    rng: &mut impl Rng,
) -> ElectionOutcome {
    let outgoing_chair_faction = committee.chair_member().and_then(|id| ctx.faction_of(id));
    let chair_exists = committee.chair.is_some();

    // Deterministic scoring order so a seeded rng reproduces results
    let mut candidate_ids: Vec<CharacterId> = ctx.characters.keys().copied().collect();
    candidate_ids.sort();

    let mut scored: Vec<(CharacterId, f32)> = Vec::new();
    for id in candidate_ids {
        if !is_eligible(id, ctx).eligible {
            continue;
        }
        let candidate = match ctx.character(id) {
            Some(candidate) => candidate,
            None => continue,
        };
        let score = election_score(
            candidate,
            ctx,
            outgoing_chair_faction,
            chair_exists,
            tuning,
            rng,
        );
        scored.push((id, score));
    }

    // Descending score, ties broken by ascending id
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    scored.truncate(MAX_SEATS);

    let elected: Vec<CharacterId> = scored.iter().map(|(id, _)| *id).collect();
    let removed: Vec<CharacterId> = committee
        .seated_members()
        .filter(|id| !elected.contains(id))
        .collect();

    let full: Vec<CharacterId> = elected.iter().take(FULL_SEATS).copied().collect();
    let candidates: Vec<CharacterId> = elected.iter().skip(FULL_SEATS).copied().collect();

    let chair = elected
        .iter()
        .find(|&&id| {
            ctx.character(id)
                .map_or(false, |c| c.position_index >= CHAIR_POSITION_INDEX)
        })
        .or_else(|| elected.first())
        .map(|&id| Chair::Member(id));

    committee.install_roster(full, candidates, chair, ctx);

    let narrative = if elected.is_empty() {
        format!(
            "The Party Congress of turn {} adjourned without seating a committee.",
            turn
        )
    } else {
        let chair_line = match committee.chair_member() {
            Some(id) => format!("{} takes the chair", ctx.name_of(id)),
            None => "the chair stands vacant".to_string(),
        };
        format!(
            "The Party Congress of turn {} seated {} full and {} candidate members; {}.",
            turn,
            committee.full_members.len(),
            committee.candidate_members.len(),
            chair_line
        )
    };

    tracing::info!(
        "congress at turn {}: {} elected, {} removed",
        turn,
        elected.len(),
        removed.len()
    );

    ElectionOutcome {
        elected,
        removed,
        narrative,
    }
}

/// Seat one candidate member between congresses
///
/// Prefers eligible candidates from the sitting chair's faction, then the
/// first eligible candidate by id. Returns None when every seat is filled
/// or nobody qualifies.
pub fn fill_vacancy(committee: &mut Committee, ctx: &GameContext) -> Option<CharacterId> {
    if committee.seats_available() == 0 {
        return None;
    }
    let chair_faction = committee.chair_member().and_then(|id| ctx.faction_of(id));

    let mut candidate_ids: Vec<CharacterId> = ctx.characters.keys().copied().collect();
    candidate_ids.sort();

    let mut fallback = None;
    for id in candidate_ids {
        if committee.is_seated(id) || !is_eligible(id, ctx).eligible {
            continue;
        }
        if chair_faction.is_some() && ctx.faction_of(id) == chair_faction {
            if committee.appoint_candidate(id, ctx) {
                tracing::info!("vacancy filled by {:?} (chair's faction)", id);
                return Some(id);
            }
        }
        if fallback.is_none() {
            fallback = Some(id);
        }
    }

    let id = fallback?;
    if committee.appoint_candidate(id, ctx) {
        tracing::info!("vacancy filled by {:?}", id);
        Some(id)
    } else {
        None
    }
}
