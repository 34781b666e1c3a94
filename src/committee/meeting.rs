//! Convened Standing Committee sessions
//!
//! A session reads the room, works through the pending agenda in
//! priority order, and appends its minutes to the committee history.

use rand::Rng;

use crate::committee::roster::{Atmosphere, Committee, MeetingRecord};
use crate::committee::voting;
use crate::context::GameContext;
use crate::core::config::Tuning;
use crate::relations::RelationshipGraph;

/// What one call to [`convene_meeting`] produced
#[derive(Debug, Clone)]
pub struct MeetingResult {
    /// False when no full members were seated and nothing happened
    pub convened: bool,
    pub record: MeetingRecord,
}

impl Default for MeetingResult {
    fn default() -> Self {
        Self {
            convened: false,
            record: MeetingRecord {
                turn_held: 0,
                attendees: Vec::new(),
                agenda_ids: Vec::new(),
                decisions: Vec::new(),
                atmosphere: Atmosphere::Performative,
            },
        }
    }
}

/// Mood of the session, read off the political situation before any votes
///
/// Checked in order: open confrontation, then strain, then genuine
/// harmony, with scripted theater as the remainder.
fn meeting_atmosphere(committee: &Committee, ctx: &GameContext) -> Atmosphere {
    let factions = committee.factions_represented();
    if ctx.stability < 30 || committee.strict_majority_faction().is_none() {
        Atmosphere::Confrontational
    } else if ctx.stability < 50 || factions > 2 {
        Atmosphere::Tense
    } else if ctx.stability > 70 && factions <= 2 {
        Atmosphere::Harmonious
    } else {
        Atmosphere::Performative
    }
}

/// Hold one session, deciding every pending agenda item
///
/// Items come up in priority order; equal priorities keep submission
/// order. The drained agenda ends up in the minutes whatever the
/// outcome. Without seated full members nothing convenes and the
/// pending agenda is left alone.
pub fn convene_meeting(
    committee: &mut Committee,
    graph: &RelationshipGraph,
    ctx: &GameContext,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> MeetingResult {
    if committee.full_members.is_empty() {
        tracing::debug!("no seated full members; session skipped");
        return MeetingResult::default();
    }

    let atmosphere = meeting_atmosphere(committee, ctx);

    let mut agenda = std::mem::take(&mut committee.pending_agenda);
    agenda.sort_by_key(|item| std::cmp::Reverse(item.priority.rank()));

    let mut agenda_ids = Vec::with_capacity(agenda.len());
    let mut decisions = Vec::with_capacity(agenda.len());
    for item in agenda {
        agenda_ids.push(item.id);
        decisions.push(voting::process_item(
            item,
            committee,
            graph,
            ctx,
            &tuning.voting,
            rng,
        ));
    }

    let record = MeetingRecord {
        turn_held: ctx.turn,
        attendees: committee.full_members.clone(),
        agenda_ids,
        decisions,
        atmosphere,
    };
    committee.record_meeting(record.clone());

    tracing::info!(
        "session at turn {}: {} items decided, atmosphere {:?}",
        ctx.turn,
        record.decisions.len(),
        atmosphere
    );

    MeetingResult {
        convened: true,
        record,
    }
}
