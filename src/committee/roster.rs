//! Committee membership state and meeting minutes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::committee::agenda::{AgendaCategory, AgendaItem, Decision};
use crate::context::GameContext;
use crate::core::types::{AgendaItemId, CharacterId, FactionId, Turn};

/// Hard cap on seated members, full and candidate combined
pub const MAX_SEATS: usize = 7;
/// Seats carrying binding votes; the remainder seat as candidates
pub const FULL_SEATS: usize = 5;

/// Who presides over sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chair {
    /// A seated full member
    Member(CharacterId),
    /// The player holds the chair directly
    Player,
}

/// Mood of one convened session, for narrative consumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Atmosphere {
    Harmonious,
    Tense,
    Confrontational,
    Performative,
}

/// Minutes of one convened session; immutable once appended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub turn_held: Turn,
    /// Voting roster at the moment the session convened
    pub attendees: Vec<CharacterId>,
    pub agenda_ids: Vec<AgendaItemId>,
    pub decisions: Vec<Decision>,
    pub atmosphere: Atmosphere,
}

/// The Standing Committee roster and its paper trail
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Committee {
    /// Full members in seating order; binding votes
    pub full_members: Vec<CharacterId>,
    /// Candidate members; advisory only
    pub candidate_members: Vec<CharacterId>,
    pub chair: Option<Chair>,
    pub secretary: Option<CharacterId>,
    pub last_meeting_turn: Turn,
    /// Derived cache: seated members per faction. Recomputed on every
    /// membership change, never hand-edited.
    faction_balance: BTreeMap<FactionId, u32>,
    pub pending_agenda: Vec<AgendaItem>,
    pub meeting_history: Vec<MeetingRecord>,
}

impl Committee {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Roster queries =====

    pub fn seated_count(&self) -> usize {
        self.full_members.len() + self.candidate_members.len()
    }

    pub fn seats_available(&self) -> usize {
        MAX_SEATS.saturating_sub(self.seated_count())
    }

    pub fn is_seated(&self, id: CharacterId) -> bool {
        self.full_members.contains(&id) || self.candidate_members.contains(&id)
    }

    /// Every seated member, full members first
    pub fn seated_members(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.full_members
            .iter()
            .chain(self.candidate_members.iter())
            .copied()
    }

    /// The chair as a committee character, if one is seated
    pub fn chair_member(&self) -> Option<CharacterId> {
        match self.chair {
            Some(Chair::Member(id)) => Some(id),
            _ => None,
        }
    }

    pub fn faction_balance(&self) -> &BTreeMap<FactionId, u32> {
        &self.faction_balance
    }

    /// Number of factions holding at least one seat
    pub fn factions_represented(&self) -> usize {
        self.faction_balance.len()
    }

    /// The faction holding a strict majority of seats, if any
    pub fn strict_majority_faction(&self) -> Option<FactionId> {
        let seated = self.seated_count() as u32;
        if seated == 0 {
            return None;
        }
        self.faction_balance
            .iter()
            .find(|(_, &count)| count * 2 > seated)
            .map(|(&faction, _)| faction)
    }

    // ===== Roster mutations =====

    /// Replace the entire roster, as an election does
    ///
    /// Over-cap input is truncated rather than rejected. The faction
    /// balance is recomputed from the new seating.
    pub fn install_roster(
        &mut self,
        full: Vec<CharacterId>,
        candidates: Vec<CharacterId>,
        chair: Option<Chair>,
        ctx: &GameContext,
    ) {
        self.full_members = full;
        self.full_members.truncate(MAX_SEATS);
        self.candidate_members = candidates;
        self.candidate_members
            .truncate(MAX_SEATS - self.full_members.len());
        self.chair = chair;
        self.recompute_faction_balance(ctx);
    }

    /// Seat one character as a candidate member
    ///
    /// Returns false when the character is already seated or no seat is open.
    pub fn appoint_candidate(&mut self, id: CharacterId, ctx: &GameContext) -> bool {
        if self.is_seated(id) || self.seats_available() == 0 {
            return false;
        }
        self.candidate_members.push(id);
        self.recompute_faction_balance(ctx);
        true
    }

    /// Unseat a character entirely (death, purge, resignation)
    pub fn remove_member(&mut self, id: CharacterId, ctx: &GameContext) -> bool {
        let before = self.seated_count();
        self.full_members.retain(|&m| m != id);
        self.candidate_members.retain(|&m| m != id);
        if self.chair == Some(Chair::Member(id)) {
            self.chair = None;
        }
        if self.secretary == Some(id) {
            self.secretary = None;
        }
        let removed = self.seated_count() < before;
        if removed {
            self.recompute_faction_balance(ctx);
        }
        removed
    }

    fn recompute_faction_balance(&mut self, ctx: &GameContext) {
        self.faction_balance.clear();
        for member in self.seated_members().collect::<Vec<_>>() {
            if let Some(faction) = ctx.faction_of(member) {
                *self.faction_balance.entry(faction).or_insert(0) += 1;
            }
        }
    }

    // ===== Agenda and minutes =====

    /// Queue a proposal for the next session
    pub fn submit_item(&mut self, item: AgendaItem) {
        tracing::debug!("agenda item submitted: {}", item.title);
        self.pending_agenda.push(item);
    }

    /// Append session minutes and advance the session clock
    pub fn record_meeting(&mut self, record: MeetingRecord) {
        self.last_meeting_turn = record.turn_held;
        self.meeting_history.push(record);
    }

    pub fn last_meeting(&self) -> Option<&MeetingRecord> {
        self.meeting_history.last()
    }

    /// Sessions held on or after the given turn
    pub fn meetings_since(&self, turn: Turn) -> impl Iterator<Item = &MeetingRecord> {
        self.meeting_history
            .iter()
            .filter(move |m| m.turn_held >= turn)
    }

    /// Every recorded decision in one policy domain, oldest first
    pub fn decisions_in_category(&self, category: AgendaCategory) -> impl Iterator<Item = &Decision> {
        self.meeting_history
            .iter()
            .flat_map(|m| m.decisions.iter())
            .filter(move |d| d.item.category == category)
    }
}
