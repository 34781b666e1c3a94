//! Agenda items and the decisions they produce

use serde::{Deserialize, Serialize};

use crate::core::types::{AgendaItemId, CharacterId, Turn};

/// Policy domain of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgendaCategory {
    Personnel,
    Policy,
    Economic,
    Foreign,
    Security,
    Ideological,
    Crisis,
    Succession,
}

/// Urgency of a proposal; higher ranks are heard first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgendaPriority {
    Routine,
    Important,
    Urgent,
    Critical,
}

impl AgendaPriority {
    /// Numeric rank for agenda ordering (critical=4 down to routine=1)
    pub fn rank(&self) -> u32 {
        match self {
            AgendaPriority::Critical => 4,
            AgendaPriority::Urgent => 3,
            AgendaPriority::Important => 2,
            AgendaPriority::Routine => 1,
        }
    }
}

/// A ballot cast by one member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vote {
    For,
    Against,
    Abstain,
}

/// A proposal awaiting committee vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: AgendaItemId,
    pub title: String,
    pub description: String,
    pub category: AgendaCategory,
    pub priority: AgendaPriority,
    pub sponsor: Option<CharacterId>,
    pub submitted_turn: Turn,
    /// Filled by the voting engine; disjoint by construction
    #[serde(default)]
    pub votes_for: Vec<CharacterId>,
    #[serde(default)]
    pub votes_against: Vec<CharacterId>,
    #[serde(default)]
    pub abstained: Vec<CharacterId>,
}

impl AgendaItem {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: AgendaCategory,
        priority: AgendaPriority,
        sponsor: Option<CharacterId>,
        submitted_turn: Turn,
    ) -> Self {
        Self {
            id: AgendaItemId::new(),
            title: title.into(),
            description: description.into(),
            category,
            priority,
            sponsor,
            submitted_turn,
            votes_for: Vec::new(),
            votes_against: Vec::new(),
            abstained: Vec::new(),
        }
    }

    /// File one member's ballot into the matching bucket
    pub fn record_vote(&mut self, member: CharacterId, vote: Vote) {
        match vote {
            Vote::For => self.votes_for.push(member),
            Vote::Against => self.votes_against.push(member),
            Vote::Abstain => self.abstained.push(member),
        }
    }

    /// Tally the recorded ballots
    pub fn tally(&self) -> VoteTally {
        VoteTally {
            votes_for: self.votes_for.len() as u32,
            votes_against: self.votes_against.len() as u32,
            abstentions: self.abstained.len() as u32,
            unanimous: self.votes_against.is_empty() && self.abstained.is_empty(),
        }
    }
}

/// How the committee disposed of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Approved,
    Rejected,
    Deferred,
    AmendedAndApproved,
    /// Handed to another organ; set by external referral flows only
    Referred,
}

impl Outcome {
    /// Fixed minute-book phrasing for this outcome
    pub fn summary(&self) -> &'static str {
        match self {
            Outcome::Approved => "Approved without reservation.",
            Outcome::Rejected => "Rejected by majority vote.",
            Outcome::Deferred => "Deferred for further study.",
            Outcome::AmendedAndApproved => "Approved after amendment.",
            Outcome::Referred => "Referred to a subordinate organ.",
        }
    }
}

/// Vote counts for one processed item
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub votes_for: u32,
    pub votes_against: u32,
    pub abstentions: u32,
    /// No votes against and no abstentions
    pub unanimous: bool,
}

/// Final record of one processed agenda item; never mutated afterward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// The processed item, vote buckets filled
    pub item: AgendaItem,
    pub outcome: Outcome,
    pub tally: VoteTally,
    /// Members who voted against
    pub dissenters: Vec<CharacterId>,
    pub summary: String,
}
