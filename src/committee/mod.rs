//! The Standing Committee: seats, eligibility, elections, agendas, sessions
//!
//! The committee is a plain aggregate over the character registry. Party
//! Congress elections reseat it wholesale, sessions work through the
//! pending agenda, and everything it decides lands in its own history.

pub mod agenda;
pub mod election;
pub mod eligibility;
pub mod meeting;
pub mod roster;
pub mod voting;

pub use agenda::{
    AgendaCategory, AgendaItem, AgendaPriority, Decision, Outcome, Vote, VoteTally,
};
pub use election::{congress_due, fill_vacancy, run_election, ElectionOutcome};
pub use eligibility::{is_eligible, EligibilityReport};
pub use meeting::{convene_meeting, MeetingResult};
pub use roster::{Atmosphere, Chair, Committee, MeetingRecord, FULL_SEATS, MAX_SEATS};
pub use voting::{member_vote, process_item};
