//! NPC-to-NPC relationship model
//!
//! Directed edges carrying disposition, trust, fear, respect, alliances,
//! rivalries, and decaying grudge/gratitude accumulators, plus the derived
//! queries (quality, stance, would-help/oppose/betray) the committee
//! systems read.

pub mod edge;
pub mod graph;

pub use edge::{AllianceBreakReason, RelationshipEdge, Stance};
pub use graph::RelationshipGraph;
