//! Directed relationship records between characters
//!
//! One edge holds how a single source character regards a single target.
//! Relationships are asymmetric: A's view of B and B's view of A are two
//! separate edges. Edges are never deleted, only decayed toward neutrality.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::{CharacterId, Turn};

/// Classified reading of an edge, best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    StrongAlly,  // allied, strength >= 60
    WeakAlly,    // allied, strength < 60
    Trusting,    // quality >= 60 and trust >= 60
    Friendly,    // quality >= 40
    Neutral,
    Distrustful, // quality <= -15 or trust < 30
    Hostile,     // quality <= -40
    Rival,       // declared rivalry
    BitterEnemy, // grudge >= 60 and quality <= -40
}

/// Why an alliance was dissolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllianceBreakReason {
    /// The partner turned on us; counts as a recorded betrayal
    Betrayal,
    /// The partnership quietly lapsed
    Drift,
    /// Deliberate political realignment
    Realignment,
}

/// How one character regards another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub source: CharacterId,
    pub target: CharacterId,
    /// Signed affinity, -100..=100
    pub disposition: i32,
    /// 0..=100, neutral 50
    pub trust: i32,
    /// 0..=100; elevated fear decays back to a residual 20, never lower
    pub fear: i32,
    /// 0..=100, neutral 50
    pub respect: i32,
    pub allied: bool,
    pub rival: bool,
    /// Target is this character's patron
    pub patron: bool,
    /// Target is this character's client
    pub client: bool,
    /// 0..=100, meaningful only while allied
    pub alliance_strength: i32,
    pub alliance_formed_turn: Option<Turn>,
    /// Decaying resentment accumulator, 0..=100
    pub grudge: i32,
    /// Decaying appreciation accumulator, 0..=100
    pub gratitude: i32,
    pub times_betrayed: u32,
    pub times_benefited: u32,
    pub last_interaction_turn: Turn,
    pub relationship_start_turn: Turn,
    /// Guard so per-turn decay applies at most once per turn
    #[serde(default)]
    pub last_decay_turn: Turn,
    #[serde(default)]
    pub shared_enemies: BTreeSet<CharacterId>,
}

fn clamp_stat(value: i32) -> i32 {
    value.clamp(0, 100)
}

fn clamp_disposition(value: i32) -> i32 {
    value.clamp(-100, 100)
}

impl RelationshipEdge {
    pub fn new(source: CharacterId, target: CharacterId, turn: Turn) -> Self {
        Self {
            source,
            target,
            disposition: 0,
            trust: 50,
            fear: 0,
            respect: 50,
            allied: false,
            rival: false,
            patron: false,
            client: false,
            alliance_strength: 0,
            alliance_formed_turn: None,
            grudge: 0,
            gratitude: 0,
            times_betrayed: 0,
            times_benefited: 0,
            last_interaction_turn: turn,
            relationship_start_turn: turn,
            last_decay_turn: turn,
            shared_enemies: BTreeSet::new(),
        }
    }

    // ===== Derived queries =====

    /// Net relationship quality, -100..=100
    ///
    /// Disposition, adjusted by trust and respect deviation from neutral 50
    /// (half weight), gratitude minus grudge (half weight), and the
    /// alliance/rivalry bonuses.
    pub fn overall_quality(&self) -> i32 {
        let mut quality = self.disposition;
        quality += (self.trust - 50) / 2;
        quality += (self.respect - 50) / 2;
        quality += self.gratitude / 2;
        quality -= self.grudge / 2;
        if self.allied {
            quality += 20;
        }
        if self.rival {
            quality -= 30;
        }
        clamp_disposition(quality)
    }

    /// Would this character lend support to the target?
    pub fn would_help(&self) -> bool {
        if self.allied && self.alliance_strength >= 30 {
            return true;
        }
        self.overall_quality() >= 40 && self.trust >= 40
    }

    /// Would this character work against the target?
    pub fn would_oppose(&self) -> bool {
        self.rival || self.overall_quality() <= -40 || self.grudge >= 60
    }

    /// Would this character turn on the target if the chance arose?
    ///
    /// Strong alliances suppress betrayal; otherwise deep grudges, low
    /// fear of reprisal, or a history of being betrayed make it thinkable.
    pub fn would_betray(&self) -> bool {
        if self.allied && self.alliance_strength >= 60 {
            return false;
        }
        self.grudge + (100 - self.fear) >= 120 || self.times_betrayed > 0
    }

    /// Classify the edge by a fixed priority order
    pub fn stance(&self) -> Stance {
        let quality = self.overall_quality();

        if self.allied {
            if self.alliance_strength >= 60 {
                return Stance::StrongAlly;
            }
            return Stance::WeakAlly;
        }
        if self.grudge >= 60 && quality <= -40 {
            return Stance::BitterEnemy;
        }
        if self.rival {
            return Stance::Rival;
        }
        match quality {
            q if q >= 60 && self.trust >= 60 => Stance::Trusting,
            q if q >= 40 => Stance::Friendly,
            q if q <= -40 => Stance::Hostile,
            q if q <= -15 => Stance::Distrustful,
            _ if self.trust < 30 => Stance::Distrustful,
            _ => Stance::Neutral,
        }
    }

    // ===== Intent mutations (called through RelationshipGraph) =====

    /// The target betrayed this character
    pub(crate) fn apply_betrayal(&mut self, turn: Turn, severity: i32) {
        let severity = clamp_stat(severity);
        self.grudge = clamp_stat(self.grudge + severity);
        self.trust = clamp_stat(self.trust - severity / 2);
        self.disposition = clamp_disposition(self.disposition - severity / 2);
        self.times_betrayed += 1;
        if self.allied {
            // A betrayed alliance flips straight to rivalry
            self.clear_alliance();
            self.rival = true;
        }
        self.last_interaction_turn = turn;
    }

    /// The target did this character a good turn
    pub(crate) fn apply_benefit(&mut self, turn: Turn, magnitude: i32) {
        let magnitude = clamp_stat(magnitude);
        self.gratitude = clamp_stat(self.gratitude + magnitude);
        self.disposition = clamp_disposition(self.disposition + magnitude / 2);
        self.trust = clamp_stat(self.trust + magnitude / 4);
        self.times_benefited += 1;
        self.last_interaction_turn = turn;
    }

    pub(crate) fn apply_alliance(&mut self, turn: Turn) {
        if !self.allied {
            self.allied = true;
            self.alliance_formed_turn = Some(turn);
        }
        self.rival = false;
        self.alliance_strength = self.alliance_strength.max(50);
        self.disposition = self.disposition.max(30);
        self.last_interaction_turn = turn;
    }

    /// No-op unless currently allied
    pub(crate) fn apply_alliance_strengthening(&mut self, turn: Turn, amount: i32) {
        if !self.allied {
            return;
        }
        self.alliance_strength = clamp_stat(self.alliance_strength + amount.max(0));
        self.last_interaction_turn = turn;
    }

    /// No-op unless currently allied
    pub(crate) fn apply_alliance_break(&mut self, turn: Turn, reason: AllianceBreakReason) {
        if !self.allied {
            return;
        }
        match reason {
            AllianceBreakReason::Betrayal => {
                // Full betrayal semantics, including the rivalry flip
                self.apply_betrayal(turn, 40);
                return;
            }
            AllianceBreakReason::Drift => {
                self.clear_alliance();
                self.disposition = clamp_disposition(self.disposition - 10);
            }
            AllianceBreakReason::Realignment => {
                self.clear_alliance();
                self.disposition = clamp_disposition(self.disposition - 15);
                self.trust = clamp_stat(self.trust - 10);
            }
        }
        self.last_interaction_turn = turn;
    }

    pub(crate) fn apply_rivalry(&mut self, turn: Turn) {
        self.rival = true;
        if self.allied {
            self.clear_alliance();
        }
        self.disposition = clamp_disposition(self.disposition.min(-20));
        self.last_interaction_turn = turn;
    }

    pub(crate) fn raise_fear(&mut self, turn: Turn, amount: i32) {
        self.fear = clamp_stat(self.fear + amount.max(0));
        self.last_interaction_turn = turn;
    }

    pub(crate) fn raise_respect(&mut self, turn: Turn, amount: i32) {
        self.respect = clamp_stat(self.respect + amount.max(0));
        self.last_interaction_turn = turn;
    }

    pub(crate) fn note_shared_enemy(&mut self, enemy: CharacterId, turn: Turn) {
        if self.shared_enemies.insert(enemy) {
            self.disposition = clamp_disposition(self.disposition + 5);
            self.trust = clamp_stat(self.trust + 5);
        }
        self.last_interaction_turn = turn;
    }

    pub(crate) fn mark_patron(&mut self, turn: Turn) {
        self.patron = true;
        self.trust = clamp_stat(self.trust + 10);
        self.respect = clamp_stat(self.respect + 10);
        self.last_interaction_turn = turn;
    }

    pub(crate) fn mark_client(&mut self, turn: Turn) {
        self.client = true;
        self.trust = clamp_stat(self.trust + 10);
        self.respect = clamp_stat(self.respect + 10);
        self.last_interaction_turn = turn;
    }

    /// Per-turn decay toward neutrality
    ///
    /// Applies at most once per turn. Grudges fade by 2 a turn after 3 idle
    /// turns, gratitude by 3 after 2 idle turns, elevated fear by 5 after 4
    /// idle turns down to a residual floor of 20.
    pub(crate) fn apply_decay(&mut self, current_turn: Turn) {
        if self.last_decay_turn >= current_turn {
            return;
        }
        self.last_decay_turn = current_turn;

        let idle = current_turn.saturating_sub(self.last_interaction_turn);
        if idle >= 3 && self.grudge > 0 {
            self.grudge = (self.grudge - 2).max(0);
        }
        if idle >= 2 && self.gratitude > 0 {
            self.gratitude = (self.gratitude - 3).max(0);
        }
        if idle >= 4 && self.fear > 20 {
            self.fear = (self.fear - 5).max(20);
        }
    }

    fn clear_alliance(&mut self) {
        self.allied = false;
        self.alliance_strength = 0;
        self.alliance_formed_turn = None;
    }
}


#[cfg(test)]
mod decay_tests {
    use super::*;

    fn edge_with_accumulators() -> RelationshipEdge {
        let mut edge = RelationshipEdge::new(CharacterId(1), CharacterId(2), 10);
        edge.grudge = 50;
        edge.gratitude = 30;
        edge.fear = 60;
        edge
    }

    #[test]
    fn test_no_decay_while_recently_active() {
        let mut edge = edge_with_accumulators();
        // One idle turn: below every decay window
        edge.apply_decay(11);
        assert_eq!(edge.grudge, 50);
        assert_eq!(edge.gratitude, 30);
        assert_eq!(edge.fear, 60);
    }

    #[test]
    fn test_gratitude_decays_first() {
        let mut edge = edge_with_accumulators();
        // Two idle turns: gratitude window open, grudge and fear not yet
        edge.apply_decay(12);
        assert_eq!(edge.gratitude, 27);
        assert_eq!(edge.grudge, 50);
        assert_eq!(edge.fear, 60);
    }

    #[test]
    fn test_grudge_decays_after_three_idle_turns() {
        let mut edge = edge_with_accumulators();
        edge.apply_decay(13);
        assert_eq!(edge.grudge, 48);
        assert_eq!(edge.fear, 60);
    }

    #[test]
    fn test_fear_decays_to_residual_floor() {
        let mut edge = edge_with_accumulators();
        edge.fear = 24;
        // Well past the fear window; repeated turns grind fear down to 20
        for turn in 14..30 {
            edge.apply_decay(turn);
        }
        assert_eq!(edge.fear, 20);
    }

    #[test]
    fn test_low_fear_does_not_decay() {
        let mut edge = edge_with_accumulators();
        edge.fear = 15;
        edge.apply_decay(20);
        assert_eq!(edge.fear, 15);
    }

    #[test]
    fn test_decay_is_idempotent_within_a_turn() {
        let mut edge = edge_with_accumulators();
        edge.apply_decay(14);
        let snapshot = (edge.grudge, edge.gratitude, edge.fear);
        edge.apply_decay(14);
        assert_eq!((edge.grudge, edge.gratitude, edge.fear), snapshot);
    }

    #[test]
    fn test_decay_floors_at_zero() {
        let mut edge = RelationshipEdge::new(CharacterId(1), CharacterId(2), 0);
        edge.grudge = 3;
        edge.gratitude = 2;
        for turn in 1..10 {
            edge.apply_decay(turn);
        }
        assert_eq!(edge.grudge, 0);
        assert_eq!(edge.gratitude, 0);
    }

    #[test]
    fn test_interaction_resets_idle_clock() {
        let mut edge = edge_with_accumulators();
        edge.apply_decay(13);
        assert_eq!(edge.grudge, 48);

        // Fresh interaction on turn 14 closes the decay windows again
        edge.apply_benefit(14, 0);
        edge.apply_decay(15);
        assert_eq!(edge.grudge, 48);
        edge.apply_decay(16);
        assert_eq!(edge.grudge, 48);
        edge.apply_decay(17);
        assert_eq!(edge.grudge, 46);
    }
}
