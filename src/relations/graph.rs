//! RelationshipGraph - keyed store of directed relationship edges
//!
//! All relationship writes go through the named operations here so side
//! effects (alliance teardown, rivalry flips, interaction timestamps) stay
//! consistent. Every operation mutates how `source` regards `target`;
//! callers wanting a mutual effect invoke both directions. Edges are
//! created lazily on first mutation; reads never create.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{CharacterId, Turn};
use crate::relations::edge::{AllianceBreakReason, RelationshipEdge, Stance};

/// Directed relationship edges keyed by (source, target)
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    edges: BTreeMap<(CharacterId, CharacterId), RelationshipEdge>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Get an edge if one exists; never creates
    pub fn edge(&self, source: CharacterId, target: CharacterId) -> Option<&RelationshipEdge> {
        self.edges.get(&(source, target))
    }

    /// All edges in deterministic (source, target) order
    pub fn edges(&self) -> impl Iterator<Item = &RelationshipEdge> {
        self.edges.values()
    }

    /// All edges held by one source character
    pub fn edges_from(&self, source: CharacterId) -> impl Iterator<Item = &RelationshipEdge> {
        self.edges
            .range((source, CharacterId(u32::MIN))..=(source, CharacterId(u32::MAX)))
            .map(|(_, edge)| edge)
    }

    fn edge_entry(&mut self, source: CharacterId, target: CharacterId, turn: Turn) -> &mut RelationshipEdge {
        self.edges
            .entry((source, target))
            .or_insert_with(|| RelationshipEdge::new(source, target, turn))
    }

    // ===== Intent-named mutations =====

    /// `source` records that `target` betrayed them
    pub fn record_betrayal(&mut self, source: CharacterId, target: CharacterId, turn: Turn, severity: i32) {
        tracing::debug!("betrayal recorded: {:?} -> {:?} severity {}", source, target, severity);
        self.edge_entry(source, target, turn).apply_betrayal(turn, severity);
    }

    /// `source` records a good turn done by `target`
    pub fn record_benefit(&mut self, source: CharacterId, target: CharacterId, turn: Turn, magnitude: i32) {
        self.edge_entry(source, target, turn).apply_benefit(turn, magnitude);
    }

    /// `source` now counts `target` as an ally
    pub fn form_alliance(&mut self, source: CharacterId, target: CharacterId, turn: Turn) {
        tracing::debug!("alliance formed: {:?} -> {:?}", source, target);
        self.edge_entry(source, target, turn).apply_alliance(turn);
    }

    /// Deepen an existing alliance; no-op when none exists
    pub fn strengthen_alliance(&mut self, source: CharacterId, target: CharacterId, turn: Turn, amount: i32) {
        self.edge_entry(source, target, turn)
            .apply_alliance_strengthening(turn, amount);
    }

    /// Dissolve an existing alliance; no-op when none exists
    pub fn break_alliance(
        &mut self,
        source: CharacterId,
        target: CharacterId,
        turn: Turn,
        reason: AllianceBreakReason,
    ) {
        tracing::debug!("alliance broken: {:?} -> {:?} ({:?})", source, target, reason);
        self.edge_entry(source, target, turn).apply_alliance_break(turn, reason);
    }

    /// `source` declares `target` a rival
    pub fn declare_rivalry(&mut self, source: CharacterId, target: CharacterId, turn: Turn) {
        tracing::debug!("rivalry declared: {:?} -> {:?}", source, target);
        self.edge_entry(source, target, turn).apply_rivalry(turn);
    }

    pub fn increase_fear(&mut self, source: CharacterId, target: CharacterId, turn: Turn, amount: i32) {
        self.edge_entry(source, target, turn).raise_fear(turn, amount);
    }

    pub fn increase_respect(&mut self, source: CharacterId, target: CharacterId, turn: Turn, amount: i32) {
        self.edge_entry(source, target, turn).raise_respect(turn, amount);
    }

    /// Record a patron-client tie on both directed edges
    pub fn establish_patronage(&mut self, patron: CharacterId, client: CharacterId, turn: Turn) {
        self.edge_entry(patron, client, turn).mark_client(turn);
        self.edge_entry(client, patron, turn).mark_patron(turn);
    }

    /// `source` learns they share an enemy with `target`
    pub fn record_shared_enemy(
        &mut self,
        source: CharacterId,
        target: CharacterId,
        enemy: CharacterId,
        turn: Turn,
    ) {
        self.edge_entry(source, target, turn).note_shared_enemy(enemy, turn);
    }

    /// Per-turn decay across every edge; safe to call once per turn,
    /// repeated calls within a turn change nothing
    pub fn decay(&mut self, current_turn: Turn) {
        for edge in self.edges.values_mut() {
            edge.apply_decay(current_turn);
        }
    }

    // ===== Neutral-default queries =====

    /// Overall quality, 0 when no edge exists
    pub fn quality(&self, source: CharacterId, target: CharacterId) -> i32 {
        self.edge(source, target).map_or(0, |e| e.overall_quality())
    }

    /// Stance, neutral when no edge exists
    pub fn stance(&self, source: CharacterId, target: CharacterId) -> Stance {
        self.edge(source, target).map_or(Stance::Neutral, |e| e.stance())
    }

    pub fn would_help(&self, source: CharacterId, target: CharacterId) -> bool {
        self.edge(source, target).map_or(false, |e| e.would_help())
    }

    pub fn would_oppose(&self, source: CharacterId, target: CharacterId) -> bool {
        self.edge(source, target).map_or(false, |e| e.would_oppose())
    }

    pub fn would_betray(&self, source: CharacterId, target: CharacterId) -> bool {
        self.edge(source, target).map_or(false, |e| e.would_betray())
    }
}

impl Serialize for RelationshipGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.edges.values())
    }
}

impl<'de> Deserialize<'de> for RelationshipGraph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let edges = Vec::<RelationshipEdge>::deserialize(deserializer)?;
        let mut graph = RelationshipGraph::new();
        for edge in edges {
            graph.edges.insert((edge.source, edge.target), edge);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: CharacterId = CharacterId(1);
    const B: CharacterId = CharacterId(2);
    const C: CharacterId = CharacterId(3);

    #[test]
    fn test_edges_are_created_lazily() {
        let mut graph = RelationshipGraph::new();
        assert!(graph.edge(A, B).is_none());

        graph.record_benefit(A, B, 5, 20);
        let edge = graph.edge(A, B).expect("edge should exist after mutation");
        assert_eq!(edge.relationship_start_turn, 5);
        assert_eq!(edge.gratitude, 20);
    }

    #[test]
    fn test_queries_never_create_edges() {
        let graph = RelationshipGraph::new();
        assert_eq!(graph.quality(A, B), 0);
        assert_eq!(graph.stance(A, B), Stance::Neutral);
        assert!(!graph.would_help(A, B));
        assert!(!graph.would_oppose(A, B));
        assert!(!graph.would_betray(A, B));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_edges_are_directional() {
        let mut graph = RelationshipGraph::new();
        graph.record_betrayal(A, B, 5, 50);

        assert!(graph.edge(A, B).is_some());
        assert!(graph.edge(B, A).is_none());
        assert!(graph.quality(A, B) < 0);
        assert_eq!(graph.quality(B, A), 0);
    }

    #[test]
    fn test_patronage_marks_both_directions() {
        let mut graph = RelationshipGraph::new();
        graph.establish_patronage(A, B, 5);

        let patron_view = graph.edge(A, B).expect("patron edge");
        let client_view = graph.edge(B, A).expect("client edge");
        assert!(patron_view.client);
        assert!(!patron_view.patron);
        assert!(client_view.patron);
        assert!(!client_view.client);
    }

    #[test]
    fn test_decay_touches_every_edge() {
        let mut graph = RelationshipGraph::new();
        graph.record_betrayal(A, B, 0, 30);
        graph.record_betrayal(B, C, 0, 30);

        graph.decay(4);
        assert_eq!(graph.edge(A, B).expect("edge").grudge, 28);
        assert_eq!(graph.edge(B, C).expect("edge").grudge, 28);

        // Second call on the same turn is a no-op
        graph.decay(4);
        assert_eq!(graph.edge(A, B).expect("edge").grudge, 28);
    }

    #[test]
    fn test_edges_from_ranges_over_one_source() {
        let mut graph = RelationshipGraph::new();
        graph.record_benefit(A, B, 1, 10);
        graph.record_benefit(A, C, 1, 10);
        graph.record_benefit(B, C, 1, 10);

        let from_a: Vec<CharacterId> = graph.edges_from(A).map(|e| e.target).collect();
        assert_eq!(from_a, vec![B, C]);
    }

    #[test]
    fn test_graph_serializes_as_edge_list() {
        let mut graph = RelationshipGraph::new();
        graph.form_alliance(A, B, 7);
        graph.declare_rivalry(B, A, 8);

        let json = serde_json::to_string(&graph).expect("serialize");
        let restored: RelationshipGraph = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(restored.len(), 2);
        assert!(restored.edge(A, B).expect("edge").allied);
        assert!(restored.edge(B, A).expect("edge").rival);
        assert_eq!(restored.edge(A, B).expect("edge").alliance_formed_turn, Some(7));
    }

    #[test]
    fn test_deserialize_empty_list() {
        let graph: RelationshipGraph = serde_json::from_str("[]").expect("deserialize");
        assert!(graph.is_empty());
    }
}
