//! Integration tests for the Standing Committee political loop
//!
//! These tests verify the political machinery works end-to-end:
//! - Party Congress elections seat and reseat the committee
//! - Sessions decide the pending agenda in priority order
//! - Vote tallies always partition the attending full members
//! - Relationship history feeds votes and cools off over idle turns
//! - Saves round-trip the full political state

use politburo::committee::{
    convene_meeting, member_vote, run_election, AgendaCategory, AgendaItem, AgendaPriority, Chair,
    Committee, Outcome, Vote, MAX_SEATS,
};
use politburo::context::{Character, GameContext, Personality};
use politburo::core::config::{ElectionTuning, Tuning, VoteTuning};
use politburo::core::types::{CharacterId, FactionId};
use politburo::relations::RelationshipGraph;
use politburo::save::SaveState;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// Fixtures
// ============================================================================

fn cadre(id: u32, name: &str, faction: u32, position_index: u32) -> Character {
    let mut c = Character::new(CharacterId(id), name, Some(FactionId(faction)));
    c.position_index = position_index;
    c.turns_at_senior_rank = 20;
    c.personality = Personality::new(50, 50, 50, 60, 70);
    c
}

/// Nine eligible cadres across three factions plus two who cannot serve.
/// Venko is the only eligible cadre at chair rank.
fn full_cast() -> GameContext {
    let mut ctx = GameContext::new();
    ctx.stability = 60;
    ctx.faction_power.insert(FactionId(1), 60.0);
    ctx.faction_power.insert(FactionId(2), 45.0);
    ctx.faction_power.insert(FactionId(3), 30.0);

    ctx.insert_character(cadre(1, "Venko", 1, 9));
    ctx.insert_character(cadre(2, "Olenna", 1, 6));
    ctx.insert_character(cadre(3, "Passek", 1, 6));
    ctx.insert_character(cadre(4, "Brandt", 2, 7));
    ctx.insert_character(cadre(5, "Csilla", 2, 6));
    ctx.insert_character(cadre(6, "Hollan", 2, 5));
    ctx.insert_character(cadre(7, "Temel", 3, 5));
    ctx.insert_character(cadre(8, "Wren", 3, 6));
    ctx.insert_character(cadre(9, "Sorel", 3, 5));

    let mut detained = cadre(10, "Rybak", 1, 8);
    detained.detained = true;
    ctx.insert_character(detained);
    let mut junior = cadre(11, "Mab", 2, 3);
    junior.turns_at_senior_rank = 2;
    ctx.insert_character(junior);
    ctx
}

fn policy_item(title: &str, priority: AgendaPriority, sponsor: Option<CharacterId>) -> AgendaItem {
    AgendaItem::new(title, "", AgendaCategory::Policy, priority, sponsor, 1)
}

// ============================================================================
// Party Congress Tests
// ============================================================================

#[test]
fn test_founding_congress_seats_seven() {
    let ctx = full_cast();
    let mut committee = Committee::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let outcome = run_election(&mut committee, &ctx, 0, &ElectionTuning::default(), &mut rng);

    assert_eq!(outcome.elected.len(), MAX_SEATS);
    assert_eq!(committee.seated_count(), MAX_SEATS);
    assert_eq!(committee.full_members.len(), 5);
    assert_eq!(committee.candidate_members.len(), 2);
    // Venko is the only eligible cadre at chair rank
    assert_eq!(committee.chair, Some(Chair::Member(CharacterId(1))));
    // The detained and the junior cadre never reach the committee
    assert!(!committee.is_seated(CharacterId(10)));
    assert!(!committee.is_seated(CharacterId(11)));
}

#[test]
fn test_reelection_drops_fallen_members() {
    let mut ctx = full_cast();
    let mut committee = Committee::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    run_election(&mut committee, &ctx, 0, &ElectionTuning::default(), &mut rng);

    // Two sitting members fall from grace between congresses
    let fallen: Vec<CharacterId> = committee.seated_members().take(2).collect();
    for &id in &fallen {
        if let Some(c) = ctx.character_mut(id) {
            c.under_investigation = true;
        }
    }

    let outcome = run_election(&mut committee, &ctx, 20, &ElectionTuning::default(), &mut rng);

    for &id in &fallen {
        assert!(outcome.removed.contains(&id), "fallen member should lose the seat");
        assert!(!committee.is_seated(id));
    }
    // Seven eligible cadres remain, so the bench refills exactly
    assert_eq!(committee.seated_count(), MAX_SEATS);
}

#[test]
fn test_seat_cap_holds_across_congresses() {
    let ctx = full_cast();
    let mut committee = Committee::new();
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    for congress in 0..5 {
        run_election(
            &mut committee,
            &ctx,
            congress * 20,
            &ElectionTuning::default(),
            &mut rng,
        );
        assert!(committee.seated_count() <= MAX_SEATS);
        assert_eq!(committee.full_members.len(), 5);
    }
}

// ============================================================================
// Session Tests
// ============================================================================

#[test]
fn test_session_works_through_the_agenda() {
    let mut ctx = full_cast();
    let mut committee = Committee::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    run_election(&mut committee, &ctx, 0, &ElectionTuning::default(), &mut rng);

    committee.submit_item(policy_item("Routine filing", AgendaPriority::Routine, None));
    committee.submit_item(policy_item("Border emergency", AgendaPriority::Critical, None));
    committee.submit_item(policy_item("Budget revision", AgendaPriority::Important, None));

    ctx.turn = 5;
    let graph = RelationshipGraph::new();
    let result = convene_meeting(&mut committee, &graph, &ctx, &Tuning::default(), &mut rng);

    assert!(result.convened);
    let titles: Vec<&str> = result
        .record
        .decisions
        .iter()
        .map(|d| d.item.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Border emergency", "Budget revision", "Routine filing"]);
    assert!(committee.pending_agenda.is_empty());
    assert_eq!(committee.meeting_history.len(), 1);
    assert_eq!(committee.last_meeting_turn, 5);
}

#[test]
fn test_tally_partitions_attendees_for_any_seed() {
    for seed in 0..10 {
        let mut ctx = full_cast();
        let mut committee = Committee::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        run_election(&mut committee, &ctx, 0, &ElectionTuning::default(), &mut rng);

        let sponsor = committee.full_members.first().copied();
        committee.submit_item(policy_item("Directive A", AgendaPriority::Important, sponsor));
        committee.submit_item(policy_item("Directive B", AgendaPriority::Routine, None));

        ctx.turn = 7;
        let graph = RelationshipGraph::new();
        let result = convene_meeting(&mut committee, &graph, &ctx, &Tuning::default(), &mut rng);

        for decision in &result.record.decisions {
            let total = decision.tally.votes_for
                + decision.tally.votes_against
                + decision.tally.abstentions;
            assert_eq!(
                total as usize,
                result.record.attendees.len(),
                "every attendee votes exactly once"
            );

            let mut voters: Vec<CharacterId> = decision
                .item
                .votes_for
                .iter()
                .chain(decision.item.votes_against.iter())
                .chain(decision.item.abstained.iter())
                .copied()
                .collect();
            voters.sort();
            let mut attendees = result.record.attendees.clone();
            attendees.sort();
            assert_eq!(voters, attendees);
        }
    }
}

#[test]
fn test_decision_summaries_use_fixed_vocabulary() {
    let allowed = [
        "Approved without reservation.",
        "Rejected by majority vote.",
        "Deferred for further study.",
        "Approved after amendment.",
        "Referred to a subordinate organ.",
    ];

    let mut ctx = full_cast();
    let mut committee = Committee::new();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    run_election(&mut committee, &ctx, 0, &ElectionTuning::default(), &mut rng);
    for i in 0..4 {
        committee.submit_item(policy_item(
            &format!("Directive {}", i),
            AgendaPriority::Important,
            None,
        ));
    }

    ctx.turn = 9;
    let graph = RelationshipGraph::new();
    let result = convene_meeting(&mut committee, &graph, &ctx, &Tuning::default(), &mut rng);

    for decision in &result.record.decisions {
        assert!(
            allowed.contains(&decision.summary.as_str()),
            "unexpected summary: {}",
            decision.summary
        );
    }
}

#[test]
fn test_loyal_bloc_carries_security_item() {
    // A ruthless chair sponsoring a security item, two loyalists from the
    // chair's faction, two low-loyalty members with no security appetite.
    // The item passes with at least three votes for under any seed.
    let mut ctx = GameContext::new();
    ctx.stability = 60;

    let mut chair = cadre(1, "Venko", 1, 9);
    chair.personality = Personality::new(50, 50, 100, 60, 80);
    ctx.insert_character(chair);
    for (id, name) in [(2, "Olenna"), (3, "Passek")] {
        let mut c = cadre(id, name, 1, 6);
        c.personality = Personality::new(50, 50, 50, 60, 80);
        ctx.insert_character(c);
    }
    for (id, name) in [(4, "Brandt"), (5, "Csilla")] {
        let mut c = cadre(id, name, 2, 6);
        c.personality = Personality::new(50, 50, 0, 60, 20);
        ctx.insert_character(c);
    }

    let mut committee = Committee::new();
    committee.install_roster(
        (1..=5).map(CharacterId).collect(),
        vec![],
        Some(Chair::Member(CharacterId(1))),
        &ctx,
    );

    for seed in 0..20 {
        let mut test_committee = committee.clone();
        test_committee.submit_item(AgendaItem::new(
            "Expand internal security powers",
            "",
            AgendaCategory::Security,
            AgendaPriority::Urgent,
            Some(CharacterId(1)),
            1,
        ));
        ctx.turn = 3;
        let graph = RelationshipGraph::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result =
            convene_meeting(&mut test_committee, &graph, &ctx, &Tuning::default(), &mut rng);

        let decision = &result.record.decisions[0];
        assert!(decision.tally.votes_for >= 3);
        assert_eq!(decision.tally.votes_against, 0);
        assert!(matches!(
            decision.outcome,
            Outcome::Approved | Outcome::AmendedAndApproved
        ));
    }
}

// ============================================================================
// Relationship Tests
// ============================================================================

#[test]
fn test_grudge_turns_a_vote_against() {
    let mut ctx = GameContext::new();
    let sponsor = cadre(1, "Venko", 1, 6);
    ctx.insert_character(sponsor);
    let mut voter = cadre(2, "Brandt", 2, 6);
    // No loyalty so only the sponsor relationship moves the score
    voter.personality = Personality::new(50, 50, 50, 60, 0);
    ctx.insert_character(voter);

    let tuning = VoteTuning {
        random_band: 0.0,
        ..VoteTuning::default()
    };
    let item = policy_item("Sponsored directive", AgendaPriority::Important, Some(CharacterId(1)));

    // Without history the vote sits on the fence
    let graph = RelationshipGraph::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let before = member_vote(CharacterId(2), &item, None, &graph, &ctx, &tuning, &mut rng);
    assert_eq!(before, Vote::Abstain);

    // Two betrayals later the voter wants the sponsor to fail
    let mut graph = RelationshipGraph::new();
    graph.record_betrayal(CharacterId(2), CharacterId(1), 1, 80);
    graph.record_betrayal(CharacterId(2), CharacterId(1), 2, 80);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let after = member_vote(CharacterId(2), &item, None, &graph, &ctx, &tuning, &mut rng);
    assert_eq!(after, Vote::Against);
}

#[test]
fn test_betrayal_marks_the_relationship() {
    let mut graph = RelationshipGraph::new();
    graph.record_betrayal(CharacterId(2), CharacterId(1), 5, 80);

    assert!(graph.would_betray(CharacterId(2), CharacterId(1)));
    assert!(graph.would_oppose(CharacterId(2), CharacterId(1)));
    assert!(!graph.would_help(CharacterId(2), CharacterId(1)));
}

#[test]
fn test_grudges_cool_over_idle_turns() {
    let mut graph = RelationshipGraph::new();
    graph.record_betrayal(CharacterId(2), CharacterId(1), 0, 80);
    graph.record_betrayal(CharacterId(2), CharacterId(1), 0, 80);
    assert_eq!(
        graph.edge(CharacterId(2), CharacterId(1)).map(|e| e.grudge),
        Some(100)
    );

    // Grudges start cooling on the third idle turn, two points per turn
    for turn in 1..=10 {
        graph.decay(turn);
    }
    assert_eq!(
        graph.edge(CharacterId(2), CharacterId(1)).map(|e| e.grudge),
        Some(84)
    );
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[test]
fn test_save_round_trips_a_running_game() {
    let mut ctx = full_cast();
    let mut committee = Committee::new();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    run_election(&mut committee, &ctx, 0, &ElectionTuning::default(), &mut rng);

    committee.submit_item(policy_item("Directive", AgendaPriority::Important, None));
    ctx.turn = 5;
    let mut relations = RelationshipGraph::new();
    relations.form_alliance(CharacterId(1), CharacterId(2), 3);
    relations.record_betrayal(CharacterId(4), CharacterId(1), 4, 40);
    convene_meeting(&mut committee, &relations, &ctx, &Tuning::default(), &mut rng);

    let state = SaveState::new(committee, relations);
    let json = state.to_json().unwrap();
    let restored = SaveState::from_json(&json).unwrap();

    assert_eq!(restored.committee.chair, Some(Chair::Member(CharacterId(1))));
    assert_eq!(restored.committee.meeting_history.len(), 1);
    assert_eq!(restored.committee.last_meeting_turn, 5);
    assert!(restored.committee.pending_agenda.is_empty());
    assert_eq!(restored.relations.edges().count(), 2);
    assert_eq!(
        restored
            .relations
            .edge(CharacterId(4), CharacterId(1))
            .map(|e| e.grudge),
        Some(40)
    );
    let meeting = &restored.committee.meeting_history[0];
    assert_eq!(meeting.decisions.len(), 1);
    assert_eq!(meeting.attendees, restored.committee.full_members);
}
