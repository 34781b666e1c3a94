//! Per-member vote scoring and collective agenda decisions
//!
//! The chair votes first; every other full member then scores the item
//! with the chair's vote as a loyalty signal. Candidate members sit in
//! but do not vote.

use rand::Rng;

use crate::committee::agenda::{
    AgendaCategory, AgendaItem, AgendaPriority, Decision, Outcome, Vote, VoteTally,
};
use crate::committee::roster::Committee;
use crate::context::{Character, GameContext};
use crate::core::config::VoteTuning;
use crate::core::types::CharacterId;
use crate::relations::RelationshipGraph;

/// Whether a member sits this vote out before any scoring happens
///
/// Technocrats (competence above 70) sometimes refuse to dignify routine
/// items with a position; the paranoid abstain whenever the chair gave
/// them no for-or-against signal to read.
fn auto_abstains(
    member: &Character,
    item: &AgendaItem,
    chair_vote: Option<Vote>,
    tuning: &VoteTuning,
    rng: &mut impl Rng,
) -> bool {
    if member.personality.competence > 70
        && item.priority == AgendaPriority::Routine
        && rng.gen_bool(tuning.routine_abstain_chance)
    {
        return true;
    }
    let chair_took_position = matches!(chair_vote, Some(Vote::For) | Some(Vote::Against));
    !chair_took_position && member.personality.paranoia > 60
}

/// Inclination score for one member on one item
fn vote_score(
    member: &Character,
    item: &AgendaItem,
    chair_vote: Option<Vote>,
    graph: &RelationshipGraph,
    ctx: &GameContext,
    tuning: &VoteTuning,
    rng: &mut impl Rng,
) -> f32 {
    let mut score = tuning.baseline;

    // Loyal members track the chair, disloyal ones barely move
    match chair_vote {
        Some(Vote::For) => score += member.personality.loyalty as f32 / 2.0,
        Some(Vote::Against) => score -= member.personality.loyalty as f32 / 2.0,
        _ => {}
    }

    match item.category {
        AgendaCategory::Personnel => score += member.personality.ambition as f32 / 4.0,
        AgendaCategory::Security => score += member.personality.ruthlessness as f32 / 3.0,
        _ => {}
    }

    if let Some(sponsor) = item.sponsor {
        let same_faction = match (member.faction, ctx.faction_of(sponsor)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        if same_faction {
            score += tuning.sponsor_faction_bonus;
        } else if let Some(edge) = graph.edge(member.id, sponsor) {
            score += edge.disposition as f32 / 4.0;
        }
    }

    if tuning.random_band > 0.0 {
        score += rng.gen_range(-tuning.random_band..=tuning.random_band);
    }

    score
}

/// Cast one member's vote on one item
///
/// `chair_vote` is None for the chair's own vote and whenever no seated
/// chair voted (player chair, vacant chair). A member missing from the
/// registry abstains.
pub fn member_vote(
    member_id: CharacterId,
    item: &AgendaItem,
    chair_vote: Option<Vote>,
    graph: &RelationshipGraph,
    ctx: &GameContext,
    tuning: &VoteTuning,
    rng: &mut impl Rng,
) -> Vote {
    let member = match ctx.character(member_id) {
        Some(member) => member,
        None => return Vote::Abstain,
    };
    if auto_abstains(member, item, chair_vote, tuning, rng) {
        return Vote::Abstain;
    }
    let score = vote_score(member, item, chair_vote, graph, ctx, tuning, rng);
    if score > tuning.for_threshold {
        Vote::For
    } else if score < tuning.against_threshold {
        Vote::Against
    } else {
        Vote::Abstain
    }
}

/// Collective outcome from a finished tally
///
/// A clean majority with no abstentions passes outright; abstentions
/// force amendments into the passed text; a tie defers; a shortfall
/// rejects.
fn decide_outcome(tally: &VoteTally) -> Outcome {
    use std::cmp::Ordering;
    match tally.votes_for.cmp(&tally.votes_against) {
        Ordering::Greater if tally.abstentions == 0 => Outcome::Approved,
        Ordering::Greater => Outcome::AmendedAndApproved,
        Ordering::Equal => Outcome::Deferred,
        Ordering::Less => Outcome::Rejected,
    }
}

/// Put one item before the committee and return its decision
///
/// Every full member casts exactly one vote. The chair votes first when
/// the chair is a seated full member; a player or vacant chair leaves
/// the loyalty signal empty.
pub fn process_item(
    mut item: AgendaItem,
    committee: &Committee,
    graph: &RelationshipGraph,
    ctx: &GameContext,
    tuning: &VoteTuning,
    rng: &mut impl Rng,
) -> Decision {
    let chair_id = committee
        .chair_member()
        .filter(|id| committee.full_members.contains(id));

    let mut chair_vote = None;
    if let Some(chair_id) = chair_id {
        let vote = member_vote(chair_id, &item, None, graph, ctx, tuning, rng);
        item.record_vote(chair_id, vote);
        chair_vote = Some(vote);
    }

    for &member_id in &committee.full_members {
        if Some(member_id) == chair_id {
            continue;
        }
        let vote = member_vote(member_id, &item, chair_vote, graph, ctx, tuning, rng);
        item.record_vote(member_id, vote);
    }

    let tally = item.tally();
    let outcome = decide_outcome(&tally);
    let dissenters = item.votes_against.clone();
    let summary = outcome.summary().to_string();

    tracing::debug!(
        "'{}': {} for, {} against, {} abstaining -> {:?}",
        item.title,
        tally.votes_for,
        tally.votes_against,
        tally.abstentions,
        outcome
    );

    Decision {
        item,
        outcome,
        tally,
        dissenters,
        summary,
    }
}
