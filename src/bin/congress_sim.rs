//! Standing Committee simulation runner
//!
//! Seats a committee through Party Congress elections, convenes
//! sessions over the pending agenda, and lets relationships drift,
//! printing the political record as it unfolds.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use politburo::committee::{
    congress_due, convene_meeting, fill_vacancy, is_eligible, run_election, AgendaCategory,
    AgendaItem, AgendaPriority, Committee, Outcome,
};
use politburo::context::{Character, GameContext, Personality};
use politburo::core::config::Tuning;
use politburo::core::types::{CharacterId, FactionId, Turn};
use politburo::relations::RelationshipGraph;
use politburo::save::{save_state, SaveState};

/// Standing Committee politics, headless
#[derive(Parser, Debug)]
#[command(name = "congress_sim")]
#[command(about = "Run a scripted Standing Committee simulation")]
struct Args {
    /// Number of turns to simulate
    #[arg(long, default_value_t = 60)]
    turns: Turn,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Scenario TOML defining the cast (defaults to the built-in cast)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Balance tuning TOML (missing file means defaults)
    #[arg(long, default_value = "data/tuning.toml")]
    tuning: PathBuf,

    /// Write the final state to this JSON file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the eligibility review before the founding congress
    #[arg(long, short = 'v')]
    verbose: bool,
}

// ==================== Scenario files ====================

fn default_stability() -> u32 {
    55
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default = "default_stability")]
    stability: u32,
    #[serde(default)]
    factions: Vec<ScenarioFaction>,
    #[serde(default)]
    characters: Vec<ScenarioCharacter>,
}

#[derive(Debug, Deserialize)]
struct ScenarioFaction {
    id: u32,
    power: f32,
}

#[derive(Debug, Deserialize)]
struct ScenarioCharacter {
    id: u32,
    name: String,
    faction: Option<u32>,
    #[serde(default)]
    position_index: u32,
    #[serde(default)]
    turns_at_senior_rank: u32,
    #[serde(default)]
    personality: Personality,
}

fn load_scenario(path: &Path) -> GameContext {
    let contents = fs::read_to_string(path).expect("Failed to read scenario file");
    let scenario: ScenarioFile = toml::from_str(&contents).expect("Failed to parse scenario file");

    let mut ctx = GameContext::new();
    ctx.stability = scenario.stability;
    for faction in &scenario.factions {
        ctx.faction_power.insert(FactionId(faction.id), faction.power);
    }
    for entry in scenario.characters {
        let mut character = Character::new(
            CharacterId(entry.id),
            entry.name,
            entry.faction.map(FactionId),
        );
        character.position_index = entry.position_index;
        character.turns_at_senior_rank = entry.turns_at_senior_rank;
        character.personality = entry.personality;
        ctx.insert_character(character);
    }
    ctx
}

// ==================== Built-in cast ====================

/// (name, faction or 0 for none, position index, turns senior, [amb, par, ruth, comp, loy])
const DEMO_CAST: [(&str, u32, u32, u32, [u32; 5]); 10] = [
    ("Marshal Venko", 1, 9, 25, [70, 40, 80, 65, 75]),
    ("Secretary Olenna", 1, 8, 30, [85, 55, 60, 80, 70]),
    ("Director Passek", 1, 6, 15, [60, 70, 75, 55, 80]),
    ("Commissar Brandt", 2, 7, 18, [75, 45, 50, 70, 60]),
    ("Minister Csilla", 2, 6, 14, [50, 30, 40, 85, 65]),
    ("Deputy Hollan", 2, 5, 12, [65, 60, 55, 60, 50]),
    ("Chairman Emeritus Rybak", 3, 8, 40, [30, 80, 45, 45, 90]),
    ("Organizer Temel", 3, 5, 13, [80, 50, 65, 75, 45]),
    ("Auditor Wren", 3, 4, 8, [55, 65, 35, 90, 70]),
    ("Archivist Sorel", 0, 6, 20, [20, 75, 25, 95, 85]),
];

fn demo_context() -> GameContext {
    let mut ctx = GameContext::new();
    ctx.stability = 55;
    ctx.faction_power.insert(FactionId(1), 60.0);
    ctx.faction_power.insert(FactionId(2), 45.0);
    ctx.faction_power.insert(FactionId(3), 30.0);

    for (i, &(name, faction, position, seniority, p)) in DEMO_CAST.iter().enumerate() {
        let faction = if faction == 0 { None } else { Some(FactionId(faction)) };
        let mut character = Character::new(CharacterId(i as u32 + 1), name, faction);
        character.position_index = position;
        character.turns_at_senior_rank = seniority;
        character.personality = Personality::new(p[0], p[1], p[2], p[3], p[4]);
        ctx.insert_character(character);
    }
    ctx
}

// ==================== Scripted drama ====================

const AGENDA_POOL: [(&str, AgendaCategory, AgendaPriority); 8] = [
    ("Five-Year Industrial Targets", AgendaCategory::Economic, AgendaPriority::Important),
    ("Provincial Secretary Appointments", AgendaCategory::Personnel, AgendaPriority::Important),
    ("Counter-Espionage Directive", AgendaCategory::Security, AgendaPriority::Urgent),
    ("Doctrine Handbook Revision", AgendaCategory::Ideological, AgendaPriority::Routine),
    ("Trade Mission to the Border States", AgendaCategory::Foreign, AgendaPriority::Routine),
    ("Emergency Grain Requisition", AgendaCategory::Crisis, AgendaPriority::Critical),
    ("Succession Protocol Review", AgendaCategory::Succession, AgendaPriority::Important),
    ("Censorship Standards Update", AgendaCategory::Policy, AgendaPriority::Routine),
];

/// Low-rent scripted politics so the graph has something to chew on
fn inject_relationship_events(turn: Turn, ctx: &GameContext, relations: &mut RelationshipGraph) {
    let mut ids: Vec<CharacterId> = ctx.characters.keys().copied().collect();
    ids.sort();
    if ids.len() < 4 {
        return;
    }
    let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

    match turn % 12 {
        0 => {
            relations.strengthen_alliance(a, b, turn, 10);
            relations.establish_patronage(a, c, turn);
        }
        3 => {
            relations.form_alliance(a, b, turn);
            relations.form_alliance(b, a, turn);
        }
        5 => {
            relations.record_benefit(c, a, turn, 30);
            relations.increase_respect(c, a, turn, 15);
        }
        7 => relations.record_shared_enemy(a, c, d, turn),
        9 => relations.record_betrayal(b, d, turn, 35),
        11 => {
            relations.declare_rivalry(d, b, turn);
            relations.increase_fear(c, d, turn, 25);
        }
        _ => {}
    }
}

fn submit_agenda(turn: Turn, committee: &mut Committee, ctx: &GameContext) {
    let index = (turn / 4) as usize % AGENDA_POOL.len();
    let (title, category, priority) = AGENDA_POOL[index];
    let sponsor = committee
        .seated_members()
        .nth(turn as usize % committee.seated_count().max(1));

    committee.submit_item(AgendaItem::new(
        title,
        format!("Submitted in the {} session cycle", turn),
        category,
        priority,
        sponsor,
        turn,
    ));
    if let Some(sponsor) = sponsor {
        println!("Turn {:>3}: {} tabled '{}'", turn, ctx.name_of(sponsor), title);
    } else {
        println!("Turn {:>3}: secretariat tabled '{}'", turn, title);
    }
}

// ==================== Main ====================

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    let mut tuning = Tuning::load(&args.tuning).expect("Failed to load tuning file");
    if let Err(msg) = tuning.validate() {
        eprintln!("Invalid tuning ({}), using defaults", msg);
        tuning = Tuning::default();
    }

    let mut ctx = match &args.scenario {
        Some(path) => load_scenario(path),
        None => demo_context(),
    };
    let mut committee = Committee::new();
    let mut relations = RelationshipGraph::new();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("Standing Committee Simulation");
    println!("=============================");
    println!("Cast: {} cadres, stability {}", ctx.characters.len(), ctx.stability);
    println!("Seed: {}, turns: {}", args.seed, args.turns);
    println!();

    if args.verbose {
        let mut ids: Vec<CharacterId> = ctx.characters.keys().copied().collect();
        ids.sort();
        eprintln!("=== Eligibility Review ===");
        for id in ids {
            let report = is_eligible(id, &ctx);
            eprintln!("{}: {}", ctx.name_of(id), report.reasons.join("; "));
        }
        eprintln!();
    }

    // Founding congress seats the first committee
    let founding = run_election(&mut committee, &ctx, 0, &tuning.election, &mut rng);
    committee.secretary = committee.full_members.get(1).copied();
    println!("Turn   0: {}", founding.narrative);
    let mut congress_count = 1;

    for turn in 1..=args.turns {
        ctx.turn = turn;
        relations.decay(turn);
        inject_relationship_events(turn, &ctx, &mut relations);

        if turn % 4 == 1 {
            submit_agenda(turn, &mut committee, &ctx);
        }

        // A purge partway through each congress cycle
        if turn % 20 == 13 {
            let victim = committee.seated_members().last();
            if let Some(victim) = victim {
                if let Some(character) = ctx.character_mut(victim) {
                    character.under_investigation = true;
                }
                committee.remove_member(victim, &ctx);
                println!("Turn {:>3}: {} removed pending investigation", turn, ctx.name_of(victim));
                if let Some(appointed) = fill_vacancy(&mut committee, &ctx) {
                    println!("Turn {:>3}: {} seated to fill the vacancy", turn, ctx.name_of(appointed));
                }
            }
        }

        if congress_due(turn, &tuning.election) {
            let outcome = run_election(&mut committee, &ctx, turn, &tuning.election, &mut rng);
            committee.secretary = committee.full_members.get(1).copied();
            congress_count += 1;
            println!("Turn {:>3}: {}", turn, outcome.narrative);
            for id in &outcome.removed {
                println!("          dropped from the committee: {}", ctx.name_of(*id));
            }
        } else if turn % 5 == 0 {
            let result = convene_meeting(&mut committee, &relations, &ctx, &tuning, &mut rng);
            if result.convened {
                println!(
                    "Turn {:>3}: session convened ({:?}), {} items",
                    turn,
                    result.record.atmosphere,
                    result.record.decisions.len()
                );
                for decision in &result.record.decisions {
                    println!(
                        "          {:<38} {:>2}-{:<2} {}",
                        decision.item.title,
                        decision.tally.votes_for,
                        decision.tally.votes_against,
                        decision.summary
                    );
                }
            }
        }
    }

    // ==================== Summary ====================

    let mut approved = 0;
    let mut amended = 0;
    let mut rejected = 0;
    let mut deferred = 0;
    let mut referred = 0;
    for meeting in &committee.meeting_history {
        for decision in &meeting.decisions {
            match decision.outcome {
                Outcome::Approved => approved += 1,
                Outcome::AmendedAndApproved => amended += 1,
                Outcome::Rejected => rejected += 1,
                Outcome::Deferred => deferred += 1,
                Outcome::Referred => referred += 1,
            }
        }
    }

    println!();
    println!("Simulation Complete");
    println!("===================");
    println!("Congresses held: {}", congress_count);
    println!("Sessions convened: {}", committee.meeting_history.len());
    println!(
        "Decisions: {} approved, {} amended, {} rejected, {} deferred, {} referred",
        approved, amended, rejected, deferred, referred
    );
    println!("Relationship edges tracked: {}", relations.edges().count());

    println!("\n--- Notable Relationships ---");
    let mut edges: Vec<_> = relations.edges().collect();
    edges.sort_by_key(|e| std::cmp::Reverse(e.grudge + e.gratitude + e.alliance_strength));
    for edge in edges.iter().take(5) {
        println!(
            "{} -> {}: {:?} (quality {})",
            ctx.name_of(edge.source),
            ctx.name_of(edge.target),
            edge.stance(),
            edge.overall_quality()
        );
    }

    if let Some(path) = &args.save {
        let state = SaveState::new(committee, relations);
        save_state(path, &state).expect("Failed to write save file");
        println!("\nFinal state written to {}", path.display());
    }
}
