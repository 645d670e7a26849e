//! Geopolitics demo
//! Six AI nations, one per archetype, left alone for a number of turns

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use geopolitics::ai::DurationExhaustion;
use geopolitics::core::types::{AgentId, Resources};
use geopolitics::core::{EngineConfig, Result};
use geopolitics::diplomacy::Action;
use geopolitics::justification::GrievanceKind;
use geopolitics::nation::{Agent, Archetype, MilitaryStock};
use geopolitics::simulation::{run_turn, SimulationOutput};
use geopolitics::world::World;

/// Geopolitics - AI nations declaring war and suing for peace
#[derive(Parser, Debug)]
#[command(name = "geopolitics_sim")]
#[command(about = "Run the geopolitical decision engine over a sample world")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of turns to simulate
    #[arg(long, default_value_t = 100)]
    turns: u32,

    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full run as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

const NAMES: [&str; 6] = ["Aldoria", "Brenmark", "Caskany", "Dravenholt", "Estmere", "Fenwick"];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("geopolitics=info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut world = sample_world(config, &mut rng)?;
    let exhaustion = DurationExhaustion::from_config(&world.config);

    tracing::info!(seed = args.seed, turns = args.turns, "Starting geopolitics simulation");
    let start = Instant::now();

    for _ in 0..args.turns {
        resolve_fighting(&mut world, &mut rng);
        let report = run_turn(&mut world, &exhaustion, &mut rng)?;
        for committed in report.applied() {
            if !args.json {
                println!("[turn {:>3}] {}", report.turn, describe(&committed.action));
            }
        }
    }

    let output = SimulationOutput::new(world, args.turns, start.elapsed());
    if args.json {
        println!("{}", output.to_json()?);
    } else {
        println!("{}", output.summary());
    }
    Ok(())
}

/// Seeded world with a few standing grievances and claims to fight over
fn sample_world(config: EngineConfig, rng: &mut ChaCha8Rng) -> Result<World> {
    let agents: Vec<Agent> = Archetype::ALL
        .iter()
        .zip(NAMES)
        .enumerate()
        .map(|(i, (&archetype, name))| {
            let mut agent = Agent::new(AgentId::new(i as u32 + 1), name, archetype);
            agent.military = MilitaryStock::new(
                rng.gen_range(5..30),
                rng.gen_range(0..20),
                rng.gen_range(0..15),
            );
            agent.resources = Resources::new(rng.gen_range(40..160), rng.gen_range(30..120));
            agent
        })
        .collect();

    let ids: Vec<AgentId> = agents.iter().map(|a| a.id).collect();
    let mut world = World::new(agents, config);

    for &a in &ids {
        for &b in &ids {
            if a == b {
                continue;
            }
            let agent = world.agent_mut(a)?;
            agent.set_relationship(b, rng.gen_range(-70..=70));
            agent.set_threat(b, rng.gen_range(0..=80));
        }
    }

    for _ in 0..ids.len() {
        let holder = ids[rng.gen_range(0..ids.len())];
        let against = ids[rng.gen_range(0..ids.len())];
        if holder == against {
            continue;
        }
        if rng.gen_bool(0.5) {
            let region = format!("{} marches", world.agent(against)?.name);
            world.add_claim(holder, against, region, rng.gen_range(30..90))?;
        } else {
            let severity = rng.gen_range(20..80);
            world.add_grievance(holder, against, GrievanceKind::BorderIncident, severity)?;
        }
    }

    Ok(world)
}

/// Stand-in for the combat collaborator: war score drifts toward the
/// stronger side
fn resolve_fighting(world: &mut World, rng: &mut ChaCha8Rng) {
    let updates: Vec<_> = world
        .wars
        .active()
        .iter()
        .filter_map(|war| {
            let attacker = world.get_agent(war.attacker)?.military_strength();
            let defender = world.get_agent(war.defender)?.military_strength();
            let total = attacker + defender;
            if total <= 0.0 {
                return None;
            }
            let (mut a, mut d) = (war.attacker_score, war.defender_score);
            if rng.gen::<f32>() < attacker / total {
                a += rng.gen_range(1..8);
            } else {
                d += rng.gen_range(1..8);
            }
            Some((war.id, a, d))
        })
        .collect();

    for (id, a, d) in updates {
        world.wars.set_scores(id, a, d);
    }
}

fn describe(action: &Action) -> String {
    match action {
        Action::DeclareWar {
            attacker,
            target,
            casus_belli,
        } => format!("{} declares war on {} ({:?})", attacker, target, casus_belli.kind),
        Action::ProposePeace(offer) => {
            format!("{} offers {:?} to {}", offer.from, offer.terms.kind, offer.to)
        }
        Action::AcceptPeace(offer) => {
            format!("{} accepts {:?} from {}", offer.to, offer.terms.kind, offer.from)
        }
        Action::RejectPeace { offer, counter } => format!(
            "{} rejects peace from {}{}",
            offer.to,
            offer.from,
            if counter.is_some() { " and counters" } else { "" }
        ),
        Action::Treaty {
            initiator,
            counterpart,
            action,
        } => format!("{} -> {}: {}", initiator, counterpart, action.label()),
    }
}
