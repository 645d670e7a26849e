//! Integration tests for target prioritization

use geopolitics::ai::TargetPrioritizer;
use geopolitics::core::types::AgentId;
use geopolitics::core::EngineConfig;
use geopolitics::justification::GrievanceKind;
use geopolitics::nation::{Agent, Archetype, MilitaryStock, Treaty};
use geopolitics::world::World;

fn nation(id: u32, missiles: u32) -> Agent {
    let mut a = Agent::new(AgentId(id), format!("Nation {}", id), Archetype::Defensive);
    a.military = MilitaryStock::new(missiles, 0, 0);
    a
}

#[test]
fn test_three_targets_ranked_descending() {
    let mut me = nation(1, 20);
    // Hostile, threatening and weaker: 30 + 25 + 20
    me.set_relationship(AgentId(2), -60);
    me.set_threat(AgentId(2), 70);
    // Threatening only: 25
    me.set_threat(AgentId(4), 70);

    let mut world = World::new(
        vec![me, nation(4, 20), nation(3, 20), nation(2, 10)],
        EngineConfig::default(),
    );
    // Grievance and claim: 15 + 20
    world
        .add_grievance(AgentId(1), AgentId(3), GrievanceKind::BorderIncident, 40)
        .unwrap();
    world.add_claim(AgentId(1), AgentId(3), "Saltcoast", 50).unwrap();

    let ranked = TargetPrioritizer::new(&world.config)
        .prioritize(&world, AgentId(1))
        .unwrap();

    let order: Vec<AgentId> = ranked.iter().map(|p| p.target).collect();
    assert_eq!(order, vec![AgentId(2), AgentId(3), AgentId(4)]);
    let scores: Vec<f32> = ranked.iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![75.0, 35.0, 25.0]);
    assert!(ranked.windows(2).all(|w| w[0].score > w[1].score));
}

#[test]
fn test_no_eligible_targets_is_empty_not_error() {
    let mut me = nation(1, 10);
    me.treaties.insert(
        AgentId(2),
        Treaty {
            alliance: true,
            ..Default::default()
        },
    );
    let mut fallen = nation(3, 10);
    fallen.alive = false;

    let world = World::new(vec![me, nation(2, 10), fallen], EngineConfig::default());
    let ranked = TargetPrioritizer::new(&world.config)
        .prioritize(&world, AgentId(1))
        .unwrap();
    assert!(ranked.is_empty());
}
