//! Integration tests for war declaration decisions

use geopolitics::ai::declaration::{declaration_threshold, meets_threshold};
use geopolitics::ai::WarDeclarationEngine;
use geopolitics::core::types::{AgentId, Resources};
use geopolitics::core::{EngineConfig, EngineError};
use geopolitics::justification::CasusBelliKind;
use geopolitics::nation::{Agent, Archetype, MilitaryStock, Treaty};
use geopolitics::world::World;

/// Aggressive nation (aggression 80, honor 40) holding an 80-strength
/// casus belli on a hostile, threatening neighbour it outguns 2:1
fn aggressor_world(production: i32) -> World {
    let mut a = Agent::new(AgentId(1), "Aldoria", Archetype::Aggressive);
    a.military = MilitaryStock::new(20, 0, 0);
    a.resources = Resources::new(production, 50);
    a.set_relationship(AgentId(2), -60);
    a.set_threat(AgentId(2), 70);

    let mut b = Agent::new(AgentId(2), "Brenmark", Archetype::Defensive);
    b.military = MilitaryStock::new(10, 0, 0);
    b.resources = Resources::new(80, 50);

    let mut world = World::new(vec![a, b], EngineConfig::default());
    world
        .add_casus_belli(AgentId(1), AgentId(2), CasusBelliKind::Retaliatory, 80, 50)
        .unwrap();
    world
}

#[test]
fn test_justified_aggressor_declares() {
    let world = aggressor_world(50);
    let engine = WarDeclarationEngine::new(&world.config);
    let assessment = engine.evaluate(&world, AgentId(1), AgentId(2)).unwrap();

    assert!(assessment.should_declare);
    assert!(assessment.confidence >= 60.0);
    // 40 justification + 20 military + 15 hostility + 20 threat + 15 aggression + 2.5 opportunism
    assert_eq!(assessment.raw_score, 112.5);
    assert!((assessment.threshold - 33.333).abs() < 0.01);
    assert_eq!(assessment.best_casus_belli.unwrap().justification, 80);
}

#[test]
fn test_weak_economy_costs_twenty() {
    let strong = aggressor_world(50);
    let weak = aggressor_world(10);
    let engine = WarDeclarationEngine::new(&strong.config);

    let a = engine.evaluate(&strong, AgentId(1), AgentId(2)).unwrap();
    let b = engine.evaluate(&weak, AgentId(1), AgentId(2)).unwrap();

    assert_eq!(a.raw_score - b.raw_score, 20.0);
    assert!(b.should_declare);
    assert!(b.reasoning.iter().any(|r| r.starts_with("weak economy")));
}

#[test]
fn test_threshold_boundary_is_inclusive() {
    let threshold = declaration_threshold(50);
    assert!((threshold - 43.333).abs() < 0.001);
    assert!(meets_threshold(threshold, 50));
    assert!(!meets_threshold(threshold - 1.0, 50));
}

#[test]
fn test_validator_gate_overrides_score() {
    let mut world = aggressor_world(50);
    world.agent_mut(AgentId(2)).unwrap().treaties.insert(
        AgentId(1),
        Treaty {
            alliance: true,
            ..Default::default()
        },
    );

    let engine = WarDeclarationEngine::new(&world.config);
    let assessment = engine.evaluate(&world, AgentId(1), AgentId(2)).unwrap();
    assert!(!assessment.should_declare);
    assert!(assessment.reasoning.iter().any(|r| r.contains("allied with")));
}

#[test]
fn test_missing_target_fails_fast() {
    let world = aggressor_world(50);
    let engine = WarDeclarationEngine::new(&world.config);
    assert!(matches!(
        engine.evaluate(&world, AgentId(1), AgentId(9)),
        Err(EngineError::AgentNotFound(AgentId(9)))
    ));
}

#[test]
fn test_unknown_archetype_is_rejected() {
    assert!(matches!(
        "warmonger".parse::<Archetype>(),
        Err(EngineError::UnknownArchetype(_))
    ));
    assert_eq!(" Opportunistic ".parse::<Archetype>().unwrap(), Archetype::Opportunistic);
}
