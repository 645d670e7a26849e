//! Turn pass - every AI nation gets one shot at one action

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::exhaustion::WarExhaustion;
use crate::ai::planner::plan_action;
use crate::core::error::Result;
use crate::core::types::{AgentId, Turn};
use crate::diplomacy::{apply_action, upkeep, Action, ActionOutcome};
use crate::world::World;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommittedAction {
    pub agent: AgentId,
    pub action: Action,
    pub outcome: ActionOutcome,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: Turn,
    /// Evaluation order after the shuffle
    pub order: Vec<AgentId>,
    pub actions: Vec<CommittedAction>,
}

impl TurnReport {
    pub fn applied(&self) -> impl Iterator<Item = &CommittedAction> {
        self.actions.iter().filter(|c| c.outcome.applied)
    }
}

/// Run one turn: upkeep, then each live AI nation in shuffled order
///
/// Actions are applied as soon as they are chosen, so a nation evaluated
/// later in the pass sees everything committed before it.
pub fn run_turn<R: Rng + ?Sized>(
    world: &mut World,
    exhaustion: &dyn WarExhaustion,
    rng: &mut R,
) -> Result<TurnReport> {
    upkeep(world);

    let mut order: Vec<AgentId> = world
        .live_agents()
        .filter(|a| a.ai_controlled)
        .map(|a| a.id)
        .collect();
    order.shuffle(rng);

    let mut actions = Vec::new();
    for &agent in &order {
        let Some(action) = plan_action(world, agent, exhaustion)? else {
            debug!(%agent, "No action this turn");
            continue;
        };
        let outcome = apply_action(world, &action)?;
        actions.push(CommittedAction {
            agent,
            action,
            outcome,
        });
    }

    let report = TurnReport {
        turn: world.turn,
        order,
        actions,
    };
    world.turn += 1;
    Ok(report)
}
