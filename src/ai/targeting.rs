//! Target prioritization - who to hit first

use serde::{Deserialize, Serialize};

use crate::ai::signals::{military_ratio, Factor, Tally};
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::{AgentId, Turn};
use crate::justification::JustificationLedger;
use crate::nation::Agent;
use crate::world::World;

pub const HOSTILE_TARGET: f32 = 30.0;
pub const FRIENDLY_TARGET: f32 = -40.0;
pub const THREATENING_TARGET: f32 = 25.0;
pub const WEAKER_TARGET: f32 = 20.0;
pub const STRONGER_TARGET: f32 = -20.0;
pub const GRIEVANCES_HELD: f32 = 15.0;
pub const CLAIMS_HELD: f32 = 20.0;
pub const EXPANSIONIST_APPETITE: f32 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetPriority {
    pub target: AgentId,
    /// Never negative
    pub score: f32,
    pub reasons: Vec<String>,
}

/// Ranks every eligible opponent of a nation; never mutates state
pub struct TargetPrioritizer<'a> {
    config: &'a EngineConfig,
}

impl<'a> TargetPrioritizer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Rank the world's agents as targets for `agent`
    pub fn prioritize(&self, world: &World, agent: AgentId) -> Result<Vec<TargetPriority>> {
        let agent = world.agent(agent)?;
        Ok(self.rank(agent, &world.agents, world.turn))
    }

    /// Highest score first; equal scores keep candidate order
    pub fn rank(&self, agent: &Agent, candidates: &[Agent], now: Turn) -> Vec<TargetPriority> {
        let mut ranked: Vec<TargetPriority> = candidates
            .iter()
            .filter(|c| is_eligible(agent, c))
            .map(|c| self.score(agent, c, now))
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    pub fn score(&self, agent: &Agent, target: &Agent, now: Turn) -> TargetPriority {
        let mut tally = Tally::new();
        let ledger = JustificationLedger::new(agent, self.config);

        tally.add(ledger.best_justification(target.id, now).map(|cb| {
            Factor::new(cb.justification as f32 / 2.0, "standing casus belli")
        }));

        let relationship = agent.relationship_with(target.id);
        if relationship < -50 {
            tally.add(Some(Factor::new(HOSTILE_TARGET, "hostile relations")));
        } else if relationship > 50 {
            tally.add(Some(Factor::new(FRIENDLY_TARGET, "friendly relations")));
        }

        if agent.threat_from(target.id) > 60 {
            tally.add(Some(Factor::new(THREATENING_TARGET, "threatening")));
        }

        let ratio = military_ratio(agent, target);
        if ratio > 1.5 {
            tally.add(Some(Factor::new(WEAKER_TARGET, "militarily weaker")));
        } else if ratio < 0.7 {
            tally.add(Some(Factor::new(STRONGER_TARGET, "militarily stronger")));
        }

        let grievances = agent.unresolved_grievances_against(target.id).count();
        if grievances > 0 {
            tally.add(Some(Factor::new(
                GRIEVANCES_HELD,
                format!("{} unresolved grievance(s)", grievances),
            )));
        }

        let claims = agent.active_claims_against(target.id).count();
        if claims > 0 {
            tally.add(Some(Factor::new(CLAIMS_HELD, format!("{} active claim(s)", claims))));
        }

        if agent.personality().expansionist > 70 {
            tally.add(Some(Factor::new(EXPANSIONIST_APPETITE, "expansionist appetite")));
        }

        TargetPriority {
            target: target.id,
            score: tally.score.max(0.0),
            reasons: tally.reasons,
        }
    }
}

/// Live, not self, and not allied in either direction
fn is_eligible(agent: &Agent, candidate: &Agent) -> bool {
    candidate.id != agent.id
        && candidate.alive
        && !agent.is_allied_with(candidate.id)
        && !candidate.is_allied_with(agent.id)
}
