//! World - the shared geopolitical state the engine reads and mutates

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::{AgentId, CasusBelliId, ClaimId, GrievanceId, Turn};
use crate::events::HistoryLog;
use crate::justification::{CasusBelli, CasusBelliKind, Claim, Grievance, GrievanceKind};
use crate::nation::Agent;
use crate::war::{PeaceOffer, WarTracker};

/// All state the AI pass works over
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct World {
    /// Every nation, live or not, in creation order
    pub agents: Vec<Agent>,
    pub wars: WarTracker,
    /// Offers awaiting an answer, oldest first
    pub pending_offers: Vec<PeaceOffer>,
    pub history: HistoryLog,
    pub turn: Turn,
    pub config: EngineConfig,
    /// Shared id counter for grievances, claims and casus belli
    next_record_id: u32,
}

impl World {
    pub fn new(agents: Vec<Agent>, config: EngineConfig) -> Self {
        let next_record_id = agents
            .iter()
            .flat_map(|a| {
                a.grievances
                    .iter()
                    .map(|g| g.id.0)
                    .chain(a.claims.iter().map(|c| c.id.0))
                    .chain(a.casus_belli.iter().filter_map(|cb| cb.id.map(|id| id.0)))
            })
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            agents,
            wars: WarTracker::new(),
            pending_offers: Vec::new(),
            history: HistoryLog::new(),
            turn: 0,
            config,
            next_record_id,
        }
    }

    fn index_of(&self, id: AgentId) -> Result<usize> {
        self.agents
            .iter()
            .position(|a| a.id == id)
            .ok_or(EngineError::AgentNotFound(id))
    }

    pub fn get_agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Lookup that treats a missing agent as a caller bug
    pub fn agent(&self, id: AgentId) -> Result<&Agent> {
        self.get_agent(id).ok_or(EngineError::AgentNotFound(id))
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Result<&mut Agent> {
        self.agents
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(EngineError::AgentNotFound(id))
    }

    /// Mutable access to two distinct agents at once
    pub fn pair_mut(&mut self, a: AgentId, b: AgentId) -> Result<(&mut Agent, &mut Agent)> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if ia == ib {
            return Err(EngineError::SameAgent(a));
        }

        if ia < ib {
            let (left, right) = self.agents.split_at_mut(ib);
            Ok((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.agents.split_at_mut(ia);
            Ok((&mut right[0], &mut left[ib]))
        }
    }

    pub fn live_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.alive)
    }

    fn next_record_id(&mut self) -> u32 {
        let id = self.next_record_id;
        self.next_record_id += 1;
        id
    }

    /// Record a grievance held by `holder` against `against`
    pub fn add_grievance(
        &mut self,
        holder: AgentId,
        against: AgentId,
        kind: GrievanceKind,
        severity: u8,
    ) -> Result<GrievanceId> {
        let id = GrievanceId(self.next_record_id());
        let turn = self.turn;
        self.agent_mut(holder)?.grievances.push(Grievance {
            id,
            against,
            kind,
            severity: severity.min(100),
            turn,
            resolved: false,
        });
        Ok(id)
    }

    /// Record a territorial claim held by `holder` over `against`'s region
    pub fn add_claim(
        &mut self,
        holder: AgentId,
        against: AgentId,
        region: impl Into<String>,
        strength: u8,
    ) -> Result<ClaimId> {
        let id = ClaimId(self.next_record_id());
        let turn = self.turn;
        self.agent_mut(holder)?.claims.push(Claim {
            id,
            against,
            region: region.into(),
            strength: strength.min(100),
            turn,
            renounced: false,
        });
        Ok(id)
    }

    /// Grant `holder` a standing casus belli against `target`
    pub fn add_casus_belli(
        &mut self,
        holder: AgentId,
        target: AgentId,
        kind: CasusBelliKind,
        justification: u8,
        duration: Turn,
    ) -> Result<CasusBelliId> {
        let id = CasusBelliId(self.next_record_id());
        let expires_turn = self.turn.saturating_add(duration);
        self.agent_mut(holder)?.casus_belli.push(CasusBelli {
            id: Some(id),
            kind,
            target,
            justification: justification.min(100),
            expires_turn,
            source: None,
        });
        Ok(id)
    }

    pub fn offers_to(&self, agent: AgentId) -> impl Iterator<Item = &PeaceOffer> {
        self.pending_offers.iter().filter(move |o| o.to == agent)
    }
}
