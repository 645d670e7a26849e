//! War state table and history

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, Turn, WarId};
use crate::justification::CasusBelli;
use crate::war::state::{WarGoal, WarState, WarStatus};

/// Holds every active conflict and the log of concluded ones
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WarTracker {
    active: Vec<WarState>,
    history: Vec<WarState>,
    next_war_id: u32,
}

impl WarTracker {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            history: Vec::new(),
            next_war_id: 1,
        }
    }

    /// Record a new war and return its id
    pub fn open(
        &mut self,
        attacker: AgentId,
        defender: AgentId,
        start_turn: Turn,
        goals: Vec<WarGoal>,
        casus_belli: Option<CasusBelli>,
    ) -> WarId {
        let id = WarId(self.next_war_id.max(1));
        self.next_war_id = id.0 + 1;

        self.active.push(WarState {
            id,
            attacker,
            defender,
            start_turn,
            attacker_score: 0,
            defender_score: 0,
            goals,
            status: WarStatus::Active,
            casus_belli,
            end_turn: None,
        });
        id
    }

    pub fn get(&self, id: WarId) -> Option<&WarState> {
        self.active.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WarId) -> Option<&mut WarState> {
        self.active.iter_mut().find(|w| w.id == id)
    }

    pub fn active(&self) -> &[WarState] {
        &self.active
    }

    pub fn history(&self) -> &[WarState] {
        &self.history
    }

    /// Write war scores for an active war (combat resolution collaborator)
    ///
    /// Returns false if the war is not active.
    pub fn set_scores(&mut self, id: WarId, attacker_score: i32, defender_score: i32) -> bool {
        match self.get_mut(id) {
            Some(war) => {
                war.attacker_score = attacker_score.clamp(0, 100);
                war.defender_score = defender_score.clamp(0, 100);
                true
            }
            None => false,
        }
    }

    pub fn war_between(&self, a: AgentId, b: AgentId) -> Option<&WarState> {
        self.active
            .iter()
            .find(|w| w.involves(a) && w.involves(b) && a != b)
    }

    pub fn wars_involving(&self, agent: AgentId) -> impl Iterator<Item = &WarState> {
        self.active.iter().filter(move |w| w.involves(agent))
    }

    /// Close an active war with a terminal status and move it to history
    ///
    /// Returns None when the war is not active, so a war can only be
    /// concluded once.
    pub fn conclude(&mut self, id: WarId, status: WarStatus, turn: Turn) -> Option<&WarState> {
        if status == WarStatus::Active {
            return None;
        }
        let index = self.active.iter().position(|w| w.id == id)?;
        let mut war = self.active.remove(index);
        war.status = status;
        war.end_turn = Some(turn);
        self.history.push(war);
        self.history.last()
    }
}
