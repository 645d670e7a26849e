//! WarState - the mutable record of one conflict

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, ClaimId, Resources, Turn, WarId};
use crate::justification::{CasusBelli, CasusBelliKind, JustificationSource};
use crate::nation::Agent;

/// Reparations demanded by a defender that repels an invasion
pub const DEFENSIVE_REPARATIONS: Resources = Resources {
    production: 50,
    intel: 0,
};

/// Reparations demanded for a retaliatory war
pub const RETALIATORY_REPARATIONS: Resources = Resources {
    production: 60,
    intel: 20,
};

/// Reparations demanded for a treaty violation
pub const TREATY_REPARATIONS: Resources = Resources {
    production: 40,
    intel: 40,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarStatus {
    Active,
    WhitePeace,
    AttackerVictory,
    DefenderVictory,
}

/// A war goal held by one side
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WarGoal {
    pub holder: AgentId,
    pub kind: WarGoalKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WarGoalKind {
    AnnexTerritory { region: String, claim: Option<ClaimId> },
    Reparations { amount: Resources },
    Disarmament,
    RegimeChange { ideology: String },
}

impl WarGoalKind {
    /// War score the holder needs before the goal can be enforced
    pub fn required_score(&self) -> i32 {
        match self {
            WarGoalKind::Reparations { .. } => 30,
            WarGoalKind::Disarmament => 50,
            WarGoalKind::AnnexTerritory { .. } => 60,
            WarGoalKind::RegimeChange { .. } => 80,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WarState {
    pub id: WarId,
    pub attacker: AgentId,
    pub defender: AgentId,
    pub start_turn: Turn,
    /// 0-100, written by the combat resolution collaborator
    pub attacker_score: i32,
    /// 0-100, written by the combat resolution collaborator
    pub defender_score: i32,
    pub goals: Vec<WarGoal>,
    pub status: WarStatus,
    pub casus_belli: Option<CasusBelli>,
    pub end_turn: Option<Turn>,
}

impl WarState {
    pub fn is_active(&self) -> bool {
        self.status == WarStatus::Active
    }

    pub fn involves(&self, agent: AgentId) -> bool {
        self.attacker == agent || self.defender == agent
    }

    pub fn opponent_of(&self, agent: AgentId) -> Option<AgentId> {
        if agent == self.attacker {
            Some(self.defender)
        } else if agent == self.defender {
            Some(self.attacker)
        } else {
            None
        }
    }

    /// War score of one side (0 for a non-participant)
    pub fn score_of(&self, agent: AgentId) -> i32 {
        if agent == self.attacker {
            self.attacker_score
        } else if agent == self.defender {
            self.defender_score
        } else {
            0
        }
    }

    /// Own score minus opponent score; positive means winning
    pub fn differential(&self, agent: AgentId) -> i32 {
        match self.opponent_of(agent) {
            Some(opponent) => self.score_of(agent) - self.score_of(opponent),
            None => 0,
        }
    }

    pub fn duration(&self, now: Turn) -> Turn {
        now.saturating_sub(self.start_turn)
    }

    pub fn goals_of(&self, holder: AgentId) -> impl Iterator<Item = &WarGoal> {
        self.goals.iter().filter(move |g| g.holder == holder)
    }

    /// Goals the holder is currently in a position to impose
    pub fn enforceable_goals(&self, holder: AgentId) -> Vec<&WarGoal> {
        if self.differential(holder) <= 0 {
            return Vec::new();
        }
        let score = self.score_of(holder);
        self.goals_of(holder)
            .filter(|g| score >= g.kind.required_score())
            .collect()
    }
}

/// Goals for a new war: the attacker's follow from its casus belli, the
/// defender always fights for reparations.
pub fn goals_for_declaration(
    attacker: &Agent,
    defender: &Agent,
    casus_belli: &CasusBelli,
) -> Vec<WarGoal> {
    let attacker_goal = match (&casus_belli.kind, &casus_belli.source) {
        (CasusBelliKind::TerritorialClaim, Some(JustificationSource::Claim { id, region })) => {
            WarGoalKind::AnnexTerritory {
                region: region.clone(),
                claim: Some(*id),
            }
        }
        (CasusBelliKind::TerritorialClaim, _) => WarGoalKind::AnnexTerritory {
            region: format!("{} borderlands", defender.name),
            claim: None,
        },
        (CasusBelliKind::Retaliatory, _) => WarGoalKind::Reparations {
            amount: RETALIATORY_REPARATIONS,
        },
        (CasusBelliKind::TreatyViolation, _) => WarGoalKind::Reparations {
            amount: TREATY_REPARATIONS,
        },
        (CasusBelliKind::Ideological, _) => WarGoalKind::RegimeChange {
            ideology: attacker.ideology.clone(),
        },
        (CasusBelliKind::Preemptive, _) => WarGoalKind::Disarmament,
    };

    vec![
        WarGoal {
            holder: attacker.id,
            kind: attacker_goal,
        },
        WarGoal {
            holder: defender.id,
            kind: WarGoalKind::Reparations {
                amount: DEFENSIVE_REPARATIONS,
            },
        },
    ]
}
