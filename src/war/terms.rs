//! Peace terms and offers

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::types::{AgentId, ClaimId, GrievanceId, Resources, Turn, WarId};
use crate::justification::JustificationSource;
use crate::nation::MilitaryStock;
use crate::war::state::{WarGoalKind, WarState};

/// Lead beyond which a side that can enforce every goal demands surrender
pub const SURRENDER_LEAD: i32 = 60;

/// Relationship gained by both sides on any signed peace
pub const PEACE_RELATIONSHIP_BONUS: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeaceKind {
    WhitePeace,
    ConditionalPeace,
    UnconditionalSurrender,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerritoryChange {
    pub from: AgentId,
    pub to: AgentId,
    pub region: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reparations {
    pub payer: AgentId,
    pub payee: AgentId,
    pub amount: Resources,
}

/// Caps on the limited side's stock after peace
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MilitaryLimitation {
    pub limited: AgentId,
    pub max: MilitaryStock,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdeologyChange {
    pub target: AgentId,
    pub ideology: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeaceTerms {
    pub kind: PeaceKind,
    /// Side the terms favor; None for white peace
    pub beneficiary: Option<AgentId>,
    pub territory_changes: Vec<TerritoryChange>,
    pub reparations: Option<Reparations>,
    pub military_limitation: Option<MilitaryLimitation>,
    pub ideology_change: Option<IdeologyChange>,
    pub resolved_grievances: Vec<GrievanceId>,
    pub renounced_claims: Vec<ClaimId>,
}

impl PeaceTerms {
    pub fn white_peace() -> Self {
        Self {
            kind: PeaceKind::WhitePeace,
            beneficiary: None,
            territory_changes: Vec::new(),
            reparations: None,
            military_limitation: None,
            ideology_change: None,
            resolved_grievances: Vec::new(),
            renounced_claims: Vec::new(),
        }
    }

    pub fn is_white_peace(&self) -> bool {
        self.kind == PeaceKind::WhitePeace
    }

    pub fn cedes_territory(&self, agent: AgentId) -> bool {
        self.territory_changes.iter().any(|t| t.from == agent)
    }

    pub fn reparations_paid_by(&self, agent: AgentId) -> Option<&Reparations> {
        self.reparations.as_ref().filter(|r| r.payer == agent)
    }

    pub fn limits(&self, agent: AgentId) -> bool {
        self.military_limitation
            .as_ref()
            .is_some_and(|m| m.limited == agent)
    }

    pub fn truce_turns(&self, config: &EngineConfig) -> u32 {
        match self.kind {
            PeaceKind::WhitePeace => config.white_peace_truce_turns,
            PeaceKind::ConditionalPeace => config.conditional_peace_truce_turns,
            PeaceKind::UnconditionalSurrender => config.surrender_truce_turns,
        }
    }

    /// Relationship nudge both parties receive when these terms are signed
    pub fn relationship_bonus(&self, war_duration: Turn) -> i32 {
        let mut bonus = PEACE_RELATIONSHIP_BONUS;
        if self.is_white_peace() {
            bonus += 10;
        }
        if war_duration > 15 {
            bonus += 10;
        }
        if self.kind == PeaceKind::UnconditionalSurrender {
            bonus -= 10;
        }
        if self.military_limitation.is_some() {
            bonus -= 5;
        }
        bonus
    }

    /// Terms imposing every goal `holder` can currently enforce on its
    /// opponent. Degrades to white peace when nothing is enforceable.
    pub fn from_enforceable_goals(
        war: &WarState,
        holder: AgentId,
        loser_military: MilitaryStock,
    ) -> Self {
        let Some(loser) = war.opponent_of(holder) else {
            return Self::white_peace();
        };
        let enforceable = war.enforceable_goals(holder);
        if enforceable.is_empty() {
            return Self::white_peace();
        }

        let all_goals = war.goals_of(holder).count();
        let kind = if enforceable.len() == all_goals && war.differential(holder) > SURRENDER_LEAD {
            PeaceKind::UnconditionalSurrender
        } else {
            PeaceKind::ConditionalPeace
        };

        let mut terms = Self {
            kind,
            beneficiary: Some(holder),
            ..Self::white_peace()
        };

        for goal in enforceable {
            match &goal.kind {
                WarGoalKind::AnnexTerritory { region, claim } => {
                    terms.territory_changes.push(TerritoryChange {
                        from: loser,
                        to: holder,
                        region: region.clone(),
                    });
                    if let Some(claim) = claim {
                        terms.renounced_claims.push(*claim);
                    }
                }
                WarGoalKind::Reparations { amount } => {
                    let amount = match &terms.reparations {
                        Some(existing) => existing.amount + *amount,
                        None => *amount,
                    };
                    terms.reparations = Some(Reparations {
                        payer: loser,
                        payee: holder,
                        amount,
                    });
                }
                WarGoalKind::Disarmament => {
                    terms.military_limitation = Some(MilitaryLimitation {
                        limited: loser,
                        max: MilitaryStock::new(
                            loser_military.missiles / 2,
                            loser_military.bombers / 2,
                            loser_military.submarines / 2,
                        ),
                    });
                }
                WarGoalKind::RegimeChange { ideology } => {
                    terms.ideology_change = Some(IdeologyChange {
                        target: loser,
                        ideology: ideology.clone(),
                    });
                }
            }
        }

        // Settle whatever the war was fought over
        if let Some(cb) = &war.casus_belli {
            match &cb.source {
                Some(JustificationSource::Grievance(id)) if holder == war.attacker => {
                    terms.resolved_grievances.push(*id);
                }
                Some(JustificationSource::Claim { id, .. })
                    if !terms.renounced_claims.contains(id) =>
                {
                    // Defender victory: the attacker gives the claim up
                    if holder == war.defender {
                        terms.renounced_claims.push(*id);
                    }
                }
                _ => {}
            }
        }

        terms
    }
}

/// A proposal to end a war, valid for a bounded number of turns
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeaceOffer {
    pub war_id: WarId,
    pub from: AgentId,
    pub to: AgentId,
    pub terms: PeaceTerms,
    pub created_turn: Turn,
    /// Last turn on which the offer can be accepted
    pub expires_turn: Turn,
}

impl PeaceOffer {
    pub fn new(
        war_id: WarId,
        from: AgentId,
        to: AgentId,
        terms: PeaceTerms,
        now: Turn,
        config: &EngineConfig,
    ) -> Self {
        Self {
            war_id,
            from,
            to,
            terms,
            created_turn: now,
            expires_turn: now.saturating_add(config.offer_expiry_turns),
        }
    }

    pub fn is_expired(&self, now: Turn) -> bool {
        now > self.expires_turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::justification::{CasusBelli, CasusBelliKind};
    use crate::war::state::{WarGoal, WarStatus, DEFENSIVE_REPARATIONS};

    fn war(attacker_score: i32, defender_score: i32, goals: Vec<WarGoal>) -> WarState {
        WarState {
            id: WarId(1),
            attacker: AgentId(1),
            defender: AgentId(2),
            start_turn: 0,
            attacker_score,
            defender_score,
            goals,
            status: WarStatus::Active,
            casus_belli: Some(CasusBelli {
                id: None,
                kind: CasusBelliKind::TerritorialClaim,
                target: AgentId(2),
                justification: 70,
                expires_turn: 99,
                source: Some(JustificationSource::Claim {
                    id: ClaimId(4),
                    region: "Northmarch".into(),
                }),
            }),
            end_turn: None,
        }
    }

    fn annex() -> WarGoal {
        WarGoal {
            holder: AgentId(1),
            kind: WarGoalKind::AnnexTerritory {
                region: "Northmarch".into(),
                claim: Some(ClaimId(4)),
            },
        }
    }

    fn defensive() -> WarGoal {
        WarGoal {
            holder: AgentId(2),
            kind: WarGoalKind::Reparations {
                amount: DEFENSIVE_REPARATIONS,
            },
        }
    }

    #[test]
    fn test_nothing_enforceable_is_white_peace() {
        let w = war(40, 20, vec![annex(), defensive()]);
        let terms = PeaceTerms::from_enforceable_goals(&w, AgentId(1), MilitaryStock::default());
        assert!(terms.is_white_peace());
    }

    #[test]
    fn test_annexation_fulfils_claim() {
        let w = war(65, 20, vec![annex(), defensive()]);
        let terms = PeaceTerms::from_enforceable_goals(&w, AgentId(1), MilitaryStock::default());
        assert_eq!(terms.kind, PeaceKind::ConditionalPeace);
        assert!(terms.cedes_territory(AgentId(2)));
        assert_eq!(terms.renounced_claims, vec![ClaimId(4)]);
    }

    #[test]
    fn test_overwhelming_lead_demands_surrender() {
        let w = war(90, 10, vec![annex(), defensive()]);
        let terms = PeaceTerms::from_enforceable_goals(&w, AgentId(1), MilitaryStock::default());
        assert_eq!(terms.kind, PeaceKind::UnconditionalSurrender);
    }

    #[test]
    fn test_defender_victory_renounces_attacker_claim() {
        let w = war(5, 50, vec![annex(), defensive()]);
        let terms = PeaceTerms::from_enforceable_goals(&w, AgentId(2), MilitaryStock::default());
        assert_eq!(terms.beneficiary, Some(AgentId(2)));
        assert_eq!(terms.reparations_paid_by(AgentId(1)).unwrap().amount, DEFENSIVE_REPARATIONS);
        assert_eq!(terms.renounced_claims, vec![ClaimId(4)]);
    }

    #[test]
    fn test_disarmament_halves_stock() {
        let goal = WarGoal {
            holder: AgentId(1),
            kind: WarGoalKind::Disarmament,
        };
        let w = war(55, 0, vec![goal]);
        let loser = MilitaryStock::new(10, 5, 3);
        let terms = PeaceTerms::from_enforceable_goals(&w, AgentId(1), loser);
        assert!(terms.limits(AgentId(2)));
        assert_eq!(terms.military_limitation.unwrap().max, MilitaryStock::new(5, 2, 1));
    }

    #[test]
    fn test_relationship_bonus() {
        assert_eq!(PeaceTerms::white_peace().relationship_bonus(5), 20);
        assert_eq!(PeaceTerms::white_peace().relationship_bonus(16), 30);

        let harsh = PeaceTerms {
            kind: PeaceKind::UnconditionalSurrender,
            beneficiary: Some(AgentId(1)),
            military_limitation: Some(MilitaryLimitation {
                limited: AgentId(2),
                max: MilitaryStock::default(),
            }),
            ..PeaceTerms::white_peace()
        };
        assert_eq!(harsh.relationship_bonus(5), -5);
    }

    #[test]
    fn test_offer_expiry() {
        let config = EngineConfig::default();
        let offer = PeaceOffer::new(
            WarId(1),
            AgentId(1),
            AgentId(2),
            PeaceTerms::white_peace(),
            10,
            &config,
        );
        assert_eq!(offer.expires_turn, 15);
        assert!(!offer.is_expired(15));
        assert!(offer.is_expired(16));
    }
}
