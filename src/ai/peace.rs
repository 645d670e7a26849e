//! Peace negotiation - answering offers and deciding when to sue for peace

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::exhaustion::WarExhaustion;
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::{AgentId, Turn};
use crate::nation::Agent;
use crate::war::{PeaceKind, PeaceOffer, PeaceTerms, WarState};
use crate::world::World;

/// Acceptance score at or above which an offer is taken
pub const ACCEPTANCE_THRESHOLD: i32 = 30;
/// A rejected offer scoring above this gets a counter-offer
pub const COUNTER_THRESHOLD: i32 = 10;
/// Differential beyond which a side is winning or losing decisively
pub const DECISIVE_MARGIN: i32 = 30;
/// Lead at which a winning side dictates terms unprompted
pub const DICTATING_LEAD: i32 = 40;
/// Differential below which an honorable nation calls it a stalemate
pub const STALEMATE_MARGIN: i32 = 20;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OfferEvaluation {
    pub should_accept: bool,
    pub acceptance_score: i32,
    pub reasons: Vec<String>,
    /// Proposed back to the offerer when the rejection was close
    pub counter_offer: Option<PeaceOffer>,
}

impl OfferEvaluation {
    fn refused(reason: impl Into<String>) -> Self {
        Self {
            should_accept: false,
            acceptance_score: 0,
            reasons: vec![reason.into()],
            counter_offer: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeaceInitiative {
    pub should_offer: bool,
    pub offer: Option<PeaceOffer>,
    pub reasons: Vec<String>,
}

/// Running acceptance score with its reasoning trail
#[derive(Default)]
struct Acceptance {
    score: i32,
    reasons: Vec<String>,
}

impl Acceptance {
    fn add(&mut self, delta: i32, reason: &str) {
        self.score += delta;
        self.reasons.push(format!("{} ({:+})", reason, delta));
    }
}

pub struct PeaceNegotiationEngine<'a> {
    config: &'a EngineConfig,
    exhaustion: &'a dyn WarExhaustion,
}

impl<'a> PeaceNegotiationEngine<'a> {
    pub fn new(config: &'a EngineConfig, exhaustion: &'a dyn WarExhaustion) -> Self {
        Self { config, exhaustion }
    }

    /// Evaluate an offer addressed to `agent`, looking everything up in the world
    ///
    /// An offer whose war is no longer active is refused with "war not found".
    pub fn evaluate(
        &self,
        world: &World,
        agent: AgentId,
        offer: &PeaceOffer,
    ) -> Result<OfferEvaluation> {
        let me = world.agent(agent)?;
        let offerer = world.agent(offer.from)?;
        let Some(war) = world.wars.get(offer.war_id) else {
            return Ok(OfferEvaluation::refused("war not found"));
        };
        Ok(self.evaluate_offer(me, offerer, war, offer, world.turn))
    }

    pub fn evaluate_offer(
        &self,
        agent: &Agent,
        offerer: &Agent,
        war: &WarState,
        offer: &PeaceOffer,
        now: Turn,
    ) -> OfferEvaluation {
        if !war.involves(agent.id) || !war.involves(offerer.id) {
            return OfferEvaluation::refused("offer does not concern this war");
        }

        let personality = agent.personality();
        let terms = &offer.terms;
        let differential = war.differential(agent.id);
        let mut acc = Acceptance::default();

        if differential < -DECISIVE_MARGIN {
            acc.add(40, "losing badly");
        } else if differential < -10 {
            acc.add(20, "falling behind");
        } else if differential > DECISIVE_MARGIN {
            acc.add(-30, "winning decisively");
        }

        if war.duration(now) > 20 {
            acc.add(15, "long war");
        }

        match terms.kind {
            PeaceKind::WhitePeace => acc.add(20, "white peace"),
            PeaceKind::UnconditionalSurrender if terms.beneficiary == Some(agent.id) => {
                acc.add(30, "opponent surrenders")
            }
            PeaceKind::UnconditionalSurrender if war.score_of(agent.id) < 20 => {
                acc.add(30, "surrender while beaten")
            }
            PeaceKind::UnconditionalSurrender => acc.add(-40, "surrender demanded"),
            PeaceKind::ConditionalPeace => {}
        }

        if terms.cedes_territory(agent.id) {
            acc.add(-25, "territorial loss");
        }

        if let Some(reparations) = terms.reparations_paid_by(agent.id) {
            if reparations.amount.total() > 100 {
                acc.add(-20, "heavy reparations");
            } else {
                acc.add(-10, "reparations");
            }
        }

        if terms.limits(agent.id) {
            acc.add(-15, "military limitations");
        }

        let relationship = agent.relationship_with(offerer.id);
        if relationship > 50 {
            acc.add(15, "friendly offerer");
        } else if relationship < -50 {
            acc.add(-10, "hostile offerer");
        }

        if agent.resources.production < 50 {
            acc.add(20, "economic strain");
        }

        if self.exhaustion.should_seek_peace(agent, war, now) {
            acc.add(20, "war exhaustion");
        }

        if personality.honor_bound > 70 && terms.is_white_peace() {
            acc.add(15, "honorable settlement");
        }

        if personality.aggression > 70 {
            acc.add(-20, "demands better terms");
        }

        if differential > 0 {
            acc.add(-15, "leading on war score");
        }

        let should_accept = acc.score >= ACCEPTANCE_THRESHOLD;
        let counter_offer = if !should_accept && acc.score > COUNTER_THRESHOLD {
            Some(self.generate_offer(agent, offerer, war, now))
        } else {
            None
        };

        debug!(
            agent = %agent.id,
            war = %war.id,
            score = acc.score,
            accept = should_accept,
            "Evaluated peace offer"
        );

        OfferEvaluation {
            should_accept,
            acceptance_score: acc.score,
            reasons: acc.reasons,
            counter_offer,
        }
    }

    /// Whether `agent` should propose peace to `counterpart` unprompted
    pub fn should_offer_peace(
        &self,
        agent: &Agent,
        counterpart: &Agent,
        war: &WarState,
        now: Turn,
    ) -> PeaceInitiative {
        let differential = war.differential(agent.id);

        if self.exhaustion.should_seek_peace(agent, war, now) {
            let terms = PeaceTerms::from_enforceable_goals(war, agent.id, counterpart.military);
            return self.initiative(agent, counterpart, war, terms, now, "war exhaustion");
        }

        if differential > DICTATING_LEAD {
            let terms = PeaceTerms::from_enforceable_goals(war, agent.id, counterpart.military);
            if !terms.is_white_peace() {
                let reason = "dictating terms from strength";
                return self.initiative(agent, counterpart, war, terms, now, reason);
            }
        }

        if agent.personality().honor_bound > 70 && differential.abs() < STALEMATE_MARGIN {
            return self.initiative(
                agent,
                counterpart,
                war,
                PeaceTerms::white_peace(),
                now,
                "honorable end to a stalemate",
            );
        }

        PeaceInitiative {
            should_offer: false,
            offer: None,
            reasons: vec!["no reason to seek peace".into()],
        }
    }

    /// White peace unless decisively winning, in which case every
    /// enforceable goal is demanded
    pub fn generate_offer(
        &self,
        agent: &Agent,
        counterpart: &Agent,
        war: &WarState,
        now: Turn,
    ) -> PeaceOffer {
        let terms = if war.differential(agent.id) > DECISIVE_MARGIN {
            PeaceTerms::from_enforceable_goals(war, agent.id, counterpart.military)
        } else {
            PeaceTerms::white_peace()
        };
        PeaceOffer::new(war.id, agent.id, counterpart.id, terms, now, self.config)
    }

    fn initiative(
        &self,
        agent: &Agent,
        counterpart: &Agent,
        war: &WarState,
        terms: PeaceTerms,
        now: Turn,
        reason: &str,
    ) -> PeaceInitiative {
        PeaceInitiative {
            should_offer: true,
            offer: Some(PeaceOffer::new(war.id, agent.id, counterpart.id, terms, now, self.config)),
            reasons: vec![reason.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Resources, WarId};
    use crate::nation::{Archetype, MilitaryStock};
    use crate::war::{
        MilitaryLimitation, Reparations, TerritoryChange, WarGoal, WarGoalKind, WarStatus,
    };

    fn never(_: &Agent, _: &WarState, _: Turn) -> bool {
        false
    }

    fn always(_: &Agent, _: &WarState, _: Turn) -> bool {
        true
    }

    fn nation(id: u32, archetype: Archetype) -> Agent {
        let mut a = Agent::new(AgentId(id), format!("Nation {}", id), archetype);
        a.resources = Resources::new(80, 40);
        a
    }

    fn war(attacker_score: i32, defender_score: i32, start_turn: Turn) -> WarState {
        WarState {
            id: WarId(1),
            attacker: AgentId(1),
            defender: AgentId(2),
            start_turn,
            attacker_score,
            defender_score,
            goals: vec![WarGoal {
                holder: AgentId(1),
                kind: WarGoalKind::Disarmament,
            }],
            status: WarStatus::Active,
            casus_belli: None,
            end_turn: None,
        }
    }

    fn offer(terms: PeaceTerms) -> PeaceOffer {
        PeaceOffer::new(WarId(1), AgentId(1), AgentId(2), terms, 0, &EngineConfig::default())
    }

    #[test]
    fn test_losing_side_takes_white_peace() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let attacker = nation(1, Archetype::Aggressive);
        let defender = nation(2, Archetype::Defensive);
        let w = war(50, 10, 0);

        let white = offer(PeaceTerms::white_peace());
        let eval = engine.evaluate_offer(&defender, &attacker, &w, &white, 25);
        assert_eq!(eval.acceptance_score, 40 + 15 + 20);
        assert!(eval.should_accept);
        assert!(eval.counter_offer.is_none());
    }

    #[test]
    fn test_leader_holds_out() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let attacker = nation(1, Archetype::Aggressive);
        let defender = nation(2, Archetype::Defensive);
        let w = war(50, 10, 0);
        let from_defender =
            PeaceOffer::new(
                WarId(1),
                AgentId(2),
                AgentId(1),
                PeaceTerms::white_peace(),
                0,
                &config,
            );

        let eval = engine.evaluate_offer(&attacker, &defender, &w, &from_defender, 5);
        // -30 decisive lead, +20 white peace, -20 aggression, -15 leading
        assert_eq!(eval.acceptance_score, -45);
        assert!(!eval.should_accept);
        assert!(eval.counter_offer.is_none());
    }

    #[test]
    fn test_surrender_depends_on_own_score() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let attacker = nation(1, Archetype::Aggressive);
        let defender = nation(2, Archetype::Defensive);
        let surrender = PeaceTerms {
            kind: PeaceKind::UnconditionalSurrender,
            beneficiary: Some(AgentId(1)),
            ..PeaceTerms::white_peace()
        };

        let demand = offer(surrender);
        let beaten = engine.evaluate_offer(&defender, &attacker, &war(30, 15, 0), &demand, 1);
        assert_eq!(beaten.acceptance_score, 20 + 30);

        let holding = engine.evaluate_offer(&defender, &attacker, &war(30, 25, 0), &demand, 1);
        assert_eq!(holding.acceptance_score, -40);
    }

    #[test]
    fn test_harsh_terms_penalized() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let attacker = nation(1, Archetype::Aggressive);
        let defender = nation(2, Archetype::Defensive);
        let terms = PeaceTerms {
            kind: PeaceKind::ConditionalPeace,
            beneficiary: Some(AgentId(1)),
            reparations: Some(Reparations {
                payer: AgentId(2),
                payee: AgentId(1),
                amount: Resources::new(80, 40),
            }),
            ..PeaceTerms::white_peace()
        };

        let eval = engine.evaluate_offer(&defender, &attacker, &war(20, 20, 0), &offer(terms), 1);
        assert_eq!(eval.acceptance_score, -20);
        assert!(eval.reasons.iter().any(|r| r.starts_with("heavy reparations")));
    }

    fn conditional() -> PeaceTerms {
        PeaceTerms {
            kind: PeaceKind::ConditionalPeace,
            beneficiary: Some(AgentId(1)),
            ..PeaceTerms::white_peace()
        }
    }

    #[test]
    fn test_term_penalties() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let attacker = nation(1, Archetype::Aggressive);
        let defender = nation(2, Archetype::Defensive);
        let score = |terms: PeaceTerms| {
            engine
                .evaluate_offer(&defender, &attacker, &war(20, 20, 0), &offer(terms), 1)
                .acceptance_score
        };
        assert_eq!(score(conditional()), 0);

        let mut ceding = conditional();
        ceding.territory_changes.push(TerritoryChange {
            from: AgentId(2),
            to: AgentId(1),
            region: "Eastmarch".into(),
        });
        assert_eq!(score(ceding), -25);

        let mut limited = conditional();
        limited.military_limitation = Some(MilitaryLimitation {
            limited: AgentId(2),
            max: MilitaryStock::new(5, 0, 0),
        });
        assert_eq!(score(limited), -15);

        // Limits on the offerer cost the receiver nothing
        let mut other_limited = conditional();
        other_limited.military_limitation = Some(MilitaryLimitation {
            limited: AgentId(1),
            max: MilitaryStock::new(5, 0, 0),
        });
        assert_eq!(score(other_limited), 0);
    }

    #[test]
    fn test_offerer_relationship() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let attacker = nation(1, Archetype::Aggressive);
        let mut defender = nation(2, Archetype::Defensive);
        let w = war(20, 20, 0);

        defender.set_relationship(AgentId(1), 60);
        let friendly = engine.evaluate_offer(&defender, &attacker, &w, &offer(conditional()), 1);
        assert_eq!(friendly.acceptance_score, 15);

        defender.set_relationship(AgentId(1), 50);
        let warm = engine.evaluate_offer(&defender, &attacker, &w, &offer(conditional()), 1);
        assert_eq!(warm.acceptance_score, 0);

        defender.set_relationship(AgentId(1), -60);
        let hostile = engine.evaluate_offer(&defender, &attacker, &w, &offer(conditional()), 1);
        assert_eq!(hostile.acceptance_score, -10);
    }

    #[test]
    fn test_economic_strain() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let attacker = nation(1, Archetype::Aggressive);
        let mut defender = nation(2, Archetype::Defensive);
        defender.resources.production = 49;

        let terms = offer(conditional());
        let eval = engine.evaluate_offer(&defender, &attacker, &war(20, 20, 0), &terms, 1);
        assert_eq!(eval.acceptance_score, 20);
        assert!(eval.reasons.iter().any(|r| r.starts_with("economic strain")));
    }

    #[test]
    fn test_honor_bound_favors_white_peace() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let attacker = nation(1, Archetype::Aggressive);
        let w = war(20, 20, 0);

        // Honor 70 is not enough
        let defensive = nation(2, Archetype::Defensive);
        let white = offer(PeaceTerms::white_peace());
        let plain = engine.evaluate_offer(&defensive, &attacker, &w, &white, 1);
        assert_eq!(plain.acceptance_score, 20);

        let diplomat = nation(2, Archetype::Diplomatic);
        let honored = engine.evaluate_offer(&diplomat, &attacker, &w, &white, 1);
        assert_eq!(honored.acceptance_score, 20 + 15);

        let terms = engine.evaluate_offer(&diplomat, &attacker, &w, &offer(conditional()), 1);
        assert_eq!(terms.acceptance_score, 0);
    }

    #[test]
    fn test_close_rejection_counters_with_white_peace() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &always);
        let attacker = nation(1, Archetype::Aggressive);
        let defender = nation(2, Archetype::Defensive);
        let terms = PeaceTerms {
            kind: PeaceKind::ConditionalPeace,
            beneficiary: Some(AgentId(1)),
            ..PeaceTerms::white_peace()
        };

        // -10 differential does not fire; +20 exhaustion only
        let eval = engine.evaluate_offer(&defender, &attacker, &war(30, 20, 0), &offer(terms), 1);
        assert_eq!(eval.acceptance_score, 20);
        assert!(!eval.should_accept);
        let counter = eval.counter_offer.unwrap();
        assert_eq!(counter.from, AgentId(2));
        assert_eq!(counter.to, AgentId(1));
        assert!(counter.terms.is_white_peace());
    }

    #[test]
    fn test_exhausted_agent_offers_peace() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &always);
        let attacker = nation(1, Archetype::Aggressive);
        let defender = nation(2, Archetype::Defensive);

        let initiative = engine.should_offer_peace(&defender, &attacker, &war(40, 10, 0), 5);
        assert!(initiative.should_offer);
        assert!(initiative.offer.unwrap().terms.is_white_peace());
    }

    #[test]
    fn test_dominant_side_dictates() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let attacker = nation(1, Archetype::Aggressive);
        let defender = nation(2, Archetype::Defensive);

        let initiative = engine.should_offer_peace(&attacker, &defender, &war(60, 10, 0), 5);
        assert!(initiative.should_offer);
        let offer = initiative.offer.unwrap();
        assert_eq!(offer.terms.kind, PeaceKind::ConditionalPeace);
        assert!(offer.terms.limits(AgentId(2)));
        assert_eq!(offer.expires_turn, 10);
    }

    #[test]
    fn test_honorable_stalemate_and_no_reason() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let diplomat = nation(1, Archetype::Diplomatic);
        let other = nation(2, Archetype::Defensive);

        let initiative = engine.should_offer_peace(&diplomat, &other, &war(25, 20, 0), 5);
        assert!(initiative.should_offer);

        let aggressor = nation(1, Archetype::Aggressive);
        let initiative = engine.should_offer_peace(&aggressor, &other, &war(25, 20, 0), 5);
        assert!(!initiative.should_offer);
        assert!(initiative.offer.is_none());
    }

    #[test]
    fn test_generate_offer_bands() {
        let config = EngineConfig::default();
        let engine = PeaceNegotiationEngine::new(&config, &never);
        let attacker = nation(1, Archetype::Aggressive);
        let defender = nation(2, Archetype::Defensive);

        let winning = engine.generate_offer(&attacker, &defender, &war(70, 10, 0), 3);
        assert!(!winning.terms.is_white_peace());
        let even = engine.generate_offer(&attacker, &defender, &war(30, 20, 0), 3);
        assert!(even.terms.is_white_peace());
        let losing = engine.generate_offer(&defender, &attacker, &war(70, 10, 0), 3);
        assert!(losing.terms.is_white_peace());
    }
}
