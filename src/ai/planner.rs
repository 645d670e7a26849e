//! Per-agent decision: the single action a nation commits this turn

use std::cmp::Reverse;

use tracing::debug;

use crate::ai::declaration::WarDeclarationEngine;
use crate::ai::exhaustion::WarExhaustion;
use crate::ai::peace::PeaceNegotiationEngine;
use crate::ai::targeting::TargetPrioritizer;
use crate::core::error::Result;
use crate::core::types::AgentId;
use crate::diplomacy::{Action, TreatyAction};
use crate::nation::Agent;
use crate::world::World;

/// Threat above which a nation at peace looks for an ally
pub const ALLIANCE_THREAT: i32 = 60;
/// Relationship above which another nation is a candidate ally
pub const ALLIANCE_FRIENDSHIP: i32 = 50;

/// Decide what `agent` does this turn, or None to pass
///
/// Nations at war only negotiate; nations at peace look for a war worth
/// declaring and otherwise for an ally.
pub fn plan_action(
    world: &World,
    agent: AgentId,
    exhaustion: &dyn WarExhaustion,
) -> Result<Option<Action>> {
    let me = world.agent(agent)?;
    if !me.alive {
        return Ok(None);
    }

    if me.is_at_war() {
        plan_negotiation(world, me, exhaustion)
    } else if let Some(action) = plan_declaration(world, me)? {
        Ok(Some(action))
    } else {
        Ok(plan_alliance(world, me))
    }
}

fn plan_negotiation(
    world: &World,
    me: &Agent,
    exhaustion: &dyn WarExhaustion,
) -> Result<Option<Action>> {
    let engine = PeaceNegotiationEngine::new(&world.config, exhaustion);

    let incoming = world
        .offers_to(me.id)
        .find(|o| !o.is_expired(world.turn) && world.wars.get(o.war_id).is_some());
    if let Some(offer) = incoming {
        let evaluation = engine.evaluate(world, me.id, offer)?;
        debug!(
            agent = %me.id,
            war = %offer.war_id,
            reasons = ?evaluation.reasons,
            "Answering peace offer"
        );
        return Ok(Some(if evaluation.should_accept {
            Action::AcceptPeace(offer.clone())
        } else {
            Action::RejectPeace {
                offer: offer.clone(),
                counter: evaluation.counter_offer,
            }
        }));
    }

    for war in world.wars.wars_involving(me.id) {
        let already_offered = world
            .pending_offers
            .iter()
            .any(|o| o.war_id == war.id && o.from == me.id);
        if already_offered {
            continue;
        }
        let Some(opponent) = war.opponent_of(me.id) else {
            continue;
        };
        let counterpart = world.agent(opponent)?;

        let initiative = engine.should_offer_peace(me, counterpart, war, world.turn);
        if let Some(offer) = initiative.offer.filter(|_| initiative.should_offer) {
            return Ok(Some(Action::ProposePeace(offer)));
        }
    }

    Ok(None)
}

fn plan_declaration(world: &World, me: &Agent) -> Result<Option<Action>> {
    let targets = TargetPrioritizer::new(&world.config).prioritize(world, me.id)?;
    let engine = WarDeclarationEngine::new(&world.config);

    for priority in targets {
        let target = world.agent(priority.target)?;
        let assessment = engine.assess(me, target, world.turn);
        if !assessment.should_declare {
            continue;
        }
        if let Some(casus_belli) = assessment.best_casus_belli {
            return Ok(Some(Action::DeclareWar {
                attacker: me.id,
                target: target.id,
                casus_belli,
            }));
        }
    }

    Ok(None)
}

fn plan_alliance(world: &World, me: &Agent) -> Option<Action> {
    let threatened = me.relations.values().any(|r| r.threat > ALLIANCE_THREAT);
    if !threatened || !me.resources.covers(&TreatyAction::Alliance.cost()) {
        return None;
    }

    world
        .live_agents()
        .filter(|other| {
            other.id != me.id
                && me.relationship_with(other.id) > ALLIANCE_FRIENDSHIP
                && !me.is_allied_with(other.id)
                && !me.is_at_war_with(other)
        })
        .min_by_key(|other| Reverse(me.relationship_with(other.id)))
        .map(|friend| Action::Treaty {
            initiator: me.id,
            counterpart: friend.id,
            action: TreatyAction::Alliance,
        })
}
