//! Per-turn upkeep: relations drift, truces run down, stale records expire

use tracing::debug;

use crate::events::EventType;
use crate::world::World;

/// Run every start-of-turn upkeep step
pub fn upkeep(world: &mut World) {
    decay_relations(world);
    tick_truces(world);
    expire_casus_belli(world);
    expire_offers(world);
}

/// Relationship and threat drift toward neutral
pub fn decay_relations(world: &mut World) {
    let rel_step = world.config.relationship_decay_per_turn;
    let threat_step = world.config.threat_decay_per_turn;

    for agent in &mut world.agents {
        if !agent.alive {
            continue;
        }

        for relation in agent.relations.values_mut() {
            if relation.relationship > 0 {
                relation.relationship = (relation.relationship - rel_step).max(0);
            } else if relation.relationship < 0 {
                relation.relationship = (relation.relationship + rel_step).min(0);
            }

            relation.threat = (relation.threat - threat_step).max(0);
        }
    }
}

/// Count truces down and drop treaty records that no longer bind anything
pub fn tick_truces(world: &mut World) {
    for agent in &mut world.agents {
        for treaty in agent.treaties.values_mut() {
            treaty.truce_turns_remaining = treaty.truce_turns_remaining.saturating_sub(1);
        }
        agent.treaties.retain(|_, t| !t.is_lapsed());
    }
}

pub fn expire_casus_belli(world: &mut World) {
    let now = world.turn;
    for agent in &mut world.agents {
        agent.casus_belli.retain(|cb| cb.is_active(now));
    }
}

pub fn expire_offers(world: &mut World) {
    let now = world.turn;
    let (expired, pending): (Vec<_>, Vec<_>) = world
        .pending_offers
        .drain(..)
        .partition(|o| o.is_expired(now) || world.wars.get(o.war_id).is_none());
    world.pending_offers = pending;

    for offer in expired {
        debug!(war = %offer.war_id, from = %offer.from, to = %offer.to, "Peace offer lapsed");
        world.history.add_event(
            EventType::PeaceOfferExpired {
                war: offer.war_id,
                from: offer.from,
                to: offer.to,
            },
            now,
            vec![offer.from, offer.to],
        );
    }
}
