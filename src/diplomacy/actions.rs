//! Action application - the only code path that mutates the world
//!
//! Engines decide, this module applies. Every function re-checks what it
//! needs against the live world so a stale command is refused rather than
//! applied twice.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::error::Result;
use crate::core::types::{AgentId, Resources};
use crate::diplomacy::treaty::{apply_treaty_action, TreatyAction};
use crate::events::EventType;
use crate::justification::{CasusBelli, GrievanceKind, WarValidator};
use crate::war::{goals_for_declaration, PeaceKind, PeaceOffer, PeaceTerms, WarStatus};
use crate::world::World;

/// Severity of the grievance a defender holds against its attacker
pub const AGGRESSION_SEVERITY: u8 = 50;

/// A discrete decision committed back onto the world
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    DeclareWar {
        attacker: AgentId,
        target: AgentId,
        casus_belli: CasusBelli,
    },
    ProposePeace(PeaceOffer),
    AcceptPeace(PeaceOffer),
    RejectPeace {
        offer: PeaceOffer,
        counter: Option<PeaceOffer>,
    },
    Treaty {
        initiator: AgentId,
        counterpart: AgentId,
        action: TreatyAction,
    },
}

impl Action {
    /// The agent committing this action
    pub fn actor(&self) -> AgentId {
        match self {
            Action::DeclareWar { attacker, .. } => *attacker,
            Action::ProposePeace(offer) => offer.from,
            Action::AcceptPeace(offer) => offer.to,
            Action::RejectPeace { offer, .. } => offer.to,
            Action::Treaty { initiator, .. } => *initiator,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub applied: bool,
    pub reasons: Vec<String>,
}

impl ActionOutcome {
    pub fn applied(reason: impl Into<String>) -> Self {
        Self {
            applied: true,
            reasons: vec![reason.into()],
        }
    }

    pub fn refused(reason: impl Into<String>) -> Self {
        Self {
            applied: false,
            reasons: vec![reason.into()],
        }
    }
}

pub fn apply_action(world: &mut World, action: &Action) -> Result<ActionOutcome> {
    let outcome = match action {
        Action::DeclareWar {
            attacker,
            target,
            casus_belli,
        } => declare_war(world, *attacker, *target, casus_belli)?,
        Action::ProposePeace(offer) => propose_peace(world, offer)?,
        Action::AcceptPeace(offer) => apply_peace_terms(world, offer)?,
        Action::RejectPeace { offer, counter } => reject_peace(world, offer, counter.as_ref())?,
        Action::Treaty {
            initiator,
            counterpart,
            action,
        } => apply_treaty_action(world, *initiator, *counterpart, *action)?,
    };

    if !outcome.applied {
        warn!(actor = %action.actor(), reasons = ?outcome.reasons, "Action refused");
    }
    Ok(outcome)
}

/// Open a war between `attacker` and `target`
///
/// The declaration is re-validated against the live world first.
pub fn declare_war(
    world: &mut World,
    attacker: AgentId,
    target: AgentId,
    casus_belli: &CasusBelli,
) -> Result<ActionOutcome> {
    let turn = world.turn;
    let goals = {
        let a = world.agent(attacker)?;
        let t = world.agent(target)?;
        if casus_belli.target != target || !casus_belli.is_active(turn) {
            return Ok(ActionOutcome::refused(format!("casus belli does not apply to {}", target)));
        }
        let validation =
            WarValidator::new(&world.config).validate_casus_belli(a, t, Some(casus_belli));
        if !validation.can_declare {
            return Ok(ActionOutcome {
                applied: false,
                reasons: validation.blockers,
            });
        }
        goals_for_declaration(a, t, casus_belli)
    };

    let war_id = world
        .wars
        .open(attacker, target, turn, goals, Some(casus_belli.clone()));

    let penalty = world.config.war_declaration_relation_penalty;
    let threat = world.config.war_declaration_threat;
    {
        let (a, t) = world.pair_mut(attacker, target)?;
        a.active_wars.push(war_id);
        t.active_wars.push(war_id);
        a.adjust_relationship(target, -penalty);
        t.adjust_relationship(attacker, -penalty);
        t.adjust_threat(attacker, threat);

        // A standing casus belli is spent by the war it justified
        if let Some(id) = casus_belli.id {
            a.casus_belli.retain(|cb| cb.id != Some(id));
        }
        a.treaties.remove(&target);
        t.treaties.remove(&attacker);
    }
    world.add_grievance(target, attacker, GrievanceKind::Aggression, AGGRESSION_SEVERITY)?;

    world.history.add_event(
        EventType::WarDeclared {
            attacker,
            defender: target,
            war: war_id,
            casus_belli: casus_belli.kind,
        },
        turn,
        vec![attacker, target],
    );

    info!(%attacker, defender = %target, war = %war_id, cb = ?casus_belli.kind, "War declared");
    Ok(ActionOutcome::applied(format!("{} declared on {}", war_id, target)))
}

fn propose_peace(world: &mut World, offer: &PeaceOffer) -> Result<ActionOutcome> {
    let Some(war) = world.wars.get(offer.war_id) else {
        return Ok(ActionOutcome::refused("war not found"));
    };
    if !war.involves(offer.from) || war.opponent_of(offer.from) != Some(offer.to) {
        return Ok(ActionOutcome::refused("offer parties do not match the war"));
    }
    if world
        .pending_offers
        .iter()
        .any(|o| o.war_id == offer.war_id && o.from == offer.from)
    {
        return Ok(ActionOutcome::refused("an offer for this war is already pending"));
    }

    world.pending_offers.push(offer.clone());
    world.history.add_event(
        EventType::PeaceOffered {
            war: offer.war_id,
            from: offer.from,
            to: offer.to,
            kind: offer.terms.kind,
        },
        world.turn,
        vec![offer.from, offer.to],
    );

    info!(
        war = %offer.war_id,
        from = %offer.from,
        to = %offer.to,
        kind = ?offer.terms.kind,
        "Peace offered"
    );
    Ok(ActionOutcome::applied(format!("{:?} offered", offer.terms.kind)))
}

fn reject_peace(
    world: &mut World,
    offer: &PeaceOffer,
    counter: Option<&PeaceOffer>,
) -> Result<ActionOutcome> {
    let before = world.pending_offers.len();
    world.pending_offers.retain(|o| o != offer);
    if world.pending_offers.len() == before {
        return Ok(ActionOutcome::refused("offer not pending"));
    }

    world.history.add_event(
        EventType::PeaceRejected {
            war: offer.war_id,
            by: offer.to,
            countered: counter.is_some(),
        },
        world.turn,
        vec![offer.from, offer.to],
    );

    let mut outcome = ActionOutcome::applied("offer rejected");
    if let Some(counter) = counter {
        let posted = propose_peace(world, counter)?;
        outcome.reasons.extend(posted.reasons);
    }
    Ok(outcome)
}

/// Sign an accepted offer: close the war and apply every term
///
/// A war that is no longer active is refused with "war not found", so an
/// offer can only ever be applied once.
pub fn apply_peace_terms(world: &mut World, offer: &PeaceOffer) -> Result<ActionOutcome> {
    let turn = world.turn;
    let Some(war) = world.wars.get(offer.war_id) else {
        return Ok(ActionOutcome::refused("war not found"));
    };
    if war.opponent_of(offer.from) != Some(offer.to) {
        return Ok(ActionOutcome::refused("offer parties do not match the war"));
    }
    if offer.is_expired(turn) {
        return Ok(ActionOutcome::refused("offer expired"));
    }
    if let Some(problem) = terms_problem(world, &offer.terms, war.attacker, war.defender) {
        return Ok(ActionOutcome::refused(problem));
    }

    let terms = &offer.terms;
    let status = match terms.beneficiary {
        None => WarStatus::WhitePeace,
        Some(b) if b == war.attacker => WarStatus::AttackerVictory,
        Some(_) => WarStatus::DefenderVictory,
    };
    let bonus = terms.relationship_bonus(war.duration(turn));
    let truce_turns = terms.truce_turns(&world.config);
    let war_id = war.id;

    {
        let (a, b) = world.pair_mut(offer.from, offer.to)?;
        for (me, other) in [(&mut *a, offer.to), (&mut *b, offer.from)] {
            me.active_wars.retain(|w| *w != war_id);
            let treaty = me.treaties.entry(other).or_default();
            treaty.truce_turns_remaining = truce_turns;
            treaty.signed_turn = turn;
            me.adjust_relationship(other, bonus);
        }
    }

    for agent in world.agents.iter_mut() {
        for grievance in agent.grievances.iter_mut() {
            if terms.resolved_grievances.contains(&grievance.id) {
                grievance.resolved = true;
            }
        }
        for claim in agent.claims.iter_mut() {
            if terms.renounced_claims.contains(&claim.id) {
                claim.renounced = true;
            }
        }
    }

    if let Some(reparations) = &terms.reparations {
        let (payer, payee) = world.pair_mut(reparations.payer, reparations.payee)?;
        // Paid up to what the loser actually has
        let paid = Resources::new(
            reparations.amount.production.min(payer.resources.production.max(0)),
            reparations.amount.intel.min(payer.resources.intel.max(0)),
        );
        payer.resources = payer.resources - paid;
        payee.resources = payee.resources + paid;
    }

    if let Some(limitation) = &terms.military_limitation {
        let limited = world.agent_mut(limitation.limited)?;
        limited.military.missiles = limited.military.missiles.min(limitation.max.missiles);
        limited.military.bombers = limited.military.bombers.min(limitation.max.bombers);
        limited.military.submarines = limited.military.submarines.min(limitation.max.submarines);
    }

    if let Some(change) = &terms.ideology_change {
        world.agent_mut(change.target)?.ideology = change.ideology.clone();
    }

    // Territory changes are handed to the map collaborator through the event log
    world.wars.conclude(war_id, status, turn);
    world.pending_offers.retain(|o| o.war_id != war_id);
    world.history.add_event(
        EventType::PeaceSigned {
            war: war_id,
            status,
            kind: terms.kind,
        },
        turn,
        vec![offer.from, offer.to],
    );

    info!(war = %war_id, ?status, kind = ?terms.kind, "Peace signed");
    let mut outcome = ActionOutcome::applied(format!("{} ended in {:?}", war_id, status));
    if terms.kind == PeaceKind::UnconditionalSurrender {
        outcome.reasons.push("unconditional surrender".into());
    }
    Ok(outcome)
}

/// First reason the terms cannot be carried out between the two sides of a war
///
/// Every party a term names must exist and be one of the sides; a transfer
/// needs two different sides.
fn terms_problem(
    world: &World,
    terms: &PeaceTerms,
    attacker: AgentId,
    defender: AgentId,
) -> Option<String> {
    let side = |id: AgentId, role: &str| -> Option<String> {
        if id != attacker && id != defender {
            Some(format!("{} {} is not a party to the war", role, id))
        } else if world.get_agent(id).is_none() {
            Some(format!("{} {} not found", role, id))
        } else {
            None
        }
    };

    let mut parties = Vec::new();
    if let Some(b) = terms.beneficiary {
        parties.push((b, "beneficiary"));
    }
    for change in &terms.territory_changes {
        parties.push((change.from, "ceding nation"));
        parties.push((change.to, "receiving nation"));
    }
    if let Some(r) = &terms.reparations {
        parties.push((r.payer, "payer"));
        parties.push((r.payee, "payee"));
    }
    if let Some(l) = &terms.military_limitation {
        parties.push((l.limited, "limited nation"));
    }
    if let Some(c) = &terms.ideology_change {
        parties.push((c.target, "ideology target"));
    }
    if let Some(problem) = parties.into_iter().find_map(|(id, role)| side(id, role)) {
        return Some(problem);
    }

    if let Some(r) = &terms.reparations {
        if r.payer == r.payee {
            return Some(format!("{} cannot pay reparations to itself", r.payer));
        }
    }
    terms
        .territory_changes
        .iter()
        .find(|c| c.from == c.to)
        .map(|c| format!("{} cannot cede {} to itself", c.from, c.region))
}
