//! Treaty actions: pacts, breaches, sanctions and aid

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::Result;
use crate::core::types::{AgentId, Resources};
use crate::diplomacy::actions::ActionOutcome;
use crate::events::EventType;
use crate::justification::GrievanceKind;
use crate::world::World;

/// Severity of the grievance a broken treaty leaves behind
pub const BROKEN_TREATY_SEVERITY: u8 = 60;
/// Severity of the grievance sanctions leave behind
pub const SANCTION_SEVERITY: u8 = 30;
/// Production a sanctioned nation loses
pub const SANCTION_DAMAGE: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreatyKind {
    Truce,
    NonAggressionPact,
    Alliance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreatyAction {
    Truce,
    NonAggressionPact,
    Alliance,
    BreakTreaty,
    Sanctions,
    Aid { amount: i32 },
}

impl TreatyAction {
    /// What the initiator pays up front
    pub fn cost(&self) -> Resources {
        match self {
            TreatyAction::Truce => Resources::new(0, 10),
            TreatyAction::NonAggressionPact => Resources::new(5, 20),
            TreatyAction::Alliance => Resources::new(10, 40),
            TreatyAction::BreakTreaty => Resources::new(0, 10),
            TreatyAction::Sanctions => Resources::new(20, 10),
            TreatyAction::Aid { amount } => Resources::new((*amount).max(0), 0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TreatyAction::Truce => "truce",
            TreatyAction::NonAggressionPact => "non-aggression pact",
            TreatyAction::Alliance => "alliance",
            TreatyAction::BreakTreaty => "break treaty",
            TreatyAction::Sanctions => "sanctions",
            TreatyAction::Aid { .. } => "aid",
        }
    }
}

/// Apply one treaty action from `initiator` toward `counterpart`
///
/// Refusals (unaffordable, nothing to break, alliance with an enemy) leave
/// the world untouched.
pub fn apply_treaty_action(
    world: &mut World,
    initiator: AgentId,
    counterpart: AgentId,
    action: TreatyAction,
) -> Result<ActionOutcome> {
    let turn = world.turn;
    let truce_turns = world.config.treaty_truce_turns;
    let cost = action.cost();

    {
        let (a, b) = world.pair_mut(initiator, counterpart)?;
        if !b.alive {
            return Ok(ActionOutcome::refused(format!("{} is not a live nation", counterpart)));
        }
        if !a.resources.covers(&cost) {
            return Ok(ActionOutcome::refused(format!(
                "cannot afford {} ({} production, {} intel)",
                action.label(),
                cost.production,
                cost.intel
            )));
        }

        match action {
            TreatyAction::Alliance if a.is_at_war_with(b) => {
                return Ok(ActionOutcome::refused(format!("at war with {}", counterpart)));
            }
            TreatyAction::Alliance if a.is_allied_with(counterpart) => {
                return Ok(ActionOutcome::refused(format!("already allied with {}", counterpart)));
            }
            TreatyAction::BreakTreaty
                if a.treaty_with(counterpart).map_or(true, |t| t.is_lapsed()) =>
            {
                return Ok(ActionOutcome::refused(format!("no treaty with {}", counterpart)));
            }
            TreatyAction::Aid { amount } if amount <= 0 => {
                return Ok(ActionOutcome::refused("aid must be positive"));
            }
            _ => {}
        }

        a.resources = a.resources.saturating_sub(&cost);

        match action {
            TreatyAction::Truce => {
                for (me, other) in [(&mut *a, counterpart), (&mut *b, initiator)] {
                    let treaty = me.treaties.entry(other).or_default();
                    treaty.truce_turns_remaining = treaty.truce_turns_remaining.max(truce_turns);
                    treaty.signed_turn = turn;
                    me.adjust_relationship(other, 5);
                }
            }
            TreatyAction::NonAggressionPact => {
                for (me, other) in [(&mut *a, counterpart), (&mut *b, initiator)] {
                    let treaty = me.treaties.entry(other).or_default();
                    treaty.non_aggression = true;
                    treaty.signed_turn = turn;
                    me.adjust_relationship(other, 10);
                }
            }
            TreatyAction::Alliance => {
                for (me, other) in [(&mut *a, counterpart), (&mut *b, initiator)] {
                    let treaty = me.treaties.entry(other).or_default();
                    treaty.alliance = true;
                    treaty.signed_turn = turn;
                    me.adjust_relationship(other, 15);
                }
            }
            TreatyAction::BreakTreaty => {
                a.treaties.remove(&counterpart);
                b.treaties.remove(&initiator);
                a.adjust_relationship(counterpart, -10);
                b.adjust_relationship(initiator, -30);
                b.adjust_threat(initiator, 15);
            }
            TreatyAction::Sanctions => {
                a.adjust_relationship(counterpart, -5);
                b.adjust_relationship(initiator, -15);
                b.adjust_threat(initiator, 5);
                b.resources.production = (b.resources.production - SANCTION_DAMAGE).max(0);
            }
            TreatyAction::Aid { amount } => {
                b.resources.production += amount;
                a.adjust_relationship(counterpart, 5);
                b.adjust_relationship(initiator, 10);
            }
        }
    }

    let participants = vec![initiator, counterpart];
    let event = match action {
        TreatyAction::Truce => EventType::TreatySigned {
            kind: TreatyKind::Truce,
            parties: (initiator, counterpart),
        },
        TreatyAction::NonAggressionPact => EventType::TreatySigned {
            kind: TreatyKind::NonAggressionPact,
            parties: (initiator, counterpart),
        },
        TreatyAction::Alliance => EventType::TreatySigned {
            kind: TreatyKind::Alliance,
            parties: (initiator, counterpart),
        },
        TreatyAction::BreakTreaty => {
            world.add_grievance(
                counterpart,
                initiator,
                GrievanceKind::BrokenTreaty,
                BROKEN_TREATY_SEVERITY,
            )?;
            EventType::TreatyBroken {
                breaker: initiator,
                victim: counterpart,
            }
        }
        TreatyAction::Sanctions => {
            world.add_grievance(
                counterpart,
                initiator,
                GrievanceKind::HarmfulSanction,
                SANCTION_SEVERITY,
            )?;
            EventType::SanctionsImposed {
                by: initiator,
                target: counterpart,
            }
        }
        TreatyAction::Aid { amount } => EventType::AidSent {
            from: initiator,
            to: counterpart,
            amount,
        },
    };
    world.history.add_event(event, turn, participants);

    info!(from = %initiator, to = %counterpart, action = action.label(), "Treaty action applied");
    Ok(ActionOutcome::applied(format!("{} with {}", action.label(), counterpart)))
}
