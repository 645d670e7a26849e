//! Hard legality gate for war declarations

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::types::Turn;
use crate::justification::ledger::JustificationLedger;
use crate::justification::records::CasusBelli;
use crate::nation::Agent;

/// Legal standing of a prospective war
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
    Valid,
    Marginal,
    Invalid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WarValidation {
    pub can_declare: bool,
    pub validity: Validity,
    /// Every reason the declaration is refused; empty when allowed
    pub blockers: Vec<String>,
    /// Strength of the best justification considered (0 when none)
    pub justification: u8,
}

/// Decides whether a declaration is structurally and legally permitted
pub struct WarValidator<'a> {
    config: &'a EngineConfig,
}

impl<'a> WarValidator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Classify the justification strength on its own
    pub fn classify(&self, justification: u8) -> Validity {
        if justification >= self.config.valid_justification {
            Validity::Valid
        } else if justification >= self.config.marginal_justification {
            Validity::Marginal
        } else {
            Validity::Invalid
        }
    }

    /// Validate against the strongest justification the agent could cite,
    /// standing or synthesized
    pub fn validate(&self, agent: &Agent, target: &Agent, now: Turn) -> WarValidation {
        let best = JustificationLedger::new(agent, self.config).strongest_available(target.id, now);
        self.validate_casus_belli(agent, target, best.as_ref())
    }

    /// Validate a declaration citing exactly `casus_belli`
    pub fn validate_casus_belli(
        &self,
        agent: &Agent,
        target: &Agent,
        casus_belli: Option<&CasusBelli>,
    ) -> WarValidation {
        let mut blockers = Vec::new();

        if agent.id == target.id {
            blockers.push("cannot declare war on itself".to_string());
        }
        if !target.alive {
            blockers.push(format!("{} is not a live nation", target.id));
        }
        if agent.is_allied_with(target.id) || target.is_allied_with(agent.id) {
            blockers.push(format!("allied with {}", target.id));
        }
        let truce = agent.truce_turns_with(target.id).max(target.truce_turns_with(agent.id));
        if truce > 0 {
            blockers.push(format!("truce with {} in effect for {} more turns", target.id, truce));
        }
        if agent.has_non_aggression_with(target.id) || target.has_non_aggression_with(agent.id) {
            blockers.push(format!("non-aggression pact with {} in force", target.id));
        }
        if agent.is_at_war_with(target) {
            blockers.push(format!("already at war with {}", target.id));
        }

        let (justification, validity) = match casus_belli {
            Some(cb) => {
                let validity = self.classify(cb.justification);
                if validity == Validity::Invalid {
                    blockers.push(format!(
                        "insufficient justification ({} < {})",
                        cb.justification, self.config.marginal_justification
                    ));
                }
                (cb.justification, validity)
            }
            None => {
                blockers.push(format!("no casus belli against {}", target.id));
                (0, Validity::Invalid)
            }
        };

        WarValidation {
            can_declare: blockers.is_empty(),
            validity,
            blockers,
            justification,
        }
    }
}
