//! War declaration scoring
//!
//! Additive model: each rule below is a standalone function returning the
//! factor it contributes (or None when it does not fire). `evaluate` runs
//! them in order, with two hard short-circuits: no usable justification, and
//! the validator refusing the declaration.

use serde::{Deserialize, Serialize};

use crate::ai::signals::{military_ratio, Factor, Tally};
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::{AgentId, Turn};
use crate::justification::{CasusBelli, JustificationLedger, Validity, WarValidator};
use crate::nation::{Agent, AiWarPersonality};
use crate::world::World;

pub const FABRICATED_JUSTIFICATION: f32 = 30.0;
pub const MILITARY_ADVANTAGE: f32 = 20.0;
pub const MILITARY_DISADVANTAGE: f32 = -30.0;
pub const HOSTILE_RELATIONS: f32 = 15.0;
pub const FRIENDLY_RELATIONS: f32 = -20.0;
pub const HIGH_THREAT: f32 = 20.0;
pub const DISHONORABLE_WAR: f32 = -40.0;
pub const ALLIANCE_DISADVANTAGE: f32 = -15.0;
pub const ALLIANCE_ADVANTAGE: f32 = 10.0;
pub const WEAK_ECONOMY: f32 = -20.0;
pub const EXPANSIONIST_CLAIM: f32 = 15.0;
pub const PER_ACTIVE_WAR: f32 = -25.0;

/// Outcome of weighing war against one target
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeclarationAssessment {
    pub target: AgentId,
    pub should_declare: bool,
    /// Score clamped to 0-100 for reporting
    pub confidence: f32,
    /// Unclamped score; this is what is compared to the threshold
    pub raw_score: f32,
    pub threshold: f32,
    pub best_casus_belli: Option<CasusBelli>,
    pub validity: Option<Validity>,
    /// Every rule that fired, in evaluation order
    pub reasoning: Vec<String>,
}

impl DeclarationAssessment {
    fn refusal(
        target: AgentId,
        threshold: f32,
        best_casus_belli: Option<CasusBelli>,
        validity: Option<Validity>,
        reasoning: Vec<String>,
    ) -> Self {
        Self {
            target,
            should_declare: false,
            confidence: 0.0,
            raw_score: 0.0,
            threshold,
            best_casus_belli,
            validity,
            reasoning,
        }
    }
}

// === RULES ===

/// A standing casus belli contributes half its strength
pub fn justification_factor(casus_belli: &CasusBelli) -> Factor {
    Factor::new(
        casus_belli.justification as f32 / 2.0,
        format!(
            "casus belli {:?} with justification {}",
            casus_belli.kind, casus_belli.justification
        ),
    )
}

/// Only the unscrupulous press a synthesized pretext
pub fn fabricated_justification_factor(personality: &AiWarPersonality) -> Option<Factor> {
    (personality.honor_bound < 40 && personality.aggression > 70)
        .then(|| Factor::new(FABRICATED_JUSTIFICATION, "willing to press a synthesized pretext"))
}

pub fn military_factor(ratio: f32) -> Option<Factor> {
    if ratio > 1.5 {
        Some(Factor::new(MILITARY_ADVANTAGE, format!("military advantage {:.2}:1", ratio)))
    } else if ratio < 0.7 {
        Some(Factor::new(MILITARY_DISADVANTAGE, format!("military disadvantage {:.2}:1", ratio)))
    } else {
        None
    }
}

/// Hostility encourages war, any warmth discourages it
pub fn relationship_factor(relationship: i32) -> Option<Factor> {
    if relationship < -50 {
        Some(Factor::new(HOSTILE_RELATIONS, format!("hostile relations ({})", relationship)))
    } else if relationship > 0 {
        Some(Factor::new(FRIENDLY_RELATIONS, format!("friendly relations ({})", relationship)))
    } else {
        None
    }
}

pub fn threat_factor(threat: i32) -> Option<Factor> {
    (threat > 60).then(|| Factor::new(HIGH_THREAT, format!("target is a threat ({})", threat)))
}

pub fn aggression_factor(personality: &AiWarPersonality) -> Option<Factor> {
    let score = (personality.aggression as f32 - 50.0) / 2.0;
    (score != 0.0).then(|| Factor::new(score, format!("aggression {}", personality.aggression)))
}

pub fn opportunism_factor(personality: &AiWarPersonality) -> Option<Factor> {
    let score = (personality.opportunism as f32 - 50.0) / 4.0;
    (score != 0.0).then(|| Factor::new(score, format!("opportunism {}", personality.opportunism)))
}

/// Honor-bound nations balk at wars of questionable legality
pub fn honor_factor(personality: &AiWarPersonality, validity: Validity) -> Option<Factor> {
    (validity != Validity::Valid && personality.honor_bound > 60).then(|| {
        Factor::new(DISHONORABLE_WAR, format!("honor-bound against a {:?} war", validity))
    })
}

pub fn alliance_balance_factor(own_allies: usize, their_allies: usize) -> Option<Factor> {
    if own_allies < their_allies {
        Some(Factor::new(
            ALLIANCE_DISADVANTAGE,
            format!("outnumbered in allies ({} vs {})", own_allies, their_allies),
        ))
    } else if own_allies > their_allies {
        Some(Factor::new(
            ALLIANCE_ADVANTAGE,
            format!("more allies ({} vs {})", own_allies, their_allies),
        ))
    } else {
        None
    }
}

pub fn economic_factor(production: i32) -> Option<Factor> {
    (production < 30).then(|| {
        Factor::new(WEAK_ECONOMY, format!("weak economy (production {})", production))
    })
}

pub fn expansionist_factor(
    personality: &AiWarPersonality,
    casus_belli: &CasusBelli,
) -> Option<Factor> {
    (personality.expansionist > 70 && casus_belli.is_territorial())
        .then(|| Factor::new(EXPANSIONIST_CLAIM, "expansionist pressing a territorial claim"))
}

/// Each ongoing war makes another less attractive
pub fn active_war_factor(active_wars: usize) -> Option<Factor> {
    (active_wars > 0).then(|| {
        Factor::new(
            PER_ACTIVE_WAR * active_wars as f32,
            format!("already fighting {} war(s)", active_wars),
        )
    })
}

/// Score needed to declare, from 60 (pacifist) down to ~27
pub fn declaration_threshold(aggression: u8) -> f32 {
    60.0 - aggression as f32 / 3.0
}

pub fn meets_threshold(raw_score: f32, aggression: u8) -> bool {
    raw_score >= declaration_threshold(aggression)
}

/// Weighs every signal into a go/no-go war decision
pub struct WarDeclarationEngine<'a> {
    config: &'a EngineConfig,
}

impl<'a> WarDeclarationEngine<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Evaluate war between two agents of the world
    pub fn evaluate(
        &self,
        world: &World,
        agent: AgentId,
        target: AgentId,
    ) -> Result<DeclarationAssessment> {
        let agent = world.agent(agent)?;
        let target = world.agent(target)?;
        Ok(self.assess(agent, target, world.turn))
    }

    pub fn assess(&self, agent: &Agent, target: &Agent, now: Turn) -> DeclarationAssessment {
        let personality = agent.personality();
        let threshold = declaration_threshold(personality.aggression);
        let mut tally = Tally::new();

        let ledger = JustificationLedger::new(agent, self.config);
        let casus_belli = match ledger.best_justification(target.id, now) {
            Some(cb) => {
                tally.add(Some(justification_factor(cb)));
                cb.clone()
            }
            None => {
                let candidate = ledger.synthesize(target.id, now).into_iter().next();
                match (candidate, fabricated_justification_factor(&personality)) {
                    (Some(candidate), Some(factor)) => {
                        tally.add(Some(factor));
                        candidate
                    }
                    (Some(_), None) => {
                        tally.note("no standing casus belli; unwilling to press a synthesized one");
                        return DeclarationAssessment::refusal(
                            target.id,
                            threshold,
                            None,
                            None,
                            tally.reasons,
                        );
                    }
                    (None, _) => {
                        tally.note(format!("no casus belli against {}", target.id));
                        return DeclarationAssessment::refusal(
                            target.id,
                            threshold,
                            None,
                            None,
                            tally.reasons,
                        );
                    }
                }
            }
        };

        let validation =
            WarValidator::new(self.config).validate_casus_belli(agent, target, Some(&casus_belli));
        if !validation.can_declare {
            tally
                .reasons
                .extend(validation.blockers.iter().map(|b| format!("blocked: {}", b)));
            return DeclarationAssessment::refusal(
                target.id,
                threshold,
                Some(casus_belli),
                Some(validation.validity),
                tally.reasons,
            );
        }

        tally.add(military_factor(military_ratio(agent, target)));
        tally.add(relationship_factor(agent.relationship_with(target.id)));
        tally.add(threat_factor(agent.threat_from(target.id)));
        tally.add(aggression_factor(&personality));
        tally.add(opportunism_factor(&personality));
        tally.add(honor_factor(&personality, validation.validity));
        tally.add(alliance_balance_factor(agent.ally_count(), target.ally_count()));
        tally.add(economic_factor(agent.resources.production));
        tally.add(expansionist_factor(&personality, &casus_belli));
        tally.add(active_war_factor(agent.active_wars.len()));

        let raw_score = tally.score;
        let should_declare = meets_threshold(raw_score, personality.aggression);

        tracing::debug!(
            agent = %agent.id,
            target = %target.id,
            raw_score,
            threshold,
            should_declare,
            "war declaration assessed"
        );

        DeclarationAssessment {
            target: target.id,
            should_declare,
            confidence: raw_score.clamp(0.0, 100.0),
            raw_score,
            threshold,
            best_casus_belli: Some(casus_belli),
            validity: Some(validation.validity),
            reasoning: tally.reasons,
        }
    }
}
