//! Read-only view over a nation's justifications for war

use crate::core::config::EngineConfig;
use crate::core::types::{AgentId, Turn};
use crate::justification::records::{CasusBelli, CasusBelliKind, JustificationSource};
use crate::nation::Agent;

/// Lookup and synthesis of casus belli held by one nation
///
/// Never mutates; resolving grievances and claims is done when peace terms
/// are applied.
pub struct JustificationLedger<'a> {
    agent: &'a Agent,
    casus_belli_duration: Turn,
}

impl<'a> JustificationLedger<'a> {
    pub fn new(agent: &'a Agent, config: &EngineConfig) -> Self {
        Self {
            agent,
            casus_belli_duration: config.casus_belli_duration,
        }
    }

    /// Strongest non-expired standing record against `target`
    ///
    /// Ties resolve to the earliest recorded.
    pub fn best_justification(&self, target: AgentId, now: Turn) -> Option<&'a CasusBelli> {
        strongest(
            self.agent
                .casus_belli
                .iter()
                .filter(|cb| cb.target == target && cb.is_active(now)),
        )
    }

    /// Candidate justifications derivable from unresolved grievances and
    /// unrenounced claims against `target`, strongest first.
    pub fn synthesize(&self, target: AgentId, now: Turn) -> Vec<CasusBelli> {
        let expires_turn = now.saturating_add(self.casus_belli_duration);

        let from_grievances = self
            .agent
            .unresolved_grievances_against(target)
            .map(|g| CasusBelli {
                id: None,
                kind: g.kind.into(),
                target,
                justification: g.severity.min(100),
                expires_turn,
                source: Some(JustificationSource::Grievance(g.id)),
            });

        let from_claims = self.agent.active_claims_against(target).map(|c| CasusBelli {
            id: None,
            kind: CasusBelliKind::TerritorialClaim,
            target,
            justification: c.strength.min(100),
            expires_turn,
            source: Some(JustificationSource::Claim {
                id: c.id,
                region: c.region.clone(),
            }),
        });

        let mut candidates: Vec<CasusBelli> = from_grievances.chain(from_claims).collect();
        // Stable: equal strengths keep grievance-then-claim order
        candidates.sort_by(|a, b| b.justification.cmp(&a.justification));
        candidates
    }

    /// Best of the standing record and the synthesized candidates
    pub fn strongest_available(&self, target: AgentId, now: Turn) -> Option<CasusBelli> {
        let standing = self.best_justification(target, now).cloned();
        let synthesized = self.synthesize(target, now).into_iter().next();

        match (standing, synthesized) {
            (Some(s), Some(c)) if c.justification > s.justification => Some(c),
            (Some(s), _) => Some(s),
            (None, c) => c,
        }
    }
}

fn strongest<'a>(records: impl Iterator<Item = &'a CasusBelli>) -> Option<&'a CasusBelli> {
    records.fold(None, |best: Option<&CasusBelli>, cb| match best {
        Some(b) if b.justification >= cb.justification => Some(b),
        _ => Some(cb),
    })
}
