//! Grievances, claims and casus belli records

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, CasusBelliId, ClaimId, GrievanceId, Turn};

/// A recorded wrong done to the holder by `against`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grievance {
    pub id: GrievanceId,
    pub against: AgentId,
    pub kind: GrievanceKind,
    /// 0 (petty) to 100 (unforgivable)
    pub severity: u8,
    pub turn: Turn,
    pub resolved: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrievanceKind {
    BrokenTreaty,
    HarmfulSanction,
    Aggression,
    BorderIncident,
    IdeologicalHostility,
}

/// A territorial entitlement the holder asserts over `against`'s land
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub against: AgentId,
    pub region: String,
    /// 0 (tenuous) to 100 (undisputed)
    pub strength: u8,
    pub turn: Turn,
    /// Set when the claim is given up or fulfilled by a peace settlement
    pub renounced: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CasusBelliKind {
    TerritorialClaim,
    Retaliatory,
    TreatyViolation,
    Ideological,
    Preemptive,
}

impl From<GrievanceKind> for CasusBelliKind {
    fn from(kind: GrievanceKind) -> Self {
        match kind {
            GrievanceKind::BrokenTreaty => CasusBelliKind::TreatyViolation,
            GrievanceKind::HarmfulSanction
            | GrievanceKind::Aggression
            | GrievanceKind::BorderIncident => CasusBelliKind::Retaliatory,
            GrievanceKind::IdeologicalHostility => CasusBelliKind::Ideological,
        }
    }
}

/// What a casus belli was built from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum JustificationSource {
    Grievance(GrievanceId),
    Claim { id: ClaimId, region: String },
}

/// A justification legitimizing war against `target`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CasusBelli {
    /// None for candidates synthesized on the fly and not yet recorded
    pub id: Option<CasusBelliId>,
    pub kind: CasusBelliKind,
    pub target: AgentId,
    /// 0-100, higher is stronger legal ground
    pub justification: u8,
    /// Last turn on which the record can be used
    pub expires_turn: Turn,
    pub source: Option<JustificationSource>,
}

impl CasusBelli {
    pub fn is_active(&self, now: Turn) -> bool {
        now <= self.expires_turn
    }

    pub fn is_territorial(&self) -> bool {
        self.kind == CasusBelliKind::TerritorialClaim
    }
}
