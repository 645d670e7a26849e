//! Nation - the partial view of a nation the AI reasons about

pub mod personality;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, Resources, Turn, WarId};
use crate::justification::{CasusBelli, Claim, Grievance};

pub use personality::{personality_of, AiWarPersonality, Archetype};

/// Military strength weight per missile
pub const MISSILE_WEIGHT: u32 = 10;
/// Military strength weight per bomber
pub const BOMBER_WEIGHT: u32 = 5;
/// Military strength weight per submarine
pub const SUBMARINE_WEIGHT: u32 = 8;

/// A nation taking part in the geopolitical simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub archetype: Archetype,
    /// False for player-controlled nations; they never act in the AI pass
    pub ai_controlled: bool,
    pub alive: bool,

    pub military: MilitaryStock,
    pub resources: Resources,
    pub ideology: String,

    /// Per-counterpart relationship and threat
    pub relations: AHashMap<AgentId, Relation>,
    /// Active treaties keyed by counterpart
    pub treaties: AHashMap<AgentId, Treaty>,
    pub active_wars: Vec<WarId>,

    pub grievances: Vec<Grievance>,
    pub claims: Vec<Claim>,
    pub casus_belli: Vec<CasusBelli>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilitaryStock {
    pub missiles: u32,
    pub bombers: u32,
    pub submarines: u32,
}

impl MilitaryStock {
    pub fn new(missiles: u32, bombers: u32, submarines: u32) -> Self {
        Self {
            missiles,
            bombers,
            submarines,
        }
    }

    /// Single strength scalar from unit counts
    pub fn strength(&self) -> f32 {
        self.missiles as f32 * MISSILE_WEIGHT as f32
            + self.bombers as f32 * BOMBER_WEIGHT as f32
            + self.submarines as f32 * SUBMARINE_WEIGHT as f32
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// -100 to +100, decays toward 0
    pub relationship: i32,
    /// 0 to 100, rises with hostile acts
    pub threat: i32,
}

/// Treaty record with one counterpart
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treaty {
    pub alliance: bool,
    pub non_aggression: bool,
    pub truce_turns_remaining: u32,
    pub signed_turn: Turn,
}

impl Treaty {
    /// True once nothing in the record binds either side
    pub fn is_lapsed(&self) -> bool {
        !self.alliance && !self.non_aggression && self.truce_turns_remaining == 0
    }
}

impl Agent {
    pub fn new(id: AgentId, name: impl Into<String>, archetype: Archetype) -> Self {
        Self {
            id,
            name: name.into(),
            archetype,
            ai_controlled: true,
            alive: true,
            military: MilitaryStock::default(),
            resources: Resources::default(),
            ideology: String::from("republic"),
            relations: AHashMap::new(),
            treaties: AHashMap::new(),
            active_wars: Vec::new(),
            grievances: Vec::new(),
            claims: Vec::new(),
            casus_belli: Vec::new(),
        }
    }

    pub fn personality(&self) -> AiWarPersonality {
        personality_of(self)
    }

    pub fn military_strength(&self) -> f32 {
        self.military.strength()
    }

    pub fn relationship_with(&self, other: AgentId) -> i32 {
        self.relations.get(&other).map(|r| r.relationship).unwrap_or(0)
    }

    pub fn threat_from(&self, other: AgentId) -> i32 {
        self.relations.get(&other).map(|r| r.threat).unwrap_or(0)
    }

    pub fn set_relationship(&mut self, other: AgentId, value: i32) {
        self.relations.entry(other).or_default().relationship = value.clamp(-100, 100);
    }

    pub fn adjust_relationship(&mut self, other: AgentId, delta: i32) {
        let rel = self.relations.entry(other).or_default();
        rel.relationship = (rel.relationship + delta).clamp(-100, 100);
    }

    pub fn set_threat(&mut self, other: AgentId, value: i32) {
        self.relations.entry(other).or_default().threat = value.clamp(0, 100);
    }

    pub fn adjust_threat(&mut self, other: AgentId, delta: i32) {
        let rel = self.relations.entry(other).or_default();
        rel.threat = (rel.threat + delta).clamp(0, 100);
    }

    pub fn treaty_with(&self, other: AgentId) -> Option<&Treaty> {
        self.treaties.get(&other)
    }

    pub fn is_allied_with(&self, other: AgentId) -> bool {
        self.treaties.get(&other).is_some_and(|t| t.alliance)
    }

    pub fn truce_turns_with(&self, other: AgentId) -> u32 {
        self.treaties
            .get(&other)
            .map(|t| t.truce_turns_remaining)
            .unwrap_or(0)
    }

    pub fn has_non_aggression_with(&self, other: AgentId) -> bool {
        self.treaties.get(&other).is_some_and(|t| t.non_aggression)
    }

    /// Number of counterparts this nation is allied with
    pub fn ally_count(&self) -> usize {
        self.treaties.values().filter(|t| t.alliance).count()
    }

    pub fn is_at_war(&self) -> bool {
        !self.active_wars.is_empty()
    }

    /// Two nations are at war with each other when they share a war id
    pub fn is_at_war_with(&self, other: &Agent) -> bool {
        self.active_wars.iter().any(|w| other.active_wars.contains(w))
    }

    pub fn unresolved_grievances_against(
        &self,
        target: AgentId,
    ) -> impl Iterator<Item = &Grievance> {
        self.grievances
            .iter()
            .filter(move |g| g.against == target && !g.resolved)
    }

    pub fn active_claims_against(&self, target: AgentId) -> impl Iterator<Item = &Claim> {
        self.claims
            .iter()
            .filter(move |c| c.against == target && !c.renounced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_military_strength_weights() {
        let stock = MilitaryStock::new(3, 4, 5);
        assert_eq!(stock.strength(), 30.0 + 20.0 + 40.0);
    }

    #[test]
    fn test_military_strength_huge_stock() {
        let stock = MilitaryStock::new(u32::MAX, u32::MAX, u32::MAX);
        let expected = u32::MAX as f32 * (MISSILE_WEIGHT + BOMBER_WEIGHT + SUBMARINE_WEIGHT) as f32;
        assert_eq!(stock.strength(), expected);
        assert!(stock.strength().is_finite());
    }

    #[test]
    fn test_relationship_clamped() {
        let mut agent = Agent::new(AgentId(1), "Valdoria", Archetype::Defensive);
        agent.adjust_relationship(AgentId(2), -80);
        agent.adjust_relationship(AgentId(2), -80);
        assert_eq!(agent.relationship_with(AgentId(2)), -100);

        agent.adjust_threat(AgentId(2), -10);
        assert_eq!(agent.threat_from(AgentId(2)), 0);
        agent.adjust_threat(AgentId(2), 150);
        assert_eq!(agent.threat_from(AgentId(2)), 100);
    }

    #[test]
    fn test_unknown_counterpart_is_neutral() {
        let agent = Agent::new(AgentId(1), "Valdoria", Archetype::Defensive);
        assert_eq!(agent.relationship_with(AgentId(9)), 0);
        assert_eq!(agent.threat_from(AgentId(9)), 0);
        assert!(!agent.is_allied_with(AgentId(9)));
        assert_eq!(agent.truce_turns_with(AgentId(9)), 0);
    }

    #[test]
    fn test_at_war_with_shares_war_id() {
        let mut a = Agent::new(AgentId(1), "A", Archetype::Aggressive);
        let mut b = Agent::new(AgentId(2), "B", Archetype::Defensive);
        let c = Agent::new(AgentId(3), "C", Archetype::Defensive);
        a.active_wars.push(WarId(7));
        b.active_wars.push(WarId(7));
        assert!(a.is_at_war_with(&b));
        assert!(!a.is_at_war_with(&c));
    }

    #[test]
    fn test_ally_count() {
        let mut agent = Agent::new(AgentId(1), "A", Archetype::Diplomatic);
        agent.treaties.insert(AgentId(2), Treaty { alliance: true, ..Default::default() });
        agent.treaties.insert(AgentId(3), Treaty { non_aggression: true, ..Default::default() });
        agent.treaties.insert(AgentId(4), Treaty { alliance: true, ..Default::default() });
        assert_eq!(agent.ally_count(), 2);
        assert!(!agent.treaties[&AgentId(3)].is_lapsed());
        assert!(Treaty::default().is_lapsed());
    }
}
