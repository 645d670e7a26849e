//! AI war personality archetypes
//!
//! Every AI nation is assigned one archetype at creation. The archetype
//! resolves to a fixed bundle of five weights (0-100) that feed every
//! downstream score. The mapping is an exhaustive match, so an unknown
//! archetype can only appear while parsing a label, never at lookup time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::nation::Agent;

/// Named personality template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Aggressive,
    Defensive,
    Diplomatic,
    Opportunistic,
    Expansionist,
    Isolationist,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::Aggressive,
        Archetype::Defensive,
        Archetype::Diplomatic,
        Archetype::Opportunistic,
        Archetype::Expansionist,
        Archetype::Isolationist,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Archetype::Aggressive => "aggressive",
            Archetype::Defensive => "defensive",
            Archetype::Diplomatic => "diplomatic",
            Archetype::Opportunistic => "opportunistic",
            Archetype::Expansionist => "expansionist",
            Archetype::Isolationist => "isolationist",
        }
    }

    /// Behavioral weights for this archetype
    pub fn personality(&self) -> AiWarPersonality {
        match self {
            Archetype::Aggressive => AiWarPersonality::new(80, 30, 60, 40, 60),
            Archetype::Defensive => AiWarPersonality::new(30, 70, 30, 70, 20),
            Archetype::Diplomatic => AiWarPersonality::new(20, 80, 40, 80, 30),
            // Opportunists are the only archetype willing to fabricate a pretext
            Archetype::Opportunistic => AiWarPersonality::new(75, 40, 90, 25, 50),
            Archetype::Expansionist => AiWarPersonality::new(70, 50, 60, 45, 90),
            Archetype::Isolationist => AiWarPersonality::new(20, 90, 20, 60, 10),
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Archetype {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Archetype::ALL
            .iter()
            .copied()
            .find(|a| a.label() == normalized)
            .ok_or_else(|| EngineError::UnknownArchetype(s.to_string()))
    }
}

/// Behavioral weights (0 to 100) driving war and peace decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiWarPersonality {
    /// Appetite for conflict; also lowers the declaration threshold
    pub aggression: u8,
    /// Willingness to wait out unfavorable situations
    pub patience: u8,
    /// Tendency to exploit a weakened rival
    pub opportunism: u8,
    /// Respect for legal justification and fair terms
    pub honor_bound: u8,
    /// Hunger for territory
    pub expansionist: u8,
}

impl AiWarPersonality {
    pub const fn new(
        aggression: u8,
        patience: u8,
        opportunism: u8,
        honor_bound: u8,
        expansionist: u8,
    ) -> Self {
        Self {
            aggression,
            patience,
            opportunism,
            honor_bound,
            expansionist,
        }
    }
}

/// Personality of a nation. Pure lookup, always succeeds.
pub fn personality_of(agent: &Agent) -> AiWarPersonality {
    agent.archetype.personality()
}
