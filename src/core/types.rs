//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Simulation turn counter
pub type Turn = u32;

/// Unique identifier for nations (AI or player controlled)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nation#{}", self.0)
    }
}

/// Unique identifier for a conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WarId(pub u32);

impl fmt::Display for WarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "war#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GrievanceId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClaimId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CasusBelliId(pub u32);

/// Spendable national resources
///
/// `production` doubles as the economic output scalar read by the AI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub production: i32,
    pub intel: i32,
}

impl Resources {
    pub fn new(production: i32, intel: i32) -> Self {
        Self { production, intel }
    }

    /// Combined resource units (used to weigh reparations)
    pub fn total(&self) -> i32 {
        self.production + self.intel
    }

    /// Check if these resources cover a cost
    pub fn covers(&self, cost: &Resources) -> bool {
        self.production >= cost.production && self.intel >= cost.intel
    }

    pub fn saturating_sub(&self, other: &Resources) -> Resources {
        Resources {
            production: (self.production - other.production).max(0),
            intel: (self.intel - other.intel).max(0),
        }
    }
}

impl std::ops::Add for Resources {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            production: self.production + rhs.production,
            intel: self.intel + rhs.intel,
        }
    }
}

impl std::ops::Sub for Resources {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            production: self.production - rhs.production,
            intel: self.intel - rhs.intel,
        }
    }
}
