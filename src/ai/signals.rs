//! Shared signals read by the declaration, targeting and peace engines

use serde::{Deserialize, Serialize};

use crate::nation::Agent;

/// One fired scoring rule: its contribution and a human-readable reason
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub score: f32,
    pub reason: String,
}

impl Factor {
    pub fn new(score: f32, reason: impl Into<String>) -> Self {
        Self {
            score,
            reason: reason.into(),
        }
    }
}

/// Running total of fired factors plus the ordered reasoning trail
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub score: f32,
    pub reasons: Vec<String>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, factor: Option<Factor>) {
        if let Some(f) = factor {
            self.score += f.score;
            self.reasons.push(format!("{} ({:+})", f.reason, f.score));
        }
    }

    pub fn note(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }
}

/// Own strength over target strength, denominator floored at 1
pub fn military_ratio(agent: &Agent, target: &Agent) -> f32 {
    agent.military_strength() / target.military_strength().max(1.0)
}
