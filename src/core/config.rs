//! Engine configuration with documented constants
//!
//! Tunables that shape pacing (decay rates, treaty lengths, thresholds) are
//! collected here. The per-rule scoring weights of the AI live beside their
//! rule functions in `crate::ai`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::Turn;

/// Configuration for the geopolitical engine
///
/// Loaded from TOML; any missing field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === RELATIONS ===
    /// Relationship drift toward 0 per turn
    ///
    /// At 1 per turn a -100 feud fades to neutral in 100 turns unless
    /// refreshed by new hostile acts.
    pub relationship_decay_per_turn: i32,

    /// Threat drift toward 0 per turn
    pub threat_decay_per_turn: i32,

    // === JUSTIFICATION ===
    /// Justification strength at/above which a war counts as valid
    pub valid_justification: u8,

    /// Justification strength at/above which a war counts as marginal
    ///
    /// Anything below this is a hard blocker for declaration.
    pub marginal_justification: u8,

    /// Turns a synthesized casus belli stays usable
    pub casus_belli_duration: Turn,

    // === PEACE ===
    /// Turns before an unanswered peace offer is discarded
    pub offer_expiry_turns: Turn,

    /// Truce length after a white peace
    pub white_peace_truce_turns: u32,

    /// Truce length after a conditional peace
    pub conditional_peace_truce_turns: u32,

    /// Truce length after an unconditional surrender
    pub surrender_truce_turns: u32,

    /// War duration after which the default exhaustion model wants out
    pub exhaustion_turns: Turn,

    // === DIPLOMACY ===
    /// Truce length granted by a diplomatic truce action
    pub treaty_truce_turns: u32,

    /// Relationship hit applied to both sides when war is declared
    pub war_declaration_relation_penalty: i32,

    /// Threat the defender gains toward the attacker on declaration
    pub war_declaration_threat: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            relationship_decay_per_turn: 1,
            threat_decay_per_turn: 1,

            valid_justification: 50,
            marginal_justification: 25,
            casus_belli_duration: 60,

            offer_expiry_turns: 5,
            white_peace_truce_turns: 10,
            conditional_peace_truce_turns: 15,
            surrender_truce_turns: 20,
            exhaustion_turns: 30,

            treaty_truce_turns: 10,
            war_declaration_relation_penalty: 30,
            war_declaration_threat: 30,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.marginal_justification > self.valid_justification {
            return Err(EngineError::InvalidConfig(format!(
                "marginal_justification ({}) should be <= valid_justification ({})",
                self.marginal_justification, self.valid_justification
            )));
        }

        if self.valid_justification > 100 {
            return Err(EngineError::InvalidConfig(format!(
                "valid_justification ({}) is above the 0-100 justification scale",
                self.valid_justification
            )));
        }

        if self.relationship_decay_per_turn < 0 || self.threat_decay_per_turn < 0 {
            return Err(EngineError::InvalidConfig(
                "Decay rates must not be negative".into(),
            ));
        }

        if self.offer_expiry_turns == 0 {
            return Err(EngineError::InvalidConfig(
                "offer_expiry_turns must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
