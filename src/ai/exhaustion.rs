//! War exhaustion - the external measure of accumulated war fatigue

use crate::core::config::EngineConfig;
use crate::core::types::Turn;
use crate::nation::Agent;
use crate::war::WarState;

/// Production below which a nation can no longer sustain a war
pub const COLLAPSED_PRODUCTION: i32 = 20;

/// Answers whether a nation wants out of a war
///
/// Implemented by the world collaborator; any matching closure works too.
pub trait WarExhaustion {
    fn should_seek_peace(&self, agent: &Agent, war: &WarState, now: Turn) -> bool;
}

impl<F> WarExhaustion for F
where
    F: Fn(&Agent, &WarState, Turn) -> bool,
{
    fn should_seek_peace(&self, agent: &Agent, war: &WarState, now: Turn) -> bool {
        self(agent, war, now)
    }
}

/// Fatigue from long wars or a collapsed economy
#[derive(Debug, Clone, Copy)]
pub struct DurationExhaustion {
    pub exhaustion_turns: Turn,
    pub production_floor: i32,
}

impl DurationExhaustion {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            exhaustion_turns: config.exhaustion_turns,
            production_floor: COLLAPSED_PRODUCTION,
        }
    }
}

impl WarExhaustion for DurationExhaustion {
    fn should_seek_peace(&self, agent: &Agent, war: &WarState, now: Turn) -> bool {
        war.duration(now) >= self.exhaustion_turns
            || agent.resources.production < self.production_floor
    }
}
