//! Simulation output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Turn;
use crate::events::EventType;
use crate::world::World;

/// Complete simulation output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub final_world: World,
    pub statistics: SimulationStats,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationStats {
    pub turns_simulated: Turn,
    pub simulation_time_ms: u64,
    pub total_events: u32,
    pub wars_declared: u32,
    pub wars_concluded: u32,
    pub wars_active: u32,
    pub treaties_signed: u32,
}

impl SimulationOutput {
    pub fn new(world: World, turns: Turn, elapsed: Duration) -> Self {
        let treaties_signed = world
            .history
            .events
            .iter()
            .filter(|e| matches!(e.event_type, EventType::TreatySigned { .. }))
            .count() as u32;

        let statistics = SimulationStats {
            turns_simulated: turns,
            simulation_time_ms: elapsed.as_millis() as u64,
            total_events: world.history.events.len() as u32,
            wars_declared: world.history.wars_declared() as u32,
            wars_concluded: world.wars.history().len() as u32,
            wars_active: world.wars.active().len() as u32,
            treaties_signed,
        };

        Self {
            final_world: world,
            statistics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        format!(
            "Simulated {} turns in {}ms\n\
             {} events, {} wars declared ({} concluded, {} ongoing), {} treaties signed",
            self.statistics.turns_simulated,
            self.statistics.simulation_time_ms,
            self.statistics.total_events,
            self.statistics.wars_declared,
            self.statistics.wars_concluded,
            self.statistics.wars_active,
            self.statistics.treaties_signed,
        )
    }
}
