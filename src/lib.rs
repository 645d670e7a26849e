//! Geopolitics - AI decision engine for nation-level strategy simulation

pub mod ai;
pub mod core;
pub mod diplomacy;
pub mod events;
pub mod justification;
pub mod nation;
pub mod simulation;
pub mod war;
pub mod world;
