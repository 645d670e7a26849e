//! Diplomacy: committed actions, treaties and per-turn upkeep

pub mod actions;
pub mod decay;
pub mod treaty;

pub use actions::{apply_action, apply_peace_terms, declare_war, Action, ActionOutcome};
pub use decay::upkeep;
pub use treaty::{apply_treaty_action, TreatyAction, TreatyKind};
