//! Conflict records: war state, goals, peace terms and the war table

pub mod state;
pub mod terms;
pub mod tracker;

pub use state::{goals_for_declaration, WarGoal, WarGoalKind, WarState, WarStatus};
pub use terms::{
    IdeologyChange, MilitaryLimitation, PeaceKind, PeaceOffer, PeaceTerms, Reparations,
    TerritoryChange,
};
pub use tracker::WarTracker;
