//! Turn processing and run output

pub mod output;
pub mod turn;

pub use output::{SimulationOutput, SimulationStats};
pub use turn::{run_turn, CommittedAction, TurnReport};
