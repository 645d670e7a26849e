//! AI decision engines
//!
//! Every engine here is a pure function of a world snapshot. Decisions come
//! back as assessments with their reasoning; the planner turns them into
//! [`Action`](crate::diplomacy::Action)s for the diplomacy module to apply.

pub mod declaration;
pub mod exhaustion;
pub mod peace;
pub mod planner;
pub mod signals;
pub mod targeting;

pub use declaration::{DeclarationAssessment, WarDeclarationEngine};
pub use exhaustion::{DurationExhaustion, WarExhaustion};
pub use peace::{OfferEvaluation, PeaceInitiative, PeaceNegotiationEngine};
pub use planner::plan_action;
pub use signals::{military_ratio, Factor, Tally};
pub use targeting::{TargetPriority, TargetPrioritizer};
