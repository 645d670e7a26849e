//! Legal justification for war: grievances, claims, casus belli, and the
//! validator that gates declarations.

pub mod ledger;
pub mod records;
pub mod validator;

pub use ledger::JustificationLedger;
pub use records::{
    CasusBelli, CasusBelliKind, Claim, Grievance, GrievanceKind, JustificationSource,
};
pub use validator::{Validity, WarValidation, WarValidator};
