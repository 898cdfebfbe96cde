pub mod age_group;
pub mod tally;

pub use age_group::{normalize_age_group, AgeGroup};
pub use tally::{Cell, Ledger, PersonLedger, SeasonType};
