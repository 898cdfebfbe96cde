pub mod index;
pub mod resolve;

pub use index::EntityIndex;
pub use resolve::{
    default_division_aliases, is_tournament_schedule, reconcile, DivisionAliases, Game, Games,
    RosterEntry,
};
