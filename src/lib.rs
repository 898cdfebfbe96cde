pub mod collect;
pub mod config;
pub mod documents;
pub mod error;
pub mod ledger;
pub mod output;
pub mod reconcile;
pub mod scoring;

pub use error::LedgerError;
