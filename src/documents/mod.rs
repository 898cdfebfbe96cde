pub mod loader;
pub mod types;

pub use loader::{discover, load_documents, parse_document, LoadReport, SkipReason, SkippedDocument};
pub use types::{Document, Entity, LabelTable, LoadedDocument};
