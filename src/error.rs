use std::fmt;
use std::path::PathBuf;

/// Fatal inconsistencies found while reconciling, aggregating or scoring.
///
/// Any of these aborts the run before a report or file is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The same game id appeared in more than one loaded document.
    DuplicateGame { game_id: String, source: PathBuf },
    /// A page entry that doesn't decode as an entity (bad id, missing type, bad links).
    UndecodableEntity {
        kind: String,
        id: String,
        source: PathBuf,
        reason: String,
    },
    /// An `included` entity carried a type the reconciler doesn't know.
    UnknownEntityType { kind: String, id: String, source: PathBuf },
    /// An assignment's recorded game id disagrees with the game linking to it.
    GameMismatch {
        assignment_id: String,
        expected: String,
        found: String,
    },
    /// A referenced entity is absent from its lookup table.
    MissingEntity { kind: &'static str, id: String },
    /// An entity's attributes lack a field the join needs.
    MalformedEntity {
        kind: &'static str,
        id: String,
        reason: String,
    },
    /// A game level has no label for an accepted assignment's column.
    MissingLabel { level_id: String, column: String },
    /// Division code that is neither canonical nor a birth year.
    UnparseableDivision(String),
    /// Age group absent from the scoring or minutes tables.
    UnrecognizedDivision(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGame { game_id, source } => {
                write!(f, "found duplicate game ID {game_id} in {}", source.display())
            }
            Self::UndecodableEntity {
                kind,
                id,
                source,
                reason,
            } => write!(
                f,
                "{kind} entity {id} in {} could not be decoded: {reason}",
                source.display()
            ),
            Self::UnknownEntityType { kind, id, source } => write!(
                f,
                "unknown relationship type '{kind}' (entity {id}) in {}",
                source.display()
            ),
            Self::GameMismatch {
                assignment_id,
                expected,
                found,
            } => write!(
                f,
                "assignment {assignment_id} is linked from game {expected} but records game {found}"
            ),
            Self::MissingEntity { kind, id } => {
                write!(f, "{kind} {id} is referenced but was not exported")
            }
            Self::MalformedEntity { kind, id, reason } => {
                write!(f, "{kind} {id} is malformed: {reason}")
            }
            Self::MissingLabel { level_id, column } => {
                write!(f, "game level {level_id} has no label for column {column}")
            }
            Self::UnparseableDivision(division) => write!(f, "unable to parse division {division}"),
            Self::UnrecognizedDivision(division) => write!(f, "unrecognized division {division}"),
        }
    }
}

impl std::error::Error for LedgerError {}
