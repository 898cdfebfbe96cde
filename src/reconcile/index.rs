use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::documents::{Entity, LoadedDocument};
use crate::error::LedgerError;

/// Lookup tables built from every loaded document.
///
/// Included entities are keyed per type; ids only need to be unique within
/// their own table. Games are merged into one table and must be unique
/// across all documents.
#[derive(Debug, Default)]
pub struct EntityIndex {
    pub games: BTreeMap<String, Entity>,
    pub assignments: HashMap<String, Entity>,
    pub event_roles: HashMap<String, Entity>,
    pub users: HashMap<String, Entity>,
    pub game_levels: HashMap<String, Entity>,
}

impl EntityIndex {
    pub fn build(documents: &[LoadedDocument]) -> Result<Self, LedgerError> {
        let mut index = EntityIndex::default();

        for loaded in documents {
            for raw in &loaded.document.data {
                let game = decode_entity(raw, &loaded.source)?;
                if index.games.contains_key(&game.id) {
                    return Err(LedgerError::DuplicateGame {
                        game_id: game.id,
                        source: loaded.source.clone(),
                    });
                }
                index.games.insert(game.id.clone(), game);
            }

            for raw in &loaded.document.included {
                let entity = decode_entity(raw, &loaded.source)?;
                let table = match entity.kind.as_str() {
                    "game_assignment" => &mut index.assignments,
                    "event_role" => &mut index.event_roles,
                    "user" => &mut index.users,
                    "game_level" => &mut index.game_levels,
                    other => {
                        return Err(LedgerError::UnknownEntityType {
                            kind: other.to_string(),
                            id: entity.id.clone(),
                            source: loaded.source.clone(),
                        })
                    }
                };
                // Overlapping page exports repeat the same included entities
                table.insert(entity.id.clone(), entity);
            }
        }

        Ok(index)
    }
}

fn decode_entity(raw: &Value, source: &Path) -> Result<Entity, LedgerError> {
    Entity::from_value(raw).map_err(|e| LedgerError::UndecodableEntity {
        kind: describe(raw.get("type")),
        id: describe(raw.get("id")),
        source: source.to_path_buf(),
        reason: e.to_string(),
    })
}

fn describe(field: Option<&Value>) -> String {
    match field {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "<missing>".to_string(),
    }
}

/// Look up `id` in `table`, failing with the entity kind for context
pub(crate) fn lookup<'a>(
    table: &'a HashMap<String, Entity>,
    kind: &'static str,
    id: &str,
) -> Result<&'a Entity, LedgerError> {
    table.get(id).ok_or_else(|| LedgerError::MissingEntity {
        kind,
        id: id.to_string(),
    })
}
