use serde::Deserialize;
use std::collections::BTreeMap;

use super::index::{lookup, EntityIndex};
use crate::documents::types::{
    AssignmentAttributes, EventRoleAttributes, GameAttributes, GameLevelAttributes, UserAttributes,
};
use crate::documents::{Entity, LoadedDocument};
use crate::error::LedgerError;

/// Irregular division codes in the export mapped to their canonical spelling
pub type DivisionAliases = BTreeMap<String, String>;

pub fn default_division_aliases() -> DivisionAliases {
    let mut aliases = DivisionAliases::new();
    aliases.insert("U8C".to_string(), "08UC".to_string());
    aliases
}

const ACCEPTED: &str = "accepted";
const EXCLUDED_STATUSES: [&str; 2] = ["cancelled", "postponed"];

/// One official on one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl RosterEntry {
    /// First and last name, each trimmed, joined by a single space.
    /// This is the ledger key, so two people sharing a name share a row.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// A game after its level, assignments and officials have been joined in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: String,
    pub status: String,
    /// Division code after alias normalization (None for excluded games)
    pub division: Option<String>,
    pub is_tournament: bool,
    /// None until the first accepted assignment resolves
    pub refs: Option<Vec<RosterEntry>>,
}

impl Game {
    pub fn is_excluded(&self) -> bool {
        EXCLUDED_STATUSES.contains(&self.status.as_str())
    }

    /// Officials on this game; empty when nobody accepted
    pub fn roster(&self) -> &[RosterEntry] {
        self.refs.as_deref().unwrap_or(&[])
    }
}

pub type Games = BTreeMap<String, Game>;

/// True when a schedule name marks tournament play
pub fn is_tournament_schedule(schedule_name: &str) -> bool {
    schedule_name.to_lowercase().contains("tourney")
}

/// Join every loaded document into one table of resolved games.
pub fn reconcile(
    documents: &[LoadedDocument],
    aliases: &DivisionAliases,
) -> Result<Games, LedgerError> {
    let index = EntityIndex::build(documents)?;
    let mut games = Games::new();

    for (id, entity) in &index.games {
        let attributes: GameAttributes = decode(entity, "game")?;
        let mut game = Game {
            id: id.clone(),
            status: attributes.status,
            division: None,
            is_tournament: false,
            refs: None,
        };

        if !game.is_excluded() {
            resolve_game(&index, entity, &mut game, aliases)?;
        }

        games.insert(game.id.clone(), game);
    }

    Ok(games)
}

fn resolve_game(
    index: &EntityIndex,
    entity: &Entity,
    game: &mut Game,
    aliases: &DivisionAliases,
) -> Result<(), LedgerError> {
    let level_id = entity
        .related_one("game_level")
        .ok_or_else(|| LedgerError::MalformedEntity {
            kind: "game",
            id: game.id.clone(),
            reason: "no game_level relationship".to_string(),
        })?;
    let level = lookup(&index.game_levels, "game_level", level_id)?;
    let level_attributes: GameLevelAttributes = decode(level, "game_level")?;

    let raw_division = level_attributes.game_level.as_str();
    let division = aliases
        .get(raw_division)
        .map(String::as_str)
        .unwrap_or(raw_division);
    game.division = Some(division.to_string());
    game.is_tournament = is_tournament_schedule(&level_attributes.schedule_name);

    for assignment_id in entity.related_many("assignments_game") {
        let assignment = lookup(&index.assignments, "game_assignment", assignment_id)?;
        let details: AssignmentAttributes = decode(assignment, "game_assignment")?;

        if details.external_game_id != game.id {
            return Err(LedgerError::GameMismatch {
                assignment_id: assignment.id.clone(),
                expected: game.id.clone(),
                found: details.external_game_id,
            });
        }
        if details.status != ACCEPTED {
            continue;
        }

        let role = level_attributes
            .labels
            .get(&details.official_label_col)
            .ok_or_else(|| LedgerError::MissingLabel {
                level_id: level.id.clone(),
                column: details.official_label_col.clone(),
            })?;

        let event_role_id =
            assignment
                .related_one("event_role")
                .ok_or_else(|| LedgerError::MalformedEntity {
                    kind: "game_assignment",
                    id: assignment.id.clone(),
                    reason: "no event_role relationship".to_string(),
                })?;
        let event_role = lookup(&index.event_roles, "event_role", event_role_id)?;
        let owner: EventRoleAttributes = decode(event_role, "event_role")?;
        let user = lookup(&index.users, "user", &owner.user_id)?;
        let person: UserAttributes = decode(user, "user")?;

        let entry = RosterEntry {
            user_id: user.id.clone(),
            first_name: person.first_name,
            last_name: person.last_name,
            role: role.to_string(),
        };
        match game.refs.as_mut() {
            Some(refs) => refs.push(entry),
            None => game.refs = Some(vec![entry]),
        }
    }

    Ok(())
}

fn decode<'e, T: Deserialize<'e>>(
    entity: &'e Entity,
    kind: &'static str,
) -> Result<T, LedgerError> {
    entity.attributes().map_err(|e| LedgerError::MalformedEntity {
        kind,
        id: entity.id.clone(),
        reason: e.to_string(),
    })
}
