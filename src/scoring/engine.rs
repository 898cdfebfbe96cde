use super::tables::{base_score, is_referee};
use crate::error::LedgerError;
use crate::ledger::{Cell, Ledger, PersonLedger, SeasonType};
use std::fmt;

/// The four ways of turning a ledger into a single score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreMode {
    /// One point per game
    Basic,
    /// Points per game scale with the age group
    DivisionBoost,
    /// Age group scaling, doubled when centering
    DivisionAndRoleBoost,
    /// Age group scaling, doubled when centering, doubled again in tournaments
    DivisionTournamentAndRoleBoost,
}

impl ScoreMode {
    pub const ALL: [ScoreMode; 4] = [
        ScoreMode::Basic,
        ScoreMode::DivisionBoost,
        ScoreMode::DivisionAndRoleBoost,
        ScoreMode::DivisionTournamentAndRoleBoost,
    ];

    /// Column heading used in the spreadsheet export
    pub fn column_label(&self) -> &'static str {
        match self {
            ScoreMode::Basic => "Basic score (1 per game)",
            ScoreMode::DivisionBoost => "+1 point per age group",
            ScoreMode::DivisionAndRoleBoost => "+1 point per age group * 2 points for centering",
            ScoreMode::DivisionTournamentAndRoleBoost => {
                "+1 point per age group * 2 points for centering * 2 for tournament"
            }
        }
    }

    /// Points for one game in `cell` under this mode
    pub fn points_per_game(&self, cell: &Cell) -> Result<u64, LedgerError> {
        let role_modifier = if is_referee(&cell.role) { 2 } else { 1 };
        let tournament_modifier = if cell.season == SeasonType::Tournament { 2 } else { 1 };

        Ok(match self {
            ScoreMode::Basic => 1,
            ScoreMode::DivisionBoost => base_score(&cell.age_group)?,
            ScoreMode::DivisionAndRoleBoost => base_score(&cell.age_group)? * role_modifier,
            ScoreMode::DivisionTournamentAndRoleBoost => {
                base_score(&cell.age_group)? * role_modifier * tournament_modifier
            }
        })
    }

    pub fn score(&self, person: &PersonLedger) -> Result<u64, LedgerError> {
        person
            .cells()
            .map(|(cell, games)| -> Result<u64, LedgerError> {
                Ok(games as u64 * self.points_per_game(cell)?)
            })
            .sum()
    }
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoreMode::Basic => "basic",
            ScoreMode::DivisionBoost => "division boost",
            ScoreMode::DivisionAndRoleBoost => "division and role boost",
            ScoreMode::DivisionTournamentAndRoleBoost => "division, tournament and role boost",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct CellContribution {
    pub label: String, // e.g. "Tournament 10U Referee"
    pub games: u32,
    pub points_per_game: u64,
    pub points: u64,
}

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub score: u64,
    pub breakdown: Vec<CellContribution>,
}

pub fn calculate_score(person: &PersonLedger, mode: ScoreMode) -> Result<ScoreResult, LedgerError> {
    let mut score = 0;
    let mut breakdown = Vec::new();

    for (cell, games) in person.cells() {
        let points_per_game = mode.points_per_game(cell)?;
        let points = games as u64 * points_per_game;
        score += points;
        breakdown.push(CellContribution {
            label: cell.column_name(),
            games,
            points_per_game,
            points,
        });
    }

    Ok(ScoreResult { score, breakdown })
}

pub fn basic_score(person: &PersonLedger) -> u64 {
    person.games()
}

pub fn division_boost_score(person: &PersonLedger) -> Result<u64, LedgerError> {
    ScoreMode::DivisionBoost.score(person)
}

pub fn division_and_role_boost_score(person: &PersonLedger) -> Result<u64, LedgerError> {
    ScoreMode::DivisionAndRoleBoost.score(person)
}

pub fn division_tournament_and_role_boost_score(person: &PersonLedger) -> Result<u64, LedgerError> {
    ScoreMode::DivisionTournamentAndRoleBoost.score(person)
}

/// A person's score under one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonScore {
    pub name: String,
    pub score: u64,
}

/// Score everyone in the ledger, highest first.
///
/// The sort is stable, so people with equal scores stay in ledger (name) order.
pub fn score_report(ledger: &Ledger, mode: ScoreMode) -> Result<Vec<PersonScore>, LedgerError> {
    let mut scores = ledger
        .people()
        .map(|(name, person)| -> Result<PersonScore, LedgerError> {
            Ok(PersonScore {
                name: name.to_string(),
                score: mode.score(person)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    scores.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(scores)
}
