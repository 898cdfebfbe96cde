use super::age_group::AgeGroup;
use crate::error::LedgerError;
use crate::reconcile::Games;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeasonType {
    RegularSeason,
    Tournament,
}

impl SeasonType {
    pub fn from_tournament_flag(is_tournament: bool) -> Self {
        if is_tournament {
            SeasonType::Tournament
        } else {
            SeasonType::RegularSeason
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeasonType::RegularSeason => "Regular Season",
            SeasonType::Tournament => "Tournament",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One ledger cell: season type, age group and role
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub season: SeasonType,
    pub age_group: AgeGroup,
    pub role: String,
}

impl Cell {
    pub fn new(season: SeasonType, age_group: AgeGroup, role: impl Into<String>) -> Self {
        Self {
            season,
            age_group,
            role: role.into(),
        }
    }

    /// Spreadsheet column name, e.g. "Tournament 10U Referee"
    pub fn column_name(&self) -> String {
        format!("{} {} {}", self.season, self.age_group, self.role)
    }
}

/// Games officiated by one person, counted per cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonLedger {
    counts: BTreeMap<Cell, u32>,
}

impl PersonLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more game in `cell`
    pub fn record(&mut self, cell: Cell) {
        *self.counts.entry(cell).or_insert(0) += 1;
    }

    pub fn cells(&self) -> impl Iterator<Item = (&Cell, u32)> {
        self.counts.iter().map(|(cell, count)| (cell, *count))
    }

    /// Count for a cell, zero when never recorded
    pub fn count(&self, cell: &Cell) -> u32 {
        self.counts.get(cell).copied().unwrap_or(0)
    }

    /// Total games across every cell
    pub fn games(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }
}

/// Per-person ledger keyed by display name.
///
/// Iteration is ordered by name, so everything derived from it is
/// deterministic regardless of the order documents were loaded in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    people: BTreeMap<String, PersonLedger>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every game roster into the ledger.
    ///
    /// Games without a roster (cancelled, postponed or nobody accepted)
    /// contribute nothing.
    pub fn assemble(games: &Games, today: NaiveDate) -> Result<Self, LedgerError> {
        let mut ledger = Ledger::new();

        for game in games.values() {
            if game.roster().is_empty() {
                continue;
            }
            let Some(division) = game.division.as_deref() else {
                continue;
            };
            let age_group = AgeGroup::from_division(division, today)?;
            let season = SeasonType::from_tournament_flag(game.is_tournament);

            for entry in game.roster() {
                let cell = Cell::new(season, age_group.clone(), entry.role.clone());
                ledger.record(entry.display_name(), cell);
            }
        }

        Ok(ledger)
    }

    pub fn record(&mut self, name: String, cell: Cell) {
        self.people.entry(name).or_insert_with(PersonLedger::new).record(cell);
    }

    pub fn person(&self, name: &str) -> Option<&PersonLedger> {
        self.people.get(name)
    }

    pub fn people(&self) -> impl Iterator<Item = (&str, &PersonLedger)> {
        self.people.iter().map(|(name, person)| (name.as_str(), person))
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
