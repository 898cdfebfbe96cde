use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::path::Path;

use crate::error::LedgerError;
use crate::ledger::{Ledger, PersonLedger};
use crate::scoring::{estimate_minutes, ScoreMode};

pub const NAME_COLUMN: &str = "Name";
pub const MINUTES_COLUMN: &str = "Total minutes";

/// One person's flattened ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetRow {
    pub name: String,
    pub minutes: u64,
    /// Scores in [`ScoreMode::ALL`] order
    pub scores: Vec<u64>,
    /// Game counts aligned with [`Spreadsheet::role_columns`]
    pub role_counts: Vec<u32>,
}

/// Every person's ledger flattened onto one shared set of columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spreadsheet {
    pub role_columns: Vec<String>,
    pub rows: Vec<SpreadsheetRow>,
}

impl Spreadsheet {
    /// Fixed columns followed by the sorted "<season> <age group> <role>" columns
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![NAME_COLUMN.to_string(), MINUTES_COLUMN.to_string()];
        headers.extend(ScoreMode::ALL.iter().map(|m| m.column_label().to_string()));
        headers.extend(self.role_columns.iter().cloned());
        headers
    }
}

impl SpreadsheetRow {
    /// Cell text in [`Spreadsheet::headers`] order
    pub fn values(&self) -> Vec<String> {
        let mut values = vec![self.name.clone(), self.minutes.to_string()];
        values.extend(self.scores.iter().map(|s| s.to_string()));
        values.extend(self.role_counts.iter().map(|c| c.to_string()));
        values
    }
}

/// Union of every "<season> <age group> <role>" combination in the ledger, sorted.
pub fn role_columns(ledger: &Ledger) -> Vec<String> {
    let columns: BTreeSet<String> = ledger
        .people()
        .flat_map(|(_, person)| person.cells().map(|(cell, _)| cell.column_name()))
        .collect();
    columns.into_iter().collect()
}

/// Flatten one person against the global column set; missing cells are 0.
pub fn shape_row(
    name: &str,
    person: &PersonLedger,
    columns: &[String],
) -> Result<SpreadsheetRow, LedgerError> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for (cell, games) in person.cells() {
        *counts.entry(cell.column_name()).or_insert(0) += games;
    }

    let scores = ScoreMode::ALL
        .iter()
        .map(|mode| mode.score(person))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SpreadsheetRow {
        name: name.to_string(),
        minutes: estimate_minutes(person)?,
        scores,
        role_counts: columns
            .iter()
            .map(|column| counts.get(column).copied().unwrap_or(0))
            .collect(),
    })
}

/// Build the full export, rows sorted by name ignoring case.
pub fn build_spreadsheet(ledger: &Ledger) -> Result<Spreadsheet, LedgerError> {
    let role_columns = role_columns(ledger);

    let mut rows = ledger
        .people()
        .map(|(name, person)| shape_row(name, person, &role_columns))
        .collect::<Result<Vec<_>, _>>()?;
    rows.sort_by_key(|row| row.name.to_lowercase());

    Ok(Spreadsheet { role_columns, rows })
}

/// Write the spreadsheet as CSV with a header row
pub fn write_csv<W: Write>(sheet: &Spreadsheet, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(sheet.headers())
        .context("Failed to write CSV header")?;
    for row in &sheet.rows {
        csv_writer
            .write_record(row.values())
            .with_context(|| format!("Failed to write CSV row for {}", row.name))?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Save the spreadsheet to `path` atomically
///
/// Uses atomic-write-file so a failed run never leaves a half-written file.
pub fn save_csv(sheet: &Spreadsheet, path: &Path) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    write_csv(sheet, &mut file)?;

    file.commit()
        .with_context(|| format!("Failed to save CSV to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{AgeGroup, Cell, SeasonType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn cell(season: SeasonType, group: &str, role: &str) -> Cell {
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        Cell::new(season, AgeGroup::from_division(group, today).unwrap(), role)
    }

    fn cell_of(sheet: &Spreadsheet, name: &str, column: &str) -> Option<String> {
        let row = sheet.rows.iter().find(|r| r.name == name)?;
        let position = sheet.headers().iter().position(|h| h == column)?;
        row.values().into_iter().nth(position)
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.record("zoe Park".to_string(), cell(SeasonType::Tournament, "12U", "AR"));
        ledger.record("Pat Lee".to_string(), cell(SeasonType::RegularSeason, "10U", "Referee"));
        ledger.record("Pat Lee".to_string(), cell(SeasonType::RegularSeason, "10U", "Referee"));
        ledger.record("Amy Cole".to_string(), cell(SeasonType::RegularSeason, "18U", "AR"));
        ledger
    }

    #[test]
    fn test_role_columns_are_global_and_sorted() {
        let columns = role_columns(&sample_ledger());
        assert_eq!(
            columns,
            vec![
                "Regular Season 10U Referee",
                "Regular Season 18U AR",
                "Tournament 12U AR",
            ]
        );
    }

    #[test]
    fn test_headers() {
        let sheet = build_spreadsheet(&sample_ledger()).unwrap();
        let headers = sheet.headers();
        assert_eq!(headers[0], "Name");
        assert_eq!(headers[1], "Total minutes");
        assert_eq!(headers[2], "Basic score (1 per game)");
        assert_eq!(
            headers[5],
            "+1 point per age group * 2 points for centering * 2 for tournament"
        );
        assert_eq!(headers.len(), 6 + 3);
    }

    #[test]
    fn test_rows_sorted_case_insensitively() {
        let sheet = build_spreadsheet(&sample_ledger()).unwrap();
        let names: Vec<_> = sheet.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Amy Cole", "Pat Lee", "zoe Park"]);
    }

    #[test]
    fn test_every_row_has_every_column() {
        let sheet = build_spreadsheet(&sample_ledger()).unwrap();
        for row in &sheet.rows {
            assert_eq!(row.role_counts.len(), sheet.role_columns.len());
        }
        assert_eq!(cell_of(&sheet, "Amy Cole", "Tournament 12U AR").as_deref(), Some("0"));
        assert_eq!(cell_of(&sheet, "Pat Lee", "Regular Season 10U Referee").as_deref(), Some("2"));
    }

    #[test]
    fn test_row_values() {
        let sheet = build_spreadsheet(&sample_ledger()).unwrap();
        assert_eq!(cell_of(&sheet, "Pat Lee", "Total minutes").as_deref(), Some("100"));
        assert_eq!(cell_of(&sheet, "Pat Lee", "Basic score (1 per game)").as_deref(), Some("2"));
        assert_eq!(cell_of(&sheet, "Amy Cole", "Total minutes").as_deref(), Some("72"));
        let label = ScoreMode::DivisionTournamentAndRoleBoost.column_label();
        assert_eq!(cell_of(&sheet, "zoe Park", label).as_deref(), Some("6"));
    }

    #[test]
    fn test_values_follow_headers() {
        let sheet = build_spreadsheet(&sample_ledger()).unwrap();
        for row in &sheet.rows {
            assert_eq!(row.values().len(), sheet.headers().len());
        }
    }

    #[test]
    fn test_write_csv() {
        let sheet = build_spreadsheet(&sample_ledger()).unwrap();
        let mut buffer = Vec::new();
        write_csv(&sheet, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name,Total minutes,Basic score (1 per game),"));
        assert_eq!(lines[1], "Amy Cole,72,1,6,6,6,0,1,0");
    }

    #[test]
    fn test_empty_ledger_writes_header_only() {
        let sheet = build_spreadsheet(&Ledger::new()).unwrap();
        let mut buffer = Vec::new();
        write_csv(&sheet, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_save_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.csv");
        let sheet = build_spreadsheet(&sample_ledger()).unwrap();
        save_csv(&sheet, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Pat Lee,100,2,4,8,8,2,0,0"));
    }
}
