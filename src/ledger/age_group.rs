use crate::error::LedgerError;
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Month the age-group year rolls over (the fall season starts in August)
const SEASON_ROLLOVER_MONTH: u32 = 8;

/// Map a raw division code to a canonical age group like "10U".
///
/// Codes with a `U` in their first three characters are already canonical
/// and come back untouched, qualifier included ("08UC"). Anything else is read
/// as a four-digit birth year and converted relative to `today`.
pub fn normalize_age_group(division: &str, today: NaiveDate) -> Result<String, LedgerError> {
    if division.chars().take(3).any(|c| c == 'U') {
        return Ok(division.to_string());
    }

    let year_part: String = division.chars().take(4).collect();
    let birth_year: i32 = year_part
        .trim()
        .parse()
        .map_err(|_| LedgerError::UnparseableDivision(division.to_string()))?;

    let mut delta = today.year() - birth_year;
    if today.month() >= SEASON_ROLLOVER_MONTH {
        delta += 1;
    }
    Ok(format!("{:0>2}U", delta))
}

/// Canonical three-character age group ("08U", "10U", ...), the key the
/// ledger and every score table use.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgeGroup(String);

impl AgeGroup {
    pub fn from_division(division: &str, today: NaiveDate) -> Result<Self, LedgerError> {
        let canonical = normalize_age_group(division, today)?;
        Ok(AgeGroup(canonical.chars().take(3).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
