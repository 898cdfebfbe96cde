use crate::error::LedgerError;
use crate::ledger::AgeGroup;

/// Points per game for each age group, before role and tournament boosts.
pub static BASE_SCORES: [(&str, u64); 10] = [
    ("07U", 1),
    ("08U", 1),
    ("09U", 2),
    ("10U", 2),
    ("12U", 3),
    ("14U", 4),
    ("15U", 5),
    ("16U", 5),
    ("18U", 6),
    ("19U", 6),
];

/// Regulation game length in minutes for each age group.
pub static GAME_MINUTES: [(&str, u64); 10] = [
    ("07U", 40),
    ("08U", 40),
    ("09U", 50),
    ("10U", 50),
    ("12U", 60),
    ("14U", 70),
    ("15U", 80),
    ("16U", 80),
    ("18U", 90),
    ("19U", 90),
];

fn lookup(table: &[(&str, u64)], age_group: &AgeGroup) -> Result<u64, LedgerError> {
    table
        .iter()
        .find(|(key, _)| *key == age_group.as_str())
        .map(|(_, value)| *value)
        .ok_or_else(|| LedgerError::UnrecognizedDivision(age_group.to_string()))
}

pub fn base_score(age_group: &AgeGroup) -> Result<u64, LedgerError> {
    lookup(&BASE_SCORES, age_group)
}

pub fn minutes_per_game(age_group: &AgeGroup) -> Result<u64, LedgerError> {
    lookup(&GAME_MINUTES, age_group)
}

/// Center referee, as opposed to an AR or 4th official
pub fn is_referee(role: &str) -> bool {
    matches!(role, "CR" | "Referee")
}
