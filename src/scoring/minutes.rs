use super::tables::{is_referee, minutes_per_game};
use crate::error::LedgerError;
use crate::ledger::PersonLedger;

const TWENTIETHS: u64 = 20;

/// Share of a game spent on the pitch, in twentieths.
///
/// Referee 100%, AR 80%, anything else (4th official and the like) 75%.
/// Every fraction is a whole number of twentieths, so accumulating in
/// twentieths of a minute keeps the sum exact.
fn participation_twentieths(role: &str) -> u64 {
    if is_referee(role) {
        20
    } else if role.contains("AR") {
        16
    } else {
        15
    }
}

/// Estimated minutes on the pitch, rounded half-to-even.
pub fn estimate_minutes(person: &PersonLedger) -> Result<u64, LedgerError> {
    let mut total_twentieths = 0u64;

    for (cell, games) in person.cells() {
        let minutes = minutes_per_game(&cell.age_group)?;
        total_twentieths += minutes * games as u64 * participation_twentieths(&cell.role);
    }

    Ok(round_half_even(total_twentieths, TWENTIETHS))
}

fn round_half_even(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;

    match (remainder * 2).cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient % 2 == 0 => quotient,
        std::cmp::Ordering::Equal => quotient + 1,
    }
}
