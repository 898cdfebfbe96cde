use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::config::Config;
use crate::documents::{self, LoadedDocument, SkippedDocument};
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::reconcile::{self, DivisionAliases};

/// Reconcile loaded documents and fold them into a ledger.
pub fn build_ledger(
    documents: &[LoadedDocument],
    aliases: &DivisionAliases,
    today: NaiveDate,
    verbose: bool,
) -> Result<Ledger, LedgerError> {
    let games = reconcile::reconcile(documents, aliases)?;

    if verbose {
        let staffed = games.values().filter(|g| !g.roster().is_empty()).count();
        let excluded = games.values().filter(|g| g.is_excluded()).count();
        eprintln!(
            "Resolved {} game(s): {} with officials, {} cancelled or postponed",
            games.len(),
            staffed,
            excluded
        );
    }

    Ledger::assemble(&games, today)
}

/// Discover and load the configured pages, then build the ledger.
///
/// Skipped documents are reported on stderr but never stop the run. Any
/// [`LedgerError`] comes back inside the `anyhow::Error` so callers can
/// tell data problems apart from I/O problems.
///
/// This function is called from main.rs for every mode.
pub fn collect_ledger(config: &Config, today: NaiveDate, verbose: bool) -> Result<Ledger> {
    let input_dir = config.input_dir();
    let paths = documents::discover(&input_dir, config.pattern())?;

    if verbose {
        eprintln!(
            "Found {} file(s) matching '{}' in {}",
            paths.len(),
            config.pattern(),
            input_dir.display()
        );
    }

    let report = documents::load_documents(&paths)?;
    for skipped in &report.skipped {
        warn_skipped(skipped);
    }

    if verbose {
        let games: usize = report.documents.iter().map(|d| d.document.data.len()).sum();
        eprintln!(
            "Loaded {} document(s) with {} game(s), skipped {}",
            report.documents.len(),
            games,
            report.skipped.len()
        );
    }

    let aliases = config.division_aliases();
    let ledger = build_ledger(&report.documents, &aliases, today, verbose)?;

    if verbose {
        eprintln!("Ledger holds {} official(s)", ledger.len());
    }

    Ok(ledger)
}

fn warn_skipped(skipped: &SkippedDocument) {
    let message = format!("Skipping {}: {}", skipped.source.display(), skipped.reason);
    if std::io::stderr().is_terminal() {
        eprintln!("{}", message.yellow());
    } else {
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PAGE: &str = r#"{
        "data": [{
            "type": "game", "id": "G1",
            "attributes": {"status": "normal"},
            "relationships": {
                "game_level": {"data": {"type": "game_level", "id": "L1"}},
                "assignments_game": {"data": [{"type": "game_assignment", "id": "A1"}]}
            }
        }],
        "included": [
            {"type": "game_level", "id": "L1", "attributes": {
                "game_level": "U8C", "schedule_name": "Spring", "labels": {"1": "CR"}}},
            {"type": "game_assignment", "id": "A1",
             "attributes": {
                "external_game_id": "G1", "status": "accepted", "official_label_col": 1},
             "relationships": {"event_role": {"data": {"type": "event_role", "id": "R1"}}}},
            {"type": "event_role", "id": "R1", "attributes": {"user_id": 3}},
            {"type": "user", "id": "3", "attributes": {"first_name": "Ana", "last_name": "Diaz"}}
        ]
    }"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    #[test]
    fn test_collect_ledger_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("games1.json"), PAGE).unwrap();
        fs::write(dir.path().join("games2.json"), "not json").unwrap();

        let config = Config {
            input_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let ledger = collect_ledger(&config, today(), false).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.person("Ana Diaz").unwrap().games(), 1);
    }

    #[test]
    fn test_collect_ledger_surfaces_ledger_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("games1.json"), PAGE).unwrap();
        fs::write(dir.path().join("games2.json"), PAGE).unwrap();

        let config = Config {
            input_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let err = collect_ledger(&config, today(), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::DuplicateGame { .. })
        ));
    }

    #[test]
    fn test_collect_ledger_keeps_default_alias_with_configured_ones() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("games1.json"), PAGE).unwrap();

        let mut aliases = std::collections::BTreeMap::new();
        aliases.insert("U10G".to_string(), "10UG".to_string());
        let config = Config {
            input_dir: Some(dir.path().to_path_buf()),
            division_aliases: Some(aliases),
            ..Config::default()
        };
        let ledger = collect_ledger(&config, today(), false).unwrap();
        let person = ledger.person("Ana Diaz").unwrap();
        assert_eq!(crate::scoring::ScoreMode::DivisionBoost.score(person).unwrap(), 1);
    }

    #[test]
    fn test_collect_ledger_fails_on_undecodable_entity() {
        let dir = TempDir::new().unwrap();
        let page = PAGE.replacen(
            r#""included": ["#,
            r#""included": [{"type": "user", "id": null},"#,
            1,
        );
        fs::write(dir.path().join("games1.json"), page).unwrap();

        let config = Config {
            input_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let err = collect_ledger(&config, today(), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::UndecodableEntity { .. })
        ));
    }

    #[test]
    fn test_build_ledger_uses_aliases() {
        let documents = vec![LoadedDocument {
            source: PathBuf::from("games1.json"),
            document: documents::parse_document(PAGE).unwrap(),
        }];
        let aliases = reconcile::default_division_aliases();
        let ledger = build_ledger(&documents, &aliases, today(), false).unwrap();
        let (_, person) = ledger.people().next().unwrap();
        let (cell, _) = person.cells().next().unwrap();
        assert_eq!(cell.age_group.as_str(), "08U");
    }
}
