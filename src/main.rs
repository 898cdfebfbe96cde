use chrono::{NaiveDate, Utc};
use clap::{Args, Parser};
use ref_tally::ledger::Ledger;
use ref_tally::scoring::{PersonScore, ScoreMode};
use ref_tally::LedgerError;
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

/// Exactly one of these must be given
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ModeArgs {
    /// One point per game scored, regardless of role or division
    #[arg(long)]
    basic: bool,

    /// +1 point per increase in age group (8U - 1, 10U - 2, etc.)
    #[arg(long)]
    division_boost_only: bool,

    /// +1 point per increase in age group, counts double for Referee
    #[arg(long)]
    division_and_role_boost: bool,

    /// +1 point per increase in age group, counts double for Referee and double for tournament
    #[arg(long)]
    division_tournament_and_role_boost: bool,

    /// Dump all score modes to a CSV for comparison
    #[arg(long, value_name = "CSV_FILE")]
    dump_all_modes_to_csv: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum Mode {
    Score(ScoreMode),
    Csv(PathBuf),
}

impl ModeArgs {
    fn selected(self) -> Mode {
        if let Some(path) = self.dump_all_modes_to_csv {
            Mode::Csv(path)
        } else if self.division_boost_only {
            Mode::Score(ScoreMode::DivisionBoost)
        } else if self.division_and_role_boost {
            Mode::Score(ScoreMode::DivisionAndRoleBoost)
        } else if self.division_tournament_and_role_boost {
            Mode::Score(ScoreMode::DivisionTournamentAndRoleBoost)
        } else {
            Mode::Score(ScoreMode::Basic)
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ref-tally")]
#[command(about = "Referee assignment scoring CLI for exported game pages", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/ref-tally/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the exported game pages
    #[arg(long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// File name pattern for exported game pages
    #[arg(long)]
    pattern: Option<String>,

    /// Compute age groups as of this date instead of today
    #[arg(long, value_name = "YYYY-MM-DD")]
    as_of: Option<NaiveDate>,

    /// Print scores as tab-separated values
    #[arg(long, conflicts_with = "dump_all_modes_to_csv")]
    tsv: bool,

    #[command(flatten)]
    mode: ModeArgs,
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<LedgerError>().is_some() {
        EXIT_DATA
    } else {
        EXIT_IO
    }
}

/// Per-cell score breakdown for every ranked official
fn verbose_breakdown(
    ledger: &Ledger,
    scores: &[PersonScore],
    mode: ScoreMode,
    use_colors: bool,
) -> Result<String, LedgerError> {
    let mut sections = Vec::with_capacity(scores.len());
    for scored in scores {
        if let Some(person) = ledger.person(&scored.name) {
            let result = ref_tally::scoring::calculate_score(person, mode)?;
            sections.push(ref_tally::output::format_breakdown(&scored.name, &result, use_colors));
        }
    }
    Ok(sections.join("\n"))
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    // Load config
    let mut config = match ref_tally::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(dir) = cli.input_dir {
        config.input_dir = Some(dir);
    }
    if let Some(pattern) = cli.pattern {
        config.pattern = Some(pattern);
    }

    if let Err(errors) = ref_tally::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let today = cli.as_of.unwrap_or_else(|| Utc::now().date_naive());
    if cli.verbose {
        eprintln!("Age groups computed as of {}", today);
    }

    let ledger = match ref_tally::collect::collect_ledger(&config, today, cli.verbose) {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(exit_code_for(&e));
        }
    };

    match cli.mode.selected() {
        Mode::Score(mode) => {
            let scores = match ref_tally::scoring::score_report(&ledger, mode) {
                Ok(scores) => scores,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            let use_colors = ref_tally::output::should_use_colors();

            if cli.verbose {
                eprintln!("Scoring mode: {}", mode);
                match verbose_breakdown(&ledger, &scores, mode, use_colors) {
                    Ok(breakdown) if !breakdown.is_empty() => eprintln!("{}", breakdown),
                    Ok(_) => {}
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(EXIT_DATA);
                    }
                }
            }

            let output = if cli.tsv {
                ref_tally::output::format_tsv(&scores)
            } else if use_colors {
                ref_tally::output::format_scored_table(&scores, true)
            } else {
                ref_tally::output::format_plain(&scores)
            };
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Mode::Csv(path) => {
            let sheet = match ref_tally::output::build_spreadsheet(&ledger) {
                Ok(sheet) => sheet,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };
            if let Err(e) = ref_tally::output::save_csv(&sheet, &path) {
                eprintln!("Error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
            println!("Saved to {}", path.display());
        }
    }

    if cli.verbose {
        eprintln!("Done: {} official(s) in {:?}", ledger.len(), start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}
