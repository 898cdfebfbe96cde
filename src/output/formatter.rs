use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{PersonScore, ScoreResult};

const EMPTY_REPORT: &str = "No officials found.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format scores as a ranked table with columns: Index, Score, Name
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column: right-aligned, wide enough for the largest score
pub fn format_scored_table(scores: &[PersonScore], use_colors: bool) -> String {
    if scores.is_empty() {
        return EMPTY_REPORT.to_string();
    }

    let term_width = get_terminal_width();
    let index_width = scores.len().to_string().len() + 1;
    let score_width = scores
        .iter()
        .map(|s| s.score.to_string().len())
        .max()
        .unwrap_or(1);
    let separator = "  ";
    let fixed_width = index_width + 1 + score_width + separator.len();

    scores
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            // 1-based index, right-aligned with trailing dot
            let index_str = format!("{:>width$}.", idx + 1, width = index_width - 1);
            let score_padded = format!("{:>width$}", scored.score, width = score_width);

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&scored.name, width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_name(&scored.name, 20),
                // No terminal (pipe), don't truncate
                None => scored.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name.cyan()
                )
            } else {
                format!("{} {}{}{}", index_str, score_padded, separator, name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scores as "Name: score" lines
pub fn format_plain(scores: &[PersonScore]) -> String {
    scores
        .iter()
        .map(|s| format!("{}: {}", s.name, s.score))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scores as tab-separated values for scripting
/// Columns: score, name (no headers, no colors)
pub fn format_tsv(scores: &[PersonScore]) -> String {
    scores
        .iter()
        .map(|s| format!("{}\t{}", s.score, s.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-cell breakdown of one person's score (verbose mode)
pub fn format_breakdown(name: &str, result: &ScoreResult, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(result.breakdown.len() + 1);
    if use_colors {
        lines.push(format!("{}: {}", name.bold(), result.score.bold()));
    } else {
        lines.push(format!("{}: {}", name, result.score));
    }

    for contribution in &result.breakdown {
        lines.push(format!(
            "  {}: {} x {} = {}",
            contribution.label,
            contribution.games,
            contribution.points_per_game,
            contribution.points
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::engine::CellContribution;

    fn scores() -> Vec<PersonScore> {
        vec![
            PersonScore { name: "Pat Lee".to_string(), score: 120 },
            PersonScore { name: "Sam Ray".to_string(), score: 8 },
        ]
    }

    #[test]
    fn test_format_scored_table_empty() {
        assert_eq!(format_scored_table(&[], false), "No officials found.");
    }

    #[test]
    fn test_format_scored_table_alignment() {
        let result = format_scored_table(&scores(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1. 120"));
        assert!(lines[1].starts_with("2.   8"));
        assert!(lines[0].ends_with("Pat Lee"));
        assert!(lines[1].ends_with("Sam Ray"));
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(&scores()), "Pat Lee: 120\nSam Ray: 8");
        assert_eq!(format_plain(&[]), "");
    }

    #[test]
    fn test_format_tsv() {
        let result = format_tsv(&scores());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines[0], "120\tPat Lee");
        assert_eq!(lines[1].split('\t').count(), 2);
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(truncate_name("Bartholomew Featherstonehaugh", 15), "Bartholomew ...");
        assert_eq!(truncate_name("José Núñez", 10), "José Núñez");
        assert_eq!(truncate_name("Hello world", 3), "Hel");
    }

    #[test]
    fn test_format_breakdown() {
        let result = ScoreResult {
            score: 12,
            breakdown: vec![
                CellContribution {
                    label: "Regular Season 10U Referee".to_string(),
                    games: 2,
                    points_per_game: 4,
                    points: 8,
                },
                CellContribution {
                    label: "Tournament 10U AR".to_string(),
                    games: 1,
                    points_per_game: 4,
                    points: 4,
                },
            ],
        };
        let text = format_breakdown("Pat Lee", &result, false);
        assert_eq!(
            text,
            "Pat Lee: 12\n  Regular Season 10U Referee: 2 x 4 = 8\n  Tournament 10U AR: 1 x 4 = 4"
        );
    }
}
