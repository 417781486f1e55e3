use std::io::IsTerminal;
use owo_colors::OwoColorize;

use crate::scoring::{QuestionContribution, ScoringResult, SectionScore};
use crate::sections::SectionFlags;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with at most two decimals, trimming trailing zeros
/// (6 -> "6", 6.5 -> "6.5", 6.666 -> "6.67")
pub fn format_score(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a section percentage, "-" when the section has no total yet
pub fn format_percentage(tally: &SectionScore) -> String {
    match tally.percentage() {
        Some(pct) => format!("{:.0}%", pct),
        None => "-".to_string(),
    }
}

/// Format section scores as a table, one line per declared section.
/// Columns: Section, Score/Total, Percentage. Disabled sections are listed
/// without scores.
pub fn format_results_table(
    result: &ScoringResult,
    flags: &SectionFlags,
    use_colors: bool,
) -> String {
    if flags.is_empty() {
        return "No sections declared.".to_string();
    }

    let name_width = flags.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    flags
        .iter()
        .map(|(name, _)| match result.get(name) {
            Some(tally) => format_section_line(name, tally, name_width, use_colors),
            None => {
                let line = format!("{:<width$}  disabled", name, width = name_width);
                if use_colors {
                    line.dimmed().to_string()
                } else {
                    line
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_section_line(
    name: &str,
    tally: &SectionScore,
    name_width: usize,
    use_colors: bool,
) -> String {
    let ratio = format!("{}/{}", format_score(tally.score), format_score(tally.total));
    let pct = format_percentage(tally);

    if use_colors {
        let pct_colored = match tally.percentage() {
            Some(p) if p >= 75.0 => pct.green().to_string(),
            Some(p) if p >= 40.0 => pct.yellow().to_string(),
            Some(_) => pct.red().to_string(),
            None => pct.dimmed().to_string(),
        };
        format!(
            "{}  {:>12}  {:>5}",
            format!("{:<width$}", name, width = name_width).bold(),
            ratio,
            pct_colored
        )
    } else {
        format!(
            "{:<width$}  {:>12}  {:>5}",
            name,
            ratio,
            pct,
            width = name_width
        )
    }
}

/// Format per-question contributions, grouped under their section heading
pub fn format_breakdown(contributions: &[QuestionContribution], use_colors: bool) -> String {
    if contributions.is_empty() {
        return "No scored questions.".to_string();
    }

    let mut lines = Vec::new();
    let mut current_section: Option<&str> = None;

    for contribution in contributions {
        if current_section != Some(contribution.section.as_str()) {
            current_section = Some(contribution.section.as_str());
            if use_colors {
                lines.push(contribution.section.cyan().to_string());
            } else {
                lines.push(contribution.section.clone());
            }
        }

        lines.push(format!(
            "  {}: +{}/+{} ({})",
            contribution.question,
            format_score(contribution.score_delta),
            format_score(contribution.total_delta),
            contribution.note
        ));
    }

    lines.join("\n")
}
