//! Display formatting for table cells and cards.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::deal::Sport;
use super::odds::MISSING;

const NAME_SUFFIXES: &[&str] = &["jr", "jr.", "sr", "sr.", "ii", "iii", "iv", "v"];

/// Format an edge percentage with an explicit sign, e.g. `+4.8%`.
#[must_use]
pub fn format_edge(edge: Option<f64>) -> String {
    match edge {
        Some(e) if e.is_finite() => format!("{e:+.1}%"),
        _ => MISSING.to_string(),
    }
}

/// Format a probability in `[0, 1]` as a percentage, e.g. `52.4%`.
#[must_use]
pub fn format_probability(probability: Option<f64>) -> String {
    match probability {
        Some(p) if p.is_finite() => format!("{:.1}%", p * 100.0),
        _ => MISSING.to_string(),
    }
}

/// Shorten a player name to first initial and last name.
///
/// `"LeBron James"` becomes `"L. James"`, generational suffixes are kept
/// (`"Jaren Jackson Jr."` becomes `"J. Jackson Jr."`), and single-word names
/// are returned unchanged.
///
/// A suffix is only recognized after at least two name tokens. In a
/// two-token name the last token is always the surname, so `"Malcolm V"`
/// becomes `"M. V"` and `"Nene Jr."` becomes `"N. Jr."`.
#[must_use]
pub fn shorten_player_name(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.len() < 2 {
        return parts.first().map(|s| (*s).to_string()).unwrap_or_default();
    }

    let (rest, suffix) = match parts.split_last() {
        Some((last, rest))
            if rest.len() >= 2 && NAME_SUFFIXES.contains(&last.to_ascii_lowercase().as_str()) =>
        {
            (rest, Some(*last))
        }
        _ => (parts.as_slice(), None),
    };

    let first = rest[0];
    let last = rest[rest.len() - 1];
    let initial = first.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();

    match suffix {
        Some(suffix) => format!("{initial}. {last} {suffix}"),
        None => format!("{initial}. {last}"),
    }
}

/// Format a line value, e.g. `24.5`, or an empty string when absent.
#[must_use]
pub fn format_line(line: Option<f64>) -> String {
    match line {
        Some(l) if l.fract() == 0.0 => format!("{l:.0}"),
        Some(l) => format!("{l}"),
        None => String::new(),
    }
}

/// Format a game start time in the given timezone, e.g. `Sun 10/19 1:00 PM EDT`.
#[must_use]
pub fn format_game_time(start: Option<DateTime<Utc>>, tz: Tz) -> String {
    match start {
        Some(start) => start.with_timezone(&tz).format("%a %-m/%-d %-I:%M %p %Z").to_string(),
        None => MISSING.to_string(),
    }
}

/// Logo URL for a team: `{base}/{sport}/{abbr}.svg`.
///
/// Returns `None` for a blank abbreviation.
#[must_use]
pub fn team_logo_url(base: &str, sport: &Sport, abbreviation: &str) -> Option<String> {
    let abbr = abbreviation.trim();
    if abbr.is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}/{}.svg",
        base.trim_end_matches('/'),
        sport.key(),
        abbr.to_ascii_lowercase()
    ))
}
