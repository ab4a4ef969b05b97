//! Market labels.
//!
//! Raw market codes from the odds feed (`player_points_rebounds_assists`)
//! are shown as short abbreviations where one is known, and as title-cased
//! words otherwise.

use std::collections::HashMap;

/// Built-in abbreviations for common market codes.
const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("player_points", "PTS"),
    ("player_rebounds", "REB"),
    ("player_assists", "AST"),
    ("player_threes", "3PM"),
    ("player_steals", "STL"),
    ("player_blocks", "BLK"),
    ("player_turnovers", "TO"),
    ("player_points_rebounds_assists", "PRA"),
    ("player_points_rebounds", "P+R"),
    ("player_points_assists", "P+A"),
    ("player_rebounds_assists", "R+A"),
    ("player_blocks_steals", "B+S"),
    ("player_double_double", "DD"),
    ("player_triple_double", "TD"),
    ("player_pass_yds", "Pass Yds"),
    ("player_pass_tds", "Pass TDs"),
    ("player_rush_yds", "Rush Yds"),
    ("player_reception_yds", "Rec Yds"),
    ("player_receptions", "Rec"),
    ("player_anytime_td", "Anytime TD"),
    ("batter_hits", "Hits"),
    ("batter_total_bases", "TB"),
    ("batter_home_runs", "HR"),
    ("pitcher_strikeouts", "Ks"),
    ("player_shots_on_goal", "SOG"),
    ("player_goals", "Goals"),
    ("h2h", "Moneyline"),
    ("moneyline", "Moneyline"),
    ("spreads", "Spread"),
    ("totals", "Total"),
];

const STRIPPED_PREFIXES: &[&str] = &["player_", "batter_", "pitcher_", "game_"];

/// Market-code to display-label dictionary.
#[derive(Debug, Clone)]
pub struct MarketLabels {
    labels: HashMap<String, String>,
}

impl MarketLabels {
    /// Dictionary holding only the built-in labels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            labels: DEFAULT_LABELS
                .iter()
                .map(|(code, label)| ((*code).to_string(), (*label).to_string()))
                .collect(),
        }
    }

    /// Add or replace labels.
    #[must_use]
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (code, label) in overrides {
            self.labels
                .insert(code.into().to_ascii_lowercase(), label.into());
        }
        self
    }

    /// Known label for a code, if any.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        self.labels
            .get(&code.trim().to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Display label for a market code.
    #[must_use]
    pub fn humanize(&self, code: &str) -> String {
        match self.get(code) {
            Some(label) => label.to_string(),
            None => humanize_code(code),
        }
    }
}

impl Default for MarketLabels {
    fn default() -> Self {
        Self::new()
    }
}

/// Display label for a market code using the built-in dictionary.
#[must_use]
pub fn humanize_market(code: &str) -> String {
    MarketLabels::new().humanize(code)
}

fn humanize_code(code: &str) -> String {
    let lower = code.trim().to_ascii_lowercase();
    let stripped = STRIPPED_PREFIXES
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix))
        .unwrap_or(&lower);

    stripped
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
