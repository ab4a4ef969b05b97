//! Feed payloads shared by ingestion and CLI tests.

/// Three deals across two sports, mixing camelCase and snake_case fields.
///
/// - `lebron-pts`: NBA, +120 at FanDuel vs +110 at DraftKings, feed edge 6.2%,
///   fair price +105.
/// - `tatum-reb`: NBA, single book, no feed edge.
/// - `mahomes-yds`: NFL, -105 vs -115, feed edge 3.1%, earliest kickoff.
pub const DEALS_JSON: &str = r#"[
  {
    "id": "lebron-pts",
    "sport": "basketball_nba",
    "eventId": "evt-lal-bos",
    "playerName": "LeBron James",
    "market": "player_points",
    "line": 25.5,
    "side": "over",
    "bestPrice": 120,
    "bestBook": "FanDuel",
    "avgPrice": 108,
    "numBooks": 2,
    "priceImprovement": 6.2,
    "fairAmerican": 105,
    "startTime": "2026-10-19T23:30:00Z",
    "selectionId": "sel-lebron",
    "homeTeam": "BOS",
    "awayTeam": "LAL",
    "allBooks": [
      {"book": "fanduel", "price": 120, "link": "https://sportsbook.fanduel.com/lebron"},
      {"book": "draftkings", "price": 110}
    ]
  },
  {
    "id": "tatum-reb",
    "sport": "nba",
    "event_id": "evt-lal-bos",
    "player_name": "Jayson Tatum",
    "market": "player_rebounds",
    "line": 8.5,
    "side": "under",
    "best_price": -115,
    "best_book": "draftkings",
    "selection_id": "sel-tatum",
    "all_books": [{"book": "draftkings", "price": -115}]
  },
  {
    "id": "mahomes-yds",
    "sport": "nfl",
    "event_id": "evt-kc-buf",
    "player_name": "Patrick Mahomes",
    "market": "player_pass_yds",
    "line": 274.5,
    "side": "over",
    "best_price": -105,
    "best_book": "caesars",
    "average_price": -112,
    "price_improvement": 3.1,
    "start_time": "2026-10-19T17:00:00Z",
    "selection_id": "sel-mahomes",
    "all_books": [
      {"book": "caesars", "price": -105},
      {"book": "betmgm", "price": -115}
    ]
  }
]"#;
