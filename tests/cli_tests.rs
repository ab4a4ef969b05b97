//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use support::files::{temp_config, temp_json};
use support::fixtures::DEALS_JSON;

fn edgefinder() -> Command {
    let mut cmd = cargo_bin_cmd!("edgefinder");
    cmd.env_remove("RUST_LOG").env_remove("EDGEFINDER_STATE");
    cmd
}

#[test]
fn test_help() {
    edgefinder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deals"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("kelly"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_convert_positive_odds() {
    edgefinder()
        .args(["convert", "+150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.50"))
        .stdout(predicate::str::contains("40.0%"));
}

#[test]
fn test_convert_negative_odds_as_json() {
    edgefinder()
        .args(["--json", "convert", "-200"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"conversion""#))
        .stdout(predicate::str::contains(r#""decimal":1.5"#));
}

#[test]
fn test_convert_rejects_zero() {
    edgefinder()
        .args(["convert", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be zero"));
}

#[test]
fn test_kelly_recommends_stake() {
    // +120 vs fair +100: b = 1.2, p = 0.5, full Kelly = 8.33%, quarter = 2.08%
    edgefinder()
        .args([
            "kelly",
            "--config",
            "/nonexistent/edgefinder.toml",
            "--bankroll",
            "1000",
            "--best",
            "+120",
            "--fair",
            "+100",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("$20.83"));
}

#[test]
fn test_kelly_without_edge_shows_no_stake() {
    edgefinder()
        .args([
            "kelly",
            "--config",
            "/nonexistent/edgefinder.toml",
            "--bankroll",
            "1000",
            "--best",
            "-110",
            "--fair",
            "-110",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("no stake recommended"));
}

#[test]
fn test_deals_table_sorted_by_edge() {
    let deals = temp_json(DEALS_JSON);
    let output = edgefinder()
        .args(["deals", "--config", "/nonexistent/edgefinder.toml"])
        .arg(deals.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("L. James"))
        .stdout(predicate::str::contains("+6.2%"))
        .stdout(predicate::str::contains("Showing 3 of 3 deals"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    let lebron = stdout.find("L. James").unwrap();
    let mahomes = stdout.find("P. Mahomes").unwrap();
    let tatum = stdout.find("J. Tatum").unwrap();
    assert!(lebron < mahomes && mahomes < tatum, "{stdout}");
}

#[test]
fn test_deals_hide_stale_and_json() {
    let deals = temp_json(DEALS_JSON);
    let live = temp_json(r#"{"sel-mahomes": {"price": -105}}"#);

    let output = edgefinder()
        .args(["--json", "deals", "--config", "/nonexistent/edgefinder.toml"])
        .arg(deals.path())
        .arg("--hide-stale")
        .arg(live.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "{stdout}");
    let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(value["type"], "deal");
    assert_eq!(value["payload"]["id"], "mahomes-yds");
    assert_eq!(value["payload"]["best_book"], "Caesars");
}

#[test]
fn test_deals_next_best_mode_with_stake() {
    let deals = temp_json(DEALS_JSON);
    let config = temp_config("[kelly]\nbankroll = 1000\npercent = 100\n");

    let output = edgefinder()
        .args(["--json", "deals", "--mode", "next_best", "--config"])
        .arg(config.path())
        .arg(deals.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    let first: serde_json::Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    let payload = &first["payload"];
    assert_eq!(payload["id"], "lebron-pts");
    let edge = payload["edge_percent"].as_f64().unwrap();
    assert!((edge - 4.7619).abs() < 1e-3, "edge was {edge}");
    assert_eq!(payload["home_logo"], "https://static.edgefinder.app/team-logos/nba/bos.svg");
    assert_eq!(payload["link"], "https://sportsbook.fanduel.com/lebron");
    // +120 vs fair +105: b = 1.2, p = 100/205, full Kelly = 6.10%
    assert_eq!(payload["stake"], "60.98");
}

fn mahomes_link(cmd: &mut Command, deals: &std::path::Path) -> serde_json::Value {
    let output = cmd
        .args(["--json", "deals", "--config", "/nonexistent/edgefinder.toml"])
        .arg(deals)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    stdout
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .find(|value| value["payload"]["id"] == "mahomes-yds")
        .map(|value| value["payload"]["link"].clone())
        .unwrap()
}

#[test]
fn test_deals_state_env_fills_links_without_config_file() {
    let deals = temp_json(DEALS_JSON);

    assert_eq!(mahomes_link(&mut edgefinder(), deals.path()), serde_json::Value::Null);

    let mut with_state = edgefinder();
    with_state.env("EDGEFINDER_STATE", "NJ");
    assert_eq!(
        mahomes_link(&mut with_state, deals.path()),
        "https://sportsbook.caesars.com/us/nj/bet"
    );
}

#[test]
fn test_deals_missing_file_fails() {
    edgefinder()
        .args(["deals", "--config", "/nonexistent/edgefinder.toml", "/nonexistent/deals.json"])
        .assert()
        .failure();
}

#[test]
fn test_check_config_valid() {
    let config = temp_config("[comparison]\nmode = \"book:pinnacle\"\n\n[kelly]\nbankroll = 500\n");
    edgefinder()
        .args(["check", "config", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("book:pinnacle"));
}

#[test]
fn test_check_config_returns_nonzero_on_invalid_value() {
    let config = temp_config("[display]\ntimezone = \"Nowhere/Special\"\n");
    edgefinder()
        .args(["check", "config", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("timezone"));
}

#[test]
fn test_check_config_missing_file() {
    edgefinder()
        .args(["check", "config", "--config", "/nonexistent/edgefinder.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
