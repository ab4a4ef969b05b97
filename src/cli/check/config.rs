use std::path::Path;

use serde_json::json;

use crate::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Validate a configuration file and summarize what it sets.
///
/// # Errors
///
/// Returns an error if the file is missing, malformed, or fails validation.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();

    if !path.exists() {
        return Err(ConfigError::ReadFile(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        ))
        .into());
    }

    let config = Config::load(path)?;
    config.init_logging();

    let registry = config.sportsbooks.registry();

    if output::is_json() {
        output::json_line(
            "config",
            json!({
                "path": path.display().to_string(),
                "valid": true,
                "mode": config.comparison.mode.to_string(),
                "boost_percent": config.comparison.boost_percent,
                "bankroll": config.kelly.bankroll,
                "kelly_percent": config.kelly.percent,
                "timezone": config.display.timezone,
                "preview_per_sport": config.display.preview_per_sport,
                "default_state": config.sportsbooks.default_state,
                "sportsbooks": registry.len(),
            }),
        );
        return Ok(());
    }

    output::section(&format!("Checking {}", path.display()));
    output::success("Configuration file is valid");
    output::field("Mode", output::highlight(&config.comparison.mode));
    output::field(
        "Boost",
        config
            .comparison
            .boost_percent
            .map_or_else(|| "none".to_string(), |b| format!("{b}%")),
    );
    output::field("Bankroll", format!("${}", config.kelly.bankroll));
    output::field("Kelly", format!("{}%", config.kelly.percent));
    output::field("Timezone", &config.display.timezone);
    output::field("Sportsbooks", registry.len());

    if config.kelly.bankroll.is_zero() {
        output::warning("Bankroll is 0; stake recommendations are disabled");
    }
    match &config.sportsbooks.default_state {
        Some(state) => output::field("State", state),
        None => output::note("No default state; state-specific links are omitted"),
    }

    Ok(())
}
