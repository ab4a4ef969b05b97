//! Sportsbook registry configuration.

use serde::Deserialize;

use crate::sportsbook::{Sportsbook, SportsbookRegistry};

/// Extra sportsbooks and link settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SportsbooksConfig {
    /// State code used for state-restricted deep links. Overridden by the
    /// `EDGEFINDER_STATE` environment variable.
    #[serde(default)]
    pub default_state: Option<String>,

    /// Books added to, or replacing, the built-in registry.
    #[serde(default)]
    pub books: Vec<Sportsbook>,
}

impl SportsbooksConfig {
    /// Built-in registry with configured books and default state applied.
    #[must_use]
    pub fn registry(&self) -> SportsbookRegistry {
        let mut registry = SportsbookRegistry::with_builtin();
        for book in &self.books {
            registry.register(book.clone());
        }
        registry.with_default_state(self.default_state.clone())
    }
}
