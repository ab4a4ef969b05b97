//! Registry of known sportsbooks keyed by book id.
//!
//! Each entry carries a display name, a logo URL and desktop/mobile link
//! templates. State-restricted books put a `{state}` placeholder in their
//! templates, which is replaced with the user's lower-cased state code when
//! a link is opened.

use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

use crate::domain::{BookId, BookOffer};

/// Placeholder substituted with the user's state code.
pub const STATE_PLACEHOLDER: &str = "{state}";

/// A sportsbook's display and link metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sportsbook {
    pub id: BookId,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub link_template: Option<String>,
    #[serde(default)]
    pub mobile_link_template: Option<String>,
}

impl Sportsbook {
    pub fn new(id: impl Into<BookId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_url: None,
            link_template: None,
            mobile_link_template: None,
        }
    }

    #[must_use]
    pub fn with_logo(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_links(mut self, desktop: impl Into<String>, mobile: Option<&str>) -> Self {
        self.link_template = Some(desktop.into());
        self.mobile_link_template = mobile.map(str::to_string);
        self
    }

    /// True when either link template needs a state code.
    #[must_use]
    pub fn requires_state(&self) -> bool {
        [&self.link_template, &self.mobile_link_template]
            .into_iter()
            .flatten()
            .any(|t| t.contains(STATE_PLACEHOLDER))
    }
}

fn builtin_books() -> Vec<Sportsbook> {
    vec![
        Sportsbook::new("draftkings", "DraftKings")
            .with_logo("/images/sportsbooks/draftkings.png")
            .with_links(
                "https://sportsbook.draftkings.com/",
                Some("dksb://sb/"),
            ),
        Sportsbook::new("fanduel", "FanDuel")
            .with_logo("/images/sportsbooks/fanduel.png")
            .with_links(
                "https://sportsbook.fanduel.com/",
                Some("fanduelsportsbook://"),
            ),
        Sportsbook::new("betmgm", "BetMGM")
            .with_logo("/images/sportsbooks/betmgm.png")
            .with_links("https://sports.{state}.betmgm.com/en/sports", None),
        Sportsbook::new("caesars", "Caesars")
            .with_logo("/images/sportsbooks/caesars.png")
            .with_links("https://sportsbook.caesars.com/us/{state}/bet", None),
        Sportsbook::new("betrivers", "BetRivers")
            .with_logo("/images/sportsbooks/betrivers.png")
            .with_links("https://{state}.betrivers.com/", None),
        Sportsbook::new("espnbet", "ESPN BET")
            .with_logo("/images/sportsbooks/espnbet.png")
            .with_links("https://espnbet.com/", None),
        Sportsbook::new("fanatics", "Fanatics")
            .with_logo("/images/sportsbooks/fanatics.png")
            .with_links("https://sportsbook.fanatics.com/", None),
        Sportsbook::new("pinnacle", "Pinnacle")
            .with_logo("/images/sportsbooks/pinnacle.png")
            .with_links("https://www.pinnacle.com/", None),
    ]
}

/// Sportsbooks keyed by book id.
#[derive(Debug, Clone)]
pub struct SportsbookRegistry {
    books: HashMap<BookId, Sportsbook>,
    default_state: Option<String>,
}

impl SportsbookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            books: HashMap::new(),
            default_state: None,
        }
    }

    /// Registry pre-loaded with the built-in books.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for book in builtin_books() {
            registry.register(book);
        }
        registry
    }

    /// Add a book, replacing any existing entry with the same id.
    pub fn register(&mut self, book: Sportsbook) {
        self.books.insert(book.id.clone(), book);
    }

    /// State code used when a link needs one and the caller has none.
    #[must_use]
    pub fn with_default_state(mut self, state: Option<String>) -> Self {
        self.default_state = state.filter(|s| !s.trim().is_empty());
        self
    }

    #[must_use]
    pub fn get(&self, id: &BookId) -> Option<&Sportsbook> {
        self.books.get(id)
    }

    /// Display name, falling back to the raw id.
    #[must_use]
    pub fn display_name(&self, id: &BookId) -> String {
        self.get(id)
            .map_or_else(|| id.to_string(), |book| book.name.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Resolve the link to open for an offer.
    ///
    /// The offer's own link wins over the registry template (its mobile link
    /// when `mobile` is set and one exists). `{state}` is replaced with
    /// `state` or, failing that, the registry default; a template that needs
    /// a state with none available yields `None`, as does a result that is
    /// not a valid URL.
    #[must_use]
    pub fn resolve_link(&self, offer: &BookOffer, mobile: bool, state: Option<&str>) -> Option<String> {
        let book = self.get(&offer.book);
        let template = if mobile {
            offer
                .mobile_link
                .as_deref()
                .or(offer.link.as_deref())
                .or_else(|| book.and_then(|b| b.mobile_link_template.as_deref()))
                .or_else(|| book.and_then(|b| b.link_template.as_deref()))
        } else {
            offer
                .link
                .as_deref()
                .or_else(|| book.and_then(|b| b.link_template.as_deref()))
        }?;

        let resolved = if template.contains(STATE_PLACEHOLDER) {
            let state = state
                .filter(|s| !s.trim().is_empty())
                .or(self.default_state.as_deref());
            let Some(state) = state else {
                tracing::debug!(book = %offer.book, "Link needs a state code but none is set");
                return None;
            };
            template.replace(STATE_PLACEHOLDER, &state.trim().to_ascii_lowercase())
        } else {
            template.to_string()
        };

        match Url::parse(&resolved) {
            Ok(_) => Some(resolved),
            Err(e) => {
                tracing::warn!(book = %offer.book, link = %resolved, error = %e, "Invalid sportsbook link");
                None
            }
        }
    }
}

impl Default for SportsbookRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AmericanOdds;

    fn offer(book: &str) -> BookOffer {
        BookOffer::new(book, AmericanOdds::try_new(-110).unwrap())
    }

    #[test]
    fn builtin_registry_has_common_books() {
        let registry = SportsbookRegistry::with_builtin();
        assert!(!registry.is_empty());
        assert_eq!(registry.display_name(&BookId::new("DraftKings")), "DraftKings");
        assert_eq!(registry.display_name(&BookId::new("unknownbook")), "unknownbook");
    }

    #[test]
    fn state_restricted_books_are_flagged() {
        let registry = SportsbookRegistry::with_builtin();
        assert!(registry.get(&BookId::new("betmgm")).unwrap().requires_state());
        assert!(!registry.get(&BookId::new("fanduel")).unwrap().requires_state());
    }

    #[test]
    fn offer_link_takes_precedence() {
        let registry = SportsbookRegistry::with_builtin();
        let o = offer("fanduel").with_links(
            Some("https://sportsbook.fanduel.com/event/123".into()),
            Some("fanduelsportsbook://event/123".into()),
        );
        assert_eq!(
            registry.resolve_link(&o, false, None).as_deref(),
            Some("https://sportsbook.fanduel.com/event/123")
        );
        assert_eq!(
            registry.resolve_link(&o, true, None).as_deref(),
            Some("fanduelsportsbook://event/123")
        );
    }

    #[test]
    fn state_placeholder_is_substituted() {
        let registry = SportsbookRegistry::with_builtin();
        assert_eq!(
            registry.resolve_link(&offer("betmgm"), false, Some("NJ")).as_deref(),
            Some("https://sports.nj.betmgm.com/en/sports")
        );
    }

    #[test]
    fn missing_state_uses_default_or_none() {
        let registry = SportsbookRegistry::with_builtin();
        assert_eq!(registry.resolve_link(&offer("betrivers"), false, None), None);

        let registry = registry.with_default_state(Some("PA".into()));
        assert_eq!(
            registry.resolve_link(&offer("betrivers"), false, None).as_deref(),
            Some("https://pa.betrivers.com/")
        );
    }

    #[test]
    fn mobile_falls_back_to_desktop_template() {
        let registry = SportsbookRegistry::with_builtin();
        assert_eq!(
            registry.resolve_link(&offer("pinnacle"), true, None).as_deref(),
            Some("https://www.pinnacle.com/")
        );
    }

    #[test]
    fn unknown_book_without_link_is_none() {
        let registry = SportsbookRegistry::with_builtin();
        assert_eq!(registry.resolve_link(&offer("nobook"), false, None), None);
    }

    #[test]
    fn invalid_links_are_dropped() {
        let registry = SportsbookRegistry::new();
        let o = offer("x").with_links(Some("not a url".into()), None);
        assert_eq!(registry.resolve_link(&o, false, None), None);
    }

    #[test]
    fn register_replaces_entry() {
        let mut registry = SportsbookRegistry::with_builtin();
        let before = registry.len();
        registry.register(Sportsbook::new("FanDuel", "FD Custom"));
        assert_eq!(registry.len(), before);
        assert_eq!(registry.display_name(&BookId::new("fanduel")), "FD Custom");
    }
}
