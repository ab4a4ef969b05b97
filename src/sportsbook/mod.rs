//! Sportsbook registry and deep-link resolution.

mod registry;

pub use registry::{Sportsbook, SportsbookRegistry, STATE_PLACEHOLDER};
