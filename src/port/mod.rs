//! Trait definitions for injected collaborators. Depend only on domain.

pub mod view_state;

pub use view_state::{MemoryViewStateStore, ScrollMemory, ViewStateStore};
