//! View-state store port.
//!
//! Tables remember small bits of UI state (scroll offset, for one) across
//! navigations in a session-scoped key/value store. The store is injected
//! so tests can supply their own.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Session-scoped key/value storage.
///
/// Writes are best-effort: there is no transactional guarantee and readers
/// must tolerate missing or malformed values.
pub trait ViewStateStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any existing one.
    fn set(&self, key: &str, value: String);

    /// Remove a value. Returns true if the key existed.
    fn remove(&self, key: &str) -> bool;
}

impl<T: ViewStateStore + ?Sized> ViewStateStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) -> bool {
        (**self).remove(key)
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryViewStateStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryViewStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl ViewStateStore for MemoryViewStateStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.values.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) -> bool {
        self.values.write().remove(key).is_some()
    }
}

const SCROLL_KEY_PREFIX: &str = "scroll:";

/// Scroll-position persistence on top of a [`ViewStateStore`].
pub struct ScrollMemory<S: ViewStateStore> {
    store: S,
}

impl<S: ViewStateStore> ScrollMemory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(table_id: &str) -> String {
        format!("{SCROLL_KEY_PREFIX}{table_id}")
    }

    /// Remember the scroll offset of a table.
    pub fn save(&self, table_id: &str, offset: u32) {
        self.store.set(&Self::key(table_id), offset.to_string());
    }

    /// Restore a saved offset. Malformed values are ignored.
    pub fn restore(&self, table_id: &str) -> Option<u32> {
        let raw = self.store.get(&Self::key(table_id))?;
        match raw.trim().parse() {
            Ok(offset) => Some(offset),
            Err(_) => {
                tracing::debug!(table_id, value = %raw, "Ignoring malformed scroll offset");
                None
            }
        }
    }

    /// Forget a table's offset.
    pub fn clear(&self, table_id: &str) -> bool {
        self.store.remove(&Self::key(table_id))
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
