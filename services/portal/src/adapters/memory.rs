//! services/portal/src/adapters/memory.rs
//!
//! In-memory implementation of the `SlotStore` port for tests and ephemeral
//! embeddings. An optional byte limit reproduces quota exhaustion without
//! filling an actual disk.

use std::collections::HashMap;
use std::sync::Mutex;

use vetportal_core::ports::{Slot, SlotStore, StoreError, StoreResult};

pub struct MemoryStore {
    slots: Mutex<HashMap<&'static str, String>>,
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            capacity: None,
        }
    }

    /// A store that fails with `QuotaExceeded` once the total stored bytes
    /// would pass `bytes`.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            capacity: Some(bytes),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<&'static str, String>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotStore for MemoryStore {
    fn read(&self, slot: Slot) -> StoreResult<Option<String>> {
        Ok(self.lock().get(slot.key()).cloned())
    }

    fn write(&self, slot: Slot, json: &str) -> StoreResult<()> {
        let mut slots = self.lock();
        if let Some(capacity) = self.capacity {
            let others: usize = slots
                .iter()
                .filter(|(key, _)| **key != slot.key())
                .map(|(_, value)| value.len())
                .sum();
            if others + json.len() > capacity {
                return Err(StoreError::QuotaExceeded);
            }
        }
        slots.insert(slot.key(), json.to_string());
        Ok(())
    }

    fn clear(&self, slot: Slot) -> StoreResult<()> {
        self.lock().remove(slot.key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaves_like_a_slot_store() {
        let store = MemoryStore::new();
        assert!(store.read(Slot::Session).unwrap().is_none());
        store.write(Slot::Session, r#"{"role":"admin"}"#).unwrap();
        assert_eq!(
            store.read(Slot::Session).unwrap().as_deref(),
            Some(r#"{"role":"admin"}"#)
        );
        store.clear(Slot::Session).unwrap();
        assert!(store.read(Slot::Session).unwrap().is_none());
    }

    #[test]
    fn capacity_limit_surfaces_quota_exceeded() {
        let store = MemoryStore::with_capacity(16);
        store.write(Slot::Config, "0123456789").unwrap();

        // Replacing a slot's own value does not double-count it.
        store.write(Slot::Config, "0123456789abcdef").unwrap();

        let err = store.write(Slot::Tokens, "xx").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded));

        // The failed write left the existing value alone.
        assert_eq!(
            store.read(Slot::Config).unwrap().as_deref(),
            Some("0123456789abcdef")
        );
    }
}
