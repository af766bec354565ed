//! Transient capture slot — a single most-recent-image holder bridging the
//! capture flow to the diagnosis flow.
//!
//! Each capture overwrites the slot. The diagnosis flow peeks at it and only
//! clears it once a diagnosis succeeds, so a failed attempt can be retried
//! without re-capturing. The slot is not part of the durable garden.

use crate::garden::storage::{KeyValueStorage, StorageError};
use std::sync::Arc;
use tracing::warn;

/// Well-known storage key of the capture slot.
pub const CAPTURE_SLOT_KEY: &str = "captured_image";

/// Handle to the capture slot.
pub struct CaptureSlot {
    storage: Arc<dyn KeyValueStorage>,
}

impl CaptureSlot {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Overwrite the slot with a freshly captured data URI.
    pub fn store(&self, data_uri: &str) -> Result<(), StorageError> {
        self.storage.set(CAPTURE_SLOT_KEY, data_uri)
    }

    /// Read the slot without consuming it. Read failures degrade to `None`.
    pub fn peek(&self) -> Option<String> {
        match self.storage.get(CAPTURE_SLOT_KEY) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!("could not read capture slot: {e}");
                None
            }
        }
    }

    /// Clear the slot after its image has been consumed.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(CAPTURE_SLOT_KEY) {
            warn!("could not clear capture slot: {e}");
        }
    }

    /// Read and consume the slot in one step.
    pub fn take(&self) -> Option<String> {
        let value = self.peek();
        if value.is_some() {
            self.clear();
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garden::storage::MemoryStorage;

    fn slot() -> CaptureSlot {
        CaptureSlot::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_empty_slot_peeks_none() {
        assert!(slot().peek().is_none());
        assert!(slot().take().is_none());
    }

    #[test]
    fn test_store_overwrites_previous_capture() {
        let slot = slot();
        slot.store("data:image/jpeg;base64,OLD").unwrap();
        slot.store("data:image/jpeg;base64,NEW").unwrap();
        assert_eq!(slot.peek().as_deref(), Some("data:image/jpeg;base64,NEW"));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let slot = slot();
        slot.store("data:image/jpeg;base64,AAAA").unwrap();
        assert!(slot.peek().is_some());
        assert!(slot.peek().is_some());
    }

    #[test]
    fn test_take_consumes() {
        let slot = slot();
        slot.store("data:image/jpeg;base64,AAAA").unwrap();
        assert!(slot.take().is_some());
        assert!(slot.peek().is_none());
    }
}
