use crate::{
    error::{Result, VibeWallError},
    history::traits::HistoryStorage,
};
use std::sync::{Arc, Mutex};

/// In-process key/value slot holding the serialized history.
///
/// Clones share the same slot, so a clone handed to a fresh `HistoryStore`
/// behaves like the same storage seen after a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with a raw value, valid JSON or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|_| VibeWallError::HistoryError("storage lock poisoned".into()))
    }
}

impl HistoryStorage for MemoryStorage {
    fn read(&self) -> Result<Vec<String>> {
        match self.lock()?.as_deref() {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| VibeWallError::HistoryError(e.to_string())),
        }
    }

    fn write(&self, entries: &[String]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        *self.lock()? = Some(json);
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}
