pub mod file;
pub mod memory;
pub mod traits;

use crate::error::Result;
use std::sync::Arc;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use traits::HistoryStorage;

pub const HISTORY_KEY: &str = "vibewall_history";
pub const MAX_HISTORY: usize = 20;

/// Most-recent-first list of submitted prompts, persisted after every change.
pub struct HistoryStore {
    entries: Vec<String>,
    storage: Arc<dyn HistoryStorage>,
}

impl HistoryStore {
    /// Loads the persisted list. Unreadable history is logged and treated as empty.
    pub fn load(storage: Arc<dyn HistoryStorage>) -> Self {
        let entries = match storage.read() {
            Ok(mut entries) => {
                entries.truncate(MAX_HISTORY);
                entries
            }
            Err(e) => {
                log::error!("Failed to parse history: {}", e);
                Vec::new()
            }
        };

        log::debug!("Loaded {} history entries", entries.len());
        Self { entries, storage }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves `prompt` to the front (exact string match), caps the list and persists it.
    ///
    /// The in-memory list is updated even when persisting fails.
    pub fn record(&mut self, prompt: &str) -> Result<()> {
        self.entries.retain(|entry| entry != prompt);
        self.entries.insert(0, prompt.to_string());
        self.entries.truncate(MAX_HISTORY);
        self.storage.write(&self.entries)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.storage.delete()
    }

    /// Looks up an entry for replay. Never mutates the history.
    pub fn select(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[&str]) -> (HistoryStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let owned: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
        storage.write(&owned).unwrap();
        (HistoryStore::load(Arc::new(storage.clone())), storage)
    }

    #[test]
    fn recording_twice_keeps_one_at_front() {
        let (mut store, _) = store_with(&["older"]);
        store.record("sunset").unwrap();
        store.record("sunset").unwrap();
        assert_eq!(store.entries(), ["sunset", "older"]);
    }

    #[test]
    fn rerecorded_prompt_moves_to_front() {
        let (mut store, storage) = store_with(&["a", "b", "c"]);
        store.record("b").unwrap();
        assert_eq!(store.entries(), ["b", "a", "c"]);
        assert_eq!(storage.read().unwrap(), vec!["b", "a", "c"]);
    }

    #[test]
    fn matching_is_exact() {
        let (mut store, _) = store_with(&["rain"]);
        store.record(" rain").unwrap();
        assert_eq!(store.entries(), [" rain", "rain"]);
    }

    #[test]
    fn length_is_capped_and_oldest_evicted() {
        let (mut store, storage) = store_with(&[]);
        for i in 0..25 {
            store.record(&format!("prompt {}", i)).unwrap();
            assert!(store.len() <= MAX_HISTORY);
        }

        assert_eq!(store.len(), MAX_HISTORY);
        assert_eq!(store.entries()[0], "prompt 24");
        assert_eq!(store.entries()[MAX_HISTORY - 1], "prompt 5");
        assert_eq!(storage.read().unwrap().len(), MAX_HISTORY);
    }

    #[test]
    fn clear_survives_restart() {
        let (mut store, storage) = store_with(&["a", "b"]);
        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(storage.raw().is_none());

        let reloaded = HistoryStore::load(Arc::new(storage));
        assert!(reloaded.is_empty());
    }

    #[test]
    fn unparsable_history_loads_empty() {
        let store = HistoryStore::load(Arc::new(MemoryStorage::with_raw("not json")));
        assert!(store.is_empty());
    }

    #[test]
    fn select_does_not_mutate() {
        let (store, _) = store_with(&["a", "b"]);
        assert_eq!(store.select(1), Some("b"));
        assert_eq!(store.select(5), None);
        assert_eq!(store.entries(), ["a", "b"]);
    }
}
