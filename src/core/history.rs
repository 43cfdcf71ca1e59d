// src/core/history.rs
use std::iter;

use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{Result, ToolError};
use crate::core::storage::KeyValueStore;
use crate::models::HistoryEntry;

pub const HISTORY_KEY: &str = "json_tool_history";
pub const MAX_ENTRIES: usize = 10;
pub const MAX_ENTRY_BYTES: u64 = 100 * 1024 * 1024;

/// Bounded log of saved JSON texts, oldest first, persisted after every
/// mutation.
pub struct HistoryStore<S: KeyValueStore> {
    storage: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Loads the persisted log. Missing, unreadable or corrupt data starts an
    /// empty log instead of failing.
    pub fn load(storage: S) -> Self {
        let entries = match storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Ignoring corrupt history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read history: {}", e);
                Vec::new()
            }
        };

        Self { storage, entries }
    }

    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate size of all entries. Informational only; eviction is driven
    /// by entry count alone.
    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|entry| entry.byte_size).sum()
    }

    /// Appends `content`, evicting the oldest entry when the log is full.
    /// On any error the log is left exactly as it was.
    pub fn save(&mut self, content: &str) -> Result<HistoryEntry> {
        if content.trim().is_empty() {
            return Err(ToolError::EmptyContent);
        }

        let byte_size = content.len() as u64;
        if byte_size > MAX_ENTRY_BYTES {
            return Err(ToolError::ContentTooLarge {
                size: byte_size,
                limit: MAX_ENTRY_BYTES,
            });
        }

        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            content: content.to_string(),
            created_at: Utc::now(),
            byte_size,
        };

        let evict = (self.entries.len() + 1).saturating_sub(MAX_ENTRIES);
        let next: Vec<&HistoryEntry> = self
            .entries
            .iter()
            .skip(evict)
            .chain(iter::once(&entry))
            .collect();
        Self::persist(&mut self.storage, &next)?;

        for evicted in self.entries.drain(..evict) {
            log::info!("History full, evicted entry {}", evicted.id);
        }
        log::info!("Saved history entry {} ({} bytes)", entry.id, byte_size);
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Removes one entry. Returns `false` and leaves the log untouched when
    /// no entry has that id.
    pub fn delete(&mut self, id: Uuid) -> Result<bool> {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            log::debug!("No history entry {} to delete", id);
            return Ok(false);
        };

        let next: Vec<&HistoryEntry> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, entry)| entry)
            .collect();
        Self::persist(&mut self.storage, &next)?;

        self.entries.remove(index);
        log::info!("Deleted history entry {}", id);
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(HISTORY_KEY)?;
        self.entries.clear();
        log::info!("History cleared");
        Ok(())
    }

    fn persist(storage: &mut S, entries: &[&HistoryEntry]) -> Result<()> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| ToolError::Storage(format!("failed to serialize history: {}", e)))?;
        storage.set(HISTORY_KEY, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    /// Accepts writes until `fail` is flipped on.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> crate::core::storage::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> crate::core::storage::Result<()> {
            if self.fail {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into());
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> crate::core::storage::Result<()> {
            self.inner.remove(key)
        }
    }

    fn store() -> HistoryStore<MemoryStore> {
        HistoryStore::load(MemoryStore::new())
    }

    #[test]
    fn save_appends_in_order() {
        let mut history = store();
        history.save("{\"a\":1}").unwrap();
        history.save("[1,2,3]").unwrap();

        let contents: Vec<_> = history.list().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["{\"a\":1}", "[1,2,3]"]);
        assert_eq!(history.list()[0].byte_size, 7);
        assert_eq!(history.total_bytes(), 14);
    }

    #[test]
    fn byte_size_counts_utf8_bytes() {
        let mut history = store();
        let entry = history.save("\"中文\"").unwrap();
        assert_eq!(entry.byte_size, 8);
    }

    #[test]
    fn eleventh_save_evicts_the_oldest() {
        let mut history = store();
        for i in 0..MAX_ENTRIES {
            history.save(&format!("{}", i)).unwrap();
        }
        assert_eq!(history.len(), MAX_ENTRIES);
        let second_oldest = history.list()[1].id;

        history.save("10").unwrap();
        assert_eq!(history.len(), MAX_ENTRIES);
        assert_eq!(history.list()[0].id, second_oldest);
        assert_eq!(history.list()[0].content, "1");
        assert_eq!(history.list()[MAX_ENTRIES - 1].content, "10");
    }

    #[test]
    fn oversized_content_is_rejected_without_change() {
        let mut history = store();
        history.save("kept").unwrap();
        let before = history.list().to_vec();

        let huge = "a".repeat(101 * 1024 * 1024);
        match history.save(&huge) {
            Err(ToolError::ContentTooLarge { size, limit }) => {
                assert_eq!(size, 101 * 1024 * 1024);
                assert_eq!(limit, MAX_ENTRY_BYTES);
            }
            other => panic!("unexpected {:?}", other.map(|e| e.id)),
        }
        assert_eq!(history.list(), before.as_slice());
    }

    #[test]
    fn blank_content_is_rejected() {
        let mut history = store();
        assert_eq!(history.save("  \n ").unwrap_err(), ToolError::EmptyContent);
        assert!(history.is_empty());
    }

    #[test]
    fn ids_are_unique_under_rapid_saves() {
        let mut history = store();
        for _ in 0..MAX_ENTRIES {
            history.save("same").unwrap();
        }
        let mut ids: Vec<_> = history.list().iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), MAX_ENTRIES);
    }

    #[test]
    fn delete_and_clear() {
        let mut history = store();
        let first = history.save("1").unwrap();
        history.save("2").unwrap();

        assert!(history.delete(first.id).unwrap());
        assert_eq!(history.len(), 1);
        assert!(history.get(first.id).is_none());

        assert!(!history.delete(Uuid::new_v4()).unwrap());
        assert_eq!(history.len(), 1);

        history.clear().unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn persists_across_reloads() {
        let tmp = TempDir::new().unwrap();
        {
            let mut history = HistoryStore::load(FileStore::new(tmp.path()).unwrap());
            history.save("{\"persisted\":true}").unwrap();
        }
        let history = HistoryStore::load(FileStore::new(tmp.path()).unwrap());
        assert_eq!(history.len(), 1);
        assert_eq!(history.list()[0].content, "{\"persisted\":true}");
    }

    #[test]
    fn clear_removes_the_slot() {
        let tmp = TempDir::new().unwrap();
        let mut history = HistoryStore::load(FileStore::new(tmp.path()).unwrap());
        history.save("1").unwrap();
        history.clear().unwrap();
        assert!(!tmp.path().join(format!("{}.json", HISTORY_KEY)).exists());
    }

    #[test]
    fn corrupt_slot_loads_as_empty() {
        let mut storage = MemoryStore::new();
        storage.set(HISTORY_KEY, "not json at all").unwrap();
        let mut history = HistoryStore::load(storage);
        assert!(history.is_empty());

        // and the store is usable afterwards
        history.save("1").unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn failed_writes_leave_the_log_unchanged() {
        let mut history = HistoryStore::load(FlakyStore::default());
        for i in 0..MAX_ENTRIES {
            history.save(&i.to_string()).unwrap();
        }
        let before = history.list().to_vec();

        history.storage.fail = true;
        assert!(matches!(history.save("11"), Err(ToolError::Storage(_))));
        assert!(matches!(history.delete(before[3].id), Err(ToolError::Storage(_))));
        assert_eq!(history.list(), before.as_slice());

        history.storage.fail = false;
        history.save("11").unwrap();
        assert_eq!(history.list()[0].content, "1");
        let persisted: Vec<HistoryEntry> =
            serde_json::from_str(&history.storage.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, history.list());
    }
}
