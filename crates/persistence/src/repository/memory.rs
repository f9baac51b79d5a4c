//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::envelope::SaveBundle;
use crate::repository::{RepositoryError, Result, SaveRepository};

/// In-memory implementation of SaveRepository.
///
/// Slots hold sealed envelopes, so loads go through the same decode path as
/// files do.
#[derive(Default)]
pub struct InMemorySaveRepository {
    slots: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw envelope bytes of a slot.
    pub fn raw(&self, slot: &str) -> Option<Vec<u8>> {
        self.slots
            .read()
            .ok()
            .and_then(|slots| slots.get(slot).cloned())
    }

    /// Overwrites a slot with arbitrary bytes.
    pub fn put_raw(&self, slot: &str, bytes: Vec<u8>) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot.to_owned(), bytes);
        Ok(())
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, bundle: &SaveBundle) -> Result<()> {
        self.put_raw(slot, bundle.seal())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveBundle>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match slots.get(slot) {
            Some(bytes) => Ok(Some(SaveBundle::open(bytes)?)),
            None => Ok(None),
        }
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn corrupted_slot_is_malformed() {
        let repo = InMemorySaveRepository::new();
        repo.save("main", &SaveBundle::default()).unwrap();

        let mut bytes = repo.raw("main").unwrap();
        bytes.truncate(10);
        repo.put_raw("main", bytes).unwrap();

        assert!(matches!(
            repo.load("main"),
            Err(RepositoryError::MalformedSaveData(DecodeError::BadMagic))
        ));
    }

    #[test]
    fn slots_list_sorted() {
        let repo = InMemorySaveRepository::new();
        repo.save("b", &SaveBundle::default()).unwrap();
        repo.save("a", &SaveBundle::default()).unwrap();
        assert_eq!(repo.list_slots().unwrap(), vec!["a", "b"]);

        repo.delete("a").unwrap();
        assert!(!repo.exists("a"));
        assert_eq!(repo.load("a").unwrap(), None);
    }
}
