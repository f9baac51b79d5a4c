use crate::envelope::SaveBundle;
use crate::repository::Result;

/// Which copy of a slot a fallback load came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadedFrom {
    Primary,
    Backup,
}

/// Storage for save slots.
///
/// A slot holds one [`SaveBundle`]. Implementations must make `save` atomic:
/// a failed save leaves the previous contents of the slot readable.
pub trait SaveRepository: Send + Sync {
    fn save(&self, slot: &str, bundle: &SaveBundle) -> Result<()>;

    /// Loads a slot. `Ok(None)` when the slot has never been written.
    fn load(&self, slot: &str) -> Result<Option<SaveBundle>>;

    /// Loads a slot, recovering from a damaged primary where the storage
    /// keeps a backup. Stores without backups load the primary only.
    fn load_with_fallback(&self, slot: &str) -> Result<Option<(SaveBundle, LoadedFrom)>> {
        Ok(self.load(slot)?.map(|bundle| (bundle, LoadedFrom::Primary)))
    }

    fn exists(&self, slot: &str) -> bool;

    fn delete(&self, slot: &str) -> Result<()>;

    /// Slot names in sorted order.
    fn list_slots(&self) -> Result<Vec<String>>;
}
