//! File-based SaveRepository implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::envelope::SaveBundle;
use crate::repository::{LoadedFrom, RepositoryError, Result, SaveRepository};

const EXTENSION: &str = "sav";

/// File-based implementation of SaveRepository.
///
/// Each slot is `{slot}.sav` under the base directory, next to a
/// `{slot}.sav.bak` holding the last save that verified before it was
/// replaced.
///
/// # Write Protocol
///
/// 1. The new envelope is written to `{slot}.sav.tmp`
/// 2. If the current primary opens cleanly it is renamed to `.bak`
/// 3. The temp file is renamed over the primary
///
/// A crash at any point leaves either the primary or the backup intact.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of a slot's primary file.
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if !valid {
            return Err(RepositoryError::InvalidSlot(slot.to_owned()));
        }
        Ok(self.base_dir.join(format!("{slot}.{EXTENSION}")))
    }

    fn backup_path(path: &Path) -> PathBuf {
        path.with_extension(format!("{EXTENSION}.bak"))
    }

    fn temp_path(path: &Path) -> PathBuf {
        path.with_extension(format!("{EXTENSION}.tmp"))
    }

    /// Reads and opens one file. `Ok(None)` when it does not exist.
    fn read(path: &Path) -> Result<Option<SaveBundle>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(SaveBundle::open(&bytes)?))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, bundle: &SaveBundle) -> Result<()> {
        let path = self.slot_path(slot)?;
        let temp_path = Self::temp_path(&path);

        fs::write(&temp_path, bundle.seal())?;

        // Only a primary that still verifies replaces the backup.
        if matches!(Self::read(&path), Ok(Some(_))) {
            fs::rename(&path, Self::backup_path(&path))?;
        }

        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved slot '{}' to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveBundle>> {
        let path = self.slot_path(slot)?;
        let bundle = Self::read(&path)?;
        if bundle.is_some() {
            tracing::debug!("Loaded slot '{}' from {}", slot, path.display());
        }
        Ok(bundle)
    }

    /// Loads a slot, falling back to its backup when the primary is missing
    /// or malformed.
    ///
    /// The primary's error is returned when both copies are unusable.
    fn load_with_fallback(&self, slot: &str) -> Result<Option<(SaveBundle, LoadedFrom)>> {
        let path = self.slot_path(slot)?;
        let backup = Self::backup_path(&path);

        let primary_err = match Self::read(&path) {
            Ok(Some(bundle)) => return Ok(Some((bundle, LoadedFrom::Primary))),
            Ok(None) => None,
            Err(RepositoryError::MalformedSaveData(err)) => Some(err),
            Err(err) => return Err(err),
        };

        match Self::read(&backup) {
            Ok(Some(bundle)) => {
                match &primary_err {
                    Some(err) => tracing::warn!(
                        "Save slot '{}' is malformed ({}); loaded backup {}",
                        slot,
                        err,
                        backup.display()
                    ),
                    None => tracing::warn!(
                        "Save slot '{}' has no primary file; loaded backup {}",
                        slot,
                        backup.display()
                    ),
                }
                Ok(Some((bundle, LoadedFrom::Backup)))
            }
            Ok(None) | Err(RepositoryError::MalformedSaveData(_)) => match primary_err {
                Some(err) => Err(err.into()),
                None => Ok(None),
            },
            Err(err) => Err(err),
        }
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).is_ok_and(|path| path.exists())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;

        for file in [Self::backup_path(&path), path] {
            if file.exists() {
                fs::remove_file(&file)?;
            }
        }
        tracing::debug!("Deleted slot '{}'", slot);

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".sav")
            {
                slots.push(slot.to_owned());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
