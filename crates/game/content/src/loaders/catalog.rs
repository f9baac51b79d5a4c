//! Catalog loaders.
//!
//! Every catalog file is a RON list of one content type:
//!
//! ```ron
//! [
//!     (name: "bite", damage_mult: 1.2, debuffs: [(name: "rabies", chance: 0.1)]),
//!     (name: "rend", hits: 2),
//! ]
//! ```

use std::path::Path;

use game_core::env::{
    AttackDefinition, ConditionTemplate, CreatureTemplate, DungeonDefinition, MinionTemplate,
    SpellDefinition,
};
use serde::de::DeserializeOwned;

use crate::loaders::{LoadResult, read_file};

/// Loader for RON content catalogs.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn attacks(path: &Path) -> LoadResult<Vec<AttackDefinition>> {
        load_list(path, "attack")
    }

    pub fn spells(path: &Path) -> LoadResult<Vec<SpellDefinition>> {
        load_list(path, "spell")
    }

    pub fn conditions(path: &Path) -> LoadResult<Vec<ConditionTemplate>> {
        load_list(path, "condition")
    }

    pub fn creatures(path: &Path) -> LoadResult<Vec<CreatureTemplate>> {
        load_list(path, "creature")
    }

    pub fn minions(path: &Path) -> LoadResult<Vec<MinionTemplate>> {
        load_list(path, "minion")
    }

    pub fn dungeons(path: &Path) -> LoadResult<Vec<DungeonDefinition>> {
        load_list(path, "dungeon")
    }

    /// Parse a catalog already in memory.
    pub fn parse<T: DeserializeOwned>(content: &str, label: &str) -> LoadResult<Vec<T>> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {} catalog RON: {}", label, e))
    }
}

fn load_list<T: DeserializeOwned>(path: &Path, label: &str) -> LoadResult<Vec<T>> {
    let content = read_file(path)?;
    let entries = CatalogLoader::parse(&content, label)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;
    tracing::debug!(path = %path.display(), count = entries.len(), "{label} catalog loaded");
    Ok(entries)
}
