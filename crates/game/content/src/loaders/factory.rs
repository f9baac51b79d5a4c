//! Content factory for building content tables from data files.

use std::path::{Path, PathBuf};

use game_core::GameConfig;

use crate::ContentTables;
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

const BUNDLED_CONFIG: &str = include_str!("../../data/config.toml");
const BUNDLED_ATTACKS: &str = include_str!("../../data/attacks.ron");
const BUNDLED_SPELLS: &str = include_str!("../../data/spells.ron");
const BUNDLED_CONDITIONS: &str = include_str!("../../data/conditions.ron");
const BUNDLED_SANITY_DEBUFFS: &str = include_str!("../../data/sanity_debuffs.ron");
const BUNDLED_CREATURES: &str = include_str!("../../data/creatures.ron");
const BUNDLED_MINIONS: &str = include_str!("../../data/minions.ron");
const BUNDLED_DUNGEONS: &str = include_str!("../../data/dungeons.ron");

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── attacks.ron
/// ├── spells.ron
/// ├── conditions.ron
/// ├── sanity_debuffs.ron
/// ├── creatures.ron
/// ├── minions.ron
/// └── dungeons.ron
/// ```
///
/// The same files ship inside the binary; [`ContentFactory::bundled`] reads
/// those instead of the disk.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load and cross-check every catalog in the directory.
    pub fn load_tables(&self) -> LoadResult<ContentTables> {
        let dir = &self.data_dir;
        let mut tables = ContentTables::new();
        tables.extend_attacks(CatalogLoader::attacks(&dir.join("attacks.ron"))?);
        tables.extend_spells(CatalogLoader::spells(&dir.join("spells.ron"))?);
        tables.extend_conditions(CatalogLoader::conditions(&dir.join("conditions.ron"))?);
        tables.extend_sanity_debuffs(CatalogLoader::conditions(&dir.join("sanity_debuffs.ron"))?);
        tables.extend_creatures(CatalogLoader::creatures(&dir.join("creatures.ron"))?);
        tables.extend_minions(CatalogLoader::minions(&dir.join("minions.ron"))?);
        tables.extend_dungeons(CatalogLoader::dungeons(&dir.join("dungeons.ron"))?);
        verify(tables, &dir.display().to_string())
    }

    /// Configuration compiled into the binary.
    pub fn bundled_config() -> LoadResult<GameConfig> {
        ConfigLoader::parse(BUNDLED_CONFIG)
    }

    /// Content tables compiled into the binary.
    pub fn bundled() -> LoadResult<ContentTables> {
        let mut tables = ContentTables::new();
        tables.extend_attacks(CatalogLoader::parse(BUNDLED_ATTACKS, "attack")?);
        tables.extend_spells(CatalogLoader::parse(BUNDLED_SPELLS, "spell")?);
        tables.extend_conditions(CatalogLoader::parse(BUNDLED_CONDITIONS, "condition")?);
        tables.extend_sanity_debuffs(CatalogLoader::parse(BUNDLED_SANITY_DEBUFFS, "condition")?);
        tables.extend_creatures(CatalogLoader::parse(BUNDLED_CREATURES, "creature")?);
        tables.extend_minions(CatalogLoader::parse(BUNDLED_MINIONS, "minion")?);
        tables.extend_dungeons(CatalogLoader::parse(BUNDLED_DUNGEONS, "dungeon")?);
        verify(tables, "bundled content")
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn verify(tables: ContentTables, source: &str) -> LoadResult<ContentTables> {
    let missing = tables.missing_references();
    if !missing.is_empty() {
        anyhow::bail!(
            "{} has {} dangling reference(s): {}",
            source,
            missing.len(),
            missing.join(", ")
        );
    }
    tracing::info!(source, tables = %tables.summary(), "content loaded");
    Ok(tables)
}
