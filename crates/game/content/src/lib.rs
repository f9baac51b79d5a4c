//! Static game content and the loaders that read it.
//!
//! This crate houses the reference data the engine looks up by name:
//! - Attacks and spells
//! - Condition templates and the low-sanity debuff pool
//! - Creature and minion templates
//! - Dungeon layouts and their encounter tables
//! - Balancing configuration (TOML)
//!
//! Content is served to the engine through [`ContentTables`], which
//! implements [`game_core::ContentOracle`], and never appears in save data.

mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use tables::ContentTables;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
