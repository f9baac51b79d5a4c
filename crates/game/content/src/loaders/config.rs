//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`GameConfig`] defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &GameConfig) -> LoadResult<()> {
    if config.flee_min_chance > config.flee_max_chance {
        anyhow::bail!(
            "flee_min_chance ({}) exceeds flee_max_chance ({})",
            config.flee_min_chance,
            config.flee_max_chance
        );
    }
    if !(0.0..=1.0).contains(&config.low_sanity_debuff_chance) {
        anyhow::bail!(
            "low_sanity_debuff_chance must be a probability, got {}",
            config.low_sanity_debuff_chance
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let config = ConfigLoader::parse("days_per_tick = 14\n").unwrap();
        assert_eq!(config.days_per_tick, 14);
        assert_eq!(config.flee_base_chance, GameConfig::DEFAULT_FLEE_BASE_CHANCE);
    }

    #[test]
    fn inverted_flee_bounds_are_rejected() {
        let err = ConfigLoader::parse("flee_min_chance = 90.0\nflee_max_chance = 10.0\n")
            .unwrap_err();
        assert!(err.to_string().contains("flee_min_chance"));
    }
}
