//! Client runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Rooms and turns the automated run may spend before it stops and saves.
pub const DEFAULT_MAX_MOVES: usize = 200;

/// Slot used when none is configured.
pub const DEFAULT_SLOT: &str = "main";

/// Configuration required to assemble a client session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub save_dir: PathBuf,
    pub log_dir: PathBuf,
    pub slot: String,
    /// Fixed session seed; drawn at random when absent.
    pub seed: Option<u64>,
    /// Content directory; the bundled tables are used when absent.
    pub content_dir: Option<PathBuf>,
    pub player_name: String,
    pub max_moves: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            save_dir: data_dir().join("saves"),
            log_dir: cache_dir().join("logs"),
            slot: DEFAULT_SLOT.to_owned(),
            seed: None,
            content_dir: None,
            player_name: "Wanderer".to_owned(),
            max_moves: DEFAULT_MAX_MOVES,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_SAVE_DIR` - Directory for save slots (default: platform data dir)
    /// - `DUNGEON_LOG_DIR` - Directory for session logs (default: platform cache dir)
    /// - `DUNGEON_SAVE_SLOT` - Slot name (default: `main`)
    /// - `DUNGEON_SEED` - Session seed, decimal or `0x` hex (default: random)
    /// - `DUNGEON_CONTENT_DIR` - Content data directory (default: bundled)
    /// - `DUNGEON_PLAYER_NAME` - Name for a new character (default: `Wanderer`)
    /// - `DUNGEON_MAX_MOVES` - Move budget for the automated run (default: 200)
    ///
    /// Log verbosity follows `RUST_LOG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("DUNGEON_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("DUNGEON_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(slot) = lookup("DUNGEON_SAVE_SLOT").filter(|s| !s.is_empty()) {
            config.slot = slot;
        }
        config.seed = lookup("DUNGEON_SEED").as_deref().and_then(parse_seed);
        config.content_dir = lookup("DUNGEON_CONTENT_DIR").map(PathBuf::from);
        if let Some(name) = lookup("DUNGEON_PLAYER_NAME").filter(|s| !s.is_empty()) {
            config.player_name = name;
        }
        if let Some(moves) = lookup("DUNGEON_MAX_MOVES").and_then(|v| v.parse::<usize>().ok()) {
            config.max_moves = moves.max(1);
        }

        config
    }
}

fn parse_seed(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

/// Platform data directory, `./save_data` when the platform has none.
fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Platform cache directory, `/tmp/dungeon` when the platform has none.
fn cache_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/dungeon"))
}
