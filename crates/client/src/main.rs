//! Dungeon game client binary.
//!
//! Composition root: reads configuration from the environment, sets up
//! logging, loads content, and plays one automated dungeon run against the
//! configured save slot.
//!
//! ```bash
//! # Fixed seed, custom save directory, verbose engine logs
//! DUNGEON_SEED=42 DUNGEON_SAVE_DIR=./saves RUST_LOG=game_core=debug \
//!     cargo run -p dungeon-client
//! ```

use anyhow::{Context, Result};
use dungeon_client::{Client, ClientConfig, logging};
use game_content::ContentFactory;
use persistence::FileSaveRepository;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();
    let seed = config.seed.unwrap_or_else(rand::random);

    // 2. Setup logging
    let session_id = format!("session_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"));
    let _guard = logging::setup_logging(&config.log_dir, &session_id)?;

    tracing::info!("Starting Dungeon client");
    tracing::info!("Seed: {:#018x}", seed);
    tracing::info!("Save directory: {}", config.save_dir.display());

    // 3. Load content
    let (content, game_config) = match &config.content_dir {
        Some(dir) => {
            tracing::info!("Content directory: {}", dir.display());
            let factory = ContentFactory::new(dir);
            (factory.load_tables()?, factory.load_config()?)
        }
        None => (ContentFactory::bundled()?, ContentFactory::bundled_config()?),
    };
    tracing::debug!("Content loaded: {}", content.summary());

    // 4. Build client
    let repository = FileSaveRepository::new(&config.save_dir).with_context(|| {
        format!("failed to open save directory {}", config.save_dir.display())
    })?;
    let client = Client::builder()
        .content(content)
        .config(game_config)
        .repository(repository)
        .slot(config.slot.clone())
        .seed(Some(seed))
        .player_name(config.player_name.clone())
        .max_moves(config.max_moves)
        .build()?;

    // 5. Play and save
    let summary = client.run()?;
    println!(
        "{} level {}: {:?} after {} rooms and {} turns, {} fights won, {} gold",
        summary.instance,
        summary.level,
        summary.outcome,
        summary.rooms_entered,
        summary.turns,
        summary.encounters_won,
        summary.gold
    );

    tracing::info!("Client shutdown complete");
    Ok(())
}
