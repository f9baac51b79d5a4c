//! Top-level client wiring content, persistence and the engine together.
//!
//! # Architecture
//!
//! ```text
//! Client (composition root)
//!   ├─→ ContentTables + GameConfig (static content, balancing)
//!   ├─→ SaveRepository (save slots)
//!   └─→ DungeonRun (engine entry points, driven by the autoplay pilot)
//! ```
//!
//! One [`Client::run`] loads or creates the world, plays one automated
//! dungeon run, and saves whatever state the run ended in.

pub mod autoplay;
mod builder;
pub mod config;
pub mod logging;
pub mod session;

pub use autoplay::{RunOutcome, RunSummary};
pub use builder::ClientBuilder;
pub use config::ClientConfig;
pub use session::Session;

use anyhow::{Context, Result};
use game_content::ContentTables;
use game_core::{Dice, DungeonRun, Env, GameConfig, PcgRng};
use persistence::SaveRepository;

/// Composition root for one session.
pub struct Client {
    content: ContentTables,
    config: GameConfig,
    repository: Box<dyn SaveRepository>,
    slot: String,
    seed: u64,
    player_name: String,
    max_moves: usize,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn repository(&self) -> &dyn SaveRepository {
        self.repository.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Loads the slot, plays one run and saves.
    ///
    /// The save happens even when the run stops on an engine error; engine
    /// errors are raised before any state changes.
    ///
    /// # Errors
    ///
    /// Load and save failures, and engine errors from the run.
    pub fn run(&self) -> Result<RunSummary> {
        let mut session = Session::load_or_new(
            self.repository.as_ref(),
            &self.slot,
            &self.content,
            &self.player_name,
            self.seed,
        )?;

        let rng = PcgRng;
        let env = Env::with_all(&self.content, &rng, &self.config).into_game_env();
        let played = {
            let Session { game, player, .. } = &mut session;
            let mut run = DungeonRun::new(game, player, env, Dice::new(&rng, self.seed))
                .context("engine environment is incomplete")?;
            autoplay::play(&mut run, self.max_moves)
        };

        session.save(self.repository.as_ref(), &self.slot)?;

        let summary = played.context("dungeon run stopped on an engine error")?;
        tracing::info!(
            instance = %summary.instance,
            level = %summary.level,
            rooms = summary.rooms_entered,
            turns = summary.turns,
            won = summary.encounters_won,
            gold = summary.gold,
            outcome = ?summary.outcome,
            "run finished"
        );
        Ok(summary)
    }
}
