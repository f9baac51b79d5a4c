//! Client builder with dependency injection pattern.

use anyhow::{Context, Result};
use game_content::ContentTables;
use game_core::GameConfig;
use persistence::SaveRepository;

use crate::Client;
use crate::config::{DEFAULT_MAX_MOVES, DEFAULT_SLOT};

/// Builder for constructing a Client with proper validation.
///
/// Content and a repository are required; everything else has a default.
/// A missing seed is drawn at random.
#[derive(Default)]
pub struct ClientBuilder {
    content: Option<ContentTables>,
    config: Option<GameConfig>,
    repository: Option<Box<dyn SaveRepository>>,
    slot: Option<String>,
    seed: Option<u64>,
    player_name: Option<String>,
    max_moves: Option<usize>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content tables (required).
    pub fn content(mut self, content: ContentTables) -> Self {
        self.content = Some(content);
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the save repository (required).
    pub fn repository(mut self, repository: impl SaveRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    pub fn slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = Some(slot.into());
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    pub fn max_moves(mut self, moves: usize) -> Self {
        self.max_moves = Some(moves);
        self
    }

    /// Build the Client.
    ///
    /// # Errors
    ///
    /// Returns an error if content or the repository is not set.
    pub fn build(self) -> Result<Client> {
        let content = self
            .content
            .context("Content is required. Use .content() to set it.")?;

        let repository = self
            .repository
            .context("Repository is required. Use .repository() to set it.")?;

        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(Client {
            content,
            config: self.config.unwrap_or_default(),
            repository,
            slot: self.slot.unwrap_or_else(|| DEFAULT_SLOT.to_owned()),
            seed,
            player_name: self.player_name.unwrap_or_else(|| "Wanderer".to_owned()),
            max_moves: self.max_moves.unwrap_or(DEFAULT_MAX_MOVES),
        })
    }
}
