//! Traits describing read-only world data.
//!
//! Oracles expose static content tables and randomness. The [`Env`] aggregate
//! bundles them with the balancing config so the engine can access everything
//! it needs without hard coupling to concrete implementations.
mod content;
mod error;
mod rng;

pub use content::{
    AttackDefinition, ConditionTemplate, ContentOracle, CreatureTemplate, DebuffRoll,
    DungeonDefinition, DungeonLevelDefinition, EffectTemplate, MinionTemplate, SpellDefinition,
    Targeting,
};
pub use error::{ContentKind, OracleError};
pub use rng::{Dice, PcgRng, RngOracle, compute_seed};

use crate::config::GameConfig;

static DEFAULT_CONFIG: GameConfig = GameConfig::new();

/// Aggregates read-only oracles required by the engine entry points.
pub struct Env<'a, C, R>
where
    C: ContentOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    content: Option<&'a C>,
    rng: Option<&'a R>,
    config: Option<&'a GameConfig>,
}

impl<C, R> Clone for Env<'_, C, R>
where
    C: ContentOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, R> Copy for Env<'_, C, R>
where
    C: ContentOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn ContentOracle + 'a, dyn RngOracle + 'a>;

impl<'a, C, R> Env<'a, C, R>
where
    C: ContentOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(content: Option<&'a C>, rng: Option<&'a R>, config: Option<&'a GameConfig>) -> Self {
        Self {
            content,
            rng,
            config,
        }
    }

    pub fn with_all(content: &'a C, rng: &'a R, config: &'a GameConfig) -> Self {
        Self::new(Some(content), Some(rng), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            content: None,
            rng: None,
            config: None,
        }
    }

    /// Returns the ContentOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ContentNotAvailable` if no content oracle was provided.
    pub fn content(&self) -> Result<&'a C, OracleError> {
        self.content.ok_or(OracleError::ContentNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Balancing config; defaults apply when none was provided.
    pub fn config(&self) -> &'a GameConfig {
        self.config.unwrap_or(&DEFAULT_CONFIG)
    }
}

impl<'a, C, R> Env<'a, C, R>
where
    C: ContentOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (consumes self).
    pub fn into_game_env(self) -> GameEnv<'a> {
        let content: Option<&'a dyn ContentOracle> = self.content.map(|content| content as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(content, rng, self.config)
    }
}

impl<'a> GameEnv<'a> {
    /// Dice over this environment's RNG oracle.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn dice(&self, seed: u64, cursor: u64) -> Result<Dice<'a>, OracleError> {
        Ok(Dice::resume(self.rng()?, seed, cursor))
    }
}
