//! Loading, creating and saving the world for one session.

use anyhow::{Context, Result};
use game_content::ContentTables;
use game_core::state::{Character, Creature, Game, PlayerCharacter};
use game_core::ContentOracle;
use persistence::{LoadedFrom, SaveBundle, SaveRepository};

/// Starting kit for a new character.
const STARTING_ATTACKS: [&str; 3] = ["punch", "slash", "flurry"];
const STARTING_HEALTH: f64 = 100.0;
const STARTING_MANA: f64 = 50.0;
const STARTING_SANITY: f64 = 50.0;
const STARTING_ATTACK_POWER: f64 = 10.0;
const STARTING_MANA_REGEN: f64 = 5.0;
const STARTING_DEXTERITY: f64 = 10.0;

/// World and player for one session.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub game: Game,
    pub player: PlayerCharacter,
    /// Where the state came from; `None` for a new game.
    pub loaded_from: Option<LoadedFrom>,
}

impl Session {
    /// Fresh world with the starter dungeons open and a new character.
    pub fn new_game(content: &ContentTables, player_name: &str, seed: u64) -> Self {
        let mut game = Game::new(Game::start_date());
        sync_instances(&mut game, content);

        let identity = Character {
            id: format!("player-{seed:016x}"),
            first_name: player_name.to_owned(),
            being_type: "human".to_owned(),
            alive: true,
            ..Character::default()
        };
        let mut stats = Creature::fresh(
            "",
            "",
            STARTING_HEALTH,
            STARTING_MANA,
            STARTING_SANITY,
        );
        stats.attack_power = STARTING_ATTACK_POWER;
        stats.mana_regen = STARTING_MANA_REGEN;

        let mut player = PlayerCharacter::new(identity, stats);
        player.dexterity = STARTING_DEXTERITY;
        player.physical_attacks = STARTING_ATTACKS.iter().map(|a| (*a).to_owned()).collect();

        tracing::info!(player = %player.id(), "new game");
        Self {
            game,
            player,
            loaded_from: None,
        }
    }

    /// Loads `slot`, or starts a new game when it is empty or the character
    /// in it has died.
    ///
    /// # Errors
    ///
    /// Storage failures, and saves whose primary and backup are both
    /// malformed.
    pub fn load_or_new(
        repository: &dyn SaveRepository,
        slot: &str,
        content: &ContentTables,
        player_name: &str,
        seed: u64,
    ) -> Result<Self> {
        let loaded = repository
            .load_with_fallback(slot)
            .with_context(|| format!("failed to load save slot '{slot}'"))?;

        let Some((bundle, from)) = loaded else {
            tracing::info!(slot, "no save found");
            return Ok(Self::new_game(content, player_name, seed));
        };
        if bundle.player.is_dead() || bundle.game.at_death_screen {
            tracing::info!(slot, "saved character is dead");
            return Ok(Self::new_game(content, player_name, seed));
        }

        let SaveBundle { mut game, player } = bundle;
        sync_instances(&mut game, content);
        tracing::info!(slot, ?from, date = %game.date, gold = player.gold, "save loaded");
        Ok(Self {
            game,
            player,
            loaded_from: Some(from),
        })
    }

    /// # Errors
    ///
    /// Storage failures.
    pub fn save(&self, repository: &dyn SaveRepository, slot: &str) -> Result<()> {
        let bundle = SaveBundle::new(self.game.clone(), self.player.clone());
        repository
            .save(slot, &bundle)
            .with_context(|| format!("failed to save slot '{slot}'"))?;
        tracing::info!(slot, "game saved");
        Ok(())
    }
}

/// Adds every starter dungeon the world does not have yet. Other dungeons
/// open through boss victories.
fn sync_instances(game: &mut Game, content: &ContentTables) {
    for definition in content.dungeons().iter().filter(|d| d.starter) {
        if game.instance(&definition.name).is_none() {
            tracing::debug!(instance = %definition.name, "unlocking starter instance");
            game.dungeon_instances.push(definition.instantiate());
        }
    }
}
