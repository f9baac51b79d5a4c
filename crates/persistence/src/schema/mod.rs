//! Field-number layout of every persisted entity.
//!
//! Numbers are permanent. A new field takes the next unused number and an
//! old field's number is never reused. Scalars follow proto3 conventions:
//! `double` is fixed64, `int32` and `bool` are varints, strings and embedded
//! messages are length-delimited, repeated doubles are packed, and maps are
//! repeated `{ 1: key, 2: value }` entries.
//!
//! | Message | Fields |
//! |---------|--------|
//! | `AllocatedSkillPoints` | 1 attackPower, 2 health, 3 mana, 4 sanity (int32) |
//! | `BoundingBox` | 1 height, 2 offsetX, 3 offsetY, 4 width (int32) |
//! | `Character` | 1 affection (double), 2 alive, 3 beingType, 4 birthdate, 5 dateCooldownStart, 6 deathdate, 7 firstName, 8 id, 9 isPlayerPartner, 10 job, 11 lastName, 12 qualifications (repeated), 13 sex |
//! | `Condition` | 1 aura, 2 effect (repeated string), 3 effectMagnitude (packed double), 4 effectStyle (repeated string), 5 healthDamage (packed double), 6 icon, 7 id, 8 name, 9 placedBy, 10 sanityDamage (packed double), 11 style, 12 turns, 13 debilitation |
//! | `Creature` | 1 attackPower, 2 baseArmor, 3 beingType, 4 conditions, 5 creatureSpecies, 6 energy, 7 energyMax, 8 energyRegen, 9 health, 10 healthMax, 11 id, 12 sanity, 13 sanityMax, 14 attacks, 15 magicPower |
//! | `CurrentDungeon` | 1 currentPosition, 2 dungeonMap, 3 enemy, 4 fightingBoss, 5 instance, 6 level, 7 mapDimensions, 8 tileWon |
//! | `DungeonInstance` | 1 levels, 2 name, 3 difficulty |
//! | `DungeonLevel` | 1 bossDefeated, 2 bosses, 3 level, 4 tiles, 5 step, 6 stepsBeforeBoss, 7 unlocked |
//! | `Enemy` | 1 base, 2 minions |
//! | `Equipment` | 1 body, 2 head, 3 mainHand, 4 offHand |
//! | `Game` | 1 atDeathScreen, 2 colorScheme, 3 completedInstances, 4 date (`YYYY-MM-DD`), 5 dungeonInstances, 6 healthWarning, 7 shops, 8 tutorialsEnabled, 9 tutorialsShown (map string→bool), 10 vibrationEnabled |
//! | `Investment` | 1 currentGoldStockPile, 2 goldInvested, 3 maxGoldStockPile, 4 maximumReturn, 5 minimumReturn, 6 name, 7 turnsPerRoll, 8 turnsUntilNextRoll, 9 upgrades |
//! | `Item` | 1 baseValue, 2 icon, 3 id, 4 itemClass, 5 name, 6 slot, 7 stackable, 8 stats (map string→double) |
//! | `JobExperience` | 1 experience, 2 job, 3 rank |
//! | `LearningSpell` | 1 bookName, 2 element, 3 experience, 4 spellName |
//! | `MagicProficiency` | 1 proficiency, 2 school |
//! | `Minion` | 1 base, 2 turnsLeftAlive |
//! | `PlayerCharacter` | 1 allocatedSkillPoints, 2 attackPower, 3 base (Character), 4 blessing, 5 children, 6 conditions, 7 currentDungeon, 8 equipment, 9 gold, 10 health, 11 healthMax, 12 inventory, 13 investments, 14 jobExperience, 15 knownCharacters, 16 knownSpells, 17 learningSpells, 18 magicProficiencies, 19 mana, 20 manaMax, 21 manaRegen, 22 minions, 23 parents, 24 partners, 25 physicalAttacks, 26 playerClass, 27 qualificationProgress, 28 sanity, 29 sanityMax, 30 savedEnemy, 31 unAllocatedSkillPoints, 32 magicPower, 33 dexterity, 34 baseArmor, 35 savedBossFight |
//! | `QualificationProgress` | 1 completed, 2 name, 3 progress |
//! | `Shop` | 1 archetype, 2 baseGold, 3 currentGold, 4 inventory, 5 lastStockRefresh, 6 shopKeeper |
//! | `Tile` | 1 clearedRoom, 2 isBossRoom, 3 x, 4 y |
//!
//! Encounter phase and a pending target selection are transient and never
//! written; a loaded encounter resumes waiting for the player's action.

mod character;
mod creature;
mod dungeon;
mod game;
mod player;

use std::str::FromStr;

use crate::error::DecodeError;
use crate::wire::{Key, Reader};

/// Parses a string-valued enum field. An absent field yields the default.
fn parse_enum<T>(reader: &mut Reader<'_>, key: Key) -> Result<T, DecodeError>
where
    T: FromStr + Default,
{
    let raw = reader.string(key)?;
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse().map_err(|_| reader.invalid(key, raw))
}

/// Reads the ceiling of a vital pool. Negative or NaN ceilings are rejected.
fn pool_max(reader: &mut Reader<'_>, key: Key) -> Result<f64, DecodeError> {
    let max = reader.double(key)?;
    if max.is_nan() || max < 0.0 {
        return Err(reader.invalid(key, max.to_string()));
    }
    Ok(max)
}
