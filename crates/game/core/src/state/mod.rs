//! Authoritative game state representation.
//!
//! This module owns the entity graph that is persisted between sessions:
//! creatures and their conditions, encounters, dungeon runs, the player and
//! the world clock. Callers read it freely but mutate vitals and conditions
//! only through [`Creature::apply_delta`] and the condition engine.
mod character;
mod condition;
mod creature;
mod dungeon;
mod enemy;
mod game;
mod player;

pub use character::{
    AllocatedSkillPoints, Character, Element, Equipment, Investment, Item, JobExperience,
    LearningSpell, MagicProficiency, ProficiencyRank, QualificationProgress,
};
pub use condition::{Condition, ConditionEffect, ConditionStyle, EffectKind, EffectStyle};
pub use creature::{Creature, CreatureParts, Stat, VitalChange, VitalSignal};
pub use dungeon::{
    BoundingBox, CurrentDungeon, DungeonInstance, DungeonLevel, EncounterPhase, Tile,
};
pub use enemy::{Enemy, Minion, prune_minions};
pub use game::{Game, Shop};
pub use player::{PLAYER_SPECIES, PlayerCharacter};
