//! Content tables and characters shared by the integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use game_core::env::{
    AttackDefinition, ConditionTemplate, CreatureTemplate, DungeonDefinition,
    DungeonLevelDefinition, MinionTemplate, SpellDefinition,
};
use game_core::state::Character;
use game_core::{ContentOracle, Creature, Game, PlayerCharacter};

#[derive(Default)]
pub struct Tables {
    pub attacks: BTreeMap<String, AttackDefinition>,
    pub creatures: BTreeMap<String, CreatureTemplate>,
    pub dungeons: Vec<DungeonDefinition>,
}

impl ContentOracle for Tables {
    fn attack(&self, name: &str) -> Option<&AttackDefinition> {
        self.attacks.get(name)
    }

    fn spell(&self, _name: &str) -> Option<&SpellDefinition> {
        None
    }

    fn condition(&self, _name: &str) -> Option<&ConditionTemplate> {
        None
    }

    fn creature(&self, species: &str) -> Option<&CreatureTemplate> {
        self.creatures.get(species)
    }

    fn minion(&self, _species: &str) -> Option<&MinionTemplate> {
        None
    }

    fn dungeons(&self) -> &[DungeonDefinition] {
        &self.dungeons
    }

    fn sanity_debuffs(&self) -> &[ConditionTemplate] {
        &[]
    }
}

/// A crypt of rats with a brute boss behind five steps.
pub fn crypt() -> Tables {
    let mut tables = Tables::default();
    for attack in [
        AttackDefinition {
            name: "slash".into(),
            ..AttackDefinition::default()
        },
        AttackDefinition {
            name: "flurry".into(),
            hits: 3,
            ..AttackDefinition::default()
        },
        AttackDefinition {
            name: "claw".into(),
            ..AttackDefinition::default()
        },
    ] {
        tables.attacks.insert(attack.name.clone(), attack);
    }
    for (species, health) in [("rat", 10.0), ("brute", 100.0)] {
        tables.creatures.insert(
            species.into(),
            CreatureTemplate {
                species: species.into(),
                health,
                attack_power: 5.0,
                attacks: vec!["claw".into()],
                gold_min: 4.0,
                gold_max: 5.0,
                ..CreatureTemplate::default()
            },
        );
    }
    tables.dungeons.push(DungeonDefinition {
        name: "crypt".into(),
        difficulty: 1.0,
        levels: vec![DungeonLevelDefinition {
            level: 1,
            tiles: 12,
            steps_before_boss: 5,
            bosses: vec!["brute".into()],
            encounters: vec!["rat".into()],
        }],
        ..DungeonDefinition::default()
    });
    tables
}

pub fn world(tables: &Tables) -> Game {
    let mut game = Game::default();
    game.dungeon_instances = tables.dungeons.iter().map(|d| d.instantiate()).collect();
    game
}

pub fn hero() -> PlayerCharacter {
    let identity = Character {
        id: "hero".into(),
        first_name: "Ada".into(),
        being_type: "human".into(),
        alive: true,
        ..Character::default()
    };
    let mut stats = Creature::fresh("hero", "player", 100.0, 50.0, 50.0);
    stats.attack_power = 10.0;
    let mut hero = PlayerCharacter::new(identity, stats);
    hero.dexterity = 10.0;
    hero.physical_attacks = vec!["slash".into(), "flurry".into()];
    hero
}

pub fn spawn(tables: &Tables, species: &str, id: &str) -> Creature {
    tables.creatures[species].spawn(id.into())
}
