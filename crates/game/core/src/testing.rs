//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use crate::env::{
    AttackDefinition, ConditionTemplate, ContentOracle, CreatureTemplate, DungeonDefinition,
    MinionTemplate, SpellDefinition,
};
use crate::state::{Character, Creature, PlayerCharacter};

#[derive(Default)]
pub(crate) struct StubContent {
    pub attacks: BTreeMap<String, AttackDefinition>,
    pub spells: BTreeMap<String, SpellDefinition>,
    pub conditions: BTreeMap<String, ConditionTemplate>,
    pub creatures: BTreeMap<String, CreatureTemplate>,
    pub minions: BTreeMap<String, MinionTemplate>,
    pub dungeons: Vec<DungeonDefinition>,
    pub sanity_debuffs: Vec<ConditionTemplate>,
}

impl StubContent {
    pub fn with_attack(mut self, attack: AttackDefinition) -> Self {
        self.attacks.insert(attack.name.clone(), attack);
        self
    }

    pub fn with_spell(mut self, spell: SpellDefinition) -> Self {
        self.spells.insert(spell.name.clone(), spell);
        self
    }

    pub fn with_condition(mut self, condition: ConditionTemplate) -> Self {
        self.conditions.insert(condition.name.clone(), condition);
        self
    }

    pub fn with_creature(mut self, creature: CreatureTemplate) -> Self {
        self.creatures.insert(creature.species.clone(), creature);
        self
    }

    pub fn with_minion(mut self, minion: MinionTemplate) -> Self {
        self.minions.insert(minion.creature.species.clone(), minion);
        self
    }

    pub fn with_dungeon(mut self, dungeon: DungeonDefinition) -> Self {
        self.dungeons.push(dungeon);
        self
    }
}

impl ContentOracle for StubContent {
    fn attack(&self, name: &str) -> Option<&AttackDefinition> {
        self.attacks.get(name)
    }

    fn spell(&self, name: &str) -> Option<&SpellDefinition> {
        self.spells.get(name)
    }

    fn condition(&self, name: &str) -> Option<&ConditionTemplate> {
        self.conditions.get(name)
    }

    fn creature(&self, species: &str) -> Option<&CreatureTemplate> {
        self.creatures.get(species)
    }

    fn minion(&self, species: &str) -> Option<&MinionTemplate> {
        self.minions.get(species)
    }

    fn dungeons(&self) -> &[DungeonDefinition] {
        &self.dungeons
    }

    fn sanity_debuffs(&self) -> &[ConditionTemplate] {
        &self.sanity_debuffs
    }
}

/// Player with 100 health, 50 mana, 50 sanity and 10 attack power.
pub(crate) fn player() -> PlayerCharacter {
    let identity = Character {
        id: "hero".into(),
        first_name: "Ada".into(),
        being_type: "human".into(),
        alive: true,
        ..Character::default()
    };
    let mut stats = Creature::fresh("hero", "player", 100.0, 50.0, 50.0);
    stats.attack_power = 10.0;
    stats.magic_power = 10.0;
    let mut player = PlayerCharacter::new(identity, stats);
    player.dexterity = 10.0;
    player.physical_attacks = vec!["slash".into()];
    player
}

/// Monster with the given health and no armor.
pub(crate) fn monster(id: &str, health: f64) -> Creature {
    let mut creature = Creature::fresh(id, "goblin", health, 20.0, 10.0);
    creature.attack_power = 5.0;
    creature.attacks = vec!["claw".into()];
    creature
}
