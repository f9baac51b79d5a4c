//! In-memory content tables.

use std::collections::BTreeMap;

use game_core::ContentOracle;
use game_core::env::{
    AttackDefinition, ConditionTemplate, CreatureTemplate, DungeonDefinition, MinionTemplate,
    SpellDefinition,
};

/// Every content table keyed by name.
///
/// Later inserts replace earlier entries with the same name, so a mod file
/// loaded after the base catalog overrides it.
#[derive(Clone, Debug, Default)]
pub struct ContentTables {
    attacks: BTreeMap<String, AttackDefinition>,
    spells: BTreeMap<String, SpellDefinition>,
    conditions: BTreeMap<String, ConditionTemplate>,
    creatures: BTreeMap<String, CreatureTemplate>,
    minions: BTreeMap<String, MinionTemplate>,
    dungeons: Vec<DungeonDefinition>,
    sanity_debuffs: Vec<ConditionTemplate>,
}

impl ContentTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_attacks(&mut self, attacks: impl IntoIterator<Item = AttackDefinition>) {
        for attack in attacks {
            self.attacks.insert(attack.name.clone(), attack);
        }
    }

    pub fn extend_spells(&mut self, spells: impl IntoIterator<Item = SpellDefinition>) {
        for spell in spells {
            self.spells.insert(spell.name.clone(), spell);
        }
    }

    pub fn extend_conditions(&mut self, conditions: impl IntoIterator<Item = ConditionTemplate>) {
        for condition in conditions {
            self.conditions.insert(condition.name.clone(), condition);
        }
    }

    pub fn extend_creatures(&mut self, creatures: impl IntoIterator<Item = CreatureTemplate>) {
        for creature in creatures {
            self.creatures.insert(creature.species.clone(), creature);
        }
    }

    pub fn extend_minions(&mut self, minions: impl IntoIterator<Item = MinionTemplate>) {
        for minion in minions {
            self.minions.insert(minion.creature.species.clone(), minion);
        }
    }

    /// Adds dungeons, replacing any with the same name in place.
    pub fn extend_dungeons(&mut self, dungeons: impl IntoIterator<Item = DungeonDefinition>) {
        for dungeon in dungeons {
            match self.dungeons.iter_mut().find(|d| d.name == dungeon.name) {
                Some(existing) => *existing = dungeon,
                None => self.dungeons.push(dungeon),
            }
        }
    }

    pub fn extend_sanity_debuffs(&mut self, debuffs: impl IntoIterator<Item = ConditionTemplate>) {
        self.sanity_debuffs.extend(debuffs);
    }

    /// Cross-table references that point at nothing.
    ///
    /// Each entry reads `"<owner>: <kind> '<name>'"`. An empty list means the
    /// tables are consistent.
    pub fn missing_references(&self) -> Vec<String> {
        let mut missing = Vec::new();
        let mut check = |owner: &str, kind: &str, name: &str, found: bool| {
            if !found {
                missing.push(format!("{owner}: {kind} '{name}'"));
            }
        };

        for attack in self.attacks.values() {
            let owner = format!("attack {}", attack.name);
            for buff in &attack.buffs {
                check(&owner, "condition", buff, self.conditions.contains_key(buff));
            }
            for debuff in &attack.debuffs {
                let found = self.conditions.contains_key(&debuff.name);
                check(&owner, "condition", &debuff.name, found);
            }
            for summon in &attack.summons {
                check(&owner, "minion", summon, self.minions.contains_key(summon));
            }
        }

        for spell in self.spells.values() {
            let owner = format!("spell {}", spell.name);
            for buff in &spell.buffs {
                check(&owner, "condition", buff, self.conditions.contains_key(buff));
            }
            for debuff in &spell.debuffs {
                let found = self.conditions.contains_key(&debuff.name);
                check(&owner, "condition", &debuff.name, found);
            }
            for summon in &spell.summons {
                check(&owner, "minion", summon, self.minions.contains_key(summon));
            }
        }

        let stat_blocks = self
            .creatures
            .values()
            .chain(self.minions.values().map(|m| &m.creature));
        for creature in stat_blocks {
            let owner = format!("creature {}", creature.species);
            for attack in &creature.attacks {
                check(&owner, "attack", attack, self.attacks.contains_key(attack));
            }
        }

        for dungeon in &self.dungeons {
            let owner = format!("dungeon {}", dungeon.name);
            for unlock in &dungeon.unlocks {
                let found = self.dungeons.iter().any(|d| &d.name == unlock);
                check(&owner, "dungeon", unlock, found);
            }
            for level in &dungeon.levels {
                let owner = format!("dungeon {} level {}", dungeon.name, level.level);
                for species in level.bosses.iter().chain(&level.encounters) {
                    let found = self.creatures.contains_key(species);
                    check(&owner, "creature", species, found);
                }
            }
        }

        missing
    }

    /// Entry counts per table, for load logging.
    pub fn summary(&self) -> String {
        format!(
            "{} attacks, {} spells, {} conditions, {} creatures, {} minions, {} dungeons",
            self.attacks.len(),
            self.spells.len(),
            self.conditions.len(),
            self.creatures.len(),
            self.minions.len(),
            self.dungeons.len()
        )
    }
}

impl ContentOracle for ContentTables {
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
