//! Static content definitions and the oracle that serves them.
//!
//! Attacks, spells, condition templates, creature templates and dungeon
//! layouts are immutable reference data keyed by name. The engine looks them
//! up through [`ContentOracle`] and never mutates them.

use std::collections::BTreeMap;

use strum::EnumString;

use crate::combat::DamageType;
use crate::state::{
    ConditionStyle, Creature, CreatureParts, DungeonInstance, DungeonLevel, EffectKind,
    EffectStyle, Element, ProficiencyRank,
};

/// How many creatures an action may hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Targeting {
    #[default]
    Single,
    /// Up to two targets.
    Dual,
    /// Every creature on the opposing side.
    #[strum(serialize = "aoe", serialize = "area")]
    Area,
}

impl Targeting {
    /// Number of targets the action takes when `available` are standing.
    pub fn target_count(&self, available: usize) -> usize {
        match self {
            Self::Single => available.min(1),
            Self::Dual => available.min(2),
            Self::Area => available,
        }
    }

    /// Whether `count` supplied targets is a valid selection.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Self::Single => count == 1,
            Self::Dual => (1..=2).contains(&count),
            Self::Area => count >= 1,
        }
    }

    /// True when the action hits every standing creature without a choice.
    pub fn covers(&self, available: usize) -> bool {
        self.target_count(available) >= available
    }
}

/// Debuff an action may place, with its independent proc chance.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebuffRoll {
    pub name: String,
    pub chance: f64,
}

/// Unscaled effect of a condition template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTemplate {
    pub kind: EffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: EffectStyle,
    pub amount: f64,
}

/// Condition as authored; scaled into a [`crate::state::Condition`] when placed.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditionTemplate {
    pub name: String,
    pub style: ConditionStyle,
    pub turns: i32,
    pub aura: bool,
    pub debilitation: bool,
    pub icon: String,
    pub effects: Vec<EffectTemplate>,
}

/// Physical attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackDefinition {
    pub name: String,
    /// Energy drawn from monsters' pools; players attack for free.
    pub energy_cost: f64,
    /// `None` always connects.
    pub hit_chance: Option<f64>,
    pub targeting: Targeting,
    pub damage_mult: f64,
    pub flat_health_damage: f64,
    pub flat_sanity_damage: f64,
    /// Positive hurts the user, negative heals it.
    pub self_damage: f64,
    pub hits: u32,
    pub buffs: Vec<String>,
    pub debuffs: Vec<DebuffRoll>,
    pub summons: Vec<String>,
}

impl Default for AttackDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            energy_cost: 0.0,
            hit_chance: Some(1.0),
            targeting: Targeting::Single,
            damage_mult: 1.0,
            flat_health_damage: 0.0,
            flat_sanity_damage: 0.0,
            self_damage: 0.0,
            hits: 1,
            buffs: Vec::new(),
            debuffs: Vec::new(),
            summons: Vec::new(),
        }
    }
}

/// Spell of one school.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellDefinition {
    pub name: String,
    pub element: Element,
    pub proficiency_needed: ProficiencyRank,
    pub mana_cost: f64,
    /// `None` always connects.
    pub hit_chance: Option<f64>,
    pub targeting: Targeting,
    /// Base damage per type before the caster's power bonus.
    pub damage: BTreeMap<DamageType, f64>,
    pub sanity_damage: f64,
    /// Positive hurts the caster, negative heals it.
    pub self_damage: f64,
    pub buffs: Vec<String>,
    pub debuffs: Vec<DebuffRoll>,
    pub summons: Vec<String>,
}

impl Default for SpellDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            element: Element::Arcane,
            proficiency_needed: ProficiencyRank::Novice,
            mana_cost: 0.0,
            hit_chance: None,
            targeting: Targeting::Single,
            damage: BTreeMap::new(),
            sanity_damage: 0.0,
            self_damage: 0.0,
            buffs: Vec::new(),
            debuffs: Vec::new(),
            summons: Vec::new(),
        }
    }
}

/// Stat block for spawning a creature.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CreatureTemplate {
    pub species: String,
    pub being_type: String,
    pub health: f64,
    pub mana: f64,
    pub mana_regen: f64,
    pub sanity: f64,
    pub attack_power: f64,
    pub magic_power: f64,
    pub armor: f64,
    pub attacks: Vec<String>,
    /// Gold dropped on defeat, rolled in `[gold_min, gold_max)`.
    pub gold_min: f64,
    pub gold_max: f64,
}

impl CreatureTemplate {
    /// Full-health instance with the given id.
    pub fn spawn(&self, id: String) -> Creature {
        Creature::from(CreatureParts {
            id,
            species: self.species.clone(),
            being_type: self.being_type.clone(),
            health: self.health,
            health_max: self.health,
            mana: self.mana,
            mana_max: self.mana,
            mana_regen: self.mana_regen,
            sanity: self.sanity,
            sanity_max: self.sanity,
            attack_power: self.attack_power,
            magic_power: self.magic_power,
            base_armor: self.armor,
            conditions: Vec::new(),
            attacks: self.attacks.clone(),
        })
    }
}

/// Summonable creature.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinionTemplate {
    pub creature: CreatureTemplate,
    pub turns_alive: i32,
}

/// Authored layout of one dungeon floor.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DungeonLevelDefinition {
    pub level: i32,
    pub tiles: i32,
    pub steps_before_boss: i32,
    /// Boss roster: the first entry leads, the rest escort it.
    pub bosses: Vec<String>,
    /// Creature templates rolled for ordinary rooms.
    pub encounters: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DungeonDefinition {
    pub name: String,
    pub difficulty: f64,
    pub levels: Vec<DungeonLevelDefinition>,
    /// Available from the start of a new game.
    pub starter: bool,
    /// Instances opened once every floor of this one is unlocked and the
    /// deepest boss falls.
    pub unlocks: Vec<String>,
}

impl DungeonDefinition {
    /// Fresh progress record for a new game.
    pub fn instantiate(&self) -> DungeonInstance {
        DungeonInstance {
            name: self.name.clone(),
            difficulty: self.difficulty,
            levels: self
                .levels
                .iter()
                .enumerate()
                .map(|(index, level)| DungeonLevel {
                    level: level.level,
                    tiles: level.tiles,
                    bosses: level.bosses.clone(),
                    boss_defeated: false,
                    unlocked: index == 0,
                    step: 0,
                    steps_before_boss: level.steps_before_boss,
                })
                .collect(),
        }
    }

    pub fn level(&self, level: i32) -> Option<&DungeonLevelDefinition> {
        self.levels.iter().find(|l| l.level == level)
    }
}

/// Read-only lookup of static content by name.
pub trait ContentOracle: Send + Sync {
    fn attack(&self, name: &str) -> Option<&AttackDefinition>;

    fn spell(&self, name: &str) -> Option<&SpellDefinition>;

    fn condition(&self, name: &str) -> Option<&ConditionTemplate>;

    fn creature(&self, species: &str) -> Option<&CreatureTemplate>;

    fn minion(&self, species: &str) -> Option<&MinionTemplate>;

    fn dungeons(&self) -> &[DungeonDefinition];

    /// Pool rolled from while the player's sanity is negative.
    fn sanity_debuffs(&self) -> &[ConditionTemplate];

    fn dungeon(&self, name: &str) -> Option<&DungeonDefinition> {
        self.dungeons().iter().find(|d| d.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targeting_selection_rules() {
        assert!(Targeting::Single.accepts(1));
        assert!(!Targeting::Single.accepts(2));
        assert!(Targeting::Dual.accepts(2));
        assert!(!Targeting::Dual.accepts(3));
        assert!(!Targeting::Area.accepts(0));

        assert!(Targeting::Single.covers(1));
        assert!(!Targeting::Single.covers(3));
        assert!(Targeting::Dual.covers(2));
        assert!(Targeting::Area.covers(5));

        assert_eq!("aoe".parse::<Targeting>().unwrap(), Targeting::Area);
    }

    #[test]
    fn dungeon_definition_instantiates_fresh_progress() {
        let def = DungeonDefinition {
            name: "crypt".into(),
            difficulty: 2.0,
            levels: vec![DungeonLevelDefinition {
                level: 1,
                tiles: 12,
                steps_before_boss: 5,
                bosses: vec!["lich".into()],
                encounters: vec!["skeleton".into()],
            }],
            ..DungeonDefinition::default()
        };
        let instance = def.instantiate();
        assert!(instance.levels[0].unlocked);
        assert_eq!(instance.levels[0].step, 0);
        assert_eq!(instance.levels[0].steps_before_boss, 5);
        assert!(!instance.levels[0].boss_defeated);
        assert_eq!(instance.difficulty, 2.0);
    }
}
