//! People, items and progression records owned by the player.

use std::collections::BTreeMap;

use strum::{Display, EnumIter, EnumString};

use crate::env::Dice;

/// Named person: family, partners, acquaintances, shopkeepers.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: String,
    pub being_type: String,
    pub birthdate: String,
    pub deathdate: String,
    pub alive: bool,
    pub affection: f64,
    pub job: String,
    pub qualifications: Vec<String>,
    pub is_player_partner: bool,
    pub date_cooldown_start: String,
}

impl Character {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Lowers affection, floored at -100.
    pub fn decay_affection(&mut self, amount: f64) {
        self.affection = (self.affection - amount).max(-100.0);
    }
}

/// Inventory or shop item.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub item_class: String,
    pub slot: String,
    pub base_value: f64,
    pub stackable: bool,
    /// Named stat bonuses (`armor`, `fireResistance`, ...).
    pub stats: BTreeMap<String, f64>,
}

impl Item {
    pub fn stat(&self, name: &str) -> f64 {
        self.stats.get(name).copied().unwrap_or(0.0)
    }
}

/// Equipped items.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub main_hand: Option<Item>,
    pub off_hand: Option<Item>,
    pub head: Option<Item>,
    pub body: Option<Item>,
}

impl Equipment {
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        [&self.main_hand, &self.off_hand, &self.head, &self.body]
            .into_iter()
            .flatten()
    }

    /// Sum of one stat over every equipped item.
    pub fn stat(&self, name: &str) -> f64 {
        self.items().map(|item| item.stat(name)).sum()
    }
}

/// Gold-producing holding.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Investment {
    pub name: String,
    pub gold_invested: f64,
    pub minimum_return: f64,
    pub maximum_return: f64,
    pub turns_per_roll: i32,
    pub turns_until_next_roll: i32,
    pub max_gold_stock_pile: f64,
    pub current_gold_stock_pile: f64,
    pub upgrades: Vec<String>,
}

impl Investment {
    /// Advances one world tick; rolls a return into the stockpile when due.
    ///
    /// Returns the gold added this tick.
    pub fn turn(&mut self, dice: &mut Dice<'_>) -> f64 {
        self.turns_until_next_roll -= 1;
        if self.turns_until_next_roll > 0 {
            return 0.0;
        }
        self.turns_until_next_roll = self.turns_per_roll;

        let roll = dice
            .between(self.minimum_return, self.maximum_return)
            .floor();
        let before = self.current_gold_stock_pile;
        self.current_gold_stock_pile = (before + roll).min(self.max_gold_stock_pile);
        self.current_gold_stock_pile - before
    }

    /// Empties the stockpile.
    pub fn collect_gold(&mut self) -> f64 {
        core::mem::take(&mut self.current_gold_stock_pile)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualificationProgress {
    pub name: String,
    pub progress: i32,
    pub completed: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobExperience {
    pub job: String,
    pub experience: i32,
    pub rank: i32,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LearningSpell {
    pub book_name: String,
    pub element: String,
    pub experience: i32,
    pub spell_name: String,
}

/// Raw proficiency points in one school of magic.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MagicProficiency {
    pub school: String,
    pub proficiency: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocatedSkillPoints {
    pub attack_power: i32,
    pub health: i32,
    pub mana: i32,
    pub sanity: i32,
}

/// School of magic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, Display, EnumIter)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Element {
    Fire,
    Water,
    Air,
    Earth,
    Blood,
    Summoning,
    Pestilence,
    Bone,
    Holy,
    Vengeance,
    Protection,
    BeastMastery,
    Arcane,
    Assassination,
}

/// Proficiency tier within a school.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, Display, EnumIter)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProficiencyRank {
    #[default]
    Novice,
    Apprentice,
    Adept,
    Expert,
    Master,
    Legend,
}

impl ProficiencyRank {
    /// Points required to reach this rank.
    pub const fn threshold(&self) -> i32 {
        match self {
            Self::Novice => 0,
            Self::Apprentice => 50,
            Self::Adept => 150,
            Self::Expert => 250,
            Self::Master => 350,
            Self::Legend => 500,
        }
    }

    pub const fn from_points(points: i32) -> Self {
        if points >= 500 {
            Self::Legend
        } else if points >= 350 {
            Self::Master
        } else if points >= 250 {
            Self::Expert
        } else if points >= 150 {
            Self::Adept
        } else if points >= 50 {
            Self::Apprentice
        } else {
            Self::Novice
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn proficiency_thresholds() {
        assert_eq!(ProficiencyRank::from_points(0), ProficiencyRank::Novice);
        assert_eq!(ProficiencyRank::from_points(49), ProficiencyRank::Novice);
        assert_eq!(ProficiencyRank::from_points(50), ProficiencyRank::Apprentice);
        assert_eq!(ProficiencyRank::from_points(349), ProficiencyRank::Expert);
        assert_eq!(ProficiencyRank::from_points(900), ProficiencyRank::Legend);
        assert!(ProficiencyRank::Adept > ProficiencyRank::Apprentice);
        assert_eq!(
            ProficiencyRank::from_points(ProficiencyRank::Master.threshold()),
            ProficiencyRank::Master
        );
    }

    #[test]
    fn element_names_parse() {
        assert_eq!("beastMastery".parse::<Element>().unwrap(), Element::BeastMastery);
        assert_eq!("Fire".parse::<Element>().unwrap(), Element::Fire);
        assert_eq!(Element::BeastMastery.to_string(), "beastMastery");
    }

    #[test]
    fn investment_rolls_into_capped_pile() {
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 3);
        let mut investment = Investment {
            name: "mill".into(),
            minimum_return: 40.0,
            maximum_return: 60.0,
            turns_per_roll: 2,
            turns_until_next_roll: 2,
            max_gold_stock_pile: 70.0,
            ..Investment::default()
        };

        assert_eq!(investment.turn(&mut dice), 0.0);
        assert_eq!(investment.turns_until_next_roll, 1);

        let first = investment.turn(&mut dice);
        assert!((40.0..60.0).contains(&first));
        assert_eq!(investment.turns_until_next_roll, 2);

        investment.turn(&mut dice);
        investment.turn(&mut dice);
        assert_eq!(investment.current_gold_stock_pile, 70.0);

        assert_eq!(investment.collect_gold(), 70.0);
        assert_eq!(investment.current_gold_stock_pile, 0.0);
    }

    #[test]
    fn equipment_sums_stats() {
        let mut helm = Item::default();
        helm.stats.insert("armor".into(), 4.0);
        let mut plate = Item::default();
        plate.stats.insert("armor".into(), 10.0);
        let equipment = Equipment {
            head: Some(helm),
            body: Some(plate),
            ..Equipment::default()
        };
        assert_eq!(equipment.stat("armor"), 14.0);
        assert_eq!(equipment.stat("fireResistance"), 0.0);
    }
}
