//! Session-wide world state.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::state::{Character, DungeonInstance, Item};

/// Merchant and its stock.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shop {
    pub archetype: String,
    pub base_gold: f64,
    pub current_gold: f64,
    pub inventory: Vec<Item>,
    pub last_stock_refresh: String,
    pub shop_keeper: Option<Character>,
}

/// World clock, dungeon progress and player preferences.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    pub date: NaiveDate,
    pub at_death_screen: bool,
    pub completed_instances: Vec<String>,
    pub dungeon_instances: Vec<DungeonInstance>,
    pub shops: Vec<Shop>,
    /// Health fraction below which the UI warns.
    pub health_warning: f64,
    pub tutorials_enabled: bool,
    pub tutorials_shown: BTreeMap<String, bool>,
    pub vibration_enabled: String,
    pub color_scheme: String,
}

impl Game {
    /// Calendar start for new games.
    pub fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1300, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            at_death_screen: false,
            completed_instances: Vec::new(),
            dungeon_instances: Vec::new(),
            shops: Vec::new(),
            health_warning: 0.2,
            tutorials_enabled: true,
            tutorials_shown: BTreeMap::new(),
            vibration_enabled: "full".to_owned(),
            color_scheme: "system".to_owned(),
        }
    }

    pub fn instance(&self, name: &str) -> Option<&DungeonInstance> {
        self.dungeon_instances.iter().find(|i| i.name == name)
    }

    pub fn instance_mut(&mut self, name: &str) -> Option<&mut DungeonInstance> {
        self.dungeon_instances.iter_mut().find(|i| i.name == name)
    }

    /// Records an instance as completed once every level's boss is down.
    pub fn note_completion(&mut self, name: &str) -> bool {
        let done = self
            .instance(name)
            .is_some_and(|i| !i.levels.is_empty() && i.levels.iter().all(|l| l.boss_defeated));
        if done && !self.completed_instances.iter().any(|c| c == name) {
            self.completed_instances.push(name.to_owned());
            return true;
        }
        false
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Self::start_date())
    }
}
