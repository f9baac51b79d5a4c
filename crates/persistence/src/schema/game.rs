//! World state: calendar, instances, shops and preferences.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use game_core::state::{Game, Shop};

use crate::error::DecodeError;
use crate::wire::{Message, Reader, Writer};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl Message for Shop {
    const NAME: &'static str = "Shop";

    fn encode_fields(&self, w: &mut Writer) {
        w.string(1, &self.archetype);
        w.double(2, self.base_gold);
        w.double(3, self.current_gold);
        w.messages(4, &self.inventory);
        w.string(5, &self.last_stock_refresh);
        w.optional(6, self.shop_keeper.as_ref());
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut shop = Shop::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => shop.archetype = r.string(key)?,
                2 => shop.base_gold = r.double(key)?,
                3 => shop.current_gold = r.double(key)?,
                4 => shop.inventory.push(r.message(key)?),
                5 => shop.last_stock_refresh = r.string(key)?,
                6 => shop.shop_keeper = Some(r.message(key)?),
                _ => r.skip(key)?,
            }
        }
        Ok(shop)
    }
}

impl Message for Game {
    const NAME: &'static str = "Game";

    fn encode_fields(&self, w: &mut Writer) {
        w.bool(1, self.at_death_screen);
        w.string(2, &self.color_scheme);
        w.strings(3, &self.completed_instances);
        w.string(4, &self.date.format(DATE_FORMAT).to_string());
        w.messages(5, &self.dungeon_instances);
        w.double(6, self.health_warning);
        w.messages(7, &self.shops);
        w.bool(8, self.tutorials_enabled);
        for (tutorial, shown) in &self.tutorials_shown {
            w.entry(9, |entry| {
                entry.string(1, tutorial);
                entry.bool(2, *shown);
            });
        }
        w.string(10, &self.vibration_enabled);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        // Absent fields are zero values, not the new-game defaults.
        let mut game = Game {
            date: Game::start_date(),
            at_death_screen: false,
            completed_instances: Vec::new(),
            dungeon_instances: Vec::new(),
            shops: Vec::new(),
            health_warning: 0.0,
            tutorials_enabled: false,
            tutorials_shown: BTreeMap::new(),
            vibration_enabled: String::new(),
            color_scheme: String::new(),
        };
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => game.at_death_screen = r.bool(key)?,
                2 => game.color_scheme = r.string(key)?,
                3 => game.completed_instances.push(r.string(key)?),
                4 => {
                    let raw = r.string(key)?;
                    if !raw.is_empty() {
                        game.date = NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                            .map_err(|_| r.invalid(key, raw))?;
                    }
                }
                5 => game.dungeon_instances.push(r.message(key)?),
                6 => game.health_warning = r.double(key)?,
                7 => game.shops.push(r.message(key)?),
                8 => game.tutorials_enabled = r.bool(key)?,
                9 => {
                    let (tutorial, shown) = r.entry(key, |entry| {
                        let (mut tutorial, mut shown) = (String::new(), false);
                        while let Some(key) = entry.next_key()? {
                            match key.field {
                                1 => tutorial = entry.string(key)?,
                                2 => shown = entry.bool(key)?,
                                _ => entry.skip(key)?,
                            }
                        }
                        Ok((tutorial, shown))
                    })?;
                    game.tutorials_shown.insert(tutorial, shown);
                }
                10 => game.vibration_enabled = r.string(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_round_trips() {
        let mut game = Game::new(NaiveDate::from_ymd_opt(1302, 11, 4).unwrap());
        game.tutorials_shown.insert("dungeon".into(), true);
        game.tutorials_shown.insert("shop".into(), false);
        game.completed_instances.push("goblin warrens".into());

        let decoded = Game::decode(&game.encode()).unwrap();
        assert_eq!(decoded, game);
    }

    #[test]
    fn empty_payload_is_all_zero_values() {
        let game = Game::decode(&[]).unwrap();
        assert_eq!(game.date, Game::start_date());
        assert!(!game.tutorials_enabled);
        assert_eq!(game.health_warning, 0.0);
        assert!(game.vibration_enabled.is_empty());
    }

    #[test]
    fn garbled_date_is_malformed() {
        let mut w = Writer::new();
        w.string(4, "13th of Frost");
        assert!(matches!(
            Game::decode(&w.into_bytes()),
            Err(DecodeError::InvalidValue { field: 4, .. })
        ));
    }
}
