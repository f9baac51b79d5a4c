//! Dungeon progress and the run in flight.

use game_core::state::{BoundingBox, CurrentDungeon, DungeonInstance, DungeonLevel, Tile};

use crate::error::DecodeError;
use crate::wire::{Message, Reader, Writer};

impl Message for Tile {
    const NAME: &'static str = "Tile";

    fn encode_fields(&self, w: &mut Writer) {
        w.bool(1, self.cleared_room);
        w.bool(2, self.is_boss_room);
        w.int32(3, self.x);
        w.int32(4, self.y);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut tile = Tile::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => tile.cleared_room = r.bool(key)?,
                2 => tile.is_boss_room = r.bool(key)?,
                3 => tile.x = r.int32(key)?,
                4 => tile.y = r.int32(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(tile)
    }
}

impl Message for BoundingBox {
    const NAME: &'static str = "BoundingBox";

    fn encode_fields(&self, w: &mut Writer) {
        w.int32(1, self.height);
        w.int32(2, self.offset_x);
        w.int32(3, self.offset_y);
        w.int32(4, self.width);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut bounds = BoundingBox::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => bounds.height = r.int32(key)?,
                2 => bounds.offset_x = r.int32(key)?,
                3 => bounds.offset_y = r.int32(key)?,
                4 => bounds.width = r.int32(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(bounds)
    }
}

impl Message for CurrentDungeon {
    const NAME: &'static str = "CurrentDungeon";

    fn encode_fields(&self, w: &mut Writer) {
        w.message(1, &self.current_position);
        w.messages(2, &self.dungeon_map);
        w.optional(3, self.enemy.as_ref());
        w.bool(4, self.fighting_boss);
        w.string(5, &self.instance);
        w.string(6, &self.level);
        w.message(7, &self.map_dimensions);
        w.bool(8, self.tile_won);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut dungeon = CurrentDungeon::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => dungeon.current_position = r.message(key)?,
                2 => dungeon.dungeon_map.push(r.message(key)?),
                3 => dungeon.enemy = Some(r.message(key)?),
                4 => dungeon.fighting_boss = r.bool(key)?,
                5 => dungeon.instance = r.string(key)?,
                6 => dungeon.level = r.string(key)?,
                7 => dungeon.map_dimensions = r.message(key)?,
                8 => dungeon.tile_won = r.bool(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(dungeon)
    }
}

impl Message for DungeonLevel {
    const NAME: &'static str = "DungeonLevel";

    fn encode_fields(&self, w: &mut Writer) {
        w.bool(1, self.boss_defeated);
        w.strings(2, &self.bosses);
        w.int32(3, self.level);
        w.int32(4, self.tiles);
        w.int32(5, self.step);
        w.int32(6, self.steps_before_boss);
        w.bool(7, self.unlocked);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut level = DungeonLevel::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => level.boss_defeated = r.bool(key)?,
                2 => level.bosses.push(r.string(key)?),
                3 => level.level = r.int32(key)?,
                4 => level.tiles = r.int32(key)?,
                5 => level.step = r.int32(key)?,
                6 => level.steps_before_boss = r.int32(key)?,
                7 => level.unlocked = r.bool(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(level)
    }
}

impl Message for DungeonInstance {
    const NAME: &'static str = "DungeonInstance";

    fn encode_fields(&self, w: &mut Writer) {
        w.messages(1, &self.levels);
        w.string(2, &self.name);
        w.double(3, self.difficulty);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut instance = DungeonInstance::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => instance.levels.push(r.message(key)?),
                2 => instance.name = r.string(key)?,
                3 => instance.difficulty = r.double(key)?,
                _ => r.skip(key)?,
            }
        }
        // Saves written before level locks existed carry no `unlocked` flags.
        if !instance.levels.iter().any(|level| level.unlocked) {
            if let Some(first) = instance.levels.first_mut() {
                first.unlocked = true;
            }
        }
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::state::{Creature, Enemy};

    #[test]
    fn pending_selection_is_not_persisted() {
        let dungeon = CurrentDungeon {
            instance: "crypt".into(),
            level: "2".into(),
            current_position: Tile::new(3, -1),
            dungeon_map: vec![Tile::new(3, 0), Tile::new(3, -1)],
            enemy: Some(Enemy::new(Creature::fresh("rat-0", "rat", 10.0, 0.0, 0.0))),
            pending_action: Some(game_core::ActionRef::Attack("slash".into())),
            ..CurrentDungeon::default()
        };

        let decoded = CurrentDungeon::decode(&dungeon.encode()).unwrap();
        assert_eq!(decoded.pending_action, None);
        assert_eq!(
            decoded,
            CurrentDungeon {
                pending_action: None,
                ..dungeon
            }
        );
        assert_eq!(
            decoded.phase(),
            Some(game_core::EncounterPhase::AwaitingPlayerAction)
        );
    }
}
