//! The player character.
//!
//! Combat stats are flattened onto the player message rather than nested as
//! a `Creature`; id, species and being type are rebuilt from the identity.

use game_core::state::{Creature, CreatureParts, PlayerCharacter};

use super::pool_max;
use crate::error::DecodeError;
use crate::wire::{Message, Reader, Writer};

impl Message for PlayerCharacter {
    const NAME: &'static str = "PlayerCharacter";

    fn encode_fields(&self, w: &mut Writer) {
        let stats = &self.stats;
        w.message(1, &self.allocated_skill_points);
        w.double(2, stats.attack_power);
        w.message(3, &self.identity);
        w.string(4, &self.blessing);
        w.messages(5, &self.children);
        w.messages(6, stats.conditions());
        w.optional(7, self.current_dungeon.as_ref());
        w.message(8, &self.equipment);
        w.double(9, self.gold);
        w.double(10, stats.health());
        w.double(11, stats.base_health_max());
        w.messages(12, &self.inventory);
        w.messages(13, &self.investments);
        w.messages(14, &self.job_experience);
        w.messages(15, &self.known_characters);
        w.strings(16, &self.known_spells);
        w.messages(17, &self.learning_spells);
        w.messages(18, &self.magic_proficiencies);
        w.double(19, stats.mana());
        w.double(20, stats.base_mana_max());
        w.double(21, stats.mana_regen);
        w.messages(22, &self.minions);
        w.messages(23, &self.parents);
        w.messages(24, &self.partners);
        w.strings(25, &self.physical_attacks);
        w.string(26, &self.player_class);
        w.messages(27, &self.qualification_progress);
        w.double(28, stats.sanity());
        w.double(29, stats.base_sanity_max());
        w.optional(30, self.saved_enemy.as_ref());
        w.int32(31, self.unallocated_skill_points);
        w.double(32, stats.magic_power);
        w.double(33, self.dexterity);
        w.double(34, stats.base_armor);
        w.bool(35, self.saved_boss_fight);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut parts = CreatureParts::default();
        let mut player = PlayerCharacter::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => player.allocated_skill_points = r.message(key)?,
                2 => parts.attack_power = r.double(key)?,
                3 => player.identity = r.message(key)?,
                4 => player.blessing = r.string(key)?,
                5 => player.children.push(r.message(key)?),
                6 => parts.conditions.push(r.message(key)?),
                7 => player.current_dungeon = Some(r.message(key)?),
                8 => player.equipment = r.message(key)?,
                9 => player.gold = r.double(key)?,
                10 => parts.health = r.double(key)?,
                11 => parts.health_max = pool_max(r, key)?,
                12 => player.inventory.push(r.message(key)?),
                13 => player.investments.push(r.message(key)?),
                14 => player.job_experience.push(r.message(key)?),
                15 => player.known_characters.push(r.message(key)?),
                16 => player.known_spells.push(r.string(key)?),
                17 => player.learning_spells.push(r.message(key)?),
                18 => player.magic_proficiencies.push(r.message(key)?),
                19 => parts.mana = r.double(key)?,
                20 => parts.mana_max = pool_max(r, key)?,
                21 => parts.mana_regen = r.double(key)?,
                22 => player.minions.push(r.message(key)?),
                23 => player.parents.push(r.message(key)?),
                24 => player.partners.push(r.message(key)?),
                25 => player.physical_attacks.push(r.string(key)?),
                26 => player.player_class = r.string(key)?,
                27 => player.qualification_progress.push(r.message(key)?),
                28 => parts.sanity = r.double(key)?,
                29 => parts.sanity_max = pool_max(r, key)?,
                30 => player.saved_enemy = Some(r.message(key)?),
                31 => player.unallocated_skill_points = r.int32(key)?,
                32 => parts.magic_power = r.double(key)?,
                33 => player.dexterity = r.double(key)?,
                34 => parts.base_armor = r.double(key)?,
                35 => player.saved_boss_fight = r.bool(key)?,
                _ => r.skip(key)?,
            }
        }

        let aligned = PlayerCharacter::new(
            std::mem::take(&mut player.identity),
            Creature::from(parts),
        );
        Ok(PlayerCharacter {
            identity: aligned.identity,
            stats: aligned.stats,
            ..player
        })
    }
}
