//! Creatures and what rides on them.

use game_core::state::{
    Condition, ConditionEffect, ConditionStyle, Creature, CreatureParts, EffectKind, EffectStyle,
    Enemy, Minion,
};

use super::{parse_enum, pool_max};
use crate::error::DecodeError;
use crate::wire::{Message, Reader, Writer};

impl Message for Condition {
    const NAME: &'static str = "Condition";

    fn encode_fields(&self, w: &mut Writer) {
        w.bool(1, self.aura);
        let kinds: Vec<&str> = self.effects.iter().map(|e| e.kind.as_str()).collect();
        w.strings(2, &kinds);
        let magnitudes: Vec<f64> = self.effects.iter().map(|e| e.magnitude).collect();
        w.doubles(3, &magnitudes);
        let styles: Vec<&str> = self.effects.iter().map(|e| e.style.as_str()).collect();
        w.strings(4, &styles);
        w.doubles(5, &self.health_damage);
        w.string(6, &self.icon);
        w.string(7, &self.id);
        w.string(8, &self.name);
        w.string(9, &self.placed_by);
        w.doubles(10, &self.sanity_damage);
        w.string(11, self.style.as_str());
        w.int32(12, self.turns);
        w.bool(13, self.debilitation);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut condition = Condition::default();
        let mut kinds = Vec::new();
        let mut styles = Vec::new();
        let mut magnitudes = Vec::new();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => condition.aura = r.bool(key)?,
                2 => kinds.push(EffectKind::from(r.string(key)?)),
                3 => r.doubles(key, &mut magnitudes)?,
                4 => styles.push(parse_enum::<EffectStyle>(r, key)?),
                5 => r.doubles(key, &mut condition.health_damage)?,
                6 => condition.icon = r.string(key)?,
                7 => condition.id = r.string(key)?,
                8 => condition.name = r.string(key)?,
                9 => condition.placed_by = r.string(key)?,
                10 => r.doubles(key, &mut condition.sanity_damage)?,
                11 => condition.style = parse_enum::<ConditionStyle>(r, key)?,
                12 => condition.turns = r.int32(key)?,
                13 => condition.debilitation = r.bool(key)?,
                _ => r.skip(key)?,
            }
        }

        if kinds.len() != styles.len() || kinds.len() != magnitudes.len() {
            return Err(DecodeError::ParallelArrays {
                message: Self::NAME,
                lengths: vec![kinds.len(), styles.len(), magnitudes.len()],
            });
        }
        condition.effects = kinds
            .into_iter()
            .zip(styles)
            .zip(magnitudes)
            .map(|((kind, style), magnitude)| ConditionEffect::new(kind, style, magnitude))
            .collect();
        Ok(condition)
    }
}

impl Message for Creature {
    const NAME: &'static str = "Creature";

    fn encode_fields(&self, w: &mut Writer) {
        w.double(1, self.attack_power);
        w.double(2, self.base_armor);
        w.string(3, &self.being_type);
        w.messages(4, self.conditions());
        w.string(5, &self.species);
        w.double(6, self.mana());
        w.double(7, self.base_mana_max());
        w.double(8, self.mana_regen);
        w.double(9, self.health());
        w.double(10, self.base_health_max());
        w.string(11, &self.id);
        w.double(12, self.sanity());
        w.double(13, self.base_sanity_max());
        w.strings(14, &self.attacks);
        w.double(15, self.magic_power);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut parts = CreatureParts::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => parts.attack_power = r.double(key)?,
                2 => parts.base_armor = r.double(key)?,
                3 => parts.being_type = r.string(key)?,
                4 => parts.conditions.push(r.message(key)?),
                5 => parts.species = r.string(key)?,
                6 => parts.mana = r.double(key)?,
                7 => parts.mana_max = pool_max(r, key)?,
                8 => parts.mana_regen = r.double(key)?,
                9 => parts.health = r.double(key)?,
                10 => parts.health_max = pool_max(r, key)?,
                11 => parts.id = r.string(key)?,
                12 => parts.sanity = r.double(key)?,
                13 => parts.sanity_max = pool_max(r, key)?,
                14 => parts.attacks.push(r.string(key)?),
                15 => parts.magic_power = r.double(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(Creature::from(parts))
    }
}

impl Message for Minion {
    const NAME: &'static str = "Minion";

    fn encode_fields(&self, w: &mut Writer) {
        w.message(1, &self.base);
        w.int32(2, self.turns_left_alive);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut minion = Minion::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => minion.base = r.message(key)?,
                2 => minion.turns_left_alive = r.int32(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(minion)
    }
}

impl Message for Enemy {
    const NAME: &'static str = "Enemy";

    fn encode_fields(&self, w: &mut Writer) {
        w.message(1, &self.base);
        w.messages(2, &self.minions);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut enemy = Enemy::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => enemy.base = r.message(key)?,
                2 => enemy.minions.push(r.message(key)?),
                _ => r.skip(key)?,
            }
        }
        Ok(enemy)
    }
}
