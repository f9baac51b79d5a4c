//! People, possessions and progress records.

use game_core::state::{
    AllocatedSkillPoints, Character, Equipment, Investment, Item, JobExperience, LearningSpell,
    MagicProficiency, QualificationProgress,
};

use crate::error::DecodeError;
use crate::wire::{Message, Reader, Writer};

impl Message for Character {
    const NAME: &'static str = "Character";

    fn encode_fields(&self, w: &mut Writer) {
        w.double(1, self.affection);
        w.bool(2, self.alive);
        w.string(3, &self.being_type);
        w.string(4, &self.birthdate);
        w.string(5, &self.date_cooldown_start);
        w.string(6, &self.deathdate);
        w.string(7, &self.first_name);
        w.string(8, &self.id);
        w.bool(9, self.is_player_partner);
        w.string(10, &self.job);
        w.string(11, &self.last_name);
        w.strings(12, &self.qualifications);
        w.string(13, &self.sex);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut c = Character::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => c.affection = r.double(key)?,
                2 => c.alive = r.bool(key)?,
                3 => c.being_type = r.string(key)?,
                4 => c.birthdate = r.string(key)?,
                5 => c.date_cooldown_start = r.string(key)?,
                6 => c.deathdate = r.string(key)?,
                7 => c.first_name = r.string(key)?,
                8 => c.id = r.string(key)?,
                9 => c.is_player_partner = r.bool(key)?,
                10 => c.job = r.string(key)?,
                11 => c.last_name = r.string(key)?,
                12 => c.qualifications.push(r.string(key)?),
                13 => c.sex = r.string(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(c)
    }
}

impl Message for Item {
    const NAME: &'static str = "Item";

    fn encode_fields(&self, w: &mut Writer) {
        w.double(1, self.base_value);
        w.string(2, &self.icon);
        w.string(3, &self.id);
        w.string(4, &self.item_class);
        w.string(5, &self.name);
        w.string(6, &self.slot);
        w.bool(7, self.stackable);
        for (stat, value) in &self.stats {
            w.entry(8, |entry| {
                entry.string(1, stat);
                entry.double(2, *value);
            });
        }
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut item = Item::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => item.base_value = r.double(key)?,
                2 => item.icon = r.string(key)?,
                3 => item.id = r.string(key)?,
                4 => item.item_class = r.string(key)?,
                5 => item.name = r.string(key)?,
                6 => item.slot = r.string(key)?,
                7 => item.stackable = r.bool(key)?,
                8 => {
                    let (stat, value) = r.entry(key, |entry| {
                        let (mut stat, mut value) = (String::new(), 0.0);
                        while let Some(key) = entry.next_key()? {
                            match key.field {
                                1 => stat = entry.string(key)?,
                                2 => value = entry.double(key)?,
                                _ => entry.skip(key)?,
                            }
                        }
                        Ok((stat, value))
                    })?;
                    item.stats.insert(stat, value);
                }
                _ => r.skip(key)?,
            }
        }
        Ok(item)
    }
}

impl Message for Equipment {
    const NAME: &'static str = "Equipment";

    fn encode_fields(&self, w: &mut Writer) {
        w.optional(1, self.body.as_ref());
        w.optional(2, self.head.as_ref());
        w.optional(3, self.main_hand.as_ref());
        w.optional(4, self.off_hand.as_ref());
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut equipment = Equipment::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => equipment.body = Some(r.message(key)?),
                2 => equipment.head = Some(r.message(key)?),
                3 => equipment.main_hand = Some(r.message(key)?),
                4 => equipment.off_hand = Some(r.message(key)?),
                _ => r.skip(key)?,
            }
        }
        Ok(equipment)
    }
}

impl Message for Investment {
    const NAME: &'static str = "Investment";

    fn encode_fields(&self, w: &mut Writer) {
        w.double(1, self.current_gold_stock_pile);
        w.double(2, self.gold_invested);
        w.double(3, self.max_gold_stock_pile);
        w.double(4, self.maximum_return);
        w.double(5, self.minimum_return);
        w.string(6, &self.name);
        w.int32(7, self.turns_per_roll);
        w.int32(8, self.turns_until_next_roll);
        w.strings(9, &self.upgrades);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut investment = Investment::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => investment.current_gold_stock_pile = r.double(key)?,
                2 => investment.gold_invested = r.double(key)?,
                3 => investment.max_gold_stock_pile = r.double(key)?,
                4 => investment.maximum_return = r.double(key)?,
                5 => investment.minimum_return = r.double(key)?,
                6 => investment.name = r.string(key)?,
                7 => investment.turns_per_roll = r.int32(key)?,
                8 => investment.turns_until_next_roll = r.int32(key)?,
                9 => investment.upgrades.push(r.string(key)?),
                _ => r.skip(key)?,
            }
        }
        Ok(investment)
    }
}

impl Message for QualificationProgress {
    const NAME: &'static str = "QualificationProgress";

    fn encode_fields(&self, w: &mut Writer) {
        w.bool(1, self.completed);
        w.string(2, &self.name);
        w.int32(3, self.progress);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut q = QualificationProgress::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => q.completed = r.bool(key)?,
                2 => q.name = r.string(key)?,
                3 => q.progress = r.int32(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(q)
    }
}

impl Message for JobExperience {
    const NAME: &'static str = "JobExperience";

    fn encode_fields(&self, w: &mut Writer) {
        w.int32(1, self.experience);
        w.string(2, &self.job);
        w.int32(3, self.rank);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut job = JobExperience::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => job.experience = r.int32(key)?,
                2 => job.job = r.string(key)?,
                3 => job.rank = r.int32(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(job)
    }
}

impl Message for LearningSpell {
    const NAME: &'static str = "LearningSpell";

    fn encode_fields(&self, w: &mut Writer) {
        w.string(1, &self.book_name);
        w.string(2, &self.element);
        w.int32(3, self.experience);
        w.string(4, &self.spell_name);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut spell = LearningSpell::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => spell.book_name = r.string(key)?,
                2 => spell.element = r.string(key)?,
                3 => spell.experience = r.int32(key)?,
                4 => spell.spell_name = r.string(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(spell)
    }
}

impl Message for MagicProficiency {
    const NAME: &'static str = "MagicProficiency";

    fn encode_fields(&self, w: &mut Writer) {
        w.int32(1, self.proficiency);
        w.string(2, &self.school);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut proficiency = MagicProficiency::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => proficiency.proficiency = r.int32(key)?,
                2 => proficiency.school = r.string(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(proficiency)
    }
}

impl Message for AllocatedSkillPoints {
    const NAME: &'static str = "AllocatedSkillPoints";

    fn encode_fields(&self, w: &mut Writer) {
        w.int32(1, self.attack_power);
        w.int32(2, self.health);
        w.int32(3, self.mana);
        w.int32(4, self.sanity);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut points = AllocatedSkillPoints::default();
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => points.attack_power = r.int32(key)?,
                2 => points.health = r.int32(key)?,
                3 => points.mana = r.int32(key)?,
                4 => points.sanity = r.int32(key)?,
                _ => r.skip(key)?,
            }
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_stats_round_trip_in_any_order() {
        let mut item = Item {
            id: "sword-1".into(),
            name: "Rusty Sword".into(),
            slot: "one-hand".into(),
            base_value: 15.0,
            ..Item::default()
        };
        item.stats.insert("damage".into(), 6.0);
        item.stats.insert("armor".into(), 0.5);

        let decoded = Item::decode(&item.encode()).unwrap();
        assert_eq!(decoded, item);

        // Entries written in reverse order land in the same map
        let mut w = Writer::new();
        w.string(3, "sword-1");
        for (stat, value) in item.stats.iter().rev() {
            w.entry(8, |entry| {
                entry.string(1, stat);
                entry.double(2, *value);
            });
        }
        let reversed = Item::decode(&w.into_bytes()).unwrap();
        assert_eq!(reversed.stats, item.stats);
    }

    #[test]
    fn equipment_keeps_empty_slots_empty() {
        let equipment = Equipment {
            head: Some(Item::default()),
            ..Equipment::default()
        };
        let decoded = Equipment::decode(&equipment.encode()).unwrap();
        assert_eq!(decoded.head, Some(Item::default()));
        assert_eq!(decoded.body, None);
    }
}
