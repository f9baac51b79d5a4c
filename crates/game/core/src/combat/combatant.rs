//! Participants in a combat exchange.

use crate::combat::DamageType;
use crate::state::{Creature, Element, Enemy, Minion, PlayerCharacter, ProficiencyRank};

/// Anything that can act or be targeted in combat.
///
/// Vital pools and conditions live on the wrapped [`Creature`]; implementors
/// only add what differs between players and monsters.
pub trait Combatant {
    fn creature(&self) -> &Creature;

    fn creature_mut(&mut self) -> &mut Creature;

    /// Armor used against physical damage.
    fn armor(&self) -> f64 {
        self.creature().armor()
    }

    /// Fraction of elemental damage of `damage_type` ignored.
    fn resistance(&self, _damage_type: DamageType) -> f64 {
        0.0
    }

    /// Rank in a school, or `None` when spells are not gated by proficiency.
    fn proficiency(&self, _element: Element) -> Option<ProficiencyRank> {
        None
    }

    /// Whether attacks draw their energy cost from the mana pool.
    ///
    /// Creatures without a pool attack for free.
    fn pays_energy(&self) -> bool {
        self.creature().base_mana_max() > 0.0
    }
}

impl Combatant for Creature {
    fn creature(&self) -> &Creature {
        self
    }

    fn creature_mut(&mut self) -> &mut Creature {
        self
    }
}

impl Combatant for Minion {
    fn creature(&self) -> &Creature {
        &self.base
    }

    fn creature_mut(&mut self) -> &mut Creature {
        &mut self.base
    }
}

impl Combatant for Enemy {
    fn creature(&self) -> &Creature {
        &self.base
    }

    fn creature_mut(&mut self) -> &mut Creature {
        &mut self.base
    }
}

impl Combatant for PlayerCharacter {
    fn creature(&self) -> &Creature {
        &self.stats
    }

    fn creature_mut(&mut self) -> &mut Creature {
        &mut self.stats
    }

    fn armor(&self) -> f64 {
        self.total_armor()
    }

    fn resistance(&self, damage_type: DamageType) -> f64 {
        damage_type
            .resistance_key()
            .map_or(0.0, |key| self.equipment.stat(key))
    }

    fn proficiency(&self, element: Element) -> Option<ProficiencyRank> {
        Some(self.proficiency_rank(element))
    }

    fn pays_energy(&self) -> bool {
        false
    }
}
