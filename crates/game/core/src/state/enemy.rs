//! Enemy rosters and summoned minions.

use crate::state::Creature;

/// Turn-limited summoned creature.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minion {
    pub base: Creature,
    pub turns_left_alive: i32,
}

impl Minion {
    pub fn new(base: Creature, turns_left_alive: i32) -> Self {
        Self {
            base,
            turns_left_alive,
        }
    }

    /// Out of turns or out of health.
    pub fn is_expired(&self) -> bool {
        self.turns_left_alive <= 0 || self.base.is_defeated()
    }

    /// Consumes one turn of lifespan.
    pub fn spend_turn(&mut self) {
        self.turns_left_alive -= 1;
    }
}

/// Removes expired minions, keeping order. Returns how many were dropped.
pub fn prune_minions(minions: &mut Vec<Minion>) -> usize {
    let before = minions.len();
    minions.retain(|minion| !minion.is_expired());
    before - minions.len()
}

/// Opposing side of an encounter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub base: Creature,
    pub minions: Vec<Minion>,
}

impl Enemy {
    pub fn new(base: Creature) -> Self {
        Self {
            base,
            minions: Vec::new(),
        }
    }

    /// Base and every minion defeated.
    pub fn is_cleared(&self) -> bool {
        self.base.is_defeated() && self.minions.iter().all(|m| m.base.is_defeated())
    }

    /// Creatures still standing, base first.
    pub fn alive_count(&self) -> usize {
        usize::from(!self.base.is_defeated())
            + self.minions.iter().filter(|m| !m.base.is_defeated()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Stat;

    #[test]
    fn cleared_only_when_everyone_is_down() {
        let mut enemy = Enemy::new(Creature::fresh("e", "orc", 10.0, 0.0, 0.0));
        enemy
            .minions
            .push(Minion::new(Creature::fresh("m1", "rat", 5.0, 0.0, 0.0), 3));
        enemy
            .minions
            .push(Minion::new(Creature::fresh("m2", "rat", 5.0, 0.0, 0.0), 3));

        enemy.base.apply_delta(Stat::Health, -10.0);
        enemy.minions[0].base.apply_delta(Stat::Health, -5.0);
        assert!(!enemy.is_cleared());
        assert_eq!(enemy.alive_count(), 1);

        enemy.minions[1].base.apply_delta(Stat::Health, -5.0);
        assert!(enemy.is_cleared());
    }

    #[test]
    fn prune_drops_expired() {
        let mut minions = vec![
            Minion::new(Creature::fresh("a", "imp", 5.0, 0.0, 0.0), 0),
            Minion::new(Creature::fresh("b", "imp", 5.0, 0.0, 0.0), 2),
        ];
        assert_eq!(prune_minions(&mut minions), 1);
        assert_eq!(minions[0].base.id, "b");
    }
}
