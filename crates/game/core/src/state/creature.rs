//! Creature stats shared by players, enemies and minions.
//!
//! Vital pools are private: every change goes through
//! [`Creature::apply_delta`], which clamps to the effective maxima and reports
//! defeat and sanity breaks to the caller.

use crate::conditions::{MaxModifiers, armor_scale};
use crate::state::Condition;

/// Mutable vital pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    Health,
    /// Mana for casters, energy for monsters.
    Mana,
    Sanity,
}

/// Threshold crossed by a vital change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VitalSignal {
    /// Health reached 0.
    Defeated,
    /// Sanity reached `-sanity_max`.
    SanityBroken,
}

/// Result of [`Creature::apply_delta`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VitalChange {
    pub stat: Stat,
    pub before: f64,
    pub after: f64,
    pub signal: Option<VitalSignal>,
}

impl VitalChange {
    /// Actual change after clamping.
    pub fn applied(&self) -> f64 {
        self.after - self.before
    }
}

/// Raw creature fields, used to assemble a [`Creature`] from content or saves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreatureParts {
    pub id: String,
    pub species: String,
    pub being_type: String,
    pub health: f64,
    pub health_max: f64,
    pub mana: f64,
    pub mana_max: f64,
    pub mana_regen: f64,
    pub sanity: f64,
    pub sanity_max: f64,
    pub attack_power: f64,
    pub magic_power: f64,
    pub base_armor: f64,
    pub conditions: Vec<Condition>,
    pub attacks: Vec<String>,
}

/// Combat stats of one creature.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    pub id: String,
    pub species: String,
    pub being_type: String,
    health: f64,
    health_max: f64,
    mana: f64,
    mana_max: f64,
    pub mana_regen: f64,
    sanity: f64,
    sanity_max: f64,
    pub attack_power: f64,
    pub magic_power: f64,
    pub base_armor: f64,
    conditions: Vec<Condition>,
    pub attacks: Vec<String>,
}

impl From<CreatureParts> for Creature {
    fn from(parts: CreatureParts) -> Self {
        debug_assert!(parts.health_max >= 0.0, "negative health max");
        debug_assert!(parts.mana_max >= 0.0, "negative mana max");
        debug_assert!(parts.sanity_max >= 0.0, "negative sanity max");

        let mut creature = Self {
            id: parts.id,
            species: parts.species,
            being_type: parts.being_type,
            health: parts.health,
            health_max: parts.health_max,
            mana: parts.mana,
            mana_max: parts.mana_max,
            mana_regen: parts.mana_regen,
            sanity: parts.sanity,
            sanity_max: parts.sanity_max,
            attack_power: parts.attack_power,
            magic_power: parts.magic_power,
            base_armor: parts.base_armor,
            conditions: parts.conditions,
            attacks: parts.attacks,
        };
        creature.reclamp();
        creature
    }
}

impl Creature {
    /// Full-health creature with the given maxima.
    pub fn fresh(
        id: impl Into<String>,
        species: impl Into<String>,
        health_max: f64,
        mana_max: f64,
        sanity_max: f64,
    ) -> Self {
        Self::from(CreatureParts {
            id: id.into(),
            species: species.into(),
            health: health_max,
            health_max,
            mana: mana_max,
            mana_max,
            sanity: sanity_max,
            sanity_max,
            ..CreatureParts::default()
        })
    }

    pub fn into_parts(self) -> CreatureParts {
        CreatureParts {
            id: self.id,
            species: self.species,
            being_type: self.being_type,
            health: self.health,
            health_max: self.health_max,
            mana: self.mana,
            mana_max: self.mana_max,
            mana_regen: self.mana_regen,
            sanity: self.sanity,
            sanity_max: self.sanity_max,
            attack_power: self.attack_power,
            magic_power: self.magic_power,
            base_armor: self.base_armor,
            conditions: self.conditions,
            attacks: self.attacks,
        }
    }

    // ===== current values =====

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn mana(&self) -> f64 {
        self.mana
    }

    pub fn sanity(&self) -> f64 {
        self.sanity
    }

    // ===== maxima =====

    /// Stored maximum, before condition modifiers.
    pub fn base_health_max(&self) -> f64 {
        self.health_max
    }

    pub fn base_mana_max(&self) -> f64 {
        self.mana_max
    }

    pub fn base_sanity_max(&self) -> f64 {
        self.sanity_max
    }

    /// Maximum after condition modifiers, never below 0.
    pub fn health_max(&self) -> f64 {
        self.max_modifiers().health.apply(self.health_max).max(0.0)
    }

    pub fn mana_max(&self) -> f64 {
        self.max_modifiers().mana.apply(self.mana_max).max(0.0)
    }

    pub fn sanity_max(&self) -> f64 {
        self.max_modifiers().sanity.apply(self.sanity_max).max(0.0)
    }

    /// Replaces the stored maxima; current values are re-clamped.
    pub fn set_base_maxima(&mut self, health_max: f64, mana_max: f64, sanity_max: f64) {
        debug_assert!(health_max >= 0.0 && mana_max >= 0.0 && sanity_max >= 0.0);
        self.health_max = health_max;
        self.mana_max = mana_max;
        self.sanity_max = sanity_max;
        self.reclamp();
    }

    // ===== derived =====

    /// Armor after condition modifiers, never below 0.
    pub fn armor(&self) -> f64 {
        armor_scale(&self.conditions).apply(self.base_armor).max(0.0)
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_undead(&self) -> bool {
        self.being_type.eq_ignore_ascii_case("undead")
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    // ===== mutation =====

    /// Apply a signed change to one vital pool.
    ///
    /// Health and mana clamp to `[0, max]`; sanity clamps to `[-max, max]`.
    /// A signal is reported only when this change crosses the threshold.
    pub fn apply_delta(&mut self, stat: Stat, amount: f64) -> VitalChange {
        let (before, after) = match stat {
            Stat::Health => {
                let before = self.health;
                self.health = (before + amount).clamp(0.0, self.health_max());
                (before, self.health)
            }
            Stat::Mana => {
                let before = self.mana;
                self.mana = (before + amount).clamp(0.0, self.mana_max());
                (before, self.mana)
            }
            Stat::Sanity => {
                let before = self.sanity;
                let max = self.sanity_max();
                self.sanity = (before + amount).clamp(-max, max);
                (before, self.sanity)
            }
        };

        let signal = match stat {
            Stat::Health if before > 0.0 && after <= 0.0 => Some(VitalSignal::Defeated),
            Stat::Sanity => {
                let floor = -self.sanity_max();
                (floor < 0.0 && before > floor && after <= floor)
                    .then_some(VitalSignal::SanityBroken)
            }
            _ => None,
        };

        VitalChange {
            stat,
            before,
            after,
            signal,
        }
    }

    /// Sets health to 0 regardless of maxima.
    pub fn kill(&mut self) -> VitalChange {
        let amount = -self.health;
        self.apply_delta(Stat::Health, amount)
    }

    /// Adds natural mana regeneration.
    pub fn regenerate(&mut self) -> VitalChange {
        self.apply_delta(Stat::Mana, self.mana_regen)
    }

    pub(crate) fn conditions_mut(&mut self) -> &mut Vec<Condition> {
        &mut self.conditions
    }

    /// Clamps current values to the effective maxima.
    pub(crate) fn reclamp(&mut self) {
        let (health_max, mana_max, sanity_max) =
            (self.health_max(), self.mana_max(), self.sanity_max());
        self.health = self.health.clamp(0.0, health_max);
        self.mana = self.mana.clamp(0.0, mana_max);
        self.sanity = self.sanity.clamp(-sanity_max, sanity_max);
    }

    fn max_modifiers(&self) -> MaxModifiers {
        MaxModifiers::from_conditions(&self.conditions)
    }
}
