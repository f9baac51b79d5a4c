//! Combat actions.

use crate::env::{AttackDefinition, ContentKind, ContentOracle, OracleError, SpellDefinition, Targeting};

/// Name of an attack or spell in the content tables.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionRef {
    Attack(String),
    Spell(String),
}

impl ActionRef {
    pub fn name(&self) -> &str {
        match self {
            Self::Attack(name) | Self::Spell(name) => name,
        }
    }

    /// Looks the action up in the content tables.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::NotFound` when the name is unknown.
    pub fn resolve(&self, content: &dyn ContentOracle) -> Result<CombatAction, OracleError> {
        match self {
            Self::Attack(name) => content
                .attack(name)
                .cloned()
                .map(CombatAction::Attack)
                .ok_or_else(|| OracleError::not_found(ContentKind::Attack, name.as_str())),
            Self::Spell(name) => content
                .spell(name)
                .cloned()
                .map(CombatAction::Spell)
                .ok_or_else(|| OracleError::not_found(ContentKind::Spell, name.as_str())),
        }
    }
}

/// What a combatant does with its turn.
#[derive(Clone, Debug, PartialEq)]
pub enum CombatAction {
    Attack(AttackDefinition),
    Spell(SpellDefinition),
    Pass,
}

impl CombatAction {
    pub fn name(&self) -> &str {
        match self {
            Self::Attack(attack) => &attack.name,
            Self::Spell(spell) => &spell.name,
            Self::Pass => "pass",
        }
    }

    /// `None` for [`CombatAction::Pass`], which takes no targets.
    pub fn targeting(&self) -> Option<Targeting> {
        match self {
            Self::Attack(attack) => Some(attack.targeting),
            Self::Spell(spell) => Some(spell.targeting),
            Self::Pass => None,
        }
    }

    pub fn is_spell(&self) -> bool {
        matches!(self, Self::Spell(_))
    }

    pub fn buffs(&self) -> &[String] {
        match self {
            Self::Attack(attack) => &attack.buffs,
            Self::Spell(spell) => &spell.buffs,
            Self::Pass => &[],
        }
    }

    pub fn summons(&self) -> &[String] {
        match self {
            Self::Attack(attack) => &attack.summons,
            Self::Spell(spell) => &spell.summons,
            Self::Pass => &[],
        }
    }

    pub fn debuff_names(&self) -> impl Iterator<Item = &str> {
        let debuffs = match self {
            Self::Attack(attack) => attack.debuffs.as_slice(),
            Self::Spell(spell) => spell.debuffs.as_slice(),
            Self::Pass => &[],
        };
        debuffs.iter().map(|d| d.name.as_str())
    }
}
