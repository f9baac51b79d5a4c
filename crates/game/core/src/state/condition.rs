//! Conditions attached to creatures.
//!
//! A [`Condition`] is a placed, already-scaled instance: every magnitude it
//! carries is a final delta. Templates that still need scaling live in
//! [`crate::env::ConditionTemplate`].

use strum::EnumString;

/// Buff or debuff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConditionStyle {
    Buff,
    #[default]
    Debuff,
}

impl ConditionStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buff => "buff",
            Self::Debuff => "debuff",
        }
    }
}

/// How an effect magnitude combines with the stat it touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EffectStyle {
    /// Added or subtracted as-is.
    #[default]
    Flat,
    /// Scaled by the placer's damage at placement, multiplicative afterwards.
    Multiplier,
    /// Fraction of the holder's maximum at placement, multiplicative afterwards.
    Percentage,
}

impl EffectStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Multiplier => "multiplier",
            Self::Percentage => "percentage",
        }
    }

    pub const fn is_flat(&self) -> bool {
        matches!(self, Self::Flat)
    }
}

/// Named effect a condition carries.
///
/// Names match the persisted strings. Unrecognised names are preserved in
/// [`EffectKind::Other`] so saves written by newer builds round-trip.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum EffectKind {
    #[strum(serialize = "health damage")]
    HealthDamage,
    #[strum(serialize = "sanity damage")]
    SanityDamage,
    #[strum(serialize = "heal")]
    Heal,
    #[strum(serialize = "sanity heal")]
    SanityHeal,
    #[strum(serialize = "mana regen")]
    ManaRegen,
    #[strum(serialize = "mana drain")]
    ManaDrain,
    #[strum(serialize = "accuracy reduction")]
    AccuracyReduction,
    #[strum(serialize = "accuracy increase")]
    AccuracyIncrease,
    #[strum(serialize = "strengthen")]
    Strengthen,
    #[strum(serialize = "weaken")]
    Weaken,
    #[strum(serialize = "blur")]
    Blur,
    #[strum(serialize = "thorns")]
    Thorns,
    #[strum(serialize = "revenge")]
    Revenge,
    #[strum(serialize = "armor increase")]
    ArmorIncrease,
    #[strum(serialize = "armor decrease")]
    ArmorDecrease,
    #[strum(serialize = "healthMax increase")]
    HealthMaxIncrease,
    #[strum(serialize = "healthMax decrease")]
    HealthMaxDecrease,
    #[strum(serialize = "sanityMax increase")]
    SanityMaxIncrease,
    #[strum(serialize = "sanityMax decrease")]
    SanityMaxDecrease,
    #[strum(serialize = "manaMax increase")]
    ManaMaxIncrease,
    #[strum(serialize = "manaMax decrease")]
    ManaMaxDecrease,
    #[strum(serialize = "stun")]
    Stun,
    #[strum(serialize = "silenced")]
    Silenced,
    #[strum(serialize = "destroy undead")]
    DestroyUndead,
    #[strum(default)]
    Other(String),
}

impl EffectKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::HealthDamage => "health damage",
            Self::SanityDamage => "sanity damage",
            Self::Heal => "heal",
            Self::SanityHeal => "sanity heal",
            Self::ManaRegen => "mana regen",
            Self::ManaDrain => "mana drain",
            Self::AccuracyReduction => "accuracy reduction",
            Self::AccuracyIncrease => "accuracy increase",
            Self::Strengthen => "strengthen",
            Self::Weaken => "weaken",
            Self::Blur => "blur",
            Self::Thorns => "thorns",
            Self::Revenge => "revenge",
            Self::ArmorIncrease => "armor increase",
            Self::ArmorDecrease => "armor decrease",
            Self::HealthMaxIncrease => "healthMax increase",
            Self::HealthMaxDecrease => "healthMax decrease",
            Self::SanityMaxIncrease => "sanityMax increase",
            Self::SanityMaxDecrease => "sanityMax decrease",
            Self::ManaMaxIncrease => "manaMax increase",
            Self::ManaMaxDecrease => "manaMax decrease",
            Self::Stun => "stun",
            Self::Silenced => "silenced",
            Self::DestroyUndead => "destroy undead",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for EffectKind {
    fn from(value: String) -> Self {
        // The default variant makes parsing infallible.
        value.parse().unwrap_or(Self::Other(value))
    }
}

impl From<EffectKind> for String {
    fn from(value: EffectKind) -> Self {
        match value {
            EffectKind::Other(name) => name,
            other => other.as_str().to_owned(),
        }
    }
}

/// One effect of a condition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionEffect {
    pub kind: EffectKind,
    pub style: EffectStyle,
    pub magnitude: f64,
}

impl ConditionEffect {
    pub fn new(kind: EffectKind, style: EffectStyle, magnitude: f64) -> Self {
        Self {
            kind,
            style,
            magnitude,
        }
    }
}

/// A buff or debuff active on a creature.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub id: String,
    pub name: String,
    pub style: ConditionStyle,
    /// Remaining turns. Ignored for auras and debilitations.
    pub turns: i32,
    /// Continuously active; never counts down.
    pub aura: bool,
    pub effects: Vec<ConditionEffect>,
    /// Health lost per tick; negative entries heal.
    pub health_damage: Vec<f64>,
    /// Sanity lost per tick; negative entries restore.
    pub sanity_damage: Vec<f64>,
    /// Id of the creature (or source label) that placed the condition.
    pub placed_by: String,
    pub icon: String,
    /// Permanent and unique per id on a creature.
    pub debilitation: bool,
}

impl Condition {
    pub fn has_effect(&self, kind: &EffectKind) -> bool {
        self.effects.iter().any(|effect| &effect.kind == kind)
    }

    /// Sum of all magnitudes for `kind`.
    pub fn magnitude_of(&self, kind: &EffectKind) -> f64 {
        self.effects
            .iter()
            .filter(|effect| &effect.kind == kind)
            .map(|effect| effect.magnitude)
            .sum()
    }

    pub fn health_per_tick(&self) -> f64 {
        self.health_damage.iter().sum()
    }

    pub fn sanity_per_tick(&self) -> f64 {
        self.sanity_damage.iter().sum()
    }

    /// True once a countdown condition has run out.
    pub fn is_expired(&self) -> bool {
        !self.aura && !self.debilitation && self.turns <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_kind_parses_known_and_unknown_names() {
        assert_eq!(
            "accuracy reduction".parse::<EffectKind>().unwrap(),
            EffectKind::AccuracyReduction
        );
        assert_eq!(
            EffectKind::from("undead cower".to_owned()),
            EffectKind::Other("undead cower".to_owned())
        );
        assert_eq!(String::from(EffectKind::HealthMaxIncrease), "healthMax increase");
    }

    #[test]
    fn expiry_ignores_auras_and_debilitations() {
        let mut condition = Condition {
            turns: 0,
            ..Condition::default()
        };
        assert!(condition.is_expired());

        condition.aura = true;
        assert!(!condition.is_expired());

        condition.aura = false;
        condition.debilitation = true;
        assert!(!condition.is_expired());
    }
}
