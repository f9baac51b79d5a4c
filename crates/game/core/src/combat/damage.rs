//! Damage types and mitigation curves.

use strum::{Display, EnumIter, EnumString};

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type for resistances and damage calculation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DamageType {
    /// Weapons and claws. Reduced by armor.
    Physical,
    Fire,
    Cold,
    Lightning,
    Poison,
    Holy,
    /// Pure magic with no element.
    Magic,
    /// Ignores armor and resistances; scales with the stronger power stat.
    Raw,
}

impl DamageType {
    /// Reduced by resistances rather than armor.
    pub const fn is_elemental(&self) -> bool {
        !matches!(self, Self::Physical | Self::Raw)
    }

    /// Item stat key holding the resistance fraction for this type.
    pub const fn resistance_key(&self) -> Option<&'static str> {
        match self {
            Self::Fire => Some("fireResistance"),
            Self::Cold => Some("coldResistance"),
            Self::Lightning => Some("lightningResistance"),
            Self::Poison => Some("poisonResistance"),
            Self::Holy => Some("holyResistance"),
            Self::Magic => Some("magicResistance"),
            Self::Physical | Self::Raw => None,
        }
    }
}

// ============================================================================
// Mitigation
// ============================================================================

/// Armor at and above which the reduction is capped.
pub const ARMOR_CAP: f64 = 600.0;

/// Maximum fraction of physical damage armor can absorb.
pub const MAX_ARMOR_REDUCTION: f64 = 0.925;

/// Fraction of physical damage absorbed by `armor`.
///
/// # Formula
///
/// ```text
/// reduction = min(92.5, 92.5 * (1 - e^(-0.01 * armor))) / 100
/// reduction = 0.925                                 if armor >= 600
/// ```
///
/// Monotonically non-decreasing; negative armor counts as none.
pub fn armor_reduction(armor: f64) -> f64 {
    if armor >= ARMOR_CAP {
        return MAX_ARMOR_REDUCTION;
    }
    let armor = armor.max(0.0);
    let percent = 92.5 * (1.0 - (-0.01 * armor).exp());
    percent.min(92.5) / 100.0
}

/// Rounds to the nearest quarter point.
pub fn round_quarter(value: f64) -> f64 {
    (value * 4.0).round() / 4.0
}

/// Damage of one type after the defender's mitigation.
///
/// Physical damage is reduced by armor, elemental damage by the resistance
/// fraction (clamped to `[0, 1]`), and raw damage passes through.
pub fn mitigate(amount: f64, damage_type: DamageType, armor: f64, resistance: f64) -> f64 {
    match damage_type {
        DamageType::Physical => amount * (1.0 - armor_reduction(armor)),
        DamageType::Raw => amount,
        _ => amount * (1.0 - resistance.clamp(0.0, 1.0)),
    }
}
