//! Combat resolution system.
//!
//! Resolves one attack, spell or pass at a time against an ordered list of
//! targets. The encounter loop in [`crate::encounter`] decides who acts and
//! against whom; this module only applies the rules.
//!
//! # Core Functions
//!
//! - `resolve_action`: precondition checks, cost, hit rolls, damage, conditions
//! - `armor_reduction`: diminishing-returns armor curve
//! - `round_quarter`: quarter-point rounding applied to every damage total

mod action;
mod combatant;
mod damage;
mod error;
mod hit;
mod resolver;
mod result;

pub use action::{ActionRef, CombatAction};
pub use combatant::Combatant;
pub use damage::{
    ARMOR_CAP, DamageType, MAX_ARMOR_REDUCTION, armor_reduction, mitigate, round_quarter,
};
pub use error::{CombatError, Incapacity};
pub use hit::{check_hit, effective_hit_chance};
pub use resolver::{LIFESTEAL, ResolveContext, precheck, resolve_action};
pub use result::{ActionOutcome, TargetOutcome};
