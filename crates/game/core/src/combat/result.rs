//! Combat result types.

use crate::state::{Minion, VitalSignal};

/// Outcome of an action against one target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetOutcome {
    pub target_id: String,
    pub hit: bool,
    /// Health removed after mitigation and clamping.
    pub damage: f64,
    pub sanity_damage: f64,
    /// Names of debuffs placed on the target.
    pub debuffs: Vec<String>,
    /// Health the target's thorns dealt back to the actor.
    pub thorns: f64,
    pub signals: Vec<VitalSignal>,
}

/// Result of one resolved action.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionOutcome {
    pub actor_id: String,
    /// Action name, `"pass"` for passes.
    pub action: String,
    /// Per-target results in the order targets were supplied.
    pub targets: Vec<TargetOutcome>,
    /// Mana or energy spent.
    pub cost: f64,
    /// Health the actor regained from lifesteal.
    pub lifesteal: f64,
    /// Signed health change from the action's self damage.
    pub self_change: f64,
    /// Names of buffs placed on the actor.
    pub buffs: Vec<String>,
    /// Minions for the caller to add to the actor's side.
    pub summoned: Vec<Minion>,
    /// Signals raised on the actor (thorns, self damage).
    pub actor_signals: Vec<VitalSignal>,
}

impl ActionOutcome {
    pub fn passed(actor_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            action: "pass".into(),
            ..Self::default()
        }
    }

    /// Health damage dealt across all targets.
    pub fn total_damage(&self) -> f64 {
        self.targets.iter().map(|t| t.damage).sum()
    }

    pub fn any_hit(&self) -> bool {
        self.targets.iter().any(|t| t.hit)
    }
}
