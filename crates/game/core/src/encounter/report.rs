//! What happened during one encounter call.

use crate::combat::ActionOutcome;
use crate::conditions::{TickPhase, TickReport};
use crate::state::EncounterPhase;

/// Condition tick applied to one creature.
#[derive(Clone, Debug, PartialEq)]
pub struct TickEntry {
    pub creature_id: String,
    pub phase: TickPhase,
    pub report: TickReport,
}

/// Damage a revenge condition returned to an attacker.
#[derive(Clone, Debug, PartialEq)]
pub struct RevengeStrike {
    pub attacker_id: String,
    pub damage: f64,
}

/// Spoils of a won encounter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rewards {
    pub gold: f64,
    pub skill_points: u32,
    pub boss_defeated: bool,
    /// Instance newly recorded as completed by this victory.
    pub completed_instance: Option<String>,
    /// Floor of the same instance opened by a boss victory.
    pub unlocked_level: Option<String>,
    /// Instances opened once the deepest floor's boss falls.
    pub unlocked_instances: Vec<String>,
}

/// Phases traversed and everything resolved along the way.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnReport {
    /// In traversal order; the last entry is where the machine came to rest.
    pub phases: Vec<EncounterPhase>,
    /// Every action in resolution order, the player's first.
    pub actions: Vec<ActionOutcome>,
    pub ticks: Vec<TickEntry>,
    pub revenge: Vec<RevengeStrike>,
    pub rewards: Option<Rewards>,
    /// Whether a flee attempt was made and how it went.
    pub fled: Option<bool>,
}

impl TurnReport {
    /// Phase the encounter rests in (or ended with).
    pub fn outcome(&self) -> Option<EncounterPhase> {
        self.phases.last().copied()
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some_and(|phase| phase.is_terminal())
    }

    pub(crate) fn enter(&mut self, phase: EncounterPhase) {
        tracing::debug!(?phase, "encounter phase");
        self.phases.push(phase);
    }

    pub(crate) fn record_tick(&mut self, creature_id: &str, phase: TickPhase, report: TickReport) {
        if report == TickReport::default() {
            return;
        }
        self.ticks.push(TickEntry {
            creature_id: creature_id.to_owned(),
            phase,
            report,
        });
    }
}
