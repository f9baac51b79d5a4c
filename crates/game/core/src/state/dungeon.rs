//! Dungeon map and run state.

use crate::combat::ActionRef;
use crate::state::Enemy;

/// One cell of a generated dungeon floor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub cleared_room: bool,
    pub is_boss_room: bool,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            cleared_room: false,
            is_boss_room: false,
        }
    }

    pub const fn at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    pub const fn manhattan(&self, other: &Tile) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Orthogonal neighbour.
    pub const fn is_adjacent(&self, other: &Tile) -> bool {
        self.manhattan(other) == 1
    }
}

/// Extent of a map in tile units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub width: i32,
    pub height: i32,
    pub offset_x: i32,
    pub offset_y: i32,
}

/// Phase of the encounter state machine.
///
/// Only [`EncounterPhase::AwaitingPlayerAction`] and
/// [`EncounterPhase::AwaitingTargetSelection`] persist between calls; the rest
/// appear in turn reports as the machine passes through them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterPhase {
    AwaitingPlayerAction,
    ResolvingPlayerAction,
    AwaitingTargetSelection,
    EnemyTurn,
    MinionTurns,
    ConditionTick,
    Victory,
    PlayerDefeated,
    Fled,
}

impl EncounterPhase {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Victory | Self::PlayerDefeated | Self::Fled)
    }
}

/// In-progress dungeon run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrentDungeon {
    /// Dungeon instance name.
    pub instance: String,
    /// Level number within the instance.
    pub level: String,
    pub current_position: Tile,
    pub dungeon_map: Vec<Tile>,
    pub map_dimensions: BoundingBox,
    /// Present exactly while an encounter is active on the current tile.
    pub enemy: Option<Enemy>,
    pub fighting_boss: bool,
    /// The encounter on the current tile was won; leaving credits a step.
    pub tile_won: bool,
    /// Action waiting for a target pick. Never persisted.
    pub pending_action: Option<ActionRef>,
}

impl CurrentDungeon {
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.dungeon_map.iter().find(|tile| tile.at(x, y))
    }

    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.dungeon_map.iter_mut().find(|tile| tile.at(x, y))
    }

    pub fn in_encounter(&self) -> bool {
        self.enemy.is_some()
    }

    /// Rest phase of the encounter, `None` between encounters.
    pub fn phase(&self) -> Option<EncounterPhase> {
        self.enemy.as_ref().map(|_| {
            if self.pending_action.is_some() {
                EncounterPhase::AwaitingTargetSelection
            } else {
                EncounterPhase::AwaitingPlayerAction
            }
        })
    }
}

/// One floor of a dungeon instance.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonLevel {
    pub level: i32,
    /// Tile count for map generation.
    pub tiles: i32,
    pub bosses: Vec<String>,
    pub boss_defeated: bool,
    /// Open to the player. The first floor starts open; each boss victory
    /// opens the next one.
    pub unlocked: bool,
    /// Steps completed toward the boss.
    pub step: i32,
    pub steps_before_boss: i32,
}

impl DungeonLevel {
    pub fn boss_ready(&self) -> bool {
        self.step >= self.steps_before_boss && !self.boss_defeated
    }

    pub fn id(&self) -> String {
        self.level.to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonInstance {
    pub name: String,
    pub levels: Vec<DungeonLevel>,
    /// Relative difficulty used by the flee curve.
    pub difficulty: f64,
}

impl DungeonInstance {
    pub fn level(&self, id: &str) -> Option<&DungeonLevel> {
        self.levels.iter().find(|level| level.id() == id)
    }

    pub fn level_mut(&mut self, id: &str) -> Option<&mut DungeonLevel> {
        self.levels.iter_mut().find(|level| level.id() == id)
    }

    /// Opens the floor directly below the deepest unlocked one.
    ///
    /// Returns the floor number, or `None` once the instance has no deeper
    /// floor.
    pub fn unlock_next_level(&mut self) -> Option<i32> {
        let deepest = self
            .levels
            .iter()
            .filter(|level| level.unlocked)
            .map(|level| level.level)
            .max()
            .unwrap_or(0);
        let next = self
            .levels
            .iter_mut()
            .find(|level| level.level == deepest + 1)?;
        next.unlocked = true;
        Some(next.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boss_gate() {
        let mut level = DungeonLevel {
            level: 1,
            step: 4,
            steps_before_boss: 5,
            ..DungeonLevel::default()
        };
        assert!(!level.boss_ready());
        level.step = 5;
        assert!(level.boss_ready());
        level.boss_defeated = true;
        assert!(!level.boss_ready());
    }

    #[test]
    fn next_level_opens_below_the_deepest_unlocked() {
        let floor = |level, unlocked| DungeonLevel {
            level,
            unlocked,
            ..DungeonLevel::default()
        };
        let mut instance = DungeonInstance {
            name: "crypt".into(),
            levels: vec![floor(1, true), floor(2, false), floor(3, false)],
            difficulty: 1.0,
        };

        assert_eq!(instance.unlock_next_level(), Some(2));
        assert!(instance.levels[1].unlocked);
        assert!(!instance.levels[2].unlocked);

        assert_eq!(instance.unlock_next_level(), Some(3));
        assert_eq!(instance.unlock_next_level(), None);
    }

    #[test]
    fn phase_follows_enemy_and_pending_action() {
        let mut dungeon = CurrentDungeon::default();
        assert_eq!(dungeon.phase(), None);

        dungeon.enemy = Some(Enemy::default());
        assert_eq!(dungeon.phase(), Some(EncounterPhase::AwaitingPlayerAction));

        dungeon.pending_action = Some(ActionRef::Attack("slash".into()));
        assert_eq!(dungeon.phase(), Some(EncounterPhase::AwaitingTargetSelection));
    }
}
