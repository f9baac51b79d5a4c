//! The player character aggregate.

use crate::state::{
    AllocatedSkillPoints, Character, Creature, CurrentDungeon, Element, Enemy, Equipment,
    Investment, Item, JobExperience, LearningSpell, MagicProficiency, Minion, ProficiencyRank,
    QualificationProgress,
};

/// Species recorded on the player's combat stats.
pub const PLAYER_SPECIES: &str = "player";

/// Everything the player owns and carries between sessions.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerCharacter {
    pub identity: Character,
    /// Vital pools, power stats and conditions.
    pub stats: Creature,
    pub dexterity: f64,
    pub player_class: String,
    pub blessing: String,
    pub equipment: Equipment,
    pub inventory: Vec<Item>,
    pub investments: Vec<Investment>,
    pub known_spells: Vec<String>,
    pub physical_attacks: Vec<String>,
    pub minions: Vec<Minion>,
    pub current_dungeon: Option<CurrentDungeon>,
    /// Encounter set aside to resume later.
    pub saved_enemy: Option<Enemy>,
    /// The set-aside encounter is the level boss.
    pub saved_boss_fight: bool,
    pub gold: f64,
    pub unallocated_skill_points: i32,
    pub allocated_skill_points: AllocatedSkillPoints,
    pub parents: Vec<Character>,
    pub partners: Vec<Character>,
    pub children: Vec<Character>,
    pub known_characters: Vec<Character>,
    pub job_experience: Vec<JobExperience>,
    pub learning_spells: Vec<LearningSpell>,
    pub magic_proficiencies: Vec<MagicProficiency>,
    pub qualification_progress: Vec<QualificationProgress>,
}

impl PlayerCharacter {
    /// New character with the given identity and combat stats.
    ///
    /// The stats' id, species and being type are aligned with the identity.
    pub fn new(identity: Character, mut stats: Creature) -> Self {
        stats.id = identity.id.clone();
        stats.species = PLAYER_SPECIES.to_owned();
        stats.being_type = identity.being_type.clone();
        Self {
            identity,
            stats,
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.identity.id
    }

    /// Armor from stats, conditions and equipment.
    pub fn total_armor(&self) -> f64 {
        self.stats.armor() + self.equipment.stat("armor")
    }

    /// Rank in a school; schools never studied are Novice.
    pub fn proficiency_rank(&self, element: Element) -> ProficiencyRank {
        let school = element.to_string();
        self.magic_proficiencies
            .iter()
            .find(|p| p.school.eq_ignore_ascii_case(&school))
            .map(|p| ProficiencyRank::from_points(p.proficiency))
            .unwrap_or_default()
    }

    pub fn in_dungeon(&self) -> bool {
        self.current_dungeon.is_some()
    }

    /// True when health or sanity has run out.
    pub fn is_dead(&self) -> bool {
        self.stats.is_defeated()
            || (self.stats.sanity_max() > 0.0 && self.stats.sanity() <= -self.stats.sanity_max())
    }

    /// Collects every investment stockpile into the purse.
    pub fn collect_investments(&mut self) -> f64 {
        let collected: f64 = self
            .investments
            .iter_mut()
            .map(Investment::collect_gold)
            .sum();
        self.gold += collected;
        collected
    }
}
