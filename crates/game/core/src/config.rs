/// Game configuration constants and tunable parameters.
///
/// Every balancing formula the engine uses reads its constants from here so
/// content designers can retune without touching rules code. Loaded from
/// `config.toml` by `game-content`; missing keys fall back to the defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Base flee chance in percent before dexterity and difficulty.
    pub flee_base_chance: f64,
    /// Multiplier on the `ln(dex + 1) / ln(1.5)` dexterity term.
    pub flee_dexterity_weight: f64,
    /// Divisor applied to `difficulty²`.
    pub flee_difficulty_divisor: f64,
    /// Lower bound for the flee chance in percent.
    pub flee_min_chance: f64,
    /// Upper bound for the flee chance in percent.
    pub flee_max_chance: f64,

    /// Calendar days that pass each time the world clock ticks.
    pub days_per_tick: u32,
    /// Skill points awarded for defeating a level boss.
    pub boss_skill_points: u32,
    /// Chance per world tick of a sanity debuff while sanity is negative.
    pub low_sanity_debuff_chance: f64,
    /// Affection lost per tick by parents.
    pub parent_affection_decay: f64,
    /// Affection lost per tick by partners and children.
    pub close_affection_decay: f64,

    /// Share of each spell's damage power bonus (1.0 = full magic power).
    pub spell_power_scaling: f64,
    /// Fraction of per-hit damage returned by lifesteal debuffs.
    pub lifesteal_ratio: f64,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FLEE_BASE_CHANCE: f64 = 50.0;
    pub const DEFAULT_FLEE_DEXTERITY_WEIGHT: f64 = 2.0;
    pub const DEFAULT_FLEE_DIFFICULTY_DIVISOR: f64 = 50.0;
    pub const DEFAULT_FLEE_MIN_CHANCE: f64 = 5.0;
    pub const DEFAULT_FLEE_MAX_CHANCE: f64 = 95.0;
    pub const DEFAULT_DAYS_PER_TICK: u32 = 7;
    pub const DEFAULT_BOSS_SKILL_POINTS: u32 = 3;
    pub const DEFAULT_LOW_SANITY_DEBUFF_CHANCE: f64 = 0.25;
    pub const DEFAULT_PARENT_AFFECTION_DECAY: f64 = 0.1;
    pub const DEFAULT_CLOSE_AFFECTION_DECAY: f64 = 0.15;
    pub const DEFAULT_SPELL_POWER_SCALING: f64 = 1.0;
    pub const DEFAULT_LIFESTEAL_RATIO: f64 = 0.5;

    pub const fn new() -> Self {
        Self {
            flee_base_chance: Self::DEFAULT_FLEE_BASE_CHANCE,
            flee_dexterity_weight: Self::DEFAULT_FLEE_DEXTERITY_WEIGHT,
            flee_difficulty_divisor: Self::DEFAULT_FLEE_DIFFICULTY_DIVISOR,
            flee_min_chance: Self::DEFAULT_FLEE_MIN_CHANCE,
            flee_max_chance: Self::DEFAULT_FLEE_MAX_CHANCE,
            days_per_tick: Self::DEFAULT_DAYS_PER_TICK,
            boss_skill_points: Self::DEFAULT_BOSS_SKILL_POINTS,
            low_sanity_debuff_chance: Self::DEFAULT_LOW_SANITY_DEBUFF_CHANCE,
            parent_affection_decay: Self::DEFAULT_PARENT_AFFECTION_DECAY,
            close_affection_decay: Self::DEFAULT_CLOSE_AFFECTION_DECAY,
            spell_power_scaling: Self::DEFAULT_SPELL_POWER_SCALING,
            lifesteal_ratio: Self::DEFAULT_LIFESTEAL_RATIO,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
