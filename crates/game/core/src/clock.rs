//! World clock.
//!
//! Time outside combat advances in ticks of a week. A tick moves the
//! calendar, ages the player's conditions, may afflict a player whose
//! sanity has gone negative, cools relationships and turns investments.

use chrono::{Days, NaiveDate};

use crate::conditions::{
    Placement, TickPhase, TickReport, apply_condition, condition_id, instantiate, tick,
};
use crate::config::GameConfig;
use crate::env::{ContentOracle, Dice};
use crate::state::{Game, PlayerCharacter};

/// Label recorded as the placer of sanity debuffs.
pub const LOW_SANITY: &str = "low sanity";

/// What one clock tick did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClockReport {
    pub date: Option<NaiveDate>,
    pub conditions: TickReport,
    /// Name of the sanity debuff placed this tick.
    pub sanity_debuff: Option<String>,
    /// Gold the investments added to their stockpiles.
    pub investment_returns: f64,
}

impl Game {
    /// Advances the world by one tick.
    pub fn game_tick(
        &mut self,
        player: &mut PlayerCharacter,
        content: &dyn ContentOracle,
        config: &GameConfig,
        dice: &mut Dice<'_>,
    ) -> ClockReport {
        let mut report = ClockReport::default();

        match self
            .date
            .checked_add_days(Days::new(u64::from(config.days_per_tick)))
        {
            Some(date) => self.date = date,
            None => tracing::warn!(date = %self.date, "calendar overflow; date unchanged"),
        }
        report.date = Some(self.date);

        if player.stats.sanity() < 0.0 && dice.chance(config.low_sanity_debuff_chance) {
            let pool = content.sanity_debuffs();
            if !pool.is_empty() {
                let template = &pool[dice.below(pool.len())];
                let placement = Placement {
                    placed_by: LOW_SANITY,
                    source_power: 0.0,
                    holder_health_max: player.stats.base_health_max(),
                    holder_sanity_max: player.stats.base_sanity_max(),
                };
                let condition = instantiate(template, &placement, condition_id(template, dice));
                if apply_condition(&mut player.stats, condition) {
                    report.sanity_debuff = Some(template.name.clone());
                }
            }
        }

        report.conditions = tick(&mut player.stats, TickPhase::WorldTimeTick);

        for parent in &mut player.parents {
            parent.decay_affection(config.parent_affection_decay);
        }
        for close in player.partners.iter_mut().chain(player.children.iter_mut()) {
            close.decay_affection(config.close_affection_decay);
        }

        report.investment_returns = player
            .investments
            .iter_mut()
            .map(|investment| investment.turn(dice))
            .sum();

        tracing::info!(
            date = %self.date,
            sanity_debuff = report.sanity_debuff.as_deref(),
            returns = report.investment_returns,
            "world tick"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ConditionTemplate, EffectTemplate, PcgRng};
    use crate::state::{
        Character, Condition, ConditionEffect, EffectKind, EffectStyle, Investment, Stat,
    };
    use crate::testing::{StubContent, player};

    #[test]
    fn tick_moves_the_calendar_a_week() {
        let content = StubContent::default();
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 1);
        let mut game = Game::default();
        let mut hero = player();

        let report = game.game_tick(&mut hero, &content, &GameConfig::default(), &mut dice);
        assert_eq!(game.date, NaiveDate::from_ymd_opt(1300, 1, 8).unwrap());
        assert_eq!(report.date, Some(game.date));
        assert_eq!(report.sanity_debuff, None);
    }

    #[test]
    fn negative_sanity_can_afflict() {
        let mut content = StubContent::default();
        content.sanity_debuffs.push(ConditionTemplate {
            name: "paranoia".into(),
            turns: 3,
            effects: vec![EffectTemplate {
                kind: EffectKind::SanityDamage,
                style: EffectStyle::Percentage,
                amount: 0.1,
            }],
            ..ConditionTemplate::default()
        });
        let config = GameConfig {
            low_sanity_debuff_chance: 1.0,
            ..GameConfig::default()
        };
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 1);
        let mut game = Game::default();
        let mut hero = player();
        hero.stats.apply_delta(Stat::Sanity, -60.0);

        let report = game.game_tick(&mut hero, &content, &config, &mut dice);
        assert_eq!(report.sanity_debuff.as_deref(), Some("paranoia"));
        let placed = &hero.stats.conditions()[0];
        assert_eq!(placed.placed_by, LOW_SANITY);
        // 10% of 50 max sanity, ticked once already: -10 - 5
        assert_eq!(hero.stats.sanity(), -15.0);
        assert_eq!(placed.turns, 2);
    }

    #[test]
    fn debilitations_only_bite_on_world_ticks() {
        let content = StubContent::default();
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 1);
        let mut game = Game::default();
        let mut hero = player();
        apply_condition(
            &mut hero.stats,
            Condition {
                id: "gout".into(),
                name: "gout".into(),
                debilitation: true,
                health_damage: vec![2.0],
                effects: vec![ConditionEffect::new(EffectKind::HealthDamage, EffectStyle::Flat, 2.0)],
                ..Condition::default()
            },
        );

        game.game_tick(&mut hero, &content, &GameConfig::default(), &mut dice);
        game.game_tick(&mut hero, &content, &GameConfig::default(), &mut dice);
        assert_eq!(hero.stats.health(), 96.0);
        assert_eq!(hero.stats.conditions().len(), 1);
    }

    #[test]
    fn relationships_cool_and_investments_turn() {
        let content = StubContent::default();
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 1);
        let mut game = Game::default();
        let mut hero = player();
        hero.parents.push(Character {
            affection: 10.0,
            ..Character::default()
        });
        hero.partners.push(Character {
            affection: 10.0,
            ..Character::default()
        });
        hero.investments.push(Investment {
            name: "mill".into(),
            minimum_return: 20.0,
            maximum_return: 21.0,
            turns_per_roll: 1,
            turns_until_next_roll: 1,
            max_gold_stock_pile: 100.0,
            ..Investment::default()
        });

        let report = game.game_tick(&mut hero, &content, &GameConfig::default(), &mut dice);
        assert!((hero.parents[0].affection - 9.9).abs() < 1e-9);
        assert!((hero.partners[0].affection - 9.85).abs() < 1e-9);
        assert_eq!(report.investment_returns, 20.0);
        assert_eq!(hero.collect_investments(), 20.0);
        assert_eq!(hero.gold, 20.0);
    }
}
