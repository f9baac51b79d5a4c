//! Scaling condition templates into placed conditions.
//!
//! Scaling happens exactly once, here. Per-tick damage is captured as final
//! deltas so ticking never has to look at the placer again.

use crate::env::{ConditionTemplate, Dice};
use crate::state::{Condition, ConditionEffect, EffectKind, EffectStyle};

/// Numbers a template is scaled against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement<'a> {
    /// Id (or label) recorded as the placer.
    pub placed_by: &'a str,
    /// Placer's damage for `multiplier` damage effects; its attack power for heals.
    pub source_power: f64,
    /// Holder's unmodified maximum health for `percentage` effects.
    pub holder_health_max: f64,
    /// Holder's unmodified maximum sanity for `percentage` effects.
    pub holder_sanity_max: f64,
}

impl Placement<'_> {
    fn scale(&self, style: EffectStyle, amount: f64, max: f64) -> f64 {
        match style {
            EffectStyle::Flat => amount,
            EffectStyle::Multiplier => amount * self.source_power,
            EffectStyle::Percentage => amount * max,
        }
    }
}

/// Builds a placed condition from a template.
///
/// `health damage` and `sanity damage` effects become positive per-tick
/// entries; `heal` and `sanity heal` become negative ones.
pub fn instantiate(template: &ConditionTemplate, placement: &Placement<'_>, id: String) -> Condition {
    let mut health_damage = Vec::with_capacity(template.effects.len());
    let mut sanity_damage = Vec::with_capacity(template.effects.len());
    let mut effects = Vec::with_capacity(template.effects.len());

    for effect in &template.effects {
        let health_max = placement.holder_health_max;
        let sanity_max = placement.holder_sanity_max;
        let (health, sanity) = match effect.kind {
            EffectKind::HealthDamage => (placement.scale(effect.style, effect.amount, health_max), 0.0),
            EffectKind::Heal => (-placement.scale(effect.style, effect.amount, health_max), 0.0),
            EffectKind::SanityDamage => (0.0, placement.scale(effect.style, effect.amount, sanity_max)),
            EffectKind::SanityHeal => (0.0, -placement.scale(effect.style, effect.amount, sanity_max)),
            _ => (0.0, 0.0),
        };
        health_damage.push(health);
        sanity_damage.push(sanity);
        effects.push(ConditionEffect::new(effect.kind.clone(), effect.style, effect.amount));
    }

    Condition {
        id,
        name: template.name.clone(),
        style: template.style,
        turns: template.turns,
        aura: template.aura,
        effects,
        health_damage,
        sanity_damage,
        placed_by: placement.placed_by.to_owned(),
        icon: template.icon.clone(),
        debilitation: template.debilitation,
    }
}

/// Id for a newly placed condition.
///
/// Debilitations are keyed by template name so a second placement collides;
/// everything else gets a fresh id.
pub fn condition_id(template: &ConditionTemplate, dice: &mut Dice<'_>) -> String {
    if template.debilitation {
        template.name.clone()
    } else {
        dice.next_id(&template.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EffectTemplate;
    use crate::state::ConditionStyle;

    fn placement() -> Placement<'static> {
        Placement {
            placed_by: "ogre",
            source_power: 20.0,
            holder_health_max: 200.0,
            holder_sanity_max: 40.0,
        }
    }

    #[test]
    fn damage_effects_scale_by_style() {
        let template = ConditionTemplate {
            name: "burn".into(),
            style: ConditionStyle::Debuff,
            turns: 3,
            effects: vec![
                EffectTemplate {
                    kind: EffectKind::HealthDamage,
                    style: EffectStyle::Multiplier,
                    amount: 0.25,
                },
                EffectTemplate {
                    kind: EffectKind::SanityDamage,
                    style: EffectStyle::Percentage,
                    amount: 0.1,
                },
                EffectTemplate {
                    kind: EffectKind::Weaken,
                    style: EffectStyle::Flat,
                    amount: 2.0,
                },
            ],
            ..ConditionTemplate::default()
        };

        let condition = instantiate(&template, &placement(), "c-1".into());

        assert_eq!(condition.health_damage, vec![5.0, 0.0, 0.0]);
        assert_eq!(condition.sanity_damage, vec![0.0, 4.0, 0.0]);
        assert_eq!(condition.effects.len(), 3);
        assert_eq!(condition.effects[2].magnitude, 2.0);
        assert_eq!(condition.placed_by, "ogre");
        assert_eq!(condition.turns, 3);
    }

    #[test]
    fn heals_are_negative_damage() {
        let template = ConditionTemplate {
            name: "regen".into(),
            style: ConditionStyle::Buff,
            turns: 2,
            effects: vec![EffectTemplate {
                kind: EffectKind::Heal,
                style: EffectStyle::Percentage,
                amount: 0.05,
            }],
            ..ConditionTemplate::default()
        };
        let condition = instantiate(&template, &placement(), "c-2".into());
        assert_eq!(condition.health_damage, vec![-10.0]);
        assert_eq!(condition.health_per_tick(), -10.0);
    }

    #[test]
    fn debilitation_ids_are_stable() {
        let rng = crate::env::PcgRng;
        let mut dice = Dice::new(&rng, 1);
        let mut template = ConditionTemplate {
            name: "arthritis".into(),
            debilitation: true,
            ..ConditionTemplate::default()
        };
        assert_eq!(condition_id(&template, &mut dice), "arthritis");

        template.debilitation = false;
        let a = condition_id(&template, &mut dice);
        let b = condition_id(&template, &mut dice);
        assert_ne!(a, b);
        assert!(a.starts_with("arthritis-"));
    }
}
