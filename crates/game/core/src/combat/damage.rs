//! Stagger and critical damage math.

use crate::config::CombatConfig;

/// Stagger added to a defender by one hit, before the defender's threshold
/// check.
///
/// # Formula
///
/// ```text
/// amount        = base_damage * stagger_ratio
/// effectiveness = (guarded ? guarded_stagger_effectiveness : 1) * (1 + stagger_bonus)
/// ```
///
/// Always computed from pre-crit damage.
pub fn stagger_contribution(
    base_damage: u32,
    defender_guarded: bool,
    stagger_bonus: f32,
    rules: &CombatConfig,
) -> (f32, f32) {
    let amount = base_damage as f32 * rules.stagger_ratio;
    let guard_factor = if defender_guarded {
        rules.guarded_stagger_effectiveness
    } else {
        1.0
    };
    let effectiveness = (guard_factor * (1.0 + stagger_bonus)).max(0.0);
    (amount, effectiveness)
}

/// Final damage after the crit multiplier, rounded to the nearest point.
pub fn critical_damage(base_damage: u32, critical: bool, multiplier: f32) -> u32 {
    if !critical {
        return base_damage;
    }
    (base_damage as f32 * multiplier.max(0.0)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_halves_stagger_effectiveness() {
        let rules = CombatConfig::default();

        let (amount, open) = stagger_contribution(20, false, 0.0, &rules);
        let (_, guarded) = stagger_contribution(20, true, 0.0, &rules);

        assert_eq!(amount, 2.0);
        assert_eq!(open, 1.0);
        assert_eq!(guarded, 0.5);
    }

    #[test]
    fn stagger_bonus_scales_effectiveness() {
        let rules = CombatConfig::default();
        let (_, eff) = stagger_contribution(10, true, 1.0, &rules);
        assert_eq!(eff, 1.0);
    }

    #[test]
    fn crit_multiplier_rounds() {
        assert_eq!(critical_damage(20, true, 1.5), 30);
        assert_eq!(critical_damage(7, true, 1.5), 11);
        assert_eq!(critical_damage(7, false, 1.5), 7);
        assert_eq!(critical_damage(20, true, 1.0), 20);
    }
}
