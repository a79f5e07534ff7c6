//! Single-hit attack resolution.
//!
//! Order of computation:
//!
//! 1. Miss check against blind effects on the attacker. A miss stops here:
//!    no stagger, no crit roll, no damage.
//! 2. Stagger from the pre-crit base damage. Reaching the defender's
//!    threshold applies a stun and then resets stagger.
//! 3. Crit roll over the clamped crit chance, or guaranteed crit.
//! 4. Crit multiplier.
//! 5. Damage through [`Combatant::take_damage`].
//! 6. Exactly-once defeat marking.

use crate::config::CombatConfig;
use crate::env::{Dice, RollContext};
use crate::state::{Combatant, StatusEffect, StatusEffectKind};

use super::damage::{critical_damage, stagger_contribution};
use super::hit::{check_crit, check_miss, miss_chance};
use super::modifiers::AttackRequest;

/// Result of one resolved hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    /// Damage after the crit multiplier, before guard absorption.
    pub final_damage: u32,
    pub was_critical: bool,
    pub missed: bool,
    /// The hit pushed the defender over its stagger threshold.
    pub staggered: bool,
    pub absorbed: u32,
    pub health_lost: u32,
    /// The defender is at 0 health after the hit.
    pub defender_defeated: bool,
    /// This hit is the one that reported the defeat. True at most once per
    /// combatant.
    pub newly_defeated: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct AttackResolver<'a> {
    rules: &'a CombatConfig,
}

impl<'a> AttackResolver<'a> {
    pub fn new(rules: &'a CombatConfig) -> Self {
        Self { rules }
    }

    /// Resolves a player hit. Crit and stagger modifiers come from the request.
    pub fn resolve_player_attack(
        &self,
        attacker: &Combatant,
        defender: &mut Combatant,
        request: &AttackRequest,
        dice: &mut Dice,
    ) -> AttackOutcome {
        self.resolve(attacker, defender, request, dice)
    }

    /// Resolves an enemy hit. Enemies carry no crit sources, so only a
    /// guaranteed crit can land.
    pub fn resolve_enemy_attack(
        &self,
        attacker: &Combatant,
        defender: &mut Combatant,
        base_damage: u32,
        dice: &mut Dice,
    ) -> AttackOutcome {
        self.resolve(attacker, defender, &AttackRequest::new(base_damage), dice)
    }

    fn resolve(
        &self,
        attacker: &Combatant,
        defender: &mut Combatant,
        request: &AttackRequest,
        dice: &mut Dice,
    ) -> AttackOutcome {
        if defender.is_defeated() {
            // Still give the defeat a chance to be reported once if the
            // defender died outside the resolver and nobody marked it.
            return AttackOutcome {
                defender_defeated: true,
                newly_defeated: defender.mark_defeated(),
                ..AttackOutcome::default()
            };
        }

        // 1. miss
        let miss = miss_chance(attacker);
        if miss > 0.0 && check_miss(miss, dice.d100(attacker.id, RollContext::Miss)) {
            return AttackOutcome {
                missed: true,
                ..AttackOutcome::default()
            };
        }

        // 2. stagger
        let (amount, effectiveness) = stagger_contribution(
            request.base_damage,
            defender.is_guarded(),
            request.modifiers.stagger_bonus,
            self.rules,
        );
        let staggered = defender.add_stagger(amount, effectiveness);
        if staggered {
            defender.status.add(StatusEffect::new(
                StatusEffectKind::Stunned,
                1.0,
                self.rules.crowd_control_duration(defender.id),
            ));
            defender.reset_stagger();
        }

        // 3. crit
        let crit_chance = request.modifiers.crit_chance();
        let was_critical = if request.always_crit {
            true
        } else if crit_chance > 0.0 {
            check_crit(crit_chance, false, dice.d100(attacker.id, RollContext::Crit))
        } else {
            false
        };

        // 4. multiplier
        let multiplier = request
            .modifiers
            .crit_multiplier_override
            .unwrap_or(self.rules.crit_multiplier);
        let final_damage = critical_damage(request.base_damage, was_critical, multiplier);

        // 5. damage
        let damage = defender.take_damage(final_damage, request.ignore_guard);

        // 6. defeat
        let newly_defeated = damage.defeated && defender.mark_defeated();

        AttackOutcome {
            final_damage,
            was_critical,
            missed: false,
            staggered,
            absorbed: damage.absorbed,
            health_lost: damage.health_lost,
            defender_defeated: damage.defeated,
            newly_defeated,
        }
    }
}
