//! Attack modifiers contributed by the card, the player's gear, and boosts.

use crate::action::CardIntent;
use crate::state::{BoostStat, StatBoosts};

/// Player-side crit and stagger bonuses that persist through an encounter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerLoadout {
    pub equipment_crit_chance: f32,
    pub character_crit_chance: f32,
    /// External crit stacks (e.g. from relics), each worth `crit_per_stack`.
    pub crit_stacks: u32,
    pub crit_per_stack: f32,
    /// Fractional stagger bonus (0.25 = +25%).
    pub stagger_bonus: f32,
}

impl PlayerLoadout {
    /// Modifiers for playing `card` with the currently active boosts.
    pub fn modifiers_for(&self, card: &CardIntent, boosts: &StatBoosts) -> AttackModifiers {
        AttackModifiers {
            card_crit_chance: card.card_crit_chance(),
            equipment_crit_chance: self.equipment_crit_chance,
            character_crit_chance: self.character_crit_chance,
            external_crit_chance: self.crit_stacks as f32 * self.crit_per_stack
                + boosts.total(BoostStat::CritChance),
            crit_multiplier_override: card.crit_multiplier,
            stagger_bonus: self.stagger_bonus + boosts.total(BoostStat::StaggerBonus),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttackModifiers {
    pub card_crit_chance: f32,
    pub equipment_crit_chance: f32,
    pub character_crit_chance: f32,
    pub external_crit_chance: f32,
    /// Replaces the standard crit multiplier (e.g. a "no extra crit damage"
    /// card uses 1.0).
    pub crit_multiplier_override: Option<f32>,
    pub stagger_bonus: f32,
}

impl AttackModifiers {
    /// Sum of every crit source, clamped to `[0, 100]`.
    pub fn crit_chance(&self) -> f32 {
        (self.card_crit_chance
            + self.equipment_crit_chance
            + self.character_crit_chance
            + self.external_crit_chance)
            .clamp(0.0, 100.0)
    }
}

/// A single hit to resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttackRequest {
    pub base_damage: u32,
    pub ignore_guard: bool,
    pub always_crit: bool,
    pub modifiers: AttackModifiers,
}

impl AttackRequest {
    pub fn new(base_damage: u32) -> Self {
        Self {
            base_damage,
            ..Self::default()
        }
    }

    pub fn ignoring_guard(mut self, ignore: bool) -> Self {
        self.ignore_guard = ignore;
        self
    }

    pub fn always_crit(mut self, always: bool) -> Self {
        self.always_crit = always;
        self
    }

    pub fn with_modifiers(mut self, modifiers: AttackModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
