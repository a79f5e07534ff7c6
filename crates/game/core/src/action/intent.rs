//! Enemy intents and triggered abilities.

use crate::state::StatusEffect;

/// Effect of an enemy ability, used both by `Ability` intents and by
/// turn-start / turn-end triggers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    /// Heals the owner.
    Regenerate(u32),
    /// Grants guard to the owner.
    Fortify(u32),
    /// Applies a status effect to the player.
    Curse(StatusEffect),
    /// Damages the player for every card played during the last player turn.
    Retaliate { damage_per_card: u32 },
}

/// An enemy's declared next action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyIntent {
    /// Attacks the player for `power` × the enemy's base damage.
    Attack { power: f32, energy_cost: u32 },
    /// Gains guard equal to a fraction of max health.
    Defend { energy_cost: u32 },
    Ability {
        effect: AbilityEffect,
        energy_cost: u32,
    },
}

impl EnemyIntent {
    pub fn energy_cost(&self) -> u32 {
        match self {
            Self::Attack { energy_cost, .. }
            | Self::Defend { energy_cost }
            | Self::Ability { energy_cost, .. } => *energy_cost,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Attack { .. } => "attack",
            Self::Defend { .. } => "defend",
            Self::Ability { .. } => "ability",
        }
    }
}

/// An intent entry in an enemy's intent pool.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentSpec {
    pub intent: EnemyIntent,
    /// Turns the action is delayed before it resolves; 0 acts immediately.
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay_turns: u32,
    /// Relative selection weight; 0 is treated as 1.
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: u32,
}

#[cfg(feature = "serde")]
fn default_weight() -> u32 {
    1
}

impl IntentSpec {
    pub fn new(intent: EnemyIntent) -> Self {
        Self {
            intent,
            delay_turns: 0,
            weight: 1,
        }
    }

    pub fn delayed(mut self, turns: u32) -> Self {
        self.delay_turns = turns;
        self
    }

    pub fn weighted(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// When a triggered ability fires during the enemy turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityTrigger {
    TurnStart,
    TurnEnd,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAbility {
    pub trigger: AbilityTrigger,
    pub effect: AbilityEffect,
}
