//! Card-play intents.
//!
//! The deck and card catalog live outside the core; the engine only sees the
//! already-resolved [`CardIntent`] the player wants to play.

use crate::state::{StatBoost, StatusEffect};

/// What a card does when it resolves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardKind {
    /// Single-target attack.
    Strike { damage: u32 },
    /// Attack that hits every living enemy.
    Sweep { damage: u32 },
    /// Grants guard to the player.
    Guard { amount: u32 },
    /// Heals the player.
    Mend { amount: u32 },
    /// Applies a status effect to the target enemy.
    Hex { effect: StatusEffect },
    /// Grants the player a temporary stat boost.
    Empower { boost: StatBoost },
    /// Places `card` in the prepared list; it enters the hand after
    /// `charge_turns` player turns.
    Prepare {
        card: Box<CardIntent>,
        charge_turns: u32,
    },
}

impl CardKind {
    /// Crit chance (percent) granted by the card type itself.
    pub fn base_crit_chance(&self) -> f32 {
        match self {
            Self::Strike { .. } => 5.0,
            _ => 0.0,
        }
    }

    /// Whether this card needs a living enemy target when it resolves.
    pub fn needs_enemy_target(&self) -> bool {
        matches!(self, Self::Strike { .. } | Self::Hex { .. })
    }
}

/// A card the player intends to play.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardIntent {
    pub name: String,
    /// Mana cost, paid when the card is played (not when a delay fires).
    pub cost: u32,
    pub kind: CardKind,
    /// Turns before the card resolves; 0 resolves immediately.
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay_turns: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_guard: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub always_crit: bool,
    /// Extra crit chance (percent) on top of the card type's base rate.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: f32,
    /// Replaces the standard crit multiplier when set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_multiplier: Option<f32>,
}

impl CardIntent {
    pub fn new(name: impl Into<String>, cost: u32, kind: CardKind) -> Self {
        Self {
            name: name.into(),
            cost,
            kind,
            delay_turns: 0,
            ignore_guard: false,
            always_crit: false,
            crit_chance: 0.0,
            crit_multiplier: None,
        }
    }

    pub fn strike(name: impl Into<String>, cost: u32, damage: u32) -> Self {
        Self::new(name, cost, CardKind::Strike { damage })
    }

    pub fn sweep(name: impl Into<String>, cost: u32, damage: u32) -> Self {
        Self::new(name, cost, CardKind::Sweep { damage })
    }

    pub fn guard(name: impl Into<String>, cost: u32, amount: u32) -> Self {
        Self::new(name, cost, CardKind::Guard { amount })
    }

    pub fn with_delay(mut self, turns: u32) -> Self {
        self.delay_turns = turns;
        self
    }

    pub fn ignoring_guard(mut self) -> Self {
        self.ignore_guard = true;
        self
    }

    pub fn with_always_crit(mut self) -> Self {
        self.always_crit = true;
        self
    }

    pub fn with_crit_chance(mut self, chance: f32) -> Self {
        self.crit_chance = chance;
        self
    }

    pub fn with_crit_multiplier(mut self, multiplier: f32) -> Self {
        self.crit_multiplier = Some(multiplier);
        self
    }

    /// Crit chance contributed by the card (type base rate + card bonus).
    pub fn card_crit_chance(&self) -> f32 {
        self.kind.base_crit_chance() + self.crit_chance
    }
}
