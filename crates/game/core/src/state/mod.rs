//! Combatant state.
//!
//! This module owns the resource model shared by the player and enemies, the
//! per-combatant effect / boost / delayed-action collections, and the active
//! wave. The engine mutates it exclusively through the methods defined here.
mod boost;
mod combatant;
mod delayed;
mod status;
mod wave;

pub use boost::{BoostStat, StatBoost, StatBoosts};
pub use combatant::{Combatant, CombatantId, DamageOutcome, EnemyKit, Rarity};
pub use delayed::{DelayedAction, DelayedActionQueue, DelayedPayload};
pub use status::{PeriodicTick, Stacking, StatusEffect, StatusEffectKind, StatusEffectTrack};
pub use wave::Wave;
