//! Intents that drive combat: player card plays and enemy actions.
//!
//! Neither kind executes itself. The engine validates and resolves player
//! cards during the player turn and enemy intents during the enemy turn; the
//! same payloads are stored in [`crate::state::DelayedAction`] when an action
//! is postponed.

mod card;
mod intent;

pub use card::{CardIntent, CardKind};
pub use intent::{AbilityEffect, AbilityTrigger, EnemyAbility, EnemyIntent, IntentSpec};
