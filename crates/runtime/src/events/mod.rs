//! Event distribution for engine events.
//!
//! Every [`CombatEvent`] drained from the engine is published on the
//! [`EventBus`] after the presenter has seen it.

mod bus;

pub use bus::{EventBus, FilteredReceiver};

use combat_core::CombatEvent;

/// Coarse event categories for filtered subscriptions.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum EventKind {
    /// Phase, turn and wave changes.
    Flow,
    /// Hits, direct damage, periodic ticks, guard and healing.
    Combat,
    /// Status effects applied or expired, skipped turns.
    Status,
    /// Cards drawn, played, readied or fizzled.
    Cards,
    /// Enemy intents, delays and energy shortages.
    Intent,
    /// Defeats, removals and the end of combat.
    Outcome,
}

impl EventKind {
    pub fn of(event: &CombatEvent) -> Self {
        match event {
            CombatEvent::StateChanged { .. }
            | CombatEvent::TurnChanged { .. }
            | CombatEvent::TurnTypeChanged { .. }
            | CombatEvent::WaveChanged { .. }
            | CombatEvent::WaveSpawned { .. }
            | CombatEvent::WaveCleared { .. } => Self::Flow,
            CombatEvent::AttackResolved { .. }
            | CombatEvent::DirectDamage { .. }
            | CombatEvent::PeriodicTick { .. }
            | CombatEvent::GuardGained { .. }
            | CombatEvent::Healed { .. } => Self::Combat,
            CombatEvent::StatusApplied { .. }
            | CombatEvent::StatusExpired { .. }
            | CombatEvent::PlayerTurnSkipped { .. }
            | CombatEvent::EnemyTurnSkipped { .. } => Self::Status,
            CombatEvent::CardsDrawn { .. }
            | CombatEvent::CardPlayed { .. }
            | CombatEvent::CardReady { .. }
            | CombatEvent::CardFizzled { .. } => Self::Cards,
            CombatEvent::IntentDeclared { .. }
            | CombatEvent::EnemyActionDelayed { .. }
            | CombatEvent::EnemyEnergyShort { .. } => Self::Intent,
            CombatEvent::EnemyDefeated(_)
            | CombatEvent::EnemyRemoved { .. }
            | CombatEvent::CombatEnded { .. } => Self::Outcome,
        }
    }
}
