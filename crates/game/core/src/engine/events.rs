//! Events recorded by the engine for presentation and progression.
//!
//! The engine never calls out. Every observable change is appended to an
//! outbox that the runtime drains after each call and forwards to the
//! presenter, the loot service and subscribers.

use crate::action::IntentSpec;
use crate::combat::AttackOutcome;
use crate::state::{CombatantId, Rarity, StatusEffectKind};

use super::{CombatOutcome, CombatState};

/// Snapshot of an enemy taken when its defeat is reported.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefeatedEnemy {
    pub id: CombatantId,
    /// Display name including the rarity prefix.
    pub name: String,
    pub template: Option<String>,
    pub rarity: Rarity,
    pub tier: u32,
    pub wave: u32,
    pub turn: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    StateChanged {
        state: CombatState,
    },
    TurnChanged {
        turn: u32,
    },
    TurnTypeChanged {
        is_player_turn: bool,
    },
    WaveChanged {
        current: u32,
        total: u32,
    },
    /// A new roster is in place; the runtime waits for its spawn animation.
    WaveSpawned {
        wave: u32,
        enemies: Vec<CombatantId>,
    },
    WaveCleared {
        wave: u32,
    },
    PlayerTurnSkipped {
        reason: StatusEffectKind,
    },
    EnemyTurnSkipped {
        enemy: CombatantId,
        reason: StatusEffectKind,
    },
    CardsDrawn {
        count: usize,
    },
    CardPlayed {
        name: String,
        target: Option<CombatantId>,
        delayed: bool,
    },
    /// A prepared card finished charging and entered the hand.
    CardReady {
        name: String,
    },
    /// A delayed card fired with no living enemy to hit.
    CardFizzled {
        name: String,
    },
    AttackResolved {
        attacker: CombatantId,
        defender: CombatantId,
        outcome: AttackOutcome,
    },
    /// Damage applied outside attack resolution (retaliation).
    DirectDamage {
        source: CombatantId,
        target: CombatantId,
        amount: u32,
        health_lost: u32,
    },
    PeriodicTick {
        target: CombatantId,
        damage: u32,
        healing: u32,
    },
    StatusApplied {
        target: CombatantId,
        kind: StatusEffectKind,
    },
    StatusExpired {
        target: CombatantId,
        kind: StatusEffectKind,
    },
    GuardGained {
        target: CombatantId,
        amount: u32,
    },
    Healed {
        target: CombatantId,
        amount: u32,
    },
    IntentDeclared {
        enemy: CombatantId,
        intent: IntentSpec,
    },
    EnemyActionDelayed {
        enemy: CombatantId,
        turns: u32,
    },
    EnemyEnergyShort {
        enemy: CombatantId,
        needed: u32,
        available: u32,
    },
    /// Reported exactly once per enemy. The enemy stays on the roster until
    /// its despawn completes.
    EnemyDefeated(DefeatedEnemy),
    /// A defeated enemy left the roster. `forced` is set when a
    /// reconciliation pass removed it instead of a completed despawn.
    EnemyRemoved {
        enemy: CombatantId,
        forced: bool,
    },
    CombatEnded {
        outcome: CombatOutcome,
    },
}
