//! Deterministic combat rules for wave-based, turn-based encounters.
//!
//! `combat-core` defines the canonical rules (combatant resources, status
//! effects, delayed actions, wave spawning, attack resolution and the turn
//! state machine) and exposes pure, synchronous APIs. All state mutation flows
//! through [`engine::CombatEngine`]; pacing, animation and I/O live in the
//! runtime crate, which drives the engine and forwards its events.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod spawn;
pub mod state;

pub use action::{
    AbilityEffect, AbilityTrigger, CardIntent, CardKind, EnemyAbility, EnemyIntent, IntentSpec,
};
pub use combat::{AttackModifiers, AttackOutcome, AttackRequest, AttackResolver, PlayerLoadout};
pub use config::{CombatConfig, RarityOdds, SpawnRules};
pub use engine::{
    CombatEngine, CombatError, CombatEvent, CombatOutcome, CombatState, DefeatedEnemy, NextStep,
    PreparedCard, TurnCounters,
};
pub use env::{
    CardSource, ContentCatalog, CyclingDeck, Dice, EncounterDefinition, EnemyTemplate,
    EnergyProfile, FixedRng, HealthRange, PcgRng, RngOracle, RollContext, StaticCatalog,
    compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use spawn::WaveSpawner;
pub use state::{
    BoostStat, Combatant, CombatantId, DamageOutcome, DelayedAction, DelayedActionQueue,
    DelayedPayload, EnemyKit, Rarity, StatBoost, StatBoosts, StatusEffect, StatusEffectKind,
    StatusEffectTrack, Wave,
};
