//! Async runtime for wave-based combat encounters.
//!
//! This crate drives a [`combat_core::CombatEngine`] on a tokio task: it owns
//! the pacing delays and the spawn/despawn animation waits, receives player
//! intents through [`CombatHandle`], and forwards engine events to the
//! [`Presenter`], the [`LootAndProgression`] service, and any number of
//! event subscribers.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and pacing configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the broadcast event bus
//! - `workers` keeps the combat task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    CombatHandle, CombatReport, CombatSnapshot, CombatantView, InputGate, IntentProvider,
    LootAndProgression, NoRewards, NullPresenter, PassiveIntents, PlayerIntent, Presenter, Result,
    RuntimeError, ScriptedIntents,
};
pub use events::{EventBus, EventKind, FilteredReceiver};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
