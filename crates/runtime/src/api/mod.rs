//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the worker can stay focused on driving the engine.

pub mod errors;
pub mod handle;
pub mod presenter;
pub mod progression;
pub mod providers;
pub mod snapshot;

pub use errors::{Result, RuntimeError};
pub use handle::{CombatHandle, InputGate};
pub use presenter::{NullPresenter, Presenter};
pub use progression::{LootAndProgression, NoRewards};
pub use providers::{IntentProvider, PassiveIntents, PlayerIntent, ScriptedIntents};
pub use snapshot::{CombatReport, CombatSnapshot, CombatantView};
