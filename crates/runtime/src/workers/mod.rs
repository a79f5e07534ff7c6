//! Background tasks owned by the runtime.

mod combat;

pub use combat::{Command, CombatWorker};
