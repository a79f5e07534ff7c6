//! Traits describing read-only encounter data.
//!
//! Oracles expose enemy templates, the player's card source, and the RNG.
//! The engine receives them at construction and never writes back.
mod cards;
mod catalog;
mod rng;

pub use cards::{CardSource, CyclingDeck};
pub use catalog::{
    ContentCatalog, EncounterDefinition, EnemyTemplate, EnergyProfile, HealthRange, StaticCatalog,
};
pub use rng::{Dice, FixedRng, PcgRng, RngOracle, RollContext, compute_seed};
