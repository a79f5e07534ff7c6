//! Data-driven combat content and loaders.
//!
//! This crate houses the enemy catalog oracle and provides loaders for RON/TOML
//! data files:
//! - Enemy templates (data-driven via RON)
//! - Encounter definitions (data-driven via RON)
//! - Starter decks (data-driven via RON)
//! - Combat rules configuration (data-driven via TOML)
//!
//! Content is consumed through [`combat_core::ContentCatalog`] and never
//! appears in combat state: the spawner copies what it needs.

pub mod oracle;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use oracle::CatalogOracle;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, DeckLoader, EncounterLoader, EnemyCatalogLoader, LoadResult,
};
