//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use combat_core::{CardIntent, CombatConfig, EncounterDefinition};

use crate::CatalogOracle;
use crate::loaders::{ConfigLoader, DeckLoader, EncounterLoader, EnemyCatalogLoader, LoadResult};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── enemies.ron
/// ├── encounters.ron
/// └── deck.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat rules from `combat.toml`, or the defaults when the file
    /// does not exist.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the enemy catalog from `enemies.ron`.
    pub fn load_catalog(&self) -> LoadResult<CatalogOracle> {
        EnemyCatalogLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load every encounter from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<Vec<EncounterDefinition>> {
        EncounterLoader::load(&self.data_dir.join("encounters.ron"))
    }

    /// Load one encounter from `encounters.ron` by name.
    pub fn load_encounter(&self, name: &str) -> LoadResult<EncounterDefinition> {
        EncounterLoader::load_named(&self.data_dir.join("encounters.ron"), name)
    }

    /// Load the starter deck from `deck.ron`.
    pub fn load_deck(&self) -> LoadResult<Vec<CardIntent>> {
        DeckLoader::load(&self.data_dir.join("deck.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert!(factory.load_catalog().is_err());
    }
}
