//! Encounter definition loader.

use std::path::Path;

use combat_core::{ContentCatalog, EncounterDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Encounter list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterList {
    pub encounters: Vec<EncounterDefinition>,
}

/// Loader for encounter definitions from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EncounterDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse encounters RON {}: {}", path.display(), e)
        })
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EncounterDefinition>> {
        let list: EncounterList = ron::from_str(content)?;
        for encounter in &list.encounters {
            if encounter.total_waves == 0 {
                anyhow::bail!("encounter '{}' has no waves", encounter.name);
            }
        }
        Ok(list.encounters)
    }

    /// Loads the encounters and picks the one called `name`.
    pub fn load_named(path: &Path, name: &str) -> LoadResult<EncounterDefinition> {
        Self::load(path)?
            .into_iter()
            .find(|e| e.name == name)
            .ok_or_else(|| anyhow::anyhow!("Encounter '{}' not found in {}", name, path.display()))
    }

    /// Template keys an encounter references that the catalog does not know.
    ///
    /// Unknown keys are skipped at spawn time, so this is only a lint for
    /// content authors.
    pub fn unknown_keys(encounter: &EncounterDefinition, catalog: &dyn ContentCatalog) -> Vec<String> {
        encounter
            .enemy_pool
            .iter()
            .chain(encounter.unique_boss.iter())
            .filter(|key| catalog.template(key).is_none())
            .cloned()
            .collect()
    }
}
