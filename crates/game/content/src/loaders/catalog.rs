//! Enemy catalog loader.

use std::path::Path;

use combat_core::EnemyTemplate;
use serde::{Deserialize, Serialize};

use crate::CatalogOracle;
use crate::loaders::{LoadResult, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for the enemy catalog from RON files.
pub struct EnemyCatalogLoader;

impl EnemyCatalogLoader {
    /// Load the enemy catalog from a RON file.
    ///
    /// Duplicate keys and malformed templates are rejected; boss minion keys
    /// that are missing from the catalog are tolerated, since the spawner
    /// falls back to the encounter pool for them.
    pub fn load(path: &Path) -> LoadResult<CatalogOracle> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse enemy catalog RON {}: {}", path.display(), e)
        })
    }

    pub fn parse(content: &str) -> LoadResult<CatalogOracle> {
        let catalog: EnemyCatalog = ron::from_str(content)?;

        let mut oracle = CatalogOracle::new();
        for template in catalog.enemies {
            validate(&template)?;
            if oracle.contains(&template.key) {
                anyhow::bail!("duplicate enemy key '{}'", template.key);
            }
            oracle.insert(template);
        }
        Ok(oracle)
    }
}

fn validate(template: &EnemyTemplate) -> LoadResult<()> {
    if template.key.is_empty() {
        anyhow::bail!("enemy '{}' has an empty key", template.name);
    }
    if template.health.max == 0 || template.health.min > template.health.max {
        anyhow::bail!(
            "enemy '{}' has an invalid health range {}..={}",
            template.key,
            template.health.min,
            template.health.max
        );
    }
    if template.stagger_threshold < 0.0 {
        anyhow::bail!("enemy '{}' has a negative stagger threshold", template.key);
    }
    Ok(())
}
