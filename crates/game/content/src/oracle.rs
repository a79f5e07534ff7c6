//! Catalog oracle backed by loaded enemy templates.

use std::collections::BTreeMap;

use combat_core::{ContentCatalog, EnemyTemplate};

/// Indexed, read-only enemy catalog.
///
/// Templates are keyed by their catalog key; iteration order is the order the
/// templates were registered in, so spawn rolls stay reproducible across
/// runs with the same seed.
#[derive(Clone, Debug, Default)]
pub struct CatalogOracle {
    templates: Vec<EnemyTemplate>,
    index: BTreeMap<String, usize>,
}

impl CatalogOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an oracle from templates. A later template with an already
    /// registered key replaces the earlier one in place.
    pub fn from_templates(templates: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        let mut oracle = Self::new();
        for template in templates {
            oracle.insert(template);
        }
        oracle
    }

    pub fn insert(&mut self, template: EnemyTemplate) {
        match self.index.get(&template.key) {
            Some(&i) => self.templates[i] = template,
            None => {
                self.index.insert(template.key.clone(), self.templates.len());
                self.templates.push(template);
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.key.as_str())
    }

    /// Keys referenced by `minion_pool` entries that are not in the catalog.
    pub fn dangling_minions(&self) -> Vec<(String, String)> {
        self.templates
            .iter()
            .flat_map(|t| {
                t.minion_pool
                    .iter()
                    .filter(|k| !self.index.contains_key(k.as_str()))
                    .map(move |k| (t.key.clone(), k.clone()))
            })
            .collect()
    }
}

impl ContentCatalog for CatalogOracle {
    fn template(&self, key: &str) -> Option<EnemyTemplate> {
        self.index.get(key).map(|&i| self.templates[i].clone())
    }

    fn all_templates(&self) -> Vec<EnemyTemplate> {
        self.templates.clone()
    }
}
