//! Combat rules configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &CombatConfig) -> LoadResult<()> {
    let fractions = [
        ("guard_retention", config.guard_retention),
        ("player_stagger_retention", config.player_stagger_retention),
        ("enemy_stagger_retention", config.enemy_stagger_retention),
        ("enemy_guard_retention", config.enemy_guard_retention),
    ];
    for (name, value) in fractions {
        if !(0.0..=1.0).contains(&value) {
            anyhow::bail!("{name} must be within [0, 1], got {value}");
        }
    }
    if config.crit_multiplier < 1.0 {
        anyhow::bail!(
            "crit_multiplier must be at least 1.0, got {}",
            config.crit_multiplier
        );
    }
    if config.spawn.max_spawn_slots == 0 {
        anyhow::bail!("spawn.max_spawn_slots must be positive");
    }
    Ok(())
}
