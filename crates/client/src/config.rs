//! Simulator configuration.

use std::env;
use std::path::PathBuf;

/// Player and content settings for one simulated encounter.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Directory holding `combat.toml`, `enemies.ron`, `encounters.ron` and
    /// `deck.ron`.
    pub content_dir: PathBuf,
    /// Encounter to play; the first one in `encounters.ron` when unset.
    pub encounter: Option<String>,
    pub seed: u64,
    pub player_name: String,
    pub player_health: u32,
    pub player_mana: u32,
    /// Skip every pacing delay.
    pub instant: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("content"),
            encounter: None,
            seed: 42,
            player_name: "Hero".to_string(),
            player_health: 80,
            player_mana: 3,
            instant: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_CONTENT_DIR` - content directory (default: bundled `content/`)
    /// - `COMBAT_ENCOUNTER` - encounter name
    /// - `COMBAT_SEED` - game seed (default: 42)
    /// - `COMBAT_PLAYER_NAME` (default: "Hero")
    /// - `COMBAT_PLAYER_HEALTH` (default: 80)
    /// - `COMBAT_PLAYER_MANA` (default: 3)
    /// - `COMBAT_INSTANT` - "1"/"true" disables pacing delays
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("COMBAT_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Ok(name) = env::var("COMBAT_ENCOUNTER") {
            config.encounter = Some(name);
        }
        if let Some(seed) = read_env("COMBAT_SEED") {
            config.seed = seed;
        }
        if let Ok(name) = env::var("COMBAT_PLAYER_NAME") {
            config.player_name = name;
        }
        if let Some(health) = read_env::<u32>("COMBAT_PLAYER_HEALTH") {
            config.player_health = health.max(1);
        }
        if let Some(mana) = read_env("COMBAT_PLAYER_MANA") {
            config.player_mana = mana;
        }
        if let Ok(flag) = env::var("COMBAT_INSTANT") {
            config.instant = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
