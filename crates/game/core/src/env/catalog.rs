//! Enemy templates, encounter definitions, and the read-only catalog oracle.
//!
//! Templates are immutable value data. The spawner copies what it needs into
//! a fresh [`Combatant`] and never writes back.

use crate::action::{EnemyAbility, IntentSpec};
use crate::state::{Combatant, CombatantId, EnemyKit, Rarity};

/// Inclusive health range rolled at spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthRange {
    pub min: u32,
    pub max: u32,
}

impl HealthRange {
    pub const fn fixed(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnergyProfile {
    pub max: u32,
    pub start: u32,
    /// Energy regained at every enemy turn start.
    pub regen: u32,
}

/// Stat block for one enemy type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    /// Catalog key, e.g. "goblin_scout".
    pub key: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "default_tier"))]
    pub tier: u32,
    pub health: HealthRange,
    pub base_damage: u32,
    /// 0 disables stagger.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stagger_threshold: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy: EnergyProfile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub intents: Vec<IntentSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<EnemyAbility>,
    /// Keys of enemies that accompany this one when it spawns as a boss.
    #[cfg_attr(feature = "serde", serde(default))]
    pub minion_pool: Vec<String>,
}

#[cfg(feature = "serde")]
fn default_tier() -> u32 {
    1
}

impl EnemyTemplate {
    pub fn new(key: impl Into<String>, name: impl Into<String>, health: u32, base_damage: u32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            tier: 1,
            health: HealthRange::fixed(health),
            base_damage,
            stagger_threshold: 0.0,
            energy: EnergyProfile::default(),
            intents: Vec::new(),
            abilities: Vec::new(),
            minion_pool: Vec::new(),
        }
    }

    pub fn with_tier(mut self, tier: u32) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_health_range(mut self, min: u32, max: u32) -> Self {
        self.health = HealthRange { min, max };
        self
    }

    pub fn with_stagger_threshold(mut self, threshold: f32) -> Self {
        self.stagger_threshold = threshold;
        self
    }

    pub fn with_energy(mut self, max: u32, start: u32, regen: u32) -> Self {
        self.energy = EnergyProfile { max, start, regen };
        self
    }

    pub fn with_intent(mut self, intent: IntentSpec) -> Self {
        self.intents.push(intent);
        self
    }

    pub fn with_ability(mut self, ability: EnemyAbility) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_minions<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.minion_pool = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Instantiates a combatant with an already-rolled health value.
    pub fn instantiate(
        &self,
        id: CombatantId,
        slot: usize,
        max_health: u32,
        rarity: Rarity,
        guard_cap_ratio: f32,
    ) -> Combatant {
        Combatant::new(id, self.name.clone(), max_health.max(1))
            .with_guard_cap_ratio(guard_cap_ratio)
            .with_stagger_threshold(self.stagger_threshold)
            .with_energy(self.energy.max, self.energy.start, self.energy.regen)
            .with_template(self.key.clone())
            .with_tier(self.tier)
            .with_rarity(rarity)
            .with_slot(slot)
            .with_kit(EnemyKit {
                base_damage: self.base_damage,
                intents: self.intents.clone(),
                abilities: self.abilities.clone(),
            })
    }
}

/// One multi-wave encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterDefinition {
    pub name: String,
    pub total_waves: u32,
    pub enemies_per_wave: u32,
    /// Template key of the boss that leads the final wave.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unique_boss: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemy_pool: Vec<String>,
    /// When set, regular waves draw only from `enemy_pool`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exclusive_pool: bool,
    /// Caps the catalog tier mixed into non-exclusive pools.
    #[cfg_attr(feature = "serde", serde(default))]
    pub area_difficulty: u32,
}

impl EncounterDefinition {
    pub fn new(name: impl Into<String>, total_waves: u32, enemies_per_wave: u32) -> Self {
        Self {
            name: name.into(),
            total_waves: total_waves.max(1),
            enemies_per_wave,
            unique_boss: None,
            enemy_pool: Vec::new(),
            exclusive_pool: false,
            area_difficulty: 0,
        }
    }

    pub fn with_boss(mut self, key: impl Into<String>) -> Self {
        self.unique_boss = Some(key.into());
        self
    }

    pub fn with_pool<I, S>(mut self, keys: I, exclusive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enemy_pool = keys.into_iter().map(Into::into).collect();
        self.exclusive_pool = exclusive;
        self
    }

    pub fn with_area_difficulty(mut self, difficulty: u32) -> Self {
        self.area_difficulty = difficulty;
        self
    }
}

/// Read-only source of enemy templates.
pub trait ContentCatalog: Send + Sync {
    /// Template for a catalog key, if known.
    fn template(&self, key: &str) -> Option<EnemyTemplate>;

    /// Every template, in a stable order.
    fn all_templates(&self) -> Vec<EnemyTemplate>;

    fn templates_up_to_tier(&self, tier: u32) -> Vec<EnemyTemplate> {
        self.all_templates()
            .into_iter()
            .filter(|t| t.tier <= tier)
            .collect()
    }
}

/// In-memory catalog backed by a vector, mostly for tests and tooling.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    templates: Vec<EnemyTemplate>,
}

impl StaticCatalog {
    pub fn new(templates: Vec<EnemyTemplate>) -> Self {
        Self { templates }
    }
}

impl ContentCatalog for StaticCatalog {
    fn template(&self, key: &str) -> Option<EnemyTemplate> {
        self.templates.iter().find(|t| t.key == key).cloned()
    }

    fn all_templates(&self) -> Vec<EnemyTemplate> {
        self.templates.clone()
    }
}
