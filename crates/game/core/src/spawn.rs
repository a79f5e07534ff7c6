//! Wave composition and enemy instantiation.
//!
//! Configuration gaps never fail a spawn: unknown template keys are skipped,
//! empty pools fall through to the next source, and a spawn with no source at
//! all produces an empty wave (which the engine treats as already cleared).

use crate::config::{CombatConfig, RarityOdds, SpawnRules};
use crate::env::{ContentCatalog, Dice, EncounterDefinition, EnemyTemplate, RollContext};
use crate::state::{Combatant, CombatantId, Rarity, Wave};

/// Builds enemy rosters and hands out encounter-unique enemy ids.
#[derive(Clone, Debug)]
pub struct WaveSpawner {
    rules: SpawnRules,
    guard_cap_ratio: f32,
    next_id: u32,
}

impl WaveSpawner {
    pub fn new(rules: SpawnRules, guard_cap_ratio: f32) -> Self {
        Self {
            rules,
            guard_cap_ratio,
            next_id: 1,
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.spawn.clone(), config.guard_cap_ratio)
    }

    pub fn rules(&self) -> &SpawnRules {
        &self.rules
    }

    /// Spawns wave `wave_index` (1-based) of `total_waves`.
    pub fn spawn_wave(
        &mut self,
        wave_index: u32,
        total_waves: u32,
        desired_count: u32,
        encounter: &EncounterDefinition,
        catalog: &dyn ContentCatalog,
        dice: &mut Dice,
    ) -> Wave {
        let capacity = self.rules.capacity();
        if capacity == 0 {
            return Wave::new(wave_index, total_waves, Vec::new(), None);
        }
        let count = desired_count.clamp(1, capacity) as usize;

        if wave_index == total_waves {
            let boss = encounter
                .unique_boss
                .as_deref()
                .and_then(|key| catalog.template(key));
            if let Some(boss) = boss {
                return self.spawn_boss_wave(wave_index, total_waves, count, &boss, encounter, catalog, dice);
            }
        }

        let candidates = Self::regular_candidates(&self.rules, encounter, catalog);
        let mut roster = Vec::with_capacity(count);
        if !candidates.is_empty() {
            for slot in 0..count {
                let id = self.peek_id();
                let Some(pick) = dice.index(id, RollContext::SpawnPick, candidates.len()) else {
                    break;
                };
                let rarity = roll_rarity(&self.rules.rarity, id, dice);
                roster.push(self.instantiate(&candidates[pick], slot, rarity, dice));
            }
        }

        Wave::new(wave_index, total_waves, roster, None)
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn_boss_wave(
        &mut self,
        wave_index: u32,
        total_waves: u32,
        count: usize,
        boss: &EnemyTemplate,
        encounter: &EncounterDefinition,
        catalog: &dyn ContentCatalog,
        dice: &mut Dice,
    ) -> Wave {
        let boss_slot = self.rules.boss_slot.min(count - 1);
        let mut roster = Vec::with_capacity(count);
        roster.push(self.instantiate(boss, boss_slot, Rarity::Boss, dice));

        // Minions fill the remaining slots in priority order: the boss's own
        // minion pool, then the encounter pool, then the global catalog.
        let catalog_keys: Vec<String> = catalog.all_templates().into_iter().map(|t| t.key).collect();
        let minions: Vec<EnemyTemplate> = boss
            .minion_pool
            .iter()
            .chain(encounter.enemy_pool.iter())
            .chain(catalog_keys.iter())
            .filter(|key| key.as_str() != boss.key)
            .filter_map(|key| catalog.template(key))
            .take(count - 1)
            .collect();

        let free_slots = (0..count).filter(|slot| *slot != boss_slot);
        for (template, slot) in minions.iter().zip(free_slots) {
            let rarity = roll_rarity(&self.rules.rarity, self.peek_id(), dice);
            roster.push(self.instantiate(template, slot, rarity, dice));
        }

        Wave::new(wave_index, total_waves, roster, Some(boss_slot))
    }

    /// Candidate templates for a regular (non-boss) wave.
    fn regular_candidates(
        rules: &SpawnRules,
        encounter: &EncounterDefinition,
        catalog: &dyn ContentCatalog,
    ) -> Vec<EnemyTemplate> {
        let mut candidates: Vec<EnemyTemplate> = encounter
            .enemy_pool
            .iter()
            .filter_map(|key| catalog.template(key))
            .collect();

        if !encounter.exclusive_pool {
            let ceiling = rules.tier_ceiling(encounter.area_difficulty);
            for template in catalog.templates_up_to_tier(ceiling) {
                if !candidates.iter().any(|c| c.key == template.key) {
                    candidates.push(template);
                }
            }
        }

        if candidates.is_empty() {
            candidates = catalog.all_templates();
        }
        candidates
    }

    fn peek_id(&self) -> CombatantId {
        CombatantId(self.next_id)
    }

    fn instantiate(
        &mut self,
        template: &EnemyTemplate,
        slot: usize,
        rarity: Rarity,
        dice: &mut Dice,
    ) -> Combatant {
        let id = CombatantId(self.next_id);
        self.next_id += 1;

        let health = dice.range(id, RollContext::Health, template.health.min, template.health.max);
        template.instantiate(id, slot, health, rarity, self.guard_cap_ratio)
    }
}

fn roll_rarity(odds: &RarityOdds, id: CombatantId, dice: &mut Dice) -> Rarity {
    let roll = dice.d100(id, RollContext::Rarity);
    if roll <= odds.elite {
        Rarity::Elite
    } else if roll <= odds.elite + odds.rare {
        Rarity::Rare
    } else if roll <= odds.elite + odds.rare + odds.uncommon {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}
