//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use combat_core::{
    CardIntent, CombatOutcome, Combatant, CombatantId, ContentCatalog, CyclingDeck, DefeatedEnemy,
    Dice, EncounterDefinition, EnemyIntent, EnemyTemplate, FixedRng, IntentSpec, StaticCatalog,
};
use combat_runtime::{LootAndProgression, Presenter, Runtime, RuntimeBuilder, RuntimeConfig};

pub fn catalog() -> Arc<dyn ContentCatalog> {
    let attack = IntentSpec::new(EnemyIntent::Attack {
        power: 1.0,
        energy_cost: 0,
    });
    Arc::new(StaticCatalog::new(vec![
        EnemyTemplate::new("dummy", "Dummy", 10, 4).with_intent(attack.clone()),
        EnemyTemplate::new("wall", "Wall", 500, 4).with_intent(attack),
    ]))
}

pub fn encounter(pool: &str, waves: u32, per_wave: u32) -> EncounterDefinition {
    EncounterDefinition::new("trial", waves, per_wave).with_pool([pool], true)
}

pub fn slash() -> CardIntent {
    CardIntent::strike("Slash", 1, 10)
}

/// Pacing delays that are long enough to observe under paused time.
pub fn paced() -> RuntimeConfig {
    RuntimeConfig {
        skipped_turn_delay: Duration::from_millis(500),
        enemy_action_delay: Duration::from_millis(300),
        wave_transition_delay: Duration::from_millis(1000),
        spawn_animation_timeout: Duration::from_millis(2000),
        despawn_timeout: Duration::from_millis(1500),
        ..RuntimeConfig::default()
    }
}

pub fn builder(encounter: EncounterDefinition) -> RuntimeBuilder {
    Runtime::builder()
        .config(paced())
        .encounter(encounter)
        .catalog(catalog())
        .cards(CyclingDeck::new(vec![slash()]))
        .player(Combatant::player("Hero", 50, 3))
        // d100 always rolls 100: no misses, no rolled crits, common rarity.
        .dice(Dice::new(FixedRng(99), 0))
}

/// Presenter that records what it was told.
#[derive(Default)]
pub struct RecordingPresenter {
    pub waves: Mutex<Vec<(u32, u32)>>,
    pub defeated: Mutex<Vec<CombatantId>>,
    pub spawns: Mutex<Vec<Vec<CombatantId>>>,
    pub ended: Mutex<Vec<CombatOutcome>>,
    pub attacks: Mutex<u32>,
    /// When set, despawn animations never finish.
    pub stall_despawns: bool,
}

impl RecordingPresenter {
    pub fn stalling() -> Self {
        Self {
            stall_despawns: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Presenter for RecordingPresenter {
    fn on_wave_changed(&self, current: u32, total: u32) {
        self.waves.lock().unwrap().push((current, total));
    }

    fn on_enemy_defeated(&self, enemy: &DefeatedEnemy) {
        self.defeated.lock().unwrap().push(enemy.id);
    }

    fn on_combat_ended(&self, outcome: CombatOutcome) {
        self.ended.lock().unwrap().push(outcome);
    }

    fn on_attack(
        &self,
        _attacker: CombatantId,
        _defender: CombatantId,
        _outcome: &combat_core::AttackOutcome,
    ) {
        *self.attacks.lock().unwrap() += 1;
    }

    async fn play_spawn(&self, enemies: &[CombatantId]) {
        self.spawns.lock().unwrap().push(enemies.to_vec());
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    async fn play_despawn(&self, _enemy: CombatantId) {
        if self.stall_despawns {
            std::future::pending::<()>().await;
        }
    }
}

/// Grants the template key for every defeat and a summary at the end.
#[derive(Default)]
pub struct KeyLoot {
    pub running_lengths: Vec<usize>,
}

impl LootAndProgression for KeyLoot {
    type Reward = String;

    fn on_enemy_defeated(
        &mut self,
        template: Option<&EnemyTemplate>,
        _enemy: &DefeatedEnemy,
        defeated: &[DefeatedEnemy],
    ) -> Option<String> {
        self.running_lengths.push(defeated.len());
        Some(format!(
            "{}#{}",
            template.map_or("unknown", |t| t.key.as_str()),
            defeated.len()
        ))
    }

    fn on_combat_ended(
        &mut self,
        outcome: CombatOutcome,
        defeated: &[DefeatedEnemy],
    ) -> Option<String> {
        Some(format!("{outcome}:{}", defeated.len()))
    }
}
