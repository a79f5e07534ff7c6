//! Presenter that narrates the encounter through `tracing`.

use async_trait::async_trait;
use combat_core::{AttackOutcome, CombatEvent, CombatOutcome, CombatantId, DefeatedEnemy};
use combat_runtime::Presenter;
use tracing::{debug, info};

const TARGET: &str = "combat::sim";

pub struct LogPresenter;

#[async_trait]
impl Presenter for LogPresenter {
    fn on_turn_changed(&self, turn: u32) {
        info!(target: TARGET, turn, "-- turn --");
    }

    fn on_wave_changed(&self, current: u32, total: u32) {
        info!(target: TARGET, "wave {current}/{total}");
    }

    fn on_enemy_defeated(&self, enemy: &DefeatedEnemy) {
        info!(target: TARGET, "{} defeated", enemy.name);
    }

    fn on_combat_ended(&self, outcome: CombatOutcome) {
        info!(target: TARGET, %outcome, "combat over");
    }

    fn on_attack(&self, attacker: CombatantId, defender: CombatantId, outcome: &AttackOutcome) {
        if outcome.missed {
            info!(target: TARGET, "{attacker} -> {defender}: miss");
        } else {
            info!(
                target: TARGET,
                crit = outcome.was_critical,
                staggered = outcome.staggered,
                "{attacker} -> {defender}: {} ({} absorbed)",
                outcome.health_lost,
                outcome.absorbed
            );
        }
    }

    fn on_event(&self, event: &CombatEvent) {
        debug!(target: TARGET, ?event);
    }

    async fn play_spawn(&self, enemies: &[CombatantId]) {
        debug!(target: TARGET, count = enemies.len(), "spawning");
    }
}
