//! Wave lifecycle, defeat bookkeeping and terminal transitions.
//!
//! Wave completion is checked after anything that can kill an enemy. The
//! check is idempotent: once a transition is in flight (or the encounter is
//! over) further checks are no-ops, and checks requested while an area attack
//! is resolving collapse into one check when the attack finishes.

use crate::state::CombatantId;

use super::{CombatEngine, CombatError, CombatEvent, CombatOutcome, CombatState, DefeatedEnemy, NextStep};

impl CombatEngine {
    /// Removes a defeated enemy once its death animation finished (or timed
    /// out). Returns false if the enemy is unknown, already removed, or still
    /// alive.
    pub fn complete_despawn(&mut self, id: CombatantId) -> bool {
        if !self.wave.enemy(id).is_some_and(|e| e.is_defeated()) {
            return false;
        }
        // Covers deaths that bypassed the resolver.
        self.record_enemy_defeat(id);
        self.wave.remove(id);
        self.emit(CombatEvent::EnemyRemoved {
            enemy: id,
            forced: false,
        });
        true
    }

    /// Wave-cleared → next wave: clears every enemy slot, draws the per-wave
    /// allotment and spawns the next roster. Returns the new enemy ids so the
    /// driver can wait for their spawn animation.
    pub fn advance_wave(&mut self) -> Result<Vec<CombatantId>, CombatError> {
        self.ensure_running()?;
        if !self.transition.in_flight {
            return Err(CombatError::NoPendingTransition);
        }

        for id in self.wave.pending_despawns() {
            self.record_enemy_defeat(id);
            self.emit(CombatEvent::EnemyRemoved {
                enemy: id,
                forced: true,
            });
        }
        self.wave.clear();
        self.enemy_queue.clear();
        self.target = None;

        let next = self.wave.index + 1;
        self.draw_cards(self.config.cards_per_wave as usize);
        self.spawn_wave(next);
        Ok(self.wave.living_ids())
    }

    /// Ends a wave transition and re-enters PlayerTurn. An empty new wave
    /// is cleared immediately.
    pub fn resume_after_wave(&mut self) -> Result<NextStep, CombatError> {
        self.ensure_running()?;
        if !self.transition.in_flight {
            return Err(CombatError::NoPendingTransition);
        }
        self.transition.in_flight = false;

        if let Some(step) = self.check_wave_completion() {
            return Ok(step);
        }
        Ok(self.begin_player_turn())
    }

    pub(super) fn spawn_wave(&mut self, index: u32) {
        let total = self.encounter.total_waves;
        self.wave = self.spawner.spawn_wave(
            index,
            total,
            self.encounter.enemies_per_wave,
            &self.encounter,
            self.catalog.as_ref(),
            &mut self.dice,
        );
        self.emit(CombatEvent::WaveChanged {
            current: index,
            total,
        });

        let ids = self.wave.living_ids();
        for id in &ids {
            self.roll_intent(*id);
        }
        self.emit(CombatEvent::WaveSpawned {
            wave: index,
            enemies: ids,
        });
    }

    /// Idempotent wave-completion check.
    pub(super) fn check_wave_completion(&mut self) -> Option<NextStep> {
        if self.state.is_terminal() || self.transition.in_flight {
            return None;
        }
        if self.transition.area_depth > 0 {
            self.transition.deferred = true;
            return None;
        }
        self.transition.deferred = false;

        if !self.wave.is_cleared() {
            return None;
        }
        self.waves_cleared += 1;
        if self.wave.is_final() {
            return Some(self.finish(CombatOutcome::Victory));
        }

        self.transition.in_flight = true;
        self.enemy_queue.clear();
        self.emit(CombatEvent::WaveCleared {
            wave: self.wave.index,
        });
        Some(NextStep::WaveCleared)
    }

    /// Player defeat takes precedence over a simultaneous wave clear.
    pub(super) fn settle(&mut self) -> Option<NextStep> {
        if self.state.is_terminal() {
            return self.outcome().map(NextStep::Finished);
        }
        if self.player.is_defeated() {
            return Some(self.finish(CombatOutcome::Defeat));
        }
        self.check_wave_completion()
    }

    pub(super) fn finish(&mut self, outcome: CombatOutcome) -> NextStep {
        if !self.state.is_terminal() {
            self.enemy_queue.clear();
            self.set_state(match outcome {
                CombatOutcome::Victory => CombatState::Victory,
                CombatOutcome::Defeat => CombatState::Defeat,
            });
            self.emit(CombatEvent::CombatEnded { outcome });
        }
        NextStep::Finished(outcome)
    }

    /// Reports an enemy defeat exactly once.
    pub(super) fn record_enemy_defeat(&mut self, id: CombatantId) {
        let (turn, wave) = (self.turn, self.wave.index);
        let Some(enemy) = self.wave.enemy_mut(id) else {
            return;
        };
        if !enemy.mark_defeated() {
            return;
        }
        let record = DefeatedEnemy {
            id,
            name: enemy.display_name(),
            template: enemy.template.clone(),
            rarity: enemy.rarity,
            tier: enemy.tier,
            wave,
            turn,
        };
        self.defeated.push(record.clone());
        self.emit(CombatEvent::EnemyDefeated(record));
    }

    /// Reports a defeat that the resolver already marked.
    pub(super) fn announce_enemy_defeat(&mut self, id: CombatantId) {
        let (turn, wave) = (self.turn, self.wave.index);
        let Some(enemy) = self.wave.enemy(id) else {
            return;
        };
        let record = DefeatedEnemy {
            id,
            name: enemy.display_name(),
            template: enemy.template.clone(),
            rarity: enemy.rarity,
            tier: enemy.tier,
            wave,
            turn,
        };
        self.defeated.push(record.clone());
        self.emit(CombatEvent::EnemyDefeated(record));
    }

    /// Force-removes every zero-health enemy still on the roster, reporting
    /// any defeat that was never reported, then re-checks completion.
    pub(super) fn reconcile_roster(&mut self) -> Option<NextStep> {
        for id in self.wave.pending_despawns() {
            self.record_enemy_defeat(id);
            self.wave.remove(id);
            self.emit(CombatEvent::EnemyRemoved {
                enemy: id,
                forced: true,
            });
        }
        self.settle()
    }

    /// Runs `f` as one area attack: completion checks inside it are deferred
    /// and collapse into a single check afterwards.
    pub(super) fn with_area_attack<F>(&mut self, f: F) -> Option<NextStep>
    where
        F: FnOnce(&mut Self),
    {
        self.transition.area_depth += 1;
        f(self);
        self.transition.area_depth -= 1;

        if self.transition.area_depth == 0 && self.transition.deferred {
            return self.settle();
        }
        None
    }
}
