//! PlayerTurn / EnemyTurn entry actions and enemy action execution.

use crate::action::{AbilityEffect, AbilityTrigger, EnemyIntent};
use crate::combat::AttackResolver;
use crate::env::RollContext;
use crate::state::{CombatantId, DelayedAction, DelayedPayload, StatusEffectKind};

use super::{CombatEngine, CombatError, CombatEvent, CombatState, NextStep, TurnCounters};

impl CombatEngine {
    /// Ends the player turn and runs EnemyTurn entry actions.
    ///
    /// Also completes a crowd-control skipped turn.
    pub fn end_player_turn(&mut self) -> Result<NextStep, CombatError> {
        self.ensure_phase(CombatState::PlayerTurn)?;
        if self.transition.in_flight {
            return Err(CombatError::TransitionInFlight);
        }

        self.player_skip = None;
        self.cards_played_snapshot = self.counters.cards_played;
        if let Some(step) = self.reconcile_roster() {
            return Ok(step);
        }

        Ok(self.begin_enemy_turn())
    }

    /// Runs the next enemy in the turn-start snapshot. After the last one it
    /// runs turn-end hooks and enters the next PlayerTurn.
    pub fn act_next_enemy(&mut self) -> Result<NextStep, CombatError> {
        self.ensure_phase(CombatState::EnemyTurn)?;
        if self.transition.in_flight {
            return Err(CombatError::TransitionInFlight);
        }

        // Enemies that died after the snapshot are skipped without pacing.
        while let Some(id) = self.enemy_queue.pop_front() {
            if !self.wave.enemy(id).is_some_and(|e| !e.is_defeated()) {
                continue;
            }
            self.act_enemy(id);
            if let Some(step) = self.settle() {
                return Ok(step);
            }
            if !self.enemy_queue.is_empty() {
                return Ok(NextStep::EnemyTurn {
                    pending: self.enemy_queue.len(),
                });
            }
            break;
        }

        Ok(self.finish_enemy_turn())
    }

    /// PlayerTurn entry actions, in order.
    pub(super) fn begin_player_turn(&mut self) -> NextStep {
        self.turn += 1;
        self.set_state(CombatState::PlayerTurn);
        self.emit(CombatEvent::TurnChanged { turn: self.turn });
        self.emit(CombatEvent::TurnTypeChanged {
            is_player_turn: true,
        });

        self.counters = TurnCounters::default();

        if let Some(reason) = self.player.status.crowd_control() {
            self.player_skip = Some(reason);
            self.emit(CombatEvent::PlayerTurnSkipped { reason });
            return NextStep::SkipPlayerTurn(reason);
        }

        self.advance_prepared_cards();

        self.player.decay_stagger(self.config.player_stagger_retention);
        let retention = self.config.enemy_stagger_retention;
        for enemy in self.wave.enemies_mut() {
            enemy.decay_stagger(retention);
        }

        if let Some(step) = self.reconcile_roster() {
            return step;
        }

        self.begin_boundary();
        self.advance_statuses();
        if let Some(step) = self.settle() {
            return step;
        }

        self.player.boosts.advance_one_turn();
        self.player.decay_guard(self.config.guard_retention);
        self.player.regenerate_energy(self.config.mana_regen);

        if let Some(step) = self.fire_player_delayed() {
            return step;
        }

        self.draw_cards(self.config.cards_per_turn as usize);
        NextStep::AwaitPlayerInput
    }

    fn begin_enemy_turn(&mut self) -> NextStep {
        self.set_state(CombatState::EnemyTurn);
        self.emit(CombatEvent::TurnTypeChanged {
            is_player_turn: false,
        });

        self.begin_boundary();
        self.advance_statuses();
        if let Some(step) = self.settle() {
            return step;
        }

        let guard_retention = self.config.enemy_guard_retention;
        let stagger_retention = self.config.enemy_stagger_retention;
        for enemy in self.wave.enemies_mut().filter(|e| !e.is_defeated()) {
            let regen = enemy.energy_regen();
            enemy.regenerate_energy(regen);
            enemy.decay_guard(guard_retention);
            enemy.decay_stagger(stagger_retention);
        }

        self.run_ability_hooks(AbilityTrigger::TurnStart);
        if let Some(step) = self.settle() {
            return step;
        }

        self.enemy_queue = self.wave.living_ids().into();
        if self.enemy_queue.is_empty() {
            return self.finish_enemy_turn();
        }
        NextStep::EnemyTurn {
            pending: self.enemy_queue.len(),
        }
    }

    fn finish_enemy_turn(&mut self) -> NextStep {
        self.run_ability_hooks(AbilityTrigger::TurnEnd);
        if let Some(step) = self.settle() {
            return step;
        }
        self.begin_player_turn()
    }

    /// One enemy's action phase: a crowd-controlled enemy only rerolls its
    /// intent. Otherwise ready delayed actions fire, then the declared intent,
    /// then the next intent roll.
    fn act_enemy(&mut self, id: CombatantId) {
        let Some(enemy) = self.wave.enemy(id) else {
            return;
        };
        if let Some(reason) = enemy.status.crowd_control() {
            self.emit(CombatEvent::EnemyTurnSkipped { enemy: id, reason });
            self.roll_intent(id);
            return;
        }

        let ready = match self.wave.enemy_mut(id) {
            Some(enemy) => enemy.delayed.tick(),
            None => return,
        };
        for action in ready {
            if let DelayedPayload::Ability(intent) = action.payload {
                self.execute_enemy_intent(id, &intent);
            }
        }
        if self.player.is_defeated() {
            return;
        }

        let Some(enemy) = self.wave.enemy(id) else {
            return;
        };

        if let Some(spec) = enemy.intent.clone() {
            let cost = spec.intent.energy_cost();
            let available = enemy.energy();
            let paid = self
                .wave
                .enemy_mut(id)
                .is_some_and(|e| e.drain_energy(cost));

            if !paid {
                self.emit(CombatEvent::EnemyEnergyShort {
                    enemy: id,
                    needed: cost,
                    available,
                });
            } else if spec.delay_turns > 0 {
                if let Some(enemy) = self.wave.enemy_mut(id) {
                    enemy.delayed.push(DelayedAction::new(
                        id,
                        DelayedPayload::Ability(spec.intent.clone()),
                        spec.delay_turns,
                    ));
                }
                self.emit(CombatEvent::EnemyActionDelayed {
                    enemy: id,
                    turns: spec.delay_turns,
                });
            } else {
                self.execute_enemy_intent(id, &spec.intent);
            }
        }

        self.roll_intent(id);
    }

    /// Executes an already-paid enemy intent.
    fn execute_enemy_intent(&mut self, id: CombatantId, intent: &EnemyIntent) {
        match intent {
            EnemyIntent::Attack { power, .. } => {
                let Some(enemy) = self.wave.enemy(id) else {
                    return;
                };
                if enemy.is_defeated() || self.player.is_defeated() {
                    return;
                }
                let base_damage = enemy
                    .kit
                    .as_ref()
                    .map_or(0, |kit| (kit.base_damage as f32 * power.max(0.0)).round() as u32);

                let outcome = AttackResolver::new(&self.config).resolve_enemy_attack(
                    enemy,
                    &mut self.player,
                    base_damage,
                    &mut self.dice,
                );
                if outcome.staggered {
                    self.emit(CombatEvent::StatusApplied {
                        target: CombatantId::PLAYER,
                        kind: StatusEffectKind::Stunned,
                    });
                }
                self.emit(CombatEvent::AttackResolved {
                    attacker: id,
                    defender: CombatantId::PLAYER,
                    outcome,
                });
            }
            EnemyIntent::Defend { .. } => {
                let percent = self.config.defend_guard_percent;
                if let Some(enemy) = self.wave.enemy_mut(id) {
                    let amount = (enemy.max_health() as f32 * percent).round() as u32;
                    let gained = enemy.add_guard(amount);
                    self.emit(CombatEvent::GuardGained {
                        target: id,
                        amount: gained,
                    });
                }
            }
            EnemyIntent::Ability { effect, .. } => self.apply_ability(id, effect),
        }
    }

    fn run_ability_hooks(&mut self, trigger: AbilityTrigger) {
        for id in self.wave.living_ids() {
            let effects: Vec<AbilityEffect> = self
                .wave
                .enemy(id)
                .and_then(|e| e.kit.as_ref())
                .map(|kit| {
                    kit.abilities
                        .iter()
                        .filter(|a| a.trigger == trigger)
                        .map(|a| a.effect.clone())
                        .collect()
                })
                .unwrap_or_default();

            for effect in &effects {
                if self.player.is_defeated() {
                    return;
                }
                self.apply_ability(id, effect);
            }
        }
    }

    fn apply_ability(&mut self, owner: CombatantId, effect: &AbilityEffect) {
        if self.wave.enemy(owner).is_none_or(|e| e.is_defeated()) {
            return;
        }

        match effect {
            AbilityEffect::Regenerate(amount) => {
                if let Some(enemy) = self.wave.enemy_mut(owner) {
                    let healed = enemy.heal(*amount);
                    self.emit(CombatEvent::Healed {
                        target: owner,
                        amount: healed,
                    });
                }
            }
            AbilityEffect::Fortify(amount) => {
                if let Some(enemy) = self.wave.enemy_mut(owner) {
                    let gained = enemy.add_guard(*amount);
                    self.emit(CombatEvent::GuardGained {
                        target: owner,
                        amount: gained,
                    });
                }
            }
            AbilityEffect::Curse(status) => {
                self.player.status.add(status.clone());
                self.emit(CombatEvent::StatusApplied {
                    target: CombatantId::PLAYER,
                    kind: status.kind,
                });
            }
            AbilityEffect::Retaliate { damage_per_card } => {
                let amount = damage_per_card.saturating_mul(self.cards_played_snapshot);
                if amount == 0 {
                    return;
                }
                let outcome = self.player.take_damage(amount, false);
                self.emit(CombatEvent::DirectDamage {
                    source: owner,
                    target: CombatantId::PLAYER,
                    amount,
                    health_lost: outcome.health_lost,
                });
            }
        }
    }

    /// Declares the enemy's next action from its weighted intent pool.
    pub(super) fn roll_intent(&mut self, id: CombatantId) {
        let Some(intents) = self
            .wave
            .enemy(id)
            .and_then(|e| e.kit.as_ref())
            .map(|kit| kit.intents.clone())
        else {
            return;
        };

        let pick = self
            .dice
            .weighted_index(id, RollContext::Intent, intents.iter().map(|s| s.weight));
        let spec = pick.and_then(|i| intents.get(i).cloned());

        if let Some(enemy) = self.wave.enemy_mut(id) {
            enemy.intent = spec.clone();
        }
        if let Some(intent) = spec {
            self.emit(CombatEvent::IntentDeclared { enemy: id, intent });
        }
    }

    fn begin_boundary(&mut self) {
        self.advanced_this_boundary.clear();
    }

    /// Ticks periodic effects and advances the status track of the player
    /// and every living enemy, at most once per combatant per boundary.
    fn advance_statuses(&mut self) {
        let mut ids = vec![CombatantId::PLAYER];
        ids.extend(self.wave.living_ids());

        for id in ids {
            if self.advanced_this_boundary.contains(&id) {
                continue;
            }
            self.advanced_this_boundary.push(id);
            self.tick_statuses(id);
        }
    }

    fn tick_statuses(&mut self, id: CombatantId) {
        let Some(combatant) = self.combatant_mut(id) else {
            return;
        };
        if combatant.is_defeated() {
            return;
        }

        let tick = combatant.status.periodic();
        let mut damage = 0;
        let mut healing = 0;
        if tick.damage > 0 {
            damage = combatant.take_damage(tick.damage, true).health_lost;
        }
        if tick.healing > 0 {
            healing = combatant.heal(tick.healing);
        }
        let expired = combatant.status.advance_one_turn();
        let died = combatant.is_defeated();

        if tick.damage > 0 || tick.healing > 0 {
            self.emit(CombatEvent::PeriodicTick {
                target: id,
                damage,
                healing,
            });
        }
        for effect in expired {
            self.emit(CombatEvent::StatusExpired {
                target: id,
                kind: effect.kind,
            });
        }
        if died && !id.is_player() {
            self.record_enemy_defeat(id);
        }
    }
}
