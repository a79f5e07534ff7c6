//! Player intents: card plays, target selection, delayed and prepared cards.

use crate::action::{CardIntent, CardKind};
use crate::combat::{AttackRequest, AttackResolver};
use crate::state::{BoostStat, CombatantId, DelayedAction, DelayedPayload, StatusEffectKind};

use super::{CombatEngine, CombatError, CombatEvent, CombatState, NextStep, PreparedCard};

impl CombatEngine {
    /// Selects the enemy in `slot` as the default target for later cards.
    pub fn select_target(&mut self, slot: usize) -> Result<CombatantId, CombatError> {
        self.ensure_running()?;
        let id = self
            .wave
            .target_at(slot)
            .ok_or(CombatError::InvalidTarget(slot))?;
        self.target = Some(id);
        Ok(id)
    }

    /// Plays the card at `index` in the hand. The card leaves the hand only
    /// if the play is accepted.
    pub fn play_from_hand(
        &mut self,
        index: usize,
        target_slot: Option<usize>,
    ) -> Result<NextStep, CombatError> {
        let card = self
            .hand
            .get(index)
            .cloned()
            .ok_or(CombatError::CardNotInHand(index))?;
        let step = self.play_card(card, target_slot)?;
        if index < self.hand.len() {
            self.hand.remove(index);
        }
        Ok(step)
    }

    /// Plays `card` against the enemy in `target_slot`, or the selected /
    /// first living enemy when no slot is given.
    ///
    /// Mana is paid here even when the card is delayed.
    pub fn play_card(
        &mut self,
        card: CardIntent,
        target_slot: Option<usize>,
    ) -> Result<NextStep, CombatError> {
        self.ensure_phase(CombatState::PlayerTurn)?;
        if self.transition.in_flight {
            return Err(CombatError::TransitionInFlight);
        }
        if let Some(reason) = self.player_skip.or(self.player.status.crowd_control()) {
            return Err(CombatError::PlayerIncapacitated(reason));
        }

        let target = self.resolve_target(&card, target_slot)?;

        if !self.player.drain_energy(card.cost) {
            return Err(CombatError::InsufficientMana {
                needed: card.cost,
                available: self.player.energy(),
            });
        }
        self.counters.cards_played += 1;
        self.counters.mana_spent += card.cost;

        let delayed = card.delay_turns > 0;
        self.emit(CombatEvent::CardPlayed {
            name: card.name.clone(),
            target,
            delayed,
        });

        if delayed {
            let turns = card.delay_turns;
            self.player.delayed.push(DelayedAction::new(
                CombatantId::PLAYER,
                DelayedPayload::Card { card, target },
                turns,
            ));
            return Ok(NextStep::AwaitPlayerInput);
        }

        Ok(self
            .resolve_card(&card, target)
            .unwrap_or(NextStep::AwaitPlayerInput))
    }

    fn resolve_target(
        &self,
        card: &CardIntent,
        target_slot: Option<usize>,
    ) -> Result<Option<CombatantId>, CombatError> {
        if let Some(slot) = target_slot {
            return self
                .wave
                .target_at(slot)
                .map(Some)
                .ok_or(CombatError::InvalidTarget(slot));
        }
        if !card.kind.needs_enemy_target() {
            return Ok(None);
        }
        self.target()
            .or_else(|| self.wave.living_ids().first().copied())
            .map(Some)
            .ok_or(CombatError::NoTarget)
    }

    /// Applies a card's effect. Returns a step only if the card ended the
    /// wave or the encounter.
    fn resolve_card(&mut self, card: &CardIntent, target: Option<CombatantId>) -> Option<NextStep> {
        let bonus = self.player.boosts.total(BoostStat::Damage).max(0.0).round() as u32;

        match &card.kind {
            CardKind::Strike { damage } => {
                let id = target?;
                self.player_hit(card, id, damage + bonus);
                self.settle()
            }
            CardKind::Sweep { damage } => {
                let base = damage + bonus;
                self.with_area_attack(|engine| {
                    for id in engine.wave.living_ids() {
                        engine.player_hit(card, id, base);
                        engine.settle();
                    }
                })
            }
            CardKind::Guard { amount } => {
                let gained = self.player.add_guard(*amount);
                self.emit(CombatEvent::GuardGained {
                    target: CombatantId::PLAYER,
                    amount: gained,
                });
                None
            }
            CardKind::Mend { amount } => {
                let healed = self.player.heal(*amount);
                self.emit(CombatEvent::Healed {
                    target: CombatantId::PLAYER,
                    amount: healed,
                });
                None
            }
            CardKind::Hex { effect } => {
                let id = target?;
                let enemy = self.wave.enemy_mut(id).filter(|e| !e.is_defeated())?;
                let mut effect = effect.clone();
                // Enemy tracks advance before the enemy acts.
                if effect.kind.is_crowd_control() {
                    effect.remaining_turns += 1;
                }
                let kind = effect.kind;
                enemy.status.add(effect);
                self.emit(CombatEvent::StatusApplied { target: id, kind });
                None
            }
            CardKind::Empower { boost } => {
                self.player.boosts.add(boost.clone());
                None
            }
            CardKind::Prepare { card, charge_turns } => {
                self.prepared.push(PreparedCard {
                    card: card.as_ref().clone(),
                    turns_remaining: *charge_turns,
                });
                None
            }
        }
    }

    /// One player hit against a living enemy, with defeat reporting.
    fn player_hit(&mut self, card: &CardIntent, id: CombatantId, base_damage: u32) {
        let request = AttackRequest::new(base_damage)
            .ignoring_guard(card.ignore_guard)
            .always_crit(card.always_crit)
            .with_modifiers(self.loadout.modifiers_for(card, &self.player.boosts));

        let Some(defender) = self.wave.enemy_mut(id) else {
            return;
        };
        if defender.is_defeated() {
            return;
        }
        let outcome = AttackResolver::new(&self.config).resolve_player_attack(
            &self.player,
            defender,
            &request,
            &mut self.dice,
        );

        if outcome.staggered {
            self.emit(CombatEvent::StatusApplied {
                target: id,
                kind: StatusEffectKind::Stunned,
            });
        }
        self.emit(CombatEvent::AttackResolved {
            attacker: CombatantId::PLAYER,
            defender: id,
            outcome,
        });
        if outcome.newly_defeated {
            self.announce_enemy_defeat(id);
        }
    }

    /// Fires the player's delayed cards that are ready this turn. A delayed
    /// card whose target died retargets the first living enemy.
    pub(super) fn fire_player_delayed(&mut self) -> Option<NextStep> {
        for action in self.player.delayed.tick() {
            let DelayedPayload::Card { card, target } = action.payload else {
                continue;
            };

            let target = if card.kind.needs_enemy_target() {
                let alive = target.filter(|id| self.wave.enemy(*id).is_some_and(|e| !e.is_defeated()));
                match alive.or_else(|| self.wave.living_ids().first().copied()) {
                    Some(id) => Some(id),
                    None => {
                        self.emit(CombatEvent::CardFizzled { name: card.name });
                        continue;
                    }
                }
            } else {
                target
            };

            if let Some(step) = self.resolve_card(&card, target) {
                return Some(step);
            }
        }
        None
    }

    /// Counts prepared cards down; ready ones enter the hand while it has room.
    pub(super) fn advance_prepared_cards(&mut self) {
        for prepared in &mut self.prepared {
            prepared.turns_remaining = prepared.turns_remaining.saturating_sub(1);
        }

        let mut waiting = Vec::with_capacity(self.prepared.len());
        for prepared in std::mem::take(&mut self.prepared) {
            if prepared.turns_remaining == 0 && !self.hand.is_full() {
                let name = prepared.card.name.clone();
                self.hand.push(prepared.card);
                self.emit(CombatEvent::CardReady { name });
            } else {
                waiting.push(prepared);
            }
        }
        self.prepared = waiting;
    }
}
