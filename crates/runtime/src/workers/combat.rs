//! Combat worker that owns the authoritative [`CombatEngine`].
//!
//! Receives player intents from [`crate::CombatHandle`], drives the engine
//! through its phases, and forwards drained events to the presenter, the
//! loot service and the event bus. All rule evaluation happens synchronously
//! inside the engine; the worker only decides when to make the next call.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use combat_core::{
    CardIntent, CombatEngine, CombatEvent, CombatOutcome, CombatantId, ErrorSeverity, NextStep,
};

use crate::api::{
    CombatReport, CombatSnapshot, InputGate, LootAndProgression, Presenter, Result, RuntimeError,
    presenter,
};
use crate::events::EventBus;
use crate::runtime::RuntimeConfig;

const TARGET: &str = "combat::runtime";

/// Commands that can be sent to the combat worker.
pub enum Command {
    /// Play the card at `index` in the hand.
    PlayFromHand {
        index: usize,
        target_slot: Option<usize>,
        reply: oneshot::Sender<Result<NextStep>>,
    },
    /// Play a card that does not come from the hand.
    PlayCard {
        card: CardIntent,
        target_slot: Option<usize>,
        reply: oneshot::Sender<Result<NextStep>>,
    },
    EndTurn {
        reply: oneshot::Sender<Result<NextStep>>,
    },
    SelectTarget {
        slot: usize,
        reply: oneshot::Sender<Result<CombatantId>>,
    },
    /// Query the current encounter (read-only).
    Snapshot {
        reply: oneshot::Sender<CombatSnapshot>,
    },
}

/// Background task that runs one encounter to completion.
pub struct CombatWorker<L: LootAndProgression> {
    engine: CombatEngine,
    config: RuntimeConfig,
    presenter: Arc<dyn Presenter>,
    loot: L,
    command_rx: mpsc::Receiver<Command>,
    input_tx: watch::Sender<InputGate>,
    event_bus: EventBus,
    rewards: Vec<L::Reward>,
    final_reward: Option<L::Reward>,
}

impl<L: LootAndProgression> CombatWorker<L> {
    pub fn new(
        engine: CombatEngine,
        config: RuntimeConfig,
        presenter: Arc<dyn Presenter>,
        loot: L,
        command_rx: mpsc::Receiver<Command>,
        input_tx: watch::Sender<InputGate>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            engine,
            config,
            presenter,
            loot,
            command_rx,
            input_tx,
            event_bus,
            rewards: Vec::new(),
            final_reward: None,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) -> Result<CombatReport<L::Reward>> {
        info!(
            target: TARGET,
            encounter = %self.engine.encounter().name,
            waves = self.engine.encounter().total_waves,
            "encounter starting"
        );

        let mut step = self.engine.start()?;
        self.flush().await;

        let outcome = loop {
            self.open_gate(step);
            step = match step {
                NextStep::AwaitPlayerInput => match self.command_rx.recv().await {
                    Some(cmd) => match self.handle_command(cmd) {
                        Some(next) => {
                            self.flush().await;
                            next
                        }
                        None => continue,
                    },
                    None => {
                        warn!(target: TARGET, turn = self.engine.turn(), "all handles dropped mid-encounter");
                        return Err(RuntimeError::Abandoned);
                    }
                },
                NextStep::SkipPlayerTurn(reason) => {
                    debug!(target: TARGET, %reason, "player turn skipped");
                    self.pause(self.config.skipped_turn_delay).await;
                    let next = self.engine.end_player_turn()?;
                    self.flush().await;
                    next
                }
                NextStep::EnemyTurn { pending } => {
                    debug!(target: TARGET, pending, "enemy action pending");
                    self.pause(self.config.enemy_action_delay).await;
                    let next = self.engine.act_next_enemy()?;
                    self.flush().await;
                    next
                }
                NextStep::WaveCleared => self.run_wave_transition().await?,
                NextStep::Finished(outcome) => break outcome,
            };
        };

        Ok(self.into_report(outcome))
    }

    /// Wave cleared → pacing delay → next roster → spawn animation → PlayerTurn.
    async fn run_wave_transition(&mut self) -> Result<NextStep> {
        info!(
            target: TARGET,
            wave = self.engine.wave().index,
            total = self.engine.encounter().total_waves,
            "wave cleared"
        );
        self.pause(self.config.wave_transition_delay).await;

        let spawned = self.engine.advance_wave()?;
        self.flush().await;

        if !spawned.is_empty() {
            let presenter = Arc::clone(&self.presenter);
            let animation = presenter.play_spawn(&spawned);
            if tokio::time::timeout(self.config.spawn_animation_timeout, animation)
                .await
                .is_err()
            {
                warn!(
                    target: TARGET,
                    wave = self.engine.wave().index,
                    "spawn animation timed out, resuming"
                );
            }
        }

        let next = self.engine.resume_after_wave()?;
        self.flush().await;
        Ok(next)
    }

    /// Handles one command. Returns the new step when the command advanced
    /// the player turn.
    fn handle_command(&mut self, cmd: Command) -> Option<NextStep> {
        match cmd {
            Command::PlayFromHand {
                index,
                target_slot,
                reply,
            } => {
                let result = self
                    .engine
                    .play_from_hand(index, target_slot)
                    .map_err(RuntimeError::from);
                self.reply_step(reply, result)
            }
            Command::PlayCard {
                card,
                target_slot,
                reply,
            } => {
                let result = self
                    .engine
                    .play_card(card, target_slot)
                    .map_err(RuntimeError::from);
                self.reply_step(reply, result)
            }
            Command::EndTurn { reply } => {
                let result = self.engine.end_player_turn().map_err(RuntimeError::from);
                self.reply_step(reply, result)
            }
            Command::SelectTarget { slot, reply } => {
                let result = self.engine.select_target(slot).map_err(RuntimeError::from);
                if let Err(err) = &result {
                    log_rejection(err);
                }
                if reply.send(result).is_err() {
                    debug!(target: TARGET, "SelectTarget reply channel closed (caller dropped)");
                }
                None
            }
            Command::Snapshot { reply } => {
                if reply.send(CombatSnapshot::capture(&self.engine)).is_err() {
                    debug!(target: TARGET, "Snapshot reply channel closed (caller dropped)");
                }
                None
            }
        }
    }

    /// Publishes whether the worker accepts player input at `step`.
    fn open_gate(&self, step: NextStep) {
        let gate = match step {
            NextStep::AwaitPlayerInput => InputGate::AwaitingInput,
            NextStep::Finished(_) => InputGate::Finished,
            _ => InputGate::Busy,
        };
        self.input_tx.send_replace(gate);
    }

    /// Replies to an intent. The gate is updated first so a caller that
    /// immediately waits for input never sees the stale state.
    fn reply_step(
        &self,
        reply: oneshot::Sender<Result<NextStep>>,
        result: Result<NextStep>,
    ) -> Option<NextStep> {
        let next = match &result {
            Ok(step) => {
                self.open_gate(*step);
                Some(*step)
            }
            Err(err) => {
                log_rejection(err);
                None
            }
        };
        if reply.send(result).is_err() {
            debug!(target: TARGET, "intent reply channel closed (caller dropped)");
        }
        next
    }

    /// Waits out a presentation delay. Queries and target selection are
    /// still served; card plays and end-turn requests are refused because
    /// the engine is between phases.
    async fn pause(&mut self, delay: Duration) {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => break,
                Some(cmd) = self.command_rx.recv() => self.handle_busy_command(cmd),
            }
        }
    }

    fn handle_busy_command(&mut self, cmd: Command) {
        let state = self.engine.state();
        match cmd {
            Command::PlayFromHand { reply, .. }
            | Command::PlayCard { reply, .. }
            | Command::EndTurn { reply } => {
                debug!(target: TARGET, %state, "intent refused during pacing delay");
                if reply
                    .send(Err(RuntimeError::NotAcceptingInput(state)))
                    .is_err()
                {
                    debug!(target: TARGET, "refusal reply channel closed (caller dropped)");
                }
            }
            cmd @ (Command::SelectTarget { .. } | Command::Snapshot { .. }) => {
                self.handle_command(cmd);
            }
        }
    }

    /// Drains the engine outbox until it is empty. Defeats trigger rewards
    /// and a bounded despawn wait; the removal that follows may emit more
    /// events, which are drained in the same call.
    async fn flush(&mut self) {
        loop {
            let events = self.engine.drain_events();
            if events.is_empty() {
                break;
            }

            let mut despawns = Vec::new();
            for event in events {
                self.log_event(&event);
                presenter::dispatch(self.presenter.as_ref(), &event);

                match &event {
                    CombatEvent::EnemyDefeated(enemy) => {
                        self.grant_enemy_reward(enemy.id);
                        despawns.push(enemy.id);
                    }
                    CombatEvent::CombatEnded { outcome } => self.grant_final_reward(*outcome),
                    _ => {}
                }
                self.event_bus.publish(event);
            }

            for id in despawns {
                self.despawn(id).await;
            }
        }
    }

    async fn despawn(&mut self, id: CombatantId) {
        let presenter = Arc::clone(&self.presenter);
        let animation = presenter.play_despawn(id);
        if tokio::time::timeout(self.config.despawn_timeout, animation)
            .await
            .is_err()
        {
            warn!(target: TARGET, enemy = %id, "despawn animation stalled, forcing removal");
        }
        // Already gone when a reconciliation pass or a wave advance beat us.
        self.engine.complete_despawn(id);
    }

    fn grant_enemy_reward(&mut self, id: CombatantId) {
        let defeated = self.engine.defeated();
        let Some(enemy) = defeated.iter().rev().find(|e| e.id == id) else {
            error!(target: TARGET, enemy = %id, "defeat event without a defeat record");
            return;
        };
        let template = enemy
            .template
            .as_deref()
            .and_then(|key| self.engine.catalog().template(key));

        if let Some(reward) = self.loot.on_enemy_defeated(template.as_ref(), enemy, defeated) {
            self.rewards.push(reward);
        }
    }

    fn grant_final_reward(&mut self, outcome: CombatOutcome) {
        self.final_reward = self.loot.on_combat_ended(outcome, self.engine.defeated());
    }

    fn log_event(&self, event: &CombatEvent) {
        match event {
            CombatEvent::StateChanged { state } => debug!(target: TARGET, %state, "state changed"),
            CombatEvent::TurnChanged { turn } => debug!(target: TARGET, turn, "turn changed"),
            CombatEvent::WaveChanged { current, total } => {
                info!(target: TARGET, current, total, "wave started")
            }
            CombatEvent::EnemyDefeated(enemy) => info!(
                target: TARGET,
                enemy = %enemy.id,
                name = %enemy.name,
                wave = enemy.wave,
                turn = enemy.turn,
                "enemy defeated"
            ),
            CombatEvent::EnemyRemoved { enemy, forced: true } => {
                warn!(target: TARGET, enemy = %enemy, "reconciliation removed a defeated enemy")
            }
            CombatEvent::CombatEnded { outcome } => info!(
                target: TARGET,
                %outcome,
                turns = self.engine.turn(),
                "combat ended"
            ),
            _ => {}
        }
    }

    fn into_report(self, outcome: CombatOutcome) -> CombatReport<L::Reward> {
        CombatReport {
            outcome,
            turns: self.engine.turn(),
            waves_cleared: self.engine.waves_cleared(),
            player_health: self.engine.player().health(),
            defeated: self.engine.defeated().to_vec(),
            rewards: self.rewards,
            final_reward: self.final_reward,
        }
    }
}

fn log_rejection(err: &RuntimeError) {
    match err.severity() {
        ErrorSeverity::Recoverable | ErrorSeverity::Validation => {
            debug!(target: TARGET, error = %err, "player intent rejected")
        }
        ErrorSeverity::Internal | ErrorSeverity::Fatal => {
            warn!(target: TARGET, error = %err, "player intent failed")
        }
    }
}
