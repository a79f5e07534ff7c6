//! Cloneable façade for issuing player intents to the combat worker.
//!
//! [`CombatHandle`] hides channel plumbing and offers async helpers for the
//! three player intents (play a card, end the turn, select a target), read-only
//! snapshots, and event subscriptions.
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use combat_core::{CardIntent, CombatEvent, CombatantId, NextStep};

use super::errors::{Result, RuntimeError};
use super::providers::PlayerIntent;
use super::snapshot::CombatSnapshot;
use crate::events::{EventBus, EventKind, FilteredReceiver};
use crate::workers::Command;

/// Whether the worker is waiting for a player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputGate {
    /// The engine is resolving a phase; intents are refused.
    Busy,
    AwaitingInput,
    Finished,
}

/// Client-facing handle to interact with a running encounter.
#[derive(Clone)]
pub struct CombatHandle {
    command_tx: mpsc::Sender<Command>,
    input_rx: watch::Receiver<InputGate>,
    event_bus: EventBus,
}

impl CombatHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        input_rx: watch::Receiver<InputGate>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            command_tx,
            input_rx,
            event_bus,
        }
    }

    /// Waits until the encounter accepts player input and returns a snapshot
    /// of it, or `None` once the encounter is over.
    pub async fn wait_for_input(&self) -> Result<Option<CombatSnapshot>> {
        let mut input_rx = self.input_rx.clone();
        let gate = *input_rx
            .wait_for(|gate| *gate != InputGate::Busy)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        match gate {
            InputGate::Finished => Ok(None),
            _ => self.snapshot().await.map(Some),
        }
    }

    /// Submits one player intent.
    pub async fn submit(&self, intent: PlayerIntent) -> Result<()> {
        match intent {
            PlayerIntent::PlayFromHand { index, target_slot } => {
                self.play_from_hand(index, target_slot).await?;
            }
            PlayerIntent::PlayCard { card, target_slot } => {
                self.play_card(card, target_slot).await?;
            }
            PlayerIntent::SelectTarget(slot) => {
                self.select_target(slot).await?;
            }
            PlayerIntent::EndTurn => {
                self.end_turn().await?;
            }
        }
        Ok(())
    }

    /// Play the card at `index` in the hand against the enemy in
    /// `target_slot` (or the selected / first living enemy).
    pub async fn play_from_hand(&self, index: usize, target_slot: Option<usize>) -> Result<NextStep> {
        self.request(|reply| Command::PlayFromHand {
            index,
            target_slot,
            reply,
        })
        .await?
    }

    /// Play a card supplied by the caller instead of the hand.
    pub async fn play_card(&self, card: CardIntent, target_slot: Option<usize>) -> Result<NextStep> {
        self.request(|reply| Command::PlayCard {
            card,
            target_slot,
            reply,
        })
        .await?
    }

    /// End the current player turn.
    pub async fn end_turn(&self) -> Result<NextStep> {
        self.request(|reply| Command::EndTurn { reply }).await?
    }

    /// Select the default target for later cards.
    pub async fn select_target(&self, slot: usize) -> Result<CombatantId> {
        self.request(|reply| Command::SelectTarget { slot, reply })
            .await?
    }

    /// Query the current encounter (read-only snapshot).
    pub async fn snapshot(&self) -> Result<CombatSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to every engine event.
    pub fn subscribe(&self) -> broadcast::Receiver<CombatEvent> {
        self.event_bus.subscribe()
    }

    /// Subscribe to events of the given kinds only.
    pub fn subscribe_filtered(&self, kinds: &[EventKind]) -> FilteredReceiver {
        self.event_bus.subscribe_filtered(kinds)
    }

    /// Whether the worker is still accepting commands.
    pub fn is_running(&self) -> bool {
        !self.command_tx.is_closed()
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
