//! Asynchronous abstraction for sourcing player intents.
//!
//! Runtime users plug in [`IntentProvider`] implementations so an encounter
//! can run with human input, scripted fixtures, or an automated policy.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use combat_core::CardIntent;

use super::errors::Result;
use super::snapshot::CombatSnapshot;

/// One player input. These are the only inputs that advance a player turn.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerIntent {
    PlayFromHand {
        index: usize,
        target_slot: Option<usize>,
    },
    PlayCard {
        card: CardIntent,
        target_slot: Option<usize>,
    },
    SelectTarget(usize),
    EndTurn,
}

/// Trait for choosing the next player intent from the current snapshot.
#[async_trait]
pub trait IntentProvider: Send + Sync {
    /// Called whenever the encounter is waiting for player input.
    async fn next_intent(&self, snapshot: &CombatSnapshot) -> Result<PlayerIntent>;
}

/// Replays a fixed list of intents, then ends every turn.
#[derive(Default)]
pub struct ScriptedIntents {
    script: Mutex<VecDeque<PlayerIntent>>,
}

impl ScriptedIntents {
    pub fn new(intents: impl IntoIterator<Item = PlayerIntent>) -> Self {
        Self {
            script: Mutex::new(intents.into_iter().collect()),
        }
    }
}

#[async_trait]
impl IntentProvider for ScriptedIntents {
    async fn next_intent(&self, _snapshot: &CombatSnapshot) -> Result<PlayerIntent> {
        let next = match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        Ok(next.unwrap_or(PlayerIntent::EndTurn))
    }
}

/// Ends every turn without playing.
pub struct PassiveIntents;

#[async_trait]
impl IntentProvider for PassiveIntents {
    async fn next_intent(&self, _snapshot: &CombatSnapshot) -> Result<PlayerIntent> {
        Ok(PlayerIntent::EndTurn)
    }
}
