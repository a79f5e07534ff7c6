//! N-turn delayed actions.
//!
//! The queue is a pure scheduler: [`DelayedActionQueue::tick`] hands ready
//! entries back to the caller, which executes them in the same turn.

use crate::action::{CardIntent, EnemyIntent};
use crate::state::CombatantId;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DelayedPayload {
    /// A player card, already paid for. `target` is re-validated on fire.
    Card {
        card: CardIntent,
        target: Option<CombatantId>,
    },
    /// An enemy intent, already paid for.
    Ability(EnemyIntent),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedAction {
    pub payload: DelayedPayload,
    pub turns_remaining: u32,
    pub owner: CombatantId,
}

impl DelayedAction {
    pub fn new(owner: CombatantId, payload: DelayedPayload, turns_remaining: u32) -> Self {
        Self {
            payload,
            turns_remaining,
            owner,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedActionQueue {
    entries: Vec<DelayedAction>,
}

impl DelayedActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: DelayedAction) {
        self.entries.push(action);
    }

    /// Decrements every entry and returns those that reached 0, in queue order.
    pub fn tick(&mut self) -> Vec<DelayedAction> {
        for entry in &mut self.entries {
            entry.turns_remaining = entry.turns_remaining.saturating_sub(1);
        }

        let (ready, waiting): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|e| e.turns_remaining == 0);
        self.entries = waiting;
        ready
    }

    pub fn iter(&self) -> impl Iterator<Item = &DelayedAction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::EnemyIntent;

    fn defend(turns: u32) -> DelayedAction {
        DelayedAction::new(
            CombatantId(3),
            DelayedPayload::Ability(EnemyIntent::Defend { energy_cost: 0 }),
            turns,
        )
    }

    #[test]
    fn tick_returns_only_ready_entries() {
        let mut queue = DelayedActionQueue::new();
        queue.push(defend(1));
        queue.push(defend(2));
        queue.push(defend(2));

        assert_eq!(queue.tick().len(), 1);
        assert_eq!(queue.len(), 2);

        let ready = queue.tick();
        assert_eq!(ready.len(), 2);
        assert!(queue.is_empty());
        assert!(queue.tick().is_empty());
    }

    #[test]
    fn card_payload_keeps_its_target() {
        let mut queue = DelayedActionQueue::new();
        queue.push(DelayedAction::new(
            CombatantId::PLAYER,
            DelayedPayload::Card {
                card: CardIntent::strike("Slash", 1, 6),
                target: Some(CombatantId(2)),
            },
            1,
        ));

        let ready = queue.tick();
        assert!(matches!(
            &ready[0].payload,
            DelayedPayload::Card { target: Some(CombatantId(2)), .. }
        ));
    }
}
