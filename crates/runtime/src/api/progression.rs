//! Loot and progression collaborator.
use combat_core::{CombatOutcome, DefeatedEnemy, EnemyTemplate};

/// Computes rewards for defeated enemies and for the encounter as a whole.
///
/// Rewards are opaque to the runtime: they are collected in the order they
/// are returned and handed back unchanged in [`crate::CombatReport`].
pub trait LootAndProgression: Send + 'static {
    type Reward: Send + 'static;

    /// Called exactly once per defeated enemy. `defeated` is the running list
    /// of defeats in this encounter, ending with `enemy`. `template` is `None`
    /// when the enemy was not spawned from a catalog entry.
    fn on_enemy_defeated(
        &mut self,
        template: Option<&EnemyTemplate>,
        enemy: &DefeatedEnemy,
        defeated: &[DefeatedEnemy],
    ) -> Option<Self::Reward>;

    /// Called once when the encounter reaches Victory or Defeat.
    fn on_combat_ended(
        &mut self,
        outcome: CombatOutcome,
        defeated: &[DefeatedEnemy],
    ) -> Option<Self::Reward>;
}

/// Progression service that grants nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRewards;

impl LootAndProgression for NoRewards {
    type Reward = ();

    fn on_enemy_defeated(
        &mut self,
        _template: Option<&EnemyTemplate>,
        _enemy: &DefeatedEnemy,
        _defeated: &[DefeatedEnemy],
    ) -> Option<()> {
        None
    }

    fn on_combat_ended(&mut self, _outcome: CombatOutcome, _defeated: &[DefeatedEnemy]) -> Option<()> {
        None
    }
}
