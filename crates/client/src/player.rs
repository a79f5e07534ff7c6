//! Automatic player used by the simulator.

use async_trait::async_trait;
use combat_core::{CardIntent, CardKind};
use combat_runtime::{CombatSnapshot, CombatantView, IntentProvider, PlayerIntent, Result};

/// Plays the most useful affordable card each time input is requested and
/// ends the turn when nothing is worth playing.
///
/// **Priorities:**
/// - Heal or guard when health drops below `defensive_threshold`
/// - Sweep when more than one enemy is alive
/// - Strike / Hex the living enemy with the lowest health percentage
/// - Buffs and prepared cards last
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    /// Health fraction below which defensive cards come first.
    pub defensive_threshold: f32,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self {
            defensive_threshold: 0.4,
        }
    }
}

impl AutoPlayer {
    /// Picks the intent for `snapshot` without awaiting anything.
    pub fn choose(&self, snapshot: &CombatSnapshot) -> PlayerIntent {
        let Some(target) = weakest_enemy(snapshot) else {
            return PlayerIntent::EndTurn;
        };
        let mana = snapshot.player_mana();
        let living = snapshot.living_enemies().count();
        let wounded = health_fraction(&snapshot.player) < self.defensive_threshold;

        let best = snapshot
            .hand
            .iter()
            .enumerate()
            .filter(|(_, card)| card.cost <= mana)
            .filter_map(|(index, card)| {
                priority(card, living, wounded, &snapshot.player).map(|p| (p, index, card))
            })
            // Highest priority, then the cheaper card, then hand order.
            .min_by_key(|(p, index, card)| (*p, card.cost, *index));

        match best {
            Some((_, index, card)) => PlayerIntent::PlayFromHand {
                index,
                target_slot: card.kind.needs_enemy_target().then_some(target.slot),
            },
            None => PlayerIntent::EndTurn,
        }
    }
}

#[async_trait]
impl IntentProvider for AutoPlayer {
    async fn next_intent(&self, snapshot: &CombatSnapshot) -> Result<PlayerIntent> {
        let intent = self.choose(snapshot);
        tracing::debug!(turn = snapshot.turn, ?intent, "auto player");
        Ok(intent)
    }
}

/// Lower is more urgent. `None` skips the card this turn.
fn priority(card: &CardIntent, living: usize, wounded: bool, player: &CombatantView) -> Option<u8> {
    match &card.kind {
        CardKind::Mend { .. } if player.health == player.max_health => None,
        CardKind::Mend { .. } | CardKind::Guard { .. } if wounded => Some(0),
        CardKind::Sweep { .. } if living > 1 => Some(1),
        CardKind::Strike { .. } => Some(2),
        CardKind::Sweep { .. } => Some(3),
        CardKind::Hex { .. } => Some(4),
        CardKind::Empower { .. } | CardKind::Prepare { .. } => Some(5),
        CardKind::Guard { .. } => Some(6),
        CardKind::Mend { .. } => Some(7),
    }
}

/// Living enemy with the lowest health percentage; ties go to the lower slot.
fn weakest_enemy(snapshot: &CombatSnapshot) -> Option<&CombatantView> {
    snapshot.living_enemies().min_by(|a, b| {
        health_fraction(a)
            .total_cmp(&health_fraction(b))
            .then(a.slot.cmp(&b.slot))
    })
}

fn health_fraction(view: &CombatantView) -> f32 {
    if view.max_health == 0 {
        return 0.0;
    }
    view.health as f32 / view.max_health as f32
}
