//! Read-only views of the encounter for clients and input providers.
use serde::Serialize;

use combat_core::{
    CardIntent, CombatEngine, CombatOutcome, CombatState, Combatant, CombatantId, DefeatedEnemy,
    IntentSpec, Rarity, StatusEffect,
};

/// Display-ready copy of one combatant.
#[derive(Clone, Debug, Serialize)]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub slot: usize,
    pub rarity: Rarity,
    pub health: u32,
    pub max_health: u32,
    pub guard: u32,
    pub energy: u32,
    pub stagger: f32,
    pub stagger_threshold: f32,
    pub statuses: Vec<StatusEffect>,
    pub intent: Option<IntentSpec>,
    pub defeated: bool,
}

impl From<&Combatant> for CombatantView {
    fn from(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id,
            name: combatant.display_name(),
            slot: combatant.slot,
            rarity: combatant.rarity,
            health: combatant.health(),
            max_health: combatant.max_health(),
            guard: combatant.guard(),
            energy: combatant.energy(),
            stagger: combatant.stagger(),
            stagger_threshold: combatant.stagger_threshold(),
            statuses: combatant.status.iter().cloned().collect(),
            intent: combatant.intent.clone(),
            defeated: combatant.is_defeated(),
        }
    }
}

/// Snapshot of the encounter between two engine calls.
#[derive(Clone, Debug, Serialize)]
pub struct CombatSnapshot {
    pub state: CombatState,
    pub turn: u32,
    pub wave: u32,
    pub total_waves: u32,
    pub player: CombatantView,
    /// Every enemy still on the roster, in slot order, including defeated
    /// ones whose despawn has not completed.
    pub enemies: Vec<CombatantView>,
    pub hand: Vec<CardIntent>,
    pub target: Option<CombatantId>,
    pub transition_in_flight: bool,
}

impl CombatSnapshot {
    pub fn capture(engine: &CombatEngine) -> Self {
        let wave = engine.wave();
        Self {
            state: engine.state(),
            turn: engine.turn(),
            wave: wave.index,
            total_waves: wave.total_waves,
            player: engine.player().into(),
            enemies: wave.enemies().map(CombatantView::from).collect(),
            hand: engine.hand().to_vec(),
            target: engine.target(),
            transition_in_flight: engine.is_transition_in_flight(),
        }
    }

    /// Living enemies, in slot order.
    pub fn living_enemies(&self) -> impl Iterator<Item = &CombatantView> {
        self.enemies.iter().filter(|e| !e.defeated)
    }

    pub fn player_mana(&self) -> u32 {
        self.player.energy
    }
}

/// Final result of an encounter, returned when the worker finishes.
#[derive(Clone, Debug, Serialize)]
pub struct CombatReport<R> {
    pub outcome: CombatOutcome,
    pub turns: u32,
    pub waves_cleared: u32,
    pub player_health: u32,
    pub defeated: Vec<DefeatedEnemy>,
    /// Rewards returned per defeated enemy, in defeat order.
    pub rewards: Vec<R>,
    pub final_reward: Option<R>,
}
