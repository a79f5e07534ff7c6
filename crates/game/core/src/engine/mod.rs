//! Encounter state machine.
//!
//! [`CombatEngine`] owns the combat state, the active wave, the player and the
//! hand. It is fully synchronous: every call mutates state to completion and
//! returns a [`NextStep`] telling the driver what to wait for next (player
//! input, a pacing delay before the next enemy acts, a wave transition, or the
//! end of combat). Pacing, animation waits and despawn timeouts belong to the
//! driver; none of them affect what the engine computes.
//!
//! ```text
//! Setup ─start()─► PlayerTurn ─end_player_turn()─► EnemyTurn ─act_next_enemy()*─┐
//!                      ▲                                                        │
//!                      └────────────────────────────────────────────────────────┘
//! any phase ─wave cleared─► advance_wave() / resume_after_wave() ─► PlayerTurn
//! any phase ─last wave cleared─► Victory      player at 0 health ─► Defeat
//! ```

mod cards;
mod errors;
mod events;
mod transition;
mod turns;

pub use errors::CombatError;
pub use events::{CombatEvent, DefeatedEnemy};

use std::collections::VecDeque;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::action::CardIntent;
use crate::combat::PlayerLoadout;
use crate::config::CombatConfig;
use crate::env::{CardSource, ContentCatalog, Dice, EncounterDefinition};
use crate::spawn::WaveSpawner;
use crate::state::{Combatant, CombatantId, StatusEffectKind, Wave};

/// Encounter phase. Victory and Defeat are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatState {
    Setup,
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

impl CombatState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// What the driver should do after an engine call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextStep {
    /// PlayerTurn is open; wait for a player intent.
    AwaitPlayerInput,
    /// The player is under crowd control. Wait the skip delay, then call
    /// [`CombatEngine::end_player_turn`].
    SkipPlayerTurn(StatusEffectKind),
    /// EnemyTurn is running; wait the pacing delay, then call
    /// [`CombatEngine::act_next_enemy`]. `pending` counts the enemies left in
    /// the turn-start snapshot.
    EnemyTurn { pending: usize },
    /// The wave is cleared; call [`CombatEngine::advance_wave`] and then
    /// [`CombatEngine::resume_after_wave`].
    WaveCleared,
    Finished(CombatOutcome),
}

/// A card charging towards the hand.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreparedCard {
    pub card: CardIntent,
    pub turns_remaining: u32,
}

/// Counters reset at every PlayerTurn entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnCounters {
    pub cards_played: u32,
    pub mana_spent: u32,
}

/// Single-flight wave transition guard.
#[derive(Clone, Copy, Debug, Default)]
struct TransitionGuard {
    in_flight: bool,
    /// Nesting depth of area attacks currently resolving.
    area_depth: u32,
    /// A completion check was requested while an area attack was resolving.
    deferred: bool,
}

pub struct CombatEngine {
    config: CombatConfig,
    encounter: EncounterDefinition,
    catalog: Arc<dyn ContentCatalog>,
    cards: Box<dyn CardSource>,
    spawner: WaveSpawner,
    dice: Dice,
    loadout: PlayerLoadout,

    state: CombatState,
    turn: u32,
    player: Combatant,
    wave: Wave,
    hand: ArrayVec<CardIntent, { CombatConfig::MAX_HAND_SIZE }>,
    prepared: Vec<PreparedCard>,
    target: Option<CombatantId>,
    counters: TurnCounters,
    cards_played_snapshot: u32,
    /// Set while a crowd-controlled player turn is waiting to auto-end.
    player_skip: Option<StatusEffectKind>,
    /// Turn-start roster snapshot for the running enemy turn.
    enemy_queue: VecDeque<CombatantId>,
    /// Combatants whose status track already advanced this boundary.
    advanced_this_boundary: Vec<CombatantId>,
    transition: TransitionGuard,
    defeated: Vec<DefeatedEnemy>,
    waves_cleared: u32,
    events: Vec<CombatEvent>,
}

impl CombatEngine {
    pub fn new(
        config: CombatConfig,
        encounter: EncounterDefinition,
        catalog: Arc<dyn ContentCatalog>,
        cards: Box<dyn CardSource>,
        player: Combatant,
        dice: Dice,
    ) -> Self {
        let spawner = WaveSpawner::from_config(&config);
        let player = player.with_guard_cap_ratio(config.guard_cap_ratio);
        let total_waves = encounter.total_waves;

        Self {
            config,
            encounter,
            catalog,
            cards,
            spawner,
            dice,
            loadout: PlayerLoadout::default(),
            state: CombatState::Setup,
            turn: 0,
            player,
            wave: Wave::new(0, total_waves, Vec::new(), None),
            hand: ArrayVec::new(),
            prepared: Vec::new(),
            target: None,
            counters: TurnCounters::default(),
            cards_played_snapshot: 0,
            player_skip: None,
            enemy_queue: VecDeque::new(),
            advanced_this_boundary: Vec::new(),
            transition: TransitionGuard::default(),
            defeated: Vec::new(),
            waves_cleared: 0,
            events: Vec::new(),
        }
    }

    pub fn with_loadout(mut self, loadout: PlayerLoadout) -> Self {
        self.loadout = loadout;
        self
    }

    /// Setup → PlayerTurn: spawns wave 1, deals the opening hand, declares
    /// enemy intents and enters the first player turn.
    pub fn start(&mut self) -> Result<NextStep, CombatError> {
        if self.state != CombatState::Setup {
            return Err(CombatError::AlreadyStarted);
        }

        self.spawn_wave(1);
        self.draw_cards(self.config.cards_per_wave as usize);

        if let Some(step) = self.check_wave_completion() {
            return Ok(step);
        }
        Ok(self.begin_player_turn())
    }

    // ===== accessors =====

    pub fn state(&self) -> CombatState {
        self.state
    }

    /// 1-based number of the current player turn (0 before start).
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn encounter(&self) -> &EncounterDefinition {
        &self.encounter
    }

    pub fn catalog(&self) -> Arc<dyn ContentCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn wave(&self) -> &Wave {
        &self.wave
    }

    pub fn hand(&self) -> &[CardIntent] {
        &self.hand
    }

    pub fn prepared(&self) -> &[PreparedCard] {
        &self.prepared
    }

    /// Currently selected enemy, if it is still alive.
    pub fn target(&self) -> Option<CombatantId> {
        self.target
            .filter(|id| self.wave.enemy(*id).is_some_and(|e| !e.is_defeated()))
    }

    pub fn counters(&self) -> TurnCounters {
        self.counters
    }

    /// Cards played during the last completed player turn, as seen by enemy
    /// abilities.
    pub fn cards_played_snapshot(&self) -> u32 {
        self.cards_played_snapshot
    }

    /// Running list of defeated enemies, in defeat order.
    pub fn defeated(&self) -> &[DefeatedEnemy] {
        &self.defeated
    }

    pub fn waves_cleared(&self) -> u32 {
        self.waves_cleared
    }

    pub fn is_transition_in_flight(&self) -> bool {
        self.transition.in_flight
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.state {
            CombatState::Victory => Some(CombatOutcome::Victory),
            CombatState::Defeat => Some(CombatOutcome::Defeat),
            _ => None,
        }
    }

    /// Takes every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== shared helpers =====

    fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    fn set_state(&mut self, state: CombatState) {
        if self.state != state {
            self.state = state;
            self.emit(CombatEvent::StateChanged { state });
        }
    }

    fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        if id.is_player() {
            Some(&mut self.player)
        } else {
            self.wave.enemy_mut(id)
        }
    }

    /// Rejects calls once the encounter is over or before it started.
    fn ensure_running(&self) -> Result<(), CombatError> {
        match self.state {
            CombatState::Setup => Err(CombatError::NotStarted),
            CombatState::Victory => Err(CombatError::CombatOver(CombatOutcome::Victory)),
            CombatState::Defeat => Err(CombatError::CombatOver(CombatOutcome::Defeat)),
            CombatState::PlayerTurn | CombatState::EnemyTurn => Ok(()),
        }
    }

    fn ensure_phase(&self, expected: CombatState) -> Result<(), CombatError> {
        self.ensure_running()?;
        if self.state != expected {
            return Err(CombatError::WrongPhase {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    /// Draws into the hand; cards beyond the hand limit are discarded.
    fn draw_cards(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let mut accepted = 0;
        for card in self.cards.draw(count) {
            if self.hand.try_push(card).is_ok() {
                accepted += 1;
            }
        }
        self.emit(CombatEvent::CardsDrawn { count: accepted });
    }
}

#[cfg(test)]
mod tests;
