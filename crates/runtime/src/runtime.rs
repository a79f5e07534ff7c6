//! High-level runtime orchestrator.
//!
//! The runtime owns the combat worker, wires up command/event channels, and
//! exposes a builder-based API for clients to run one encounter.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use combat_core::{
    CardSource, CombatConfig, CombatEngine, Combatant, ContentCatalog, Dice, EncounterDefinition,
    ErrorSeverity, PlayerLoadout,
};

use crate::api::{
    CombatHandle, CombatReport, InputGate, IntentProvider, LootAndProgression, NoRewards,
    NullPresenter, PlayerIntent, Presenter, Result, RuntimeError,
};
use crate::events::EventBus;
use crate::workers::{Command, CombatWorker};

/// Pacing and channel configuration for the runtime.
///
/// The delays are presentation-only: they decide when the worker makes its
/// next engine call, never what the engine computes.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Delay before a crowd-controlled player turn auto-ends.
    pub skipped_turn_delay: Duration,
    /// Delay before each enemy action.
    pub enemy_action_delay: Duration,
    /// Delay between a wave clear and the next roster.
    pub wave_transition_delay: Duration,
    /// Upper bound on waiting for a spawn animation.
    pub spawn_animation_timeout: Duration,
    /// Upper bound on waiting for a death-out animation before the removal is
    /// forced.
    pub despawn_timeout: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            skipped_turn_delay: Duration::from_millis(1000),
            enemy_action_delay: Duration::from_millis(600),
            wave_transition_delay: Duration::from_millis(1500),
            spawn_animation_timeout: Duration::from_millis(3000),
            despawn_timeout: Duration::from_millis(2000),
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    /// Configuration with every delay set to zero, for headless runs.
    pub fn instant() -> Self {
        Self {
            skipped_turn_delay: Duration::ZERO,
            enemy_action_delay: Duration::ZERO,
            wave_transition_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables (milliseconds unless noted):
    /// - `COMBAT_SKIPPED_TURN_DELAY_MS` (default: 1000)
    /// - `COMBAT_ENEMY_ACTION_DELAY_MS` (default: 600)
    /// - `COMBAT_WAVE_TRANSITION_DELAY_MS` (default: 1500)
    /// - `COMBAT_SPAWN_TIMEOUT_MS` (default: 3000)
    /// - `COMBAT_DESPAWN_TIMEOUT_MS` (default: 2000)
    /// - `COMBAT_EVENT_BUFFER` - event channel capacity (default: 256)
    /// - `COMBAT_COMMAND_BUFFER` - command channel capacity (default: 32)
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("COMBAT_SKIPPED_TURN_DELAY_MS") {
            config.skipped_turn_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("COMBAT_ENEMY_ACTION_DELAY_MS") {
            config.enemy_action_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("COMBAT_WAVE_TRANSITION_DELAY_MS") {
            config.wave_transition_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("COMBAT_SPAWN_TIMEOUT_MS") {
            config.spawn_animation_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("COMBAT_DESPAWN_TIMEOUT_MS") {
            config.despawn_timeout = Duration::from_millis(ms);
        }
        if let Some(capacity) = read_env::<usize>("COMBAT_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("COMBAT_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

/// A running encounter.
///
/// Design: Runtime owns the worker task and the loot service's rewards.
/// [`CombatHandle`] provides a cloneable façade for clients.
pub struct Runtime<L: LootAndProgression = NoRewards> {
    handle: CombatHandle,
    worker: JoinHandle<Result<CombatReport<L::Reward>>>,
}

impl Runtime<NoRewards> {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder<NoRewards> {
        RuntimeBuilder::new()
    }
}

impl<L: LootAndProgression> Runtime<L> {
    /// Get a cloneable handle to this encounter
    pub fn handle(&self) -> CombatHandle {
        self.handle.clone()
    }

    /// Plays the encounter to the end with `provider` choosing every player
    /// intent, then returns the report.
    ///
    /// A rejected intent ends the turn so a provider that keeps choosing an
    /// unplayable card cannot stall the encounter.
    pub async fn play(self, provider: &dyn IntentProvider) -> Result<CombatReport<L::Reward>> {
        // A closed gate means the worker stopped; `finish` surfaces why.
        while let Ok(Some(snapshot)) = self.handle.wait_for_input().await {
            let intent = provider.next_intent(&snapshot).await?;
            let ends_turn = intent == PlayerIntent::EndTurn;

            match self.handle.submit(intent).await {
                Ok(()) => {}
                Err(err) if !ends_turn && is_rejection(&err) => {
                    tracing::debug!(
                        target: "combat::runtime",
                        error = %err,
                        "intent rejected, ending turn"
                    );
                    if let Err(err) = self.handle.end_turn().await {
                        if !is_rejection(&err) {
                            return Err(err);
                        }
                    }
                }
                Err(err) if is_rejection(&err) => {}
                Err(err) => return Err(err),
            }
        }
        self.finish().await
    }

    /// Waits for the encounter to end and returns its report.
    ///
    /// Other handle clones must either keep driving the encounter or be
    /// dropped; once every handle is gone mid-encounter the worker stops with
    /// [`RuntimeError::Abandoned`].
    pub async fn finish(self) -> Result<CombatReport<L::Reward>> {
        drop(self.handle);
        self.worker.await.map_err(RuntimeError::WorkerJoin)?
    }
}

fn is_rejection(err: &RuntimeError) -> bool {
    matches!(
        err.severity(),
        ErrorSeverity::Recoverable | ErrorSeverity::Validation
    )
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder<L: LootAndProgression = NoRewards> {
    config: RuntimeConfig,
    combat_config: CombatConfig,
    encounter: Option<EncounterDefinition>,
    catalog: Option<Arc<dyn ContentCatalog>>,
    cards: Option<Box<dyn CardSource>>,
    player: Option<Combatant>,
    loadout: PlayerLoadout,
    dice: Option<Dice>,
    seed: u64,
    presenter: Arc<dyn Presenter>,
    loot: L,
}

impl RuntimeBuilder<NoRewards> {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            combat_config: CombatConfig::default(),
            encounter: None,
            catalog: None,
            cards: None,
            player: None,
            loadout: PlayerLoadout::default(),
            dice: None,
            seed: 0,
            presenter: Arc::new(NullPresenter),
            loot: NoRewards,
        }
    }
}

impl<L: LootAndProgression> RuntimeBuilder<L> {
    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override combat rules
    pub fn combat_config(mut self, config: CombatConfig) -> Self {
        self.combat_config = config;
        self
    }

    /// Set required encounter definition
    pub fn encounter(mut self, encounter: EncounterDefinition) -> Self {
        self.encounter = Some(encounter);
        self
    }

    /// Set required enemy catalog
    pub fn catalog(mut self, catalog: Arc<dyn ContentCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set required card source (the player's deck)
    pub fn cards(mut self, cards: impl CardSource + 'static) -> Self {
        self.cards = Some(Box::new(cards));
        self
    }

    /// Set required player combatant
    pub fn player(mut self, player: Combatant) -> Self {
        self.player = Some(player);
        self
    }

    /// Equipment and character modifiers applied to player attacks
    pub fn loadout(mut self, loadout: PlayerLoadout) -> Self {
        self.loadout = loadout;
        self
    }

    /// Seed for the default PCG dice. Ignored when [`Self::dice`] is set.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use custom dice (e.g. a fixed RNG in tests)
    pub fn dice(mut self, dice: Dice) -> Self {
        self.dice = Some(dice);
        self
    }

    /// Set the presentation collaborator (optional)
    pub fn presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    /// Set the loot and progression service (optional)
    pub fn loot<L2: LootAndProgression>(self, loot: L2) -> RuntimeBuilder<L2> {
        RuntimeBuilder {
            config: self.config,
            combat_config: self.combat_config,
            encounter: self.encounter,
            catalog: self.catalog,
            cards: self.cards,
            player: self.player,
            loadout: self.loadout,
            dice: self.dice,
            seed: self.seed,
            presenter: self.presenter,
            loot,
        }
    }

    /// Build the engine and spawn the combat worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<Runtime<L>> {
        let encounter = self
            .encounter
            .ok_or(RuntimeError::MissingComponent("an encounter"))?;
        let catalog = self
            .catalog
            .ok_or(RuntimeError::MissingComponent("an enemy catalog"))?;
        let cards = self
            .cards
            .ok_or(RuntimeError::MissingComponent("a card source"))?;
        let player = self
            .player
            .ok_or(RuntimeError::MissingComponent("a player"))?;
        let dice = self.dice.unwrap_or_else(|| Dice::seeded(self.seed));

        let engine = CombatEngine::new(self.combat_config, encounter, catalog, cards, player, dice)
            .with_loadout(self.loadout);

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (input_tx, input_rx) = watch::channel(InputGate::Busy);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = CombatHandle::new(command_tx, input_rx, event_bus.clone());

        let worker = CombatWorker::new(
            engine,
            self.config,
            self.presenter,
            self.loot,
            command_rx,
            input_tx,
            event_bus,
        );
        let worker = tokio::spawn(worker.run());

        Ok(Runtime { handle, worker })
    }
}
