//! Presentation collaborator.
//!
//! The worker forwards engine events to a [`Presenter`] as fire-and-forget
//! notifications. The only calls it awaits are the spawn and despawn
//! animations, and those are bounded by timeouts from
//! [`crate::RuntimeConfig`].
use async_trait::async_trait;

use combat_core::{AttackOutcome, CombatEvent, CombatOutcome, CombatState, CombatantId, DefeatedEnemy};

/// Receives combat notifications to animate.
///
/// Every method has an empty default so implementations only override what
/// they render.
#[async_trait]
pub trait Presenter: Send + Sync {
    fn on_combat_state_changed(&self, _state: CombatState) {}

    fn on_turn_changed(&self, _turn: u32) {}

    fn on_turn_type_changed(&self, _is_player_turn: bool) {}

    fn on_wave_changed(&self, _current: u32, _total: u32) {}

    fn on_enemy_defeated(&self, _enemy: &DefeatedEnemy) {}

    fn on_combat_ended(&self, _outcome: CombatOutcome) {}

    /// Per-hit data for floating text (damage, crit, miss).
    fn on_attack(&self, _attacker: CombatantId, _defender: CombatantId, _outcome: &AttackOutcome) {}

    /// Called for every event after the typed callbacks above.
    fn on_event(&self, _event: &CombatEvent) {}

    /// Plays the spawn animation for a new roster. The worker resumes the
    /// encounter when this returns or the spawn timeout elapses.
    async fn play_spawn(&self, _enemies: &[CombatantId]) {}

    /// Plays a death-out animation. The worker force-completes the removal
    /// if this does not return within the despawn timeout.
    async fn play_despawn(&self, _enemy: CombatantId) {}
}

/// Presenter that renders nothing.
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// Routes an event to the matching typed callback, then to `on_event`.
pub(crate) fn dispatch(presenter: &dyn Presenter, event: &CombatEvent) {
    match event {
        CombatEvent::StateChanged { state } => presenter.on_combat_state_changed(*state),
        CombatEvent::TurnChanged { turn } => presenter.on_turn_changed(*turn),
        CombatEvent::TurnTypeChanged { is_player_turn } => {
            presenter.on_turn_type_changed(*is_player_turn)
        }
        CombatEvent::WaveChanged { current, total } => presenter.on_wave_changed(*current, *total),
        CombatEvent::EnemyDefeated(enemy) => presenter.on_enemy_defeated(enemy),
        CombatEvent::CombatEnded { outcome } => presenter.on_combat_ended(*outcome),
        CombatEvent::AttackResolved {
            attacker,
            defender,
            outcome,
        } => presenter.on_attack(*attacker, *defender, outcome),
        _ => {}
    }
    presenter.on_event(event);
}
