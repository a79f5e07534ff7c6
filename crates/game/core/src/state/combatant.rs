//! Shared resource model for the player and every enemy.
//!
//! All resource mutation goes through the methods on [`Combatant`]; the raw
//! health / guard / energy / stagger fields are private so their ranges can
//! never be violated from outside.

use core::fmt;

use crate::action::{EnemyAbility, IntentSpec};
use crate::state::{DelayedActionQueue, StatBoosts, StatusEffectKind, StatusEffectTrack};

/// Unique identifier of a combatant within one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Reserved identifier for the player. Enemy ids start at 1.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cosmetic rarity tier. Only affects the display name.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Elite,
    Boss,
}

impl Rarity {
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Common => None,
            Self::Uncommon => Some("Uncommon"),
            Self::Rare => Some("Rare"),
            Self::Elite => Some("Elite"),
            Self::Boss => Some("Boss"),
        }
    }
}

/// Enemy-only behavior data copied from the content template.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyKit {
    pub base_damage: u32,
    pub intents: Vec<IntentSpec>,
    pub abilities: Vec<EnemyAbility>,
}

/// Result of a single [`Combatant::take_damage`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Damage soaked by guard.
    pub absorbed: u32,
    /// Health actually removed.
    pub health_lost: u32,
    /// Whether health is 0 after the call.
    pub defeated: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    /// Catalog key of the template this enemy was spawned from.
    pub template: Option<String>,
    pub rarity: Rarity,
    pub tier: u32,
    /// Display slot inside the wave.
    pub slot: usize,

    health: u32,
    max_health: u32,
    guard: u32,
    max_guard: u32,
    /// Enemy energy, or player mana.
    energy: u32,
    max_energy: u32,
    energy_regen: u32,
    stagger: f32,
    stagger_threshold: f32,
    defeat_notified: bool,

    pub status: StatusEffectTrack,
    pub delayed: DelayedActionQueue,
    pub boosts: StatBoosts,
    pub kit: Option<EnemyKit>,
    /// Declared next action (enemies only).
    pub intent: Option<IntentSpec>,
}

impl Combatant {
    /// Creates a combatant at full health with no guard, energy or stagger.
    pub fn new(id: CombatantId, name: impl Into<String>, max_health: u32) -> Self {
        Self {
            id,
            name: name.into(),
            template: None,
            rarity: Rarity::Common,
            tier: 1,
            slot: 0,
            health: max_health,
            max_health,
            guard: 0,
            max_guard: max_health,
            energy: 0,
            max_energy: 0,
            energy_regen: 0,
            stagger: 0.0,
            stagger_threshold: 0.0,
            defeat_notified: false,
            status: StatusEffectTrack::new(),
            delayed: DelayedActionQueue::new(),
            boosts: StatBoosts::default(),
            kit: None,
            intent: None,
        }
    }

    pub fn player(name: impl Into<String>, max_health: u32, max_mana: u32) -> Self {
        Self::new(CombatantId::PLAYER, name, max_health).with_energy(max_mana, max_mana, 0)
    }

    // ===== builders =====

    /// Sets the guard cap as a fraction of max health.
    pub fn with_guard_cap_ratio(mut self, ratio: f32) -> Self {
        self.max_guard = (self.max_health as f32 * ratio.max(0.0)).round() as u32;
        self.guard = self.guard.min(self.max_guard);
        self
    }

    pub fn with_stagger_threshold(mut self, threshold: f32) -> Self {
        self.stagger_threshold = threshold.max(0.0);
        self
    }

    pub fn with_energy(mut self, max: u32, start: u32, regen: u32) -> Self {
        self.max_energy = max;
        self.energy = start.min(max);
        self.energy_regen = regen;
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    pub fn with_guard(mut self, guard: u32) -> Self {
        self.add_guard(guard);
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_tier(mut self, tier: u32) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = slot;
        self
    }

    pub fn with_template(mut self, key: impl Into<String>) -> Self {
        self.template = Some(key.into());
        self
    }

    pub fn with_kit(mut self, kit: EnemyKit) -> Self {
        self.kit = Some(kit);
        self
    }

    // ===== accessors =====

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn guard(&self) -> u32 {
        self.guard
    }

    pub fn max_guard(&self) -> u32 {
        self.max_guard
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    pub fn energy_regen(&self) -> u32 {
        self.energy_regen
    }

    pub fn stagger(&self) -> f32 {
        self.stagger
    }

    pub fn stagger_threshold(&self) -> f32 {
        self.stagger_threshold
    }

    /// Name with the rarity prefix, e.g. "Elite Goblin".
    pub fn display_name(&self) -> String {
        match self.rarity.prefix() {
            Some(prefix) => format!("{prefix} {}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Whether guard or a shield-type effect is currently protecting this
    /// combatant. Both count equally for stagger effectiveness.
    pub fn is_guarded(&self) -> bool {
        self.guard > 0 || self.status.has_effect(StatusEffectKind::Shielded)
    }

    /// Alive and not under crowd control.
    pub fn can_act(&self) -> bool {
        !self.is_defeated() && self.status.crowd_control().is_none()
    }

    // ===== mutations =====

    /// Applies damage, letting guard absorb it first unless `ignore_guard`.
    ///
    /// No-op on a defeated combatant.
    pub fn take_damage(&mut self, amount: u32, ignore_guard: bool) -> DamageOutcome {
        if self.is_defeated() {
            return DamageOutcome {
                defeated: true,
                ..DamageOutcome::default()
            };
        }

        let absorbed = if ignore_guard {
            0
        } else {
            amount.min(self.guard)
        };
        self.guard -= absorbed;

        let health_lost = (amount - absorbed).min(self.health);
        self.health -= health_lost;

        DamageOutcome {
            absorbed,
            health_lost,
            defeated: self.is_defeated(),
        }
    }

    /// Restores health up to max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_defeated() {
            return 0;
        }
        let healed = amount.min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Adds guard, capped at the guard maximum. Returns the amount gained.
    pub fn add_guard(&mut self, amount: u32) -> u32 {
        if self.is_defeated() {
            return 0;
        }
        let gained = amount.min(self.max_guard.saturating_sub(self.guard));
        self.guard += gained;
        gained
    }

    /// Keeps `retention` of the current guard, rounding down.
    pub fn decay_guard(&mut self, retention: f32) {
        self.guard = (self.guard as f32 * retention.clamp(0.0, 1.0)).floor() as u32;
    }

    /// Adds `amount * effectiveness` stagger and reports whether the
    /// threshold is reached.
    ///
    /// Never resets stagger itself: the caller applies the stun first and then
    /// calls [`Self::reset_stagger`]. A threshold of 0 disables stagger.
    pub fn add_stagger(&mut self, amount: f32, effectiveness: f32) -> bool {
        if self.stagger_threshold <= 0.0 || self.is_defeated() {
            return false;
        }
        let added = (amount * effectiveness).max(0.0);
        self.stagger = (self.stagger + added).min(self.stagger_threshold);
        self.stagger >= self.stagger_threshold
    }

    pub fn reset_stagger(&mut self) {
        self.stagger = 0.0;
    }

    pub fn decay_stagger(&mut self, retention: f32) {
        self.stagger *= retention.clamp(0.0, 1.0);
    }

    pub fn regenerate_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(amount).min(self.max_energy);
    }

    /// Consumes `amount` energy if available. Returns false (and consumes
    /// nothing) on shortage.
    pub fn drain_energy(&mut self, amount: u32) -> bool {
        if self.energy < amount {
            return false;
        }
        self.energy -= amount;
        true
    }

    /// Records that this combatant's defeat has been reported.
    ///
    /// Returns true exactly once, on the first call after health reaches 0.
    pub fn mark_defeated(&mut self) -> bool {
        if !self.is_defeated() || self.defeat_notified {
            return false;
        }
        self.defeat_notified = true;
        true
    }

    pub fn defeat_notified(&self) -> bool {
        self.defeat_notified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(health: u32) -> Combatant {
        Combatant::new(CombatantId(1), "dummy", health)
    }

    #[test]
    fn guard_absorbs_partial_damage() {
        let mut c = dummy(30).with_guard(10);
        let outcome = c.take_damage(4, false);

        assert_eq!(c.health(), 30);
        assert_eq!(c.guard(), 6);
        assert_eq!(outcome.absorbed, 4);
        assert_eq!(outcome.health_lost, 0);
    }

    #[test]
    fn damage_beyond_guard_reaches_health() {
        let mut c = dummy(30).with_guard(5);
        let outcome = c.take_damage(20, false);

        assert_eq!(c.guard(), 0);
        assert_eq!(c.health(), 15);
        assert_eq!(outcome.health_lost, 15);
        assert!(!outcome.defeated);
    }

    #[test]
    fn ignore_guard_bypasses_guard() {
        let mut c = dummy(30).with_guard(5);
        c.take_damage(10, true);

        assert_eq!(c.guard(), 5);
        assert_eq!(c.health(), 20);
    }

    #[test]
    fn health_stays_in_range_over_mixed_sequence() {
        let mut c = dummy(25).with_guard(3);
        let ops: [(bool, u32); 8] = [
            (true, 7),
            (false, 40),
            (true, 100),
            (false, 1),
            (true, 3),
            (false, 60),
            (true, 2),
            (false, 5),
        ];

        for (is_damage, amount) in ops {
            if is_damage {
                c.take_damage(amount, amount % 2 == 0);
            } else {
                c.heal(amount);
            }
            assert!(c.health() <= c.max_health());
        }
        assert!(c.is_defeated());
    }

    #[test]
    fn defeated_combatant_ignores_damage_and_healing() {
        let mut c = dummy(10);
        c.take_damage(50, true);
        assert!(c.is_defeated());

        let outcome = c.take_damage(5, false);
        assert_eq!(outcome.health_lost, 0);
        assert_eq!(c.heal(5), 0);
        assert_eq!(c.health(), 0);
    }

    #[test]
    fn guard_is_capped_by_max_health_ratio() {
        let mut c = dummy(40).with_guard_cap_ratio(0.5);
        assert_eq!(c.add_guard(30), 20);
        assert_eq!(c.guard(), 20);

        c.decay_guard(0.5);
        assert_eq!(c.guard(), 10);
    }

    #[test]
    fn stagger_reports_threshold_without_resetting() {
        let mut c = dummy(50).with_stagger_threshold(5.0);

        assert!(!c.add_stagger(2.0, 1.0));
        assert!(!c.add_stagger(4.0, 0.5));
        assert!(c.add_stagger(1.0, 1.0));
        assert_eq!(c.stagger(), 5.0);

        // A second hit before the reset still reports the threshold.
        assert!(c.add_stagger(1.0, 1.0));
        c.reset_stagger();
        assert_eq!(c.stagger(), 0.0);
    }

    #[test]
    fn reset_then_stun_order_is_equally_safe() {
        let mut a = dummy(50).with_stagger_threshold(2.0);
        let mut b = a.clone();

        assert!(a.add_stagger(2.0, 1.0));
        a.status
            .add(crate::state::StatusEffect::new(StatusEffectKind::Stunned, 1.0, 2));
        a.reset_stagger();

        assert!(b.add_stagger(2.0, 1.0));
        b.reset_stagger();
        b.status
            .add(crate::state::StatusEffect::new(StatusEffectKind::Stunned, 1.0, 2));

        assert_eq!(a.stagger(), b.stagger());
        assert_eq!(a.status, b.status);
    }

    #[test]
    fn zero_threshold_disables_stagger() {
        let mut c = dummy(50);
        assert!(!c.add_stagger(100.0, 1.0));
        assert_eq!(c.stagger(), 0.0);
    }

    #[test]
    fn energy_drain_fails_without_consuming() {
        let mut c = dummy(10).with_energy(5, 2, 1);
        assert!(!c.drain_energy(3));
        assert_eq!(c.energy(), 2);

        c.regenerate_energy(10);
        assert_eq!(c.energy(), 5);
        assert!(c.drain_energy(3));
        assert_eq!(c.energy(), 2);
    }

    #[test]
    fn mark_defeated_fires_once() {
        let mut c = dummy(5);
        assert!(!c.mark_defeated());

        c.take_damage(5, false);
        assert!(c.mark_defeated());
        assert!(!c.mark_defeated());
    }

    #[test]
    fn display_name_uses_rarity_prefix() {
        let c = dummy(5).with_rarity(Rarity::Elite);
        assert_eq!(c.display_name(), "Elite dummy");
        assert_eq!(dummy(5).display_name(), "dummy");
    }
}
