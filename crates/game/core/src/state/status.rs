//! Status effect system for combatants.
//!
//! Status effects are timed buffs and debuffs that restrict actions, modify
//! attack resolution, or tick damage/healing at turn boundaries.
//!
//! # Turn-based Duration
//!
//! Effects store `remaining_turns`, decremented by
//! [`StatusEffectTrack::advance_one_turn`]. The engine calls it exactly once
//! per owner per turn boundary; the track itself does not guard against a
//! second call, which would double-decay every duration.

/// Types of status effects.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusEffectKind {
    // ========================================================================
    // Crowd Control (skips the owner's action phase)
    // ========================================================================
    Frozen,
    Stunned,

    // ========================================================================
    // Attack modifiers
    // ========================================================================
    /// Attacks from the owner miss with `magnitude` percent chance.
    Blind,
    /// Counts as guard for stagger purposes.
    Shielded,

    // ========================================================================
    // Periodic (ticks right before the duration decrements)
    // ========================================================================
    /// Loses `magnitude` health per tick, ignoring guard.
    Poisoned,
    /// Loses `magnitude` health per tick, ignoring guard.
    Burning,
    /// Restores `magnitude` health per tick.
    Regenerating,
}

/// How a new effect interacts with an existing effect of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stacking {
    /// Coexists as an independent entry.
    Stack,
    /// Merges into the existing entry, keeping the longer duration and the
    /// larger magnitude.
    Refresh,
}

impl StatusEffectKind {
    pub const fn is_debuff(self) -> bool {
        !matches!(self, Self::Shielded | Self::Regenerating)
    }

    pub const fn stacking(self) -> Stacking {
        match self {
            Self::Frozen | Self::Stunned | Self::Shielded => Stacking::Refresh,
            Self::Blind | Self::Poisoned | Self::Burning | Self::Regenerating => Stacking::Stack,
        }
    }

    pub const fn is_crowd_control(self) -> bool {
        matches!(self, Self::Frozen | Self::Stunned)
    }
}

/// A single timed effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub magnitude: f32,
    pub remaining_turns: u32,
    pub is_debuff: bool,
}

impl StatusEffect {
    /// Creates an effect whose buff/debuff flag follows its kind.
    pub fn new(kind: StatusEffectKind, magnitude: f32, remaining_turns: u32) -> Self {
        Self {
            kind,
            magnitude,
            remaining_turns,
            is_debuff: kind.is_debuff(),
        }
    }
}

/// Damage and healing produced by periodic effects for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PeriodicTick {
    pub damage: u32,
    pub healing: u32,
}

/// Ordered collection of a combatant's active effects.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectTrack {
    effects: Vec<StatusEffect>,
}

impl StatusEffectTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an effect according to its kind's stacking rule.
    ///
    /// Effects with zero remaining turns are ignored: they would expire
    /// before anything could observe them.
    pub fn add(&mut self, effect: StatusEffect) {
        if effect.remaining_turns == 0 {
            return;
        }

        if effect.kind.stacking() == Stacking::Refresh {
            if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
                existing.remaining_turns = existing.remaining_turns.max(effect.remaining_turns);
                existing.magnitude = existing.magnitude.max(effect.magnitude);
                return;
            }
        }

        self.effects.push(effect);
    }

    /// Removes every effect of the given kind. Returns true if any was removed.
    pub fn remove(&mut self, kind: StatusEffectKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    pub fn has_effect(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Sum of magnitudes across all stacks of a kind.
    pub fn total_magnitude(&self, kind: StatusEffectKind) -> f32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.magnitude)
            .sum()
    }

    /// Decrements every effect's duration and removes the ones that reach 0.
    ///
    /// Returns the expired effects in their original order.
    pub fn advance_one_turn(&mut self) -> Vec<StatusEffect> {
        for effect in &mut self.effects {
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
        }

        let (expired, active): (Vec<_>, Vec<_>) = self
            .effects
            .drain(..)
            .partition(|e| e.remaining_turns == 0);
        self.effects = active;
        expired
    }

    /// Damage and healing the periodic effects would apply this tick.
    pub fn periodic(&self) -> PeriodicTick {
        let damage = self.total_magnitude(StatusEffectKind::Poisoned)
            + self.total_magnitude(StatusEffectKind::Burning);
        let healing = self.total_magnitude(StatusEffectKind::Regenerating);

        PeriodicTick {
            damage: damage.max(0.0).round() as u32,
            healing: healing.max(0.0).round() as u32,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.has_effect(StatusEffectKind::Frozen)
    }

    pub fn is_stunned(&self) -> bool {
        self.has_effect(StatusEffectKind::Stunned)
    }

    /// Returns the crowd-control effect currently preventing action, if any.
    pub fn crowd_control(&self) -> Option<StatusEffectKind> {
        if self.is_frozen() {
            Some(StatusEffectKind::Frozen)
        } else if self.is_stunned() {
            Some(StatusEffectKind::Stunned)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(kind: StatusEffectKind, turns: u32) -> StatusEffect {
        StatusEffect::new(kind, 1.0, turns)
    }

    #[test]
    fn advance_removes_only_effects_reaching_zero() {
        let mut track = StatusEffectTrack::new();
        track.add(effect(StatusEffectKind::Poisoned, 1));
        track.add(effect(StatusEffectKind::Burning, 2));
        track.add(effect(StatusEffectKind::Blind, 3));

        let expired = track.advance_one_turn();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].kind, StatusEffectKind::Poisoned);
        assert!(!track.has_effect(StatusEffectKind::Poisoned));
        assert!(track.has_effect(StatusEffectKind::Burning));
        assert!(track.has_effect(StatusEffectKind::Blind));

        let expired = track.advance_one_turn();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].kind, StatusEffectKind::Burning);
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn stacking_kinds_coexist_and_sum() {
        let mut track = StatusEffectTrack::new();
        track.add(StatusEffect::new(StatusEffectKind::Poisoned, 3.0, 2));
        track.add(StatusEffect::new(StatusEffectKind::Poisoned, 4.0, 5));

        assert_eq!(track.len(), 2);
        assert_eq!(track.total_magnitude(StatusEffectKind::Poisoned), 7.0);

        track.advance_one_turn();
        track.advance_one_turn();
        assert_eq!(track.total_magnitude(StatusEffectKind::Poisoned), 4.0);
    }

    #[test]
    fn crowd_control_refreshes_to_longer_duration() {
        let mut track = StatusEffectTrack::new();
        track.add(effect(StatusEffectKind::Stunned, 1));
        track.add(effect(StatusEffectKind::Stunned, 3));
        track.add(effect(StatusEffectKind::Stunned, 2));

        assert_eq!(track.len(), 1);
        assert_eq!(track.iter().next().map(|e| e.remaining_turns), Some(3));
    }

    #[test]
    fn zero_duration_effects_are_ignored() {
        let mut track = StatusEffectTrack::new();
        track.add(effect(StatusEffectKind::Frozen, 0));
        assert!(track.is_empty());
        assert!(!track.is_frozen());
    }

    #[test]
    fn remove_drops_every_stack_of_a_kind() {
        let mut track = StatusEffectTrack::new();
        track.add(effect(StatusEffectKind::Burning, 2));
        track.add(effect(StatusEffectKind::Burning, 4));
        track.add(effect(StatusEffectKind::Shielded, 2));

        assert!(track.remove(StatusEffectKind::Burning));
        assert!(!track.remove(StatusEffectKind::Burning));
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn periodic_sums_damage_and_healing() {
        let mut track = StatusEffectTrack::new();
        track.add(StatusEffect::new(StatusEffectKind::Poisoned, 2.0, 2));
        track.add(StatusEffect::new(StatusEffectKind::Burning, 3.0, 2));
        track.add(StatusEffect::new(StatusEffectKind::Regenerating, 4.0, 2));

        assert_eq!(
            track.periodic(),
            PeriodicTick {
                damage: 5,
                healing: 4
            }
        );
    }

    #[test]
    fn crowd_control_prefers_frozen() {
        let mut track = StatusEffectTrack::new();
        assert_eq!(track.crowd_control(), None);
        track.add(effect(StatusEffectKind::Stunned, 1));
        assert_eq!(track.crowd_control(), Some(StatusEffectKind::Stunned));
        track.add(effect(StatusEffectKind::Frozen, 1));
        assert_eq!(track.crowd_control(), Some(StatusEffectKind::Frozen));
    }

    #[test]
    fn debuff_flag_follows_kind() {
        assert!(StatusEffect::new(StatusEffectKind::Blind, 1.0, 1).is_debuff);
        assert!(!StatusEffect::new(StatusEffectKind::Shielded, 1.0, 1).is_debuff);
    }
}
