//! Miss and critical-hit checks.

use crate::state::{Combatant, StatusEffectKind};

/// Miss chance (percent) from blind-type effects on the attacker.
pub fn miss_chance(attacker: &Combatant) -> f32 {
    attacker
        .status
        .total_magnitude(StatusEffectKind::Blind)
        .clamp(0.0, 100.0)
}

/// `roll` is a d100 (1-100). A chance of 0 never misses.
pub fn check_miss(chance: f32, roll: u32) -> bool {
    chance > 0.0 && roll as f32 <= chance
}

/// Crit lands when guaranteed or when `roll` (d100) is within the clamped
/// chance.
pub fn check_crit(chance: f32, always_crit: bool, roll: u32) -> bool {
    if always_crit {
        return true;
    }
    let chance = chance.clamp(0.0, 100.0);
    chance > 0.0 && roll as f32 <= chance
}
