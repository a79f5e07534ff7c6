//! Attack resolution.
//!
//! The free functions in [`hit`] and [`damage`] are pure; [`AttackResolver`]
//! sequences them against live combatants and is the only place in the crate
//! that applies attack damage.

pub mod damage;
pub mod hit;
mod modifiers;
mod resolver;

pub use damage::{critical_damage, stagger_contribution};
pub use hit::{check_crit, check_miss, miss_chance};
pub use modifiers::{AttackModifiers, AttackRequest, PlayerLoadout};
pub use resolver::{AttackOutcome, AttackResolver};
