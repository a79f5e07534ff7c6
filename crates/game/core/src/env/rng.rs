//! RNG oracle for deterministic combat rolls.
//!
//! Every random decision in an encounter (miss, crit, intent choice, spawn
//! pick, rarity, rolled health) is derived from a per-encounter seed and a
//! monotonically increasing roll nonce, so replaying an encounter with the
//! same seed and the same player inputs reproduces it exactly.

use crate::state::CombatantId;

/// Stateless RNG oracle: maps a seed to a value.
///
/// Implementations must be deterministic.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG-XSH-RR: one LCG step followed by a xorshift and a random rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Oracle that always returns the same value. Useful for scripted tests:
/// `FixedRng(99)` makes every d100 roll 100 (never misses, never crits below
/// 100% chance) and `FixedRng(0)` makes every d100 roll 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Mix the encounter seed, roll nonce, actor and roll context into one seed.
///
/// The constants are SplitMix64 / FxHash style multipliers followed by a
/// murmur-style avalanche.
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Distinguishes independent rolls made for the same actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Miss = 0,
    Crit = 1,
    Intent = 2,
    SpawnPick = 3,
    Rarity = 4,
    Health = 5,
}

/// Seeded roller owned by the engine.
///
/// Each roll consumes one nonce.
pub struct Dice {
    rng: Box<dyn RngOracle>,
    game_seed: u64,
    nonce: u64,
}

impl Dice {
    pub fn new(rng: impl RngOracle + 'static, game_seed: u64) -> Self {
        Self {
            rng: Box::new(rng),
            game_seed,
            nonce: 0,
        }
    }

    /// PCG-backed dice.
    pub fn seeded(game_seed: u64) -> Self {
        Self::new(PcgRng, game_seed)
    }

    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// Number of rolls made so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self, actor: CombatantId, context: RollContext) -> u64 {
        self.nonce += 1;
        compute_seed(self.game_seed, self.nonce, actor.0, context as u32)
    }

    /// 1..=100.
    pub fn d100(&mut self, actor: CombatantId, context: RollContext) -> u32 {
        let seed = self.next_seed(actor, context);
        self.rng.roll_d100(seed)
    }

    pub fn range(&mut self, actor: CombatantId, context: RollContext, min: u32, max: u32) -> u32 {
        let seed = self.next_seed(actor, context);
        self.rng.range(seed, min, max)
    }

    /// Uniform index into a collection of `len` items; `None` when empty.
    pub fn index(&mut self, actor: CombatantId, context: RollContext, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let max = u32::try_from(len - 1).unwrap_or(u32::MAX);
        Some(self.range(actor, context, 0, max) as usize)
    }

    /// Weighted index; zero weights count as 1.
    pub fn weighted_index(
        &mut self,
        actor: CombatantId,
        context: RollContext,
        weights: impl IntoIterator<Item = u32> + Clone,
    ) -> Option<usize> {
        let total: u32 = weights.clone().into_iter().map(|w| w.max(1)).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.range(actor, context, 1, total);
        for (index, weight) in weights.into_iter().enumerate() {
            let weight = weight.max(1);
            if roll <= weight {
                return Some(index);
            }
            roll -= weight;
        }
        None
    }
}

impl core::fmt::Debug for Dice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dice")
            .field("game_seed", &self.game_seed)
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}
