use crate::state::CombatantId;

/// Combat rule constants and tunable parameters.
///
/// Retention values are fractions in `[0, 1]` applied once per turn: a guard
/// retention of `0.5` halves the remaining guard at every player turn start.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Fraction of player guard kept at the start of each player turn.
    pub guard_retention: f32,
    /// Guard cap as a fraction of max health.
    pub guard_cap_ratio: f32,
    /// Fraction of player stagger kept at the start of each player turn.
    pub player_stagger_retention: f32,
    /// Fraction of enemy stagger kept at each turn boundary.
    pub enemy_stagger_retention: f32,
    /// Fraction of enemy guard kept at the start of each enemy turn.
    pub enemy_guard_retention: f32,
    /// Stagger contributed per point of pre-crit base damage.
    pub stagger_ratio: f32,
    /// Stagger effectiveness against a guarded defender.
    pub guarded_stagger_effectiveness: f32,
    /// Damage multiplier applied on critical hits.
    pub crit_multiplier: f32,
    /// Number of action phases a stagger stun takes away from the defender.
    pub stun_turns: u32,
    /// Mana restored to the player at the start of each player turn.
    pub mana_regen: u32,
    /// Guard granted by an enemy Defend intent, as a fraction of max health.
    pub defend_guard_percent: f32,
    /// Cards drawn at the start of every player turn.
    pub cards_per_turn: u32,
    /// Cards drawn when a wave begins (including the opening hand).
    pub cards_per_wave: u32,
    pub spawn: SpawnRules,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_HAND_SIZE: usize = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GUARD_RETENTION: f32 = 0.5;
    pub const DEFAULT_STAGGER_RATIO: f32 = 0.1;
    pub const DEFAULT_CRIT_MULTIPLIER: f32 = 1.5;

    pub fn new() -> Self {
        Self {
            guard_retention: Self::DEFAULT_GUARD_RETENTION,
            guard_cap_ratio: 1.0,
            player_stagger_retention: 0.5,
            enemy_stagger_retention: 0.5,
            enemy_guard_retention: 0.5,
            stagger_ratio: Self::DEFAULT_STAGGER_RATIO,
            guarded_stagger_effectiveness: 0.5,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            stun_turns: 1,
            mana_regen: 3,
            defend_guard_percent: 0.2,
            cards_per_turn: 2,
            cards_per_wave: 5,
            spawn: SpawnRules::default(),
        }
    }

    /// Duration (in turn boundaries) of a crowd-control effect that should
    /// cost `target` exactly `stun_turns` action phases.
    ///
    /// Enemy effects tick at the enemy turn start before any enemy acts, so
    /// they need one extra boundary. The player's skip check runs before the
    /// player's own effects tick.
    pub fn crowd_control_duration(&self, target: CombatantId) -> u32 {
        if target.is_player() {
            self.stun_turns
        } else {
            self.stun_turns + 1
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Limits and odds used by the wave spawner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnRules {
    /// Hard cap on enemies per wave.
    pub max_enemies: u32,
    /// Number of slots the encounter can display.
    pub max_spawn_slots: u32,
    /// Slot reserved for the unique boss (clamped to the wave size).
    pub boss_slot: usize,
    /// Area difficulty points per catalog tier when filtering the global catalog.
    pub difficulty_per_tier: u32,
    pub rarity: RarityOdds,
}

impl SpawnRules {
    /// Highest catalog tier eligible for an area of the given difficulty.
    pub fn tier_ceiling(&self, area_difficulty: u32) -> u32 {
        1 + area_difficulty / self.difficulty_per_tier.max(1)
    }

    /// Maximum number of enemies a single wave may hold.
    pub fn capacity(&self) -> u32 {
        self.max_enemies.min(self.max_spawn_slots)
    }
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            max_enemies: 5,
            max_spawn_slots: 5,
            boss_slot: 2,
            difficulty_per_tier: 10,
            rarity: RarityOdds::default(),
        }
    }
}

/// Percent chances for rolling a rarity above `Common` on a spawned enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RarityOdds {
    pub uncommon: u32,
    pub rare: u32,
    pub elite: u32,
}

impl Default for RarityOdds {
    fn default() -> Self {
        Self {
            uncommon: 20,
            rare: 8,
            elite: 2,
        }
    }
}
