//! Errors returned when a player intent or a lifecycle call is rejected.
//!
//! A rejected call never mutates engine state.

use crate::error::{ErrorSeverity, GameError};
use crate::state::StatusEffectKind;

use super::{CombatOutcome, CombatState};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("combat has already started")]
    AlreadyStarted,

    #[error("combat has not started")]
    NotStarted,

    #[error("combat is over ({0:?})")]
    CombatOver(CombatOutcome),

    #[error("expected {expected:?}, combat is in {actual:?}")]
    WrongPhase {
        expected: CombatState,
        actual: CombatState,
    },

    #[error("a wave transition is in progress")]
    TransitionInFlight,

    #[error("no wave transition is pending")]
    NoPendingTransition,

    #[error("player cannot act while {0}")]
    PlayerIncapacitated(StatusEffectKind),

    #[error("insufficient mana: need {needed}, have {available}")]
    InsufficientMana { needed: u32, available: u32 },

    #[error("no living enemy in slot {0}")]
    InvalidTarget(usize),

    #[error("no living enemy to target")]
    NoTarget,

    #[error("no card at hand index {0}")]
    CardNotInHand(usize),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;
        match self {
            InsufficientMana { .. } | TransitionInFlight | PlayerIncapacitated(_) => {
                ErrorSeverity::Recoverable
            }
            InvalidTarget(_) | NoTarget | CardNotInHand(_) | WrongPhase { .. } => {
                ErrorSeverity::Validation
            }
            AlreadyStarted | NotStarted | NoPendingTransition => ErrorSeverity::Internal,
            CombatOver(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            AlreadyStarted => "COMBAT_ALREADY_STARTED",
            NotStarted => "COMBAT_NOT_STARTED",
            CombatOver(_) => "COMBAT_OVER",
            WrongPhase { .. } => "COMBAT_WRONG_PHASE",
            TransitionInFlight => "COMBAT_TRANSITION_IN_FLIGHT",
            NoPendingTransition => "COMBAT_NO_PENDING_TRANSITION",
            PlayerIncapacitated(_) => "COMBAT_PLAYER_INCAPACITATED",
            InsufficientMana { .. } => "COMBAT_INSUFFICIENT_MANA",
            InvalidTarget(_) => "COMBAT_INVALID_TARGET",
            NoTarget => "COMBAT_NO_TARGET",
            CardNotInHand(_) => "COMBAT_CARD_NOT_IN_HAND",
        }
    }
}
