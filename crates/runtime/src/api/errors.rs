//! Unified error types surfaced by the runtime API.
//!
//! Wraps rejected player intents from the engine and failures from worker
//! coordination so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::{CombatError, CombatState, ErrorSeverity, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("combat worker command channel closed")]
    CommandChannelClosed,

    #[error("combat worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("combat worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("player input is not accepted while the {0} phase is resolving")]
    NotAcceptingInput(CombatState),

    #[error("every command handle was dropped before the encounter finished")]
    Abandoned,

    #[error("runtime requires {0} to be configured before building")]
    MissingComponent(&'static str),
}

impl RuntimeError {
    /// Severity used to pick a log level; rejected intents inherit the
    /// engine's classification.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Combat(err) => err.severity(),
            Self::NotAcceptingInput(_) => ErrorSeverity::Recoverable,
            Self::MissingComponent(_) => ErrorSeverity::Validation,
            Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::Abandoned => ErrorSeverity::Fatal,
        }
    }
}
