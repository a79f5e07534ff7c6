//! Common error infrastructure for combat-core.
//!
//! Domain errors (e.g. [`crate::engine::CombatError`]) live next to the code
//! that produces them. This module only provides the shared classification
//! used by the runtime to pick a log level and a recovery strategy.
//!
//! Note that most bookkeeping inconsistencies (double defeats, zero-health
//! enemies still on the roster, empty spawn pools) are not errors at all: the
//! engine repairs or degrades around them silently.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same intent may succeed later (e.g. after mana regenerates)
/// - **Validation**: the intent is invalid in the current state and should not be retried
/// - **Internal**: an unexpected inconsistency that indicates a bug
/// - **Fatal**: the encounter cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
