//! Common error infrastructure for fight-core.
//!
//! Setup and usage errors live next to the controllers that raise them (see
//! [`crate::engine`]). This module holds what they share.
//!
//! Combat rule violations are never errors: a blocked, out-of-range or
//! cooling-down attack is a miss. Only host mistakes surface as `Err`.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The call was premature; retrying later may succeed
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistency that requires investigation
/// - **Fatal**: The match cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: input while a transition is playing, tick while paused.
    Recoverable,

    /// Examples: even round count, bootstrap with impossible counters.
    Validation,

    /// Examples: completion for a ticket that was never issued.
    Internal,

    /// Examples: no opponent configured for the phase being entered.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a host bug or corrupted state.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all fight-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait FightError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
