//! Common error infrastructure for tagteam-core.
//!
//! Domain errors (`SwitchError`, `CollaboratorError`, ...) live next to the
//! code that raises them and implement [`GameError`] so callers can classify
//! failures uniformly.
//!
//! Guard rejections (cooldown, action lock, exhausted target) are not errors;
//! they are reported as outcome values.

/// Severity level of an error, used to pick a recovery strategy.
///
/// - **Recoverable**: a collaborator hiccup the controller can route around
/// - **Validation**: the caller asked for something the contract forbids
/// - **Internal**: controller state disagrees with itself
/// - **Fatal**: the level cannot continue without a full restart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: transition effect failed to spawn, agent handle already destroyed
    Recoverable,

    /// Examples: forced switch to an exhausted agent, switching before handles exist
    Validation,

    /// Examples: pending transition references a record that no longer matches
    Internal,

    /// Examples: both the primary and fail-safe switch paths failed
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

    /// Returns true if this error indicates a bug or broken contract.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tagteam-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by recoverability, not by impact
pub trait GameError: std::fmt::Display + std::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
