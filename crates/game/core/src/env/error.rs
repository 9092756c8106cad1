//! Collaborator failure errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{AgentHandle, CharacterId};

/// Errors reported by injected collaborators.
///
/// These are routed around (fail-safe switch, fallback respawn) rather than
/// surfaced to the player; only an unrecoverable chain escalates to a level
/// restart.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// The agent handle was destroyed with the scene.
    #[error("agent handle {0} no longer exists")]
    HandleGone(AgentHandle),

    /// The character has no handle yet (`create_character_handles` not called).
    #[error("character {0} has no agent handle")]
    HandleMissing(CharacterId),

    /// The visual effect pipeline failed to start a transition effect.
    #[error("transition effect failed: {0}")]
    EffectFailed(String),

    /// The collaborator is present but cannot serve requests right now.
    #[error("{0} collaborator unavailable")]
    Unavailable(&'static str),
}

impl GameError for CollaboratorError {
    fn severity(&self) -> ErrorSeverity {
        use CollaboratorError::*;
        match self {
            HandleGone(_) | EffectFailed(_) | Unavailable(_) => ErrorSeverity::Recoverable,
            HandleMissing(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CollaboratorError::*;
        match self {
            HandleGone(_) => "COLLABORATOR_HANDLE_GONE",
            HandleMissing(_) => "COLLABORATOR_HANDLE_MISSING",
            EffectFailed(_) => "COLLABORATOR_EFFECT_FAILED",
            Unavailable(_) => "COLLABORATOR_UNAVAILABLE",
        }
    }
}
