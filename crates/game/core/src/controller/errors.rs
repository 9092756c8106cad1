//! Error types for roster controller operations.

use crate::env::CollaboratorError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CharacterId, LevelId};

/// Failures of a switch that are not plain guard rejections.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SwitchError {
    /// A forced switch targeted an agent with zero health. Contract violation.
    #[error("forced switch to {target} refused: target health is 0")]
    ForcedTargetExhausted { target: CharacterId },

    #[error("agent handles have not been created for this level")]
    HandlesNotCreated,

    #[error("level {0} has been torn down")]
    LevelNotLive(LevelId),

    #[error("switch collaborator failed: {0}")]
    Collaborator(#[from] CollaboratorError),
}

impl GameError for SwitchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ForcedTargetExhausted { .. } | Self::HandlesNotCreated => {
                ErrorSeverity::Validation
            }
            Self::LevelNotLive(_) => ErrorSeverity::Internal,
            Self::Collaborator(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ForcedTargetExhausted { .. } => "SWITCH_FORCED_TARGET_EXHAUSTED",
            Self::HandlesNotCreated => "SWITCH_HANDLES_NOT_CREATED",
            Self::LevelNotLive(_) => "SWITCH_LEVEL_NOT_LIVE",
            Self::Collaborator(inner) => inner.error_code(),
        }
    }
}

/// Errors surfaced by the controller's setup operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("agent handles already exist for level {0}")]
    HandlesAlreadyCreated(LevelId),

    #[error("level {0} has been torn down")]
    LevelNotLive(LevelId),

    #[error(transparent)]
    Switch(#[from] SwitchError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl GameError for ControllerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HandlesAlreadyCreated(_) => ErrorSeverity::Validation,
            Self::LevelNotLive(_) => ErrorSeverity::Internal,
            Self::Switch(inner) => inner.severity(),
            Self::Collaborator(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HandlesAlreadyCreated(_) => "CONTROLLER_HANDLES_ALREADY_CREATED",
            Self::LevelNotLive(_) => "CONTROLLER_LEVEL_NOT_LIVE",
            Self::Switch(inner) => inner.error_code(),
            Self::Collaborator(inner) => inner.error_code(),
        }
    }
}
