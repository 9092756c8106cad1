//! Visual transition effects.

use super::CollaboratorError;
use crate::state::{Position, TransitionId};

/// Parameters for the effect played over the incoming agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionEffectRequest {
    /// Echo this id back through `complete_transition` when the effect ends.
    pub transition: TransitionId,
    pub at: Position,
    pub scale: f32,
    pub depth: i32,
}

/// Receipt for a started effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectTicket {
    pub duration_ms: u64,
}

/// Asynchronous effect pipeline.
///
/// Returning `Ok(None)` means no effect will run; the controller then applies
/// the switch synchronously instead of waiting for a completion callback.
pub trait EffectSpawner: Send + Sync {
    fn spawn_transition_effect(
        &self,
        request: &TransitionEffectRequest,
    ) -> Result<Option<EffectTicket>, CollaboratorError>;
}

/// No effect pipeline: every switch completes synchronously.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffects;

impl EffectSpawner for NoEffects {
    fn spawn_transition_effect(
        &self,
        _request: &TransitionEffectRequest,
    ) -> Result<Option<EffectTicket>, CollaboratorError> {
        Ok(None)
    }
}
