//! Agent bodies owned by the rendering/physics layer.

use super::CollaboratorError;
use crate::state::{AgentHandle, CharacterId, Position, Velocity};

/// Read/write access to the externally owned agent representations.
///
/// The controller only toggles visibility, activity and physics-body flags,
/// moves bodies and zeroes their velocity; it never renders anything. Every
/// call on a destroyed handle must return [`CollaboratorError::HandleGone`].
pub trait AgentRig: Send + Sync {
    /// Creates the body for `character` at `at` and returns its handle.
    fn spawn(&self, character: CharacterId, at: Position)
    -> Result<AgentHandle, CollaboratorError>;

    fn position(&self, handle: AgentHandle) -> Result<Position, CollaboratorError>;

    /// Last position where the agent was standing on ground, if tracked.
    fn last_ground_position(
        &self,
        handle: AgentHandle,
    ) -> Result<Option<Position>, CollaboratorError>;

    fn set_position(&self, handle: AgentHandle, at: Position) -> Result<(), CollaboratorError>;

    fn set_velocity(&self, handle: AgentHandle, velocity: Velocity)
    -> Result<(), CollaboratorError>;

    fn is_visible(&self, handle: AgentHandle) -> Result<bool, CollaboratorError>;

    fn set_visible(&self, handle: AgentHandle, visible: bool) -> Result<(), CollaboratorError>;

    /// Whether the agent participates in update/input.
    fn set_active(&self, handle: AgentHandle, active: bool) -> Result<(), CollaboratorError>;

    fn set_body_enabled(&self, handle: AgentHandle, enabled: bool)
    -> Result<(), CollaboratorError>;

    /// Forces the idle animation.
    fn play_idle(&self, handle: AgentHandle) -> Result<(), CollaboratorError>;
}
