//! Scene-level collaborators: scripted events, opponents, simulation and camera.

use crate::state::{AgentHandle, EventId, OpponentId, Velocity};

/// The event system can claim ownership of pause state and of specific
/// entities. While it owns the pause, the controller touches only the physics
/// pause flag and leaves entity-level pause/resume to the event system.
pub trait EventDirector: Send + Sync {
    fn is_event_active(&self) -> bool;

    fn active_event(&self) -> Option<EventId>;

    /// True while the event system owns the pause state.
    fn owns_pause(&self) -> bool;

    /// Restarts `event` from its beginning.
    fn replay_event(&self, event: &EventId);
}

/// No scripted events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventDirector for NoEvents {
    fn is_event_active(&self) -> bool {
        false
    }

    fn active_event(&self) -> Option<EventId> {
        None
    }

    fn owns_pause(&self) -> bool {
        false
    }

    fn replay_event(&self, _event: &EventId) {}
}

/// Velocity saved when an opponent was frozen, restored on thaw.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrozenOpponent {
    pub id: OpponentId,
    pub velocity: Velocity,
}

pub trait OpponentDirector: Send + Sync {
    /// Stops every opponent and reports the velocities it had.
    fn freeze_all(&self) -> Vec<FrozenOpponent>;

    /// Restores saved velocities. Opponents that no longer exist are skipped.
    fn thaw(&self, frozen: &[FrozenOpponent]);

    fn set_spawning(&self, enabled: bool);

    fn remove_all(&self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpponents;

impl OpponentDirector for NoOpponents {
    fn freeze_all(&self) -> Vec<FrozenOpponent> {
        Vec::new()
    }

    fn thaw(&self, _frozen: &[FrozenOpponent]) {}

    fn set_spawning(&self, _enabled: bool) {}

    fn remove_all(&self) {}
}

pub trait SimulationControl: Send + Sync {
    fn pause_physics(&self);

    fn resume_physics(&self);

    fn set_input_enabled(&self, enabled: bool);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoSimulation;

impl SimulationControl for NoSimulation {
    fn pause_physics(&self) {}

    fn resume_physics(&self) {}

    fn set_input_enabled(&self, _enabled: bool) {}
}

pub trait CameraRig: Send + Sync {
    fn reset_scroll(&self);

    fn follow(&self, handle: AgentHandle);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoCamera;

impl CameraRig for NoCamera {
    fn reset_scroll(&self) {}

    fn follow(&self, _handle: AgentHandle) {}
}
