//! Ownership-aware gameplay suspension.
//!
//! The controller records which systems *it* paused so resuming undoes
//! exactly that. While the event system owns the pause, only the physics
//! clock is touched; input and entity-level freezing stay with the event
//! system.

use bitflags::bitflags;

use super::RosterController;

bitflags! {
    /// Systems currently held paused by the controller.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SuspendedSystems: u8 {
        const PHYSICS = 1 << 0;
        const INPUT = 1 << 1;
        const OPPONENTS = 1 << 2;
        const SPAWNING = 1 << 3;
    }
}

impl SuspendedSystems {
    /// Physics and input: what a respawn restores before an event takes over.
    pub const BASE: Self = Self::PHYSICS.union(Self::INPUT);
}

/// How much of the suspended set to restore.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ResumeScope {
    /// Restore physics and input; hand opponents and spawning to the event system.
    Base,
    Full,
}

impl RosterController {
    pub(crate) fn suspend_gameplay(&mut self) {
        if !self.suspended.contains(SuspendedSystems::PHYSICS) {
            self.ctx.simulation.pause_physics();
            self.suspended.insert(SuspendedSystems::PHYSICS);
        }

        if self.ctx.events.owns_pause() {
            tracing::debug!("Event system owns pause; only physics paused");
            return;
        }

        if !self.suspended.contains(SuspendedSystems::INPUT) {
            self.ctx.simulation.set_input_enabled(false);
            self.suspended.insert(SuspendedSystems::INPUT);
        }
        if !self.suspended.contains(SuspendedSystems::OPPONENTS) {
            let frozen = self.ctx.opponents.freeze_all();
            tracing::debug!("Froze {} opponents", frozen.len());
            self.frozen_opponents = frozen;
            self.suspended.insert(SuspendedSystems::OPPONENTS);
        }
        if !self.suspended.contains(SuspendedSystems::SPAWNING) {
            self.ctx.opponents.set_spawning(false);
            self.suspended.insert(SuspendedSystems::SPAWNING);
        }
    }

    pub(crate) fn resume_gameplay(&mut self, scope: ResumeScope) {
        if self.suspended.contains(SuspendedSystems::PHYSICS) {
            self.ctx.simulation.resume_physics();
        }
        if self.suspended.contains(SuspendedSystems::INPUT) {
            self.ctx.simulation.set_input_enabled(true);
        }
        self.suspended.remove(SuspendedSystems::BASE);

        if scope == ResumeScope::Base {
            if !self.suspended.is_empty() {
                tracing::debug!("Leaving {:?} to the event system", self.suspended);
            }
            self.frozen_opponents.clear();
            self.suspended = SuspendedSystems::empty();
            return;
        }

        if self.suspended.contains(SuspendedSystems::OPPONENTS) {
            let frozen = std::mem::take(&mut self.frozen_opponents);
            self.ctx.opponents.thaw(&frozen);
        }
        if self.suspended.contains(SuspendedSystems::SPAWNING) {
            self.ctx.opponents.set_spawning(true);
        }
        self.suspended = SuspendedSystems::empty();
    }

    /// Pauses gameplay while a dialogue is shown.
    ///
    /// Ignored during a recovery sequence, which owns the pause itself.
    pub fn suspend_for_dialogue(&mut self) {
        if self.recovery.is_some() || !self.level.live {
            return;
        }
        self.suspend_gameplay();
    }

    /// Undoes [`Self::suspend_for_dialogue`].
    pub fn resume_after_dialogue(&mut self) {
        if self.recovery.is_some() || !self.level.live {
            return;
        }
        self.resume_gameplay(ResumeScope::Full);
    }
}
