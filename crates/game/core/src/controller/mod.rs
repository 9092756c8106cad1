//! Lifecycle and combat-state controller for the two-agent roster.
//!
//! [`RosterController`] owns the [`RosterState`] for the lifetime of a level
//! and is driven entirely from the host loop:
//!
//! ```text
//! update(Δt) ─→ regeneration ─→ due continuations (switch watchdog, recovery pacing)
//! take_damage ─→ (health == 0) ─→ handle_character_down
//!                                   ├─ survivor alive ─→ forced switch (fail-safe on error)
//!                                   └─ both down      ─→ recovery flow (try again / game over)
//! ```
//!
//! Each component lives in its own submodule as an `impl RosterController`
//! block; they share the state and collaborators held here.
mod damage;
mod death;
mod errors;
mod recovery;
mod regen;
mod suspend;
mod switch;

pub use death::{CascadeIgnored, CascadeOutcome};
pub use errors::{ControllerError, SwitchError};
pub use recovery::{RecoveryBranch, RecoveryStart};
pub use suspend::SuspendedSystems;
pub use switch::{
    ActionLock, SwitchCompletion, SwitchOutcome, SwitchRejection, SwitchTransition,
    TransitionCompletion, TransitionPhase,
};

use crate::config::RosterConfig;
use crate::env::{CollaboratorError, FrozenOpponent, GameContext, RosterHealth};
use crate::schedule::{Continuation, LevelEpoch, TimerQueue};
use crate::state::{
    AgentHandle, CascadeState, CharacterId, EventDeathContext, GameTime, LevelId, Position,
    RosterState,
};

use recovery::RecoverySession;

/// Identity and liveness of the level the controller is attached to.
#[derive(Clone, Debug)]
struct LevelRuntime {
    id: LevelId,
    epoch: LevelEpoch,
    live: bool,
}

/// Owns character state, health, switching, death and respawn for one level.
pub struct RosterController {
    config: RosterConfig,
    ctx: GameContext,
    roster: RosterState,
    level: LevelRuntime,
    now: GameTime,
    timers: TimerQueue,

    transition: Option<SwitchTransition>,
    next_transition_id: u64,

    recovery: Option<RecoverySession>,
    event_death_context: Option<EventDeathContext>,
    suspended: SuspendedSystems,
    frozen_opponents: Vec<FrozenOpponent>,
}

impl RosterController {
    /// Creates the controller with both agents at full health and `starting` selected.
    ///
    /// Agent handles are created separately via [`Self::create_character_handles`].
    pub fn initialize(
        starting: CharacterId,
        level_id: LevelId,
        ctx: GameContext,
        config: RosterConfig,
    ) -> Self {
        tracing::info!("Roster initialized: level={}, starting={}", level_id, starting);
        Self {
            roster: RosterState::new(starting, &config),
            config,
            ctx,
            level: LevelRuntime {
                id: level_id,
                epoch: LevelEpoch::default(),
                live: true,
            },
            now: GameTime::ZERO,
            timers: TimerQueue::new(),
            transition: None,
            next_transition_id: 0,
            recovery: None,
            event_death_context: None,
            suspended: SuspendedSystems::empty(),
            frozen_opponents: Vec::new(),
        }
    }

    /// Spawns both agent bodies at `spawn`; only the selected one is shown.
    ///
    /// # Errors
    ///
    /// Fails if handles already exist for this level, if the level was torn
    /// down, or if the agent rig rejects a call.
    pub fn create_character_handles(&mut self, spawn: Position) -> Result<(), ControllerError> {
        if !self.level.live {
            return Err(ControllerError::LevelNotLive(self.level.id.clone()));
        }
        if self.roster.records().any(|record| record.handle.is_some()) {
            return Err(ControllerError::HandlesAlreadyCreated(self.level.id.clone()));
        }

        for id in CharacterId::ALL {
            let handle = self.ctx.agents.spawn(id, spawn)?;
            self.roster.record_mut(id).handle = Some(handle);
        }

        let active = self.roster.selected();
        if let Some(inactive) = self.handle(active.other()) {
            self.ctx.agents.set_visible(inactive, false)?;
            self.ctx.agents.set_active(inactive, false)?;
            self.ctx.agents.set_body_enabled(inactive, false)?;
        }
        self.apply_agent_activation(active, spawn)?;

        tracing::debug!("Agent handles created at {} (active={})", spawn, active);
        Ok(())
    }

    pub fn active_character_id(&self) -> CharacterId {
        self.roster.selected()
    }

    pub fn active_handle(&self) -> Option<AgentHandle> {
        self.handle(self.roster.selected())
    }

    pub fn roster(&self) -> &RosterState {
        &self.roster
    }

    pub fn cascade_state(&self) -> CascadeState {
        self.roster.cascade_state()
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn now(&self) -> GameTime {
        self.now
    }

    pub fn level_id(&self) -> &LevelId {
        &self.level.id
    }

    pub fn is_live(&self) -> bool {
        self.level.live
    }

    pub fn recovery_in_progress(&self) -> bool {
        self.recovery.is_some()
    }

    pub fn recovery_branch(&self) -> Option<RecoveryBranch> {
        self.recovery.as_ref().map(|session| session.branch)
    }

    pub fn event_death_context(&self) -> Option<&EventDeathContext> {
        self.event_death_context.as_ref()
    }

    pub fn suspended_systems(&self) -> SuspendedSystems {
        self.suspended
    }

    /// Number of continuations waiting in the timer queue.
    pub fn pending_continuations(&self) -> usize {
        self.timers.len()
    }

    /// Marks the level as gone. Pending continuations and late effect
    /// callbacks become no-ops; handles are forgotten.
    pub fn teardown(&mut self) {
        tracing::info!("Level {} torn down", self.level.id);
        self.level.live = false;
        self.level.epoch = self.level.epoch.next();
        self.timers.clear();
        self.transition = None;
        self.recovery = None;
        self.event_death_context = None;
        self.suspended = SuspendedSystems::empty();
        self.frozen_opponents.clear();
        for record in self.roster.records_mut() {
            record.handle = None;
        }
    }

    // ===== shared helpers =====

    pub(crate) fn handle(&self, id: CharacterId) -> Option<AgentHandle> {
        self.roster.record(id).handle
    }

    fn roster_health(&self) -> RosterHealth {
        RosterHealth {
            tireek: self.roster.record(CharacterId::Tireek).health,
            tryston: self.roster.record(CharacterId::Tryston).health,
            active: self.roster.selected(),
        }
    }

    pub(crate) fn push_roster_health(&self) {
        self.ctx.hud.update_roster_health(self.roster_health());
    }

    pub(crate) fn schedule_in(&mut self, delay_ms: u64, task: Continuation) {
        let due = self.now + delay_ms;
        tracing::debug!("Scheduling {:?} at {}", task, due);
        self.timers.schedule(due, self.level.epoch, task);
    }

    /// Position of `id`'s body, or the level spawn point when it cannot be read.
    pub(crate) fn position_or_spawn(&self, id: CharacterId) -> Position {
        self.handle(id)
            .and_then(|handle| self.ctx.agents.position(handle).ok())
            .unwrap_or_else(|| self.ctx.world.spawn_point())
    }

    /// Shows `incoming` at `position` as the single active agent.
    ///
    /// Idempotent: hides the partner (correcting it if a race left it visible),
    /// then enables, positions and idles `incoming`, marks it active, re-targets
    /// the camera and refreshes the roster HUD. Returns true when the partner
    /// had to be hidden here. Shared by switch completion, the fail-safe
    /// switch and respawns.
    pub(crate) fn apply_agent_activation(
        &mut self,
        incoming: CharacterId,
        position: Position,
    ) -> Result<bool, CollaboratorError> {
        let agents = self.ctx.agents.clone();
        let handle = self
            .handle(incoming)
            .ok_or(CollaboratorError::HandleMissing(incoming))?;

        let mut corrected = false;
        if let Some(partner) = self.handle(incoming.other()) {
            if tolerate_gone(agents.is_visible(partner))?.unwrap_or(false) {
                tolerate_gone(agents.set_visible(partner, false))?;
                corrected = true;
            }
            tolerate_gone(agents.set_active(partner, false))?;
            tolerate_gone(agents.set_body_enabled(partner, false))?;
        }

        agents.set_position(handle, position)?;
        agents.set_velocity(handle, crate::state::Velocity::ZERO)?;
        agents.set_body_enabled(handle, true)?;
        agents.set_active(handle, true)?;
        agents.set_visible(handle, true)?;
        agents.play_idle(handle)?;

        self.roster.mark_active(incoming);
        self.ctx.camera.follow(handle);
        self.push_roster_health();
        Ok(corrected)
    }
}

/// Treats a destroyed handle as "nothing to do"; other failures propagate.
fn tolerate_gone<T>(result: Result<T, CollaboratorError>) -> Result<Option<T>, CollaboratorError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(CollaboratorError::HandleGone(handle)) => {
            tracing::debug!("Ignoring destroyed handle {}", handle);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
