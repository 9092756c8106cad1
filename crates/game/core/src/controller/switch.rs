//! Active/inactive agent swaps.
//!
//! A switch is two-phase. [`RosterController::switch_character`] validates
//! the guards, hides the outgoing agent, stages the incoming one invisibly and
//! starts the transition effect. [`RosterController::complete_transition`]
//! is the single completion entry point: the effect system calls it when the
//! effect ends, and a watchdog continuation calls it if the effect never
//! reports back. Without an effect pipeline, completion runs synchronously.

use crate::env::{CollaboratorError, TransitionEffectRequest};
use crate::schedule::Continuation;
use crate::state::{AgentHandle, CharacterId, Position, TransitionId, Velocity};

use super::{RosterController, SwitchError};

/// Attack/jump-kick lock reported by the host for the active agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActionLock {
    #[default]
    Free,
    Locked { remaining_ms: u64 },
}

/// Why a non-forced switch was refused. Guard rejections are not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchRejection {
    Cooldown { remaining_ms: u64 },
    ActionLocked { remaining_ms: u64 },
    TargetExhausted(CharacterId),
    RecoveryInProgress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchCompletion {
    /// The incoming agent is already visible and active.
    Applied,
    /// Waiting for the effect system (or the watchdog) to complete the switch.
    Pending { effect_duration_ms: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    Switched {
        incoming: CharacterId,
        transition: TransitionId,
        completion: SwitchCompletion,
    },
    Rejected(SwitchRejection),
}

impl SwitchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Switched { .. })
    }

    pub fn incoming(&self) -> Option<CharacterId> {
        match self {
            Self::Switched { incoming, .. } => Some(*incoming),
            Self::Rejected(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    Pending,
    Applied,
}

/// One in-flight or finished switch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwitchTransition {
    pub id: TransitionId,
    pub outgoing: CharacterId,
    pub incoming: CharacterId,
    pub position: Position,
    pub phase: TransitionPhase,
}

/// Result of a completion request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionCompletion {
    Applied,
    /// Unknown id, already applied, or the level is gone.
    Stale,
    /// The incoming handle was destroyed; nothing was changed.
    HandleGone,
    /// The agent rig rejected the completion; the transition was abandoned.
    Failed,
}

impl RosterController {
    /// Swaps the active agent.
    ///
    /// `forced` skips the cooldown and action-lock guards, turns a dead
    /// target into an error and consumes the outgoing agent's auto-switch;
    /// it is meant for the death cascade. `airborne`
    /// places the incoming agent at the outgoing agent's last ground position.
    ///
    /// # Errors
    ///
    /// - [`SwitchError::ForcedTargetExhausted`] for a forced switch to a dead agent
    /// - [`SwitchError::HandlesNotCreated`] before `create_character_handles`
    /// - [`SwitchError::Collaborator`] when the agent rig fails, or when the
    ///   effect pipeline fails on a forced switch (the caller owns the fail-safe)
    pub fn switch_character(
        &mut self,
        forced: bool,
        lock: ActionLock,
        airborne: bool,
    ) -> Result<SwitchOutcome, SwitchError> {
        if !self.level.live {
            return Err(SwitchError::LevelNotLive(self.level.id.clone()));
        }
        if !forced && self.recovery.is_some() {
            return Ok(SwitchOutcome::Rejected(SwitchRejection::RecoveryInProgress));
        }

        let outgoing = self.roster.selected();
        let incoming = outgoing.other();

        if !forced && let Some(remaining_ms) = self.cooldown_remaining(outgoing) {
            tracing::debug!("Switch rejected: cooldown ({}ms left)", remaining_ms);
            return Ok(SwitchOutcome::Rejected(SwitchRejection::Cooldown {
                remaining_ms,
            }));
        }

        // Stamped before the remaining guards so rapid retries stay debounced.
        self.roster.record_mut(outgoing).last_switch_attempt = Some(self.now);

        if !forced
            && let ActionLock::Locked { remaining_ms } = lock
            && remaining_ms > self.config.action_lock_grace_ms
        {
            tracing::debug!("Switch rejected: action lock ({}ms left)", remaining_ms);
            return Ok(SwitchOutcome::Rejected(SwitchRejection::ActionLocked {
                remaining_ms,
            }));
        }

        if !self.roster.record(incoming).is_alive() {
            if forced {
                tracing::error!("Forced switch to exhausted character {} refused", incoming);
                return Err(SwitchError::ForcedTargetExhausted { target: incoming });
            }
            return Ok(SwitchOutcome::Rejected(SwitchRejection::TargetExhausted(
                incoming,
            )));
        }
        if forced {
            self.roster.record_mut(outgoing).auto_switch_available = false;
        }

        self.settle_pending_transition();

        let (Some(out_handle), Some(_)) = (self.handle(outgoing), self.handle(incoming)) else {
            return Err(SwitchError::HandlesNotCreated);
        };

        let position = self.incoming_position(out_handle, airborne)?;
        if let Err(err) = self.stage_switch(outgoing, incoming, out_handle, position) {
            if !forced {
                self.rollback_staging(outgoing);
            }
            return Err(err.into());
        }

        let id = TransitionId(self.next_transition_id);
        self.next_transition_id += 1;
        self.transition = Some(SwitchTransition {
            id,
            outgoing,
            incoming,
            position,
            phase: TransitionPhase::Pending,
        });

        let request = TransitionEffectRequest {
            transition: id,
            at: position,
            scale: self.config.transition_effect_scale,
            depth: self.config.transition_effect_depth,
        };
        let ticket = match self.ctx.effects.spawn_transition_effect(&request) {
            Ok(ticket) => ticket,
            Err(err) if forced => {
                tracing::error!("Transition effect failed during forced switch: {}", err);
                return Err(err.into());
            }
            Err(err) => {
                tracing::warn!("Transition effect failed, completing switch directly: {}", err);
                None
            }
        };

        let completion = match ticket {
            Some(ticket) => {
                let watchdog = ticket.duration_ms + self.config.transition_watchdog_grace_ms;
                self.schedule_in(watchdog, Continuation::CompleteTransition(id));
                SwitchCompletion::Pending {
                    effect_duration_ms: ticket.duration_ms,
                }
            }
            None => {
                if let Err(err) = self.finish_transition(id) {
                    self.drop_transition();
                    if !forced {
                        tracing::error!("Switch to {} failed at completion: {}", incoming, err);
                        self.rollback_staging(outgoing);
                    }
                    return Err(err.into());
                }
                SwitchCompletion::Applied
            }
        };

        tracing::info!("Switch {} -> {} ({:?})", outgoing, incoming, completion);
        Ok(SwitchOutcome::Switched {
            incoming,
            transition: id,
            completion,
        })
    }

    /// Completion continuation for a switch effect.
    ///
    /// Safe to call more than once and after the level is gone.
    pub fn complete_transition(&mut self, id: TransitionId) -> TransitionCompletion {
        if !self.level.live {
            tracing::debug!("Ignoring completion of {} after teardown", id);
            return TransitionCompletion::Stale;
        }
        match self.finish_transition(id) {
            Ok(true) => TransitionCompletion::Applied,
            Ok(false) => TransitionCompletion::Stale,
            Err(CollaboratorError::HandleGone(handle)) => {
                tracing::debug!("Completion of {} skipped: {} destroyed", id, handle);
                self.drop_transition();
                TransitionCompletion::HandleGone
            }
            Err(err) => {
                tracing::error!("Completion of {} failed: {}", id, err);
                self.drop_transition();
                TransitionCompletion::Failed
            }
        }
    }

    /// The switch waiting for its effect, if any.
    pub fn pending_transition(&self) -> Option<&SwitchTransition> {
        self.transition
            .as_ref()
            .filter(|transition| transition.phase == TransitionPhase::Pending)
    }

    /// Applies a pending transition immediately.
    pub(crate) fn settle_pending_transition(&mut self) {
        if let Some(id) = self.pending_transition().map(|transition| transition.id) {
            tracing::debug!("Settling pending {} before a new switch", id);
            self.complete_transition(id);
        }
    }

    /// Marks any pending transition as applied without touching the agents.
    pub(crate) fn drop_transition(&mut self) {
        if let Some(transition) = self.transition.as_mut() {
            transition.phase = TransitionPhase::Applied;
        }
    }

    fn cooldown_remaining(&self, selected: CharacterId) -> Option<u64> {
        let last = self.roster.record(selected).last_switch_attempt?;
        let elapsed = self.now.since(last);
        (elapsed <= self.config.switch_cooldown_ms)
            .then(|| self.config.switch_cooldown_ms - elapsed + 1)
    }

    fn incoming_position(
        &self,
        out_handle: AgentHandle,
        airborne: bool,
    ) -> Result<Position, CollaboratorError> {
        if self.ctx.world.level_transition_in_progress() {
            return Ok(self.ctx.world.spawn_point());
        }
        let current = self.ctx.agents.position(out_handle)?;
        if !airborne {
            return Ok(current);
        }
        self.ctx.agents.set_velocity(out_handle, Velocity::ZERO)?;
        Ok(self
            .ctx
            .agents
            .last_ground_position(out_handle)?
            .unwrap_or(current))
    }

    /// Hides the outgoing agent and places the incoming one, still invisible.
    fn stage_switch(
        &mut self,
        outgoing: CharacterId,
        incoming: CharacterId,
        out_handle: AgentHandle,
        position: Position,
    ) -> Result<(), CollaboratorError> {
        let agents = self.ctx.agents.clone();
        let in_handle = self
            .handle(incoming)
            .ok_or(CollaboratorError::HandleMissing(incoming))?;

        agents.set_visible(out_handle, false)?;
        agents.set_active(out_handle, false)?;
        agents.set_body_enabled(out_handle, false)?;
        self.roster.record_mut(outgoing).is_active = false;

        agents.set_position(in_handle, position)?;
        agents.set_visible(in_handle, false)?;
        self.roster.set_selected(incoming);
        self.roster.record_mut(incoming).last_switch_attempt = Some(self.now);
        Ok(())
    }

    /// Restores the outgoing agent after staging failed part-way.
    fn rollback_staging(&mut self, outgoing: CharacterId) {
        let position = self.position_or_spawn(outgoing);
        if let Err(err) = self.apply_agent_activation(outgoing, position) {
            tracing::error!("Rollback of failed switch also failed: {}", err);
        }
    }

    /// Runs the completion steps for `id`. Returns false when `id` is not pending.
    fn finish_transition(&mut self, id: TransitionId) -> Result<bool, CollaboratorError> {
        let Some(transition) = self.pending_transition().copied() else {
            return Ok(false);
        };
        if transition.id != id {
            tracing::debug!("Ignoring completion of {} (pending is {})", id, transition.id);
            return Ok(false);
        }

        let corrected = self.apply_agent_activation(transition.incoming, transition.position)?;
        if corrected {
            tracing::warn!(
                "Outgoing {} was still visible at completion; hidden",
                transition.outgoing
            );
        }
        self.drop_transition();
        Ok(true)
    }
}
