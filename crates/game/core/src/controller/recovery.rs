//! Recovery after both agents are down.
//!
//! | lives before this death | branch       | effect                                        |
//! |-------------------------|--------------|-----------------------------------------------|
//! | untracked (no pool)     | simple       | full-health respawn in place after a delay    |
//! | more than one           | try again    | respawn at checkpoint; one life lost then     |
//! | one or none             | game over    | lives to zero now; level restart after audio  |
//!
//! Each step is a [`Continuation`] in the timer queue, so a level torn down
//! mid-sequence drops the remaining steps.

use crate::env::{CueCompletion, CueId, LevelRestart};
use crate::schedule::Continuation;
use crate::state::{EventDeathContext, EventId, Velocity};

use super::RosterController;
use super::suspend::ResumeScope;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryBranch {
    TryAgain,
    GameOver,
    SimpleRespawn,
}

/// What [`RosterController::handle_game_over`] started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryStart {
    TryAgain { lives_before: u32 },
    GameOver,
    SimpleRespawn,
    /// A recovery sequence was already running; nothing changed.
    AlreadyRunning,
    LevelNotLive,
}

/// The running recovery sequence. Its presence is the session flag that
/// makes repeated triggers no-ops.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RecoverySession {
    pub(crate) branch: RecoveryBranch,
    /// Game-over music the controller is waiting on, if it signals completion.
    pub(crate) awaiting_cue: Option<CueId>,
}

impl RecoverySession {
    fn new(branch: RecoveryBranch) -> Self {
        Self {
            branch,
            awaiting_cue: None,
        }
    }
}

impl RosterController {
    /// Starts the recovery sequence. Idempotent while a sequence is running.
    pub fn handle_game_over(&mut self) -> RecoveryStart {
        if !self.level.live {
            return RecoveryStart::LevelNotLive;
        }
        if let Some(session) = &self.recovery {
            tracing::debug!("Game over ignored: {:?} recovery running", session.branch);
            return RecoveryStart::AlreadyRunning;
        }

        self.drop_transition();
        self.suspend_gameplay();

        match self.ctx.lives.lives() {
            None => self.begin_simple_respawn(),
            Some(lives) if lives > 1 => self.begin_try_again(lives),
            Some(_) => self.begin_game_over(),
        }
    }

    /// Completion signal for a cue returned as [`CueCompletion::Signalled`].
    ///
    /// Unknown or late cues are ignored.
    pub fn notify_audio_complete(&mut self, cue: CueId) {
        if !self.level.live {
            return;
        }
        let awaited = self.recovery.as_ref().and_then(|session| session.awaiting_cue);
        if awaited != Some(cue) {
            tracing::debug!("Ignoring completion of cue {:?}", cue);
            return;
        }
        self.restart_level();
    }

    fn begin_try_again(&mut self, lives_before: u32) -> RecoveryStart {
        tracing::info!("Both down with {} lives; trying again", lives_before);
        self.recovery = Some(RecoverySession::new(RecoveryBranch::TryAgain));

        if self.ctx.events.is_event_active()
            && let Some(event_id) = self.ctx.events.active_event()
        {
            tracing::debug!("Death during event {}", event_id);
            self.event_death_context = Some(EventDeathContext { event_id });
        }

        self.ctx.hud.show_try_again_overlay();
        self.ctx.audio.play_try_again_cue();
        self.schedule_in(self.config.try_again_delay_ms, Continuation::RespawnAtCheckpoint);
        RecoveryStart::TryAgain { lives_before }
    }

    fn begin_game_over(&mut self) -> RecoveryStart {
        tracing::info!("Both down with no lives left; game over");
        self.recovery = Some(RecoverySession::new(RecoveryBranch::GameOver));

        let remaining = self.ctx.lives.lose_life();
        self.ctx.hud.update_lives_display(remaining, true);
        self.ctx.hud.show_game_over_overlay();
        self.ctx.audio.play_game_over_voice();

        let fade_ms = self.ctx.hud.fade_in_game_over_screen();
        self.schedule_in(fade_ms, Continuation::GameOverFadeDone);
        RecoveryStart::GameOver
    }

    fn begin_simple_respawn(&mut self) -> RecoveryStart {
        tracing::info!("Both down without a life pool; respawning in place");
        self.recovery = Some(RecoverySession::new(RecoveryBranch::SimpleRespawn));
        self.schedule_in(
            self.config.fallback_respawn_delay_ms,
            Continuation::FallbackRespawn,
        );
        RecoveryStart::SimpleRespawn
    }

    pub(crate) fn respawn_at_checkpoint(&mut self) {
        if self.recovery_branch() != Some(RecoveryBranch::TryAgain) {
            return;
        }
        // Cleared first: anything below may re-enter the cascade.
        self.recovery = None;

        let remaining = self.ctx.lives.lose_life();
        self.ctx.hud.update_lives_display(remaining, true);

        self.roster.reset_vitals();
        self.ctx.opponents.remove_all();
        self.frozen_opponents.clear();

        let position = self
            .ctx
            .checkpoints
            .last_checkpoint()
            .unwrap_or_else(|| self.ctx.world.spawn_point());
        tracing::info!("Respawning at {} ({} lives left)", position, remaining);

        let agents = self.ctx.agents.clone();
        for handle in self.roster.records().filter_map(|record| record.handle) {
            let placed = agents
                .set_position(handle, position)
                .and_then(|()| agents.set_velocity(handle, Velocity::ZERO));
            if let Err(err) = placed {
                tracing::warn!("Could not place {} at checkpoint: {}", handle, err);
            }
        }
        self.ctx.camera.reset_scroll();

        let selected = self.roster.selected();
        if let Err(err) = self.apply_agent_activation(selected, position) {
            tracing::error!("Respawn activation of {} failed: {}", selected, err);
        }

        match self.event_death_context.take() {
            Some(context) => {
                self.resume_gameplay(ResumeScope::Base);
                self.schedule_in(
                    self.config.event_replay_settle_ms,
                    Continuation::ReplayEvent(context.event_id),
                );
            }
            None => self.resume_gameplay(ResumeScope::Full),
        }
    }

    pub(crate) fn replay_event(&mut self, event: &EventId) {
        tracing::info!("Replaying event {}", event);
        self.ctx.events.replay_event(event);
    }

    pub(crate) fn on_game_over_fade_done(&mut self) {
        if self.recovery_branch() != Some(RecoveryBranch::GameOver) {
            return;
        }
        let typewriter_ms = self.ctx.hud.start_game_over_typewriter();
        self.schedule_in(typewriter_ms, Continuation::GameOverTypewriterDone);
    }

    pub(crate) fn on_game_over_typewriter_done(&mut self) {
        if self.recovery_branch() != Some(RecoveryBranch::GameOver) {
            return;
        }
        let delay_ms = match self.ctx.audio.play_game_over_music() {
            CueCompletion::Signalled(cue) => {
                if let Some(session) = self.recovery.as_mut() {
                    session.awaiting_cue = Some(cue);
                }
                self.config.game_over_audio_timeout_ms
            }
            CueCompletion::Duration(duration_ms) => duration_ms,
            CueCompletion::Unknown => self.config.game_over_fallback_delay_ms,
        };
        self.schedule_in(delay_ms, Continuation::RestartLevel);
    }

    /// Recreates the level with the score, level and character preserved.
    pub(crate) fn restart_level(&mut self) {
        if self.recovery_branch() != Some(RecoveryBranch::GameOver) {
            return;
        }
        let plan = LevelRestart {
            level_id: self.level.id.clone(),
            character: self.roster.selected(),
            score_at_level_start: self.ctx.level.score_at_level_start(),
            suppress_event_replay: true,
        };
        tracing::info!(
            "Restarting level {} as {} (score {})",
            plan.level_id,
            plan.character,
            plan.score_at_level_start
        );

        self.resume_gameplay(ResumeScope::Full);
        self.level.epoch = self.level.epoch.next();
        self.timers.clear();
        self.transition = None;
        self.recovery = None;
        self.event_death_context = None;
        self.roster.reinitialize(plan.character, &self.config);

        self.ctx.level.restart_level(&plan);
    }

    pub(crate) fn fallback_respawn(&mut self) {
        if self.recovery_branch() != Some(RecoveryBranch::SimpleRespawn) {
            return;
        }
        self.recovery = None;
        self.roster.reset_vitals();

        let selected = self.roster.selected();
        let position = self.position_or_spawn(selected);
        if let Err(err) = self.apply_agent_activation(selected, position) {
            tracing::error!("Fallback respawn of {} failed: {}", selected, err);
        }
        self.resume_gameplay(ResumeScope::Full);
    }
}
