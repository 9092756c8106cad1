//! Per-tick regeneration and continuation dispatch.

use crate::config::RosterConfig;
use crate::schedule::{Continuation, LevelEpoch};

use super::RosterController;

impl RosterController {
    /// Advances the controller clock by `delta_ms`.
    ///
    /// Regeneration is applied first, then every continuation that came due.
    /// Damage raised by the host during the same frame should be applied after
    /// this call.
    pub fn update(&mut self, delta_ms: u64) {
        if !self.level.live {
            return;
        }
        self.now = self.now + delta_ms;
        self.regenerate(delta_ms);
        self.run_due_continuations();
    }

    /// Regenerates the inactive, living, not-full agent. Returns true when any
    /// health value changed (and the HUD was refreshed once).
    ///
    /// The selected agent is skipped even while a pending switch has not yet
    /// flagged it active.
    pub(crate) fn regenerate(&mut self, delta_ms: u64) -> bool {
        let threshold = self.config.auto_switch_recovery_percent;
        let selected = self.roster.selected();
        let mut changed = false;

        for record in self.roster.records_mut() {
            if record.id == selected || !record.can_regenerate() {
                record.regen_carry = 0.0;
                continue;
            }

            record.regen_carry += f64::from(record.regen_per_second) * delta_ms as f64 / 1000.0;
            let whole = record.regen_carry.floor();
            if whole < 1.0 {
                continue;
            }
            record.regen_carry -= whole;

            let before = record.health.current();
            let after = record.health.restore(whole as u32);
            if after != before {
                changed = true;
            }
            if record.refresh_auto_switch(threshold) {
                tracing::debug!("{} recovered to {}%: auto-switch available", record.id, record.health.percent());
            }
            if record.health.is_full() {
                record.regen_carry = 0.0;
            }
        }

        if changed {
            self.push_roster_health();
        }
        changed
    }

    fn run_due_continuations(&mut self) {
        let mut fired = 0;
        while fired < RosterConfig::MAX_CONTINUATION_CHAIN {
            let Some((epoch, task)) = self.timers.pop_due(self.now) else {
                return;
            };
            self.fire(epoch, task);
            fired += 1;
        }
        tracing::warn!(
            "Continuation chain limit reached at {}; {} left for the next update",
            self.now,
            self.timers.len()
        );
    }

    fn fire(&mut self, epoch: LevelEpoch, task: Continuation) {
        if epoch != self.level.epoch || !self.level.live {
            tracing::debug!("Dropping {:?} from a previous level", task);
            return;
        }
        match task {
            Continuation::CompleteTransition(id) => {
                self.complete_transition(id);
            }
            Continuation::RespawnAtCheckpoint => self.respawn_at_checkpoint(),
            Continuation::ReplayEvent(event) => self.replay_event(&event),
            Continuation::GameOverFadeDone => self.on_game_over_fade_done(),
            Continuation::GameOverTypewriterDone => self.on_game_over_typewriter_done(),
            Continuation::RestartLevel => self.restart_level(),
            Continuation::FallbackRespawn => self.fallback_respawn(),
        }
    }
}
