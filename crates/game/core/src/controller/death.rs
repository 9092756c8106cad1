//! Death cascade: what happens when the active agent runs out of health.

use crate::state::CharacterId;

use super::{ActionLock, RecoveryStart, RosterController, SwitchOutcome};

/// Why a cascade trigger was a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CascadeIgnored {
    /// The active agent still has health; the trigger was stale or duplicated.
    ActiveStillAlive,
    /// A recovery sequence is already running.
    RecoveryInProgress,
    LevelNotLive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CascadeOutcome {
    Ignored(CascadeIgnored),
    /// The partner took over. `fail_safe` is true when the normal switch
    /// failed and the manual activation path was used.
    SurvivorSwitch {
        survivor: CharacterId,
        fail_safe: bool,
    },
    /// Recovery started. `escalated` is true when the survivor could not be
    /// activated at all.
    BothDown {
        escalated: bool,
        recovery: RecoveryStart,
    },
}

impl RosterController {
    /// Runs the death cascade for the active agent.
    ///
    /// Call once the active agent's health reaches zero. Repeated or stale
    /// calls are ignored.
    pub fn handle_character_down(&mut self, lock: ActionLock, airborne: bool) -> CascadeOutcome {
        if !self.level.live {
            return CascadeOutcome::Ignored(CascadeIgnored::LevelNotLive);
        }

        let fallen = self.roster.selected();
        let record = self.roster.record(fallen);
        if record.is_alive() {
            tracing::warn!(
                "Character-down for {} ignored: still at {}/{}",
                fallen,
                record.health.current(),
                record.health.maximum()
            );
            return CascadeOutcome::Ignored(CascadeIgnored::ActiveStillAlive);
        }
        if self.recovery.is_some() {
            tracing::debug!("Character-down ignored: recovery already running");
            return CascadeOutcome::Ignored(CascadeIgnored::RecoveryInProgress);
        }

        let survivor = fallen.other();
        if !self.roster.record(survivor).is_alive() {
            tracing::info!("Both characters down");
            return CascadeOutcome::BothDown {
                escalated: false,
                recovery: self.handle_game_over(),
            };
        }

        let failure = match self.switch_character(true, lock, airborne) {
            Ok(SwitchOutcome::Switched { .. }) => None,
            Ok(SwitchOutcome::Rejected(rejection)) => Some(format!("{:?}", rejection)),
            Err(err) => Some(err.to_string()),
        };
        let Some(reason) = failure else {
            tracing::info!("{} down; {} takes over", fallen, survivor);
            return CascadeOutcome::SurvivorSwitch {
                survivor,
                fail_safe: false,
            };
        };

        tracing::error!("Forced switch to {} failed ({}); using fail-safe", survivor, reason);
        if self.fail_safe_switch(fallen, survivor) {
            return CascadeOutcome::SurvivorSwitch {
                survivor,
                fail_safe: true,
            };
        }

        tracing::error!("Fail-safe switch failed; escalating to game over");
        CascadeOutcome::BothDown {
            escalated: true,
            recovery: self.handle_game_over(),
        }
    }

    /// Activates `survivor` at the fallen agent's last position without the
    /// effect pipeline. Returns false when the agent rig refused.
    fn fail_safe_switch(&mut self, fallen: CharacterId, survivor: CharacterId) -> bool {
        self.drop_transition();
        let position = self.position_or_spawn(fallen);
        match self.apply_agent_activation(survivor, position) {
            Ok(_) => true,
            Err(err) => {
                tracing::error!("Fail-safe activation of {} failed: {}", survivor, err);
                false
            }
        }
    }
}
