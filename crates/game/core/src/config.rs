use crate::state::CharacterId;

/// Static tuning for one agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterProfile {
    pub max_health: u32,
    pub regen_per_second: u32,
}

/// Controller timings and thresholds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterConfig {
    pub tireek: CharacterProfile,
    pub tryston: CharacterProfile,

    /// Minimum time between two switch attempts by the selected agent.
    pub switch_cooldown_ms: u64,
    /// A switch is allowed mid-attack once the remaining lock is within this window.
    pub action_lock_grace_ms: u64,
    /// Health percentage at which a consumed auto-switch becomes available again.
    pub auto_switch_recovery_percent: u32,

    /// Delay between the "try again" cue and the checkpoint respawn.
    pub try_again_delay_ms: u64,
    /// Delay between a respawn and replaying the interrupted scripted event.
    pub event_replay_settle_ms: u64,
    /// Used when the game-over music reports neither completion nor duration.
    pub game_over_fallback_delay_ms: u64,
    /// Upper bound on waiting for a signalled game-over music completion.
    pub game_over_audio_timeout_ms: u64,
    /// Delay for the simple respawn used when no life pool is tracked.
    pub fallback_respawn_delay_ms: u64,

    pub transition_effect_scale: f32,
    pub transition_effect_depth: i32,
    /// Added to the effect duration before the controller completes a switch itself.
    pub transition_watchdog_grace_ms: u64,
}

impl RosterConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TIREEK: CharacterProfile = CharacterProfile {
        max_health: 100,
        regen_per_second: 2,
    };
    pub const DEFAULT_TRYSTON: CharacterProfile = CharacterProfile {
        max_health: 100,
        regen_per_second: 3,
    };
    pub const DEFAULT_SWITCH_COOLDOWN_MS: u64 = 500;
    pub const DEFAULT_ACTION_LOCK_GRACE_MS: u64 = 100;
    pub const DEFAULT_AUTO_SWITCH_RECOVERY_PERCENT: u32 = 80;
    pub const DEFAULT_TRY_AGAIN_DELAY_MS: u64 = 2_000;
    pub const DEFAULT_EVENT_REPLAY_SETTLE_MS: u64 = 500;
    pub const DEFAULT_GAME_OVER_FALLBACK_DELAY_MS: u64 = 4_000;
    pub const DEFAULT_GAME_OVER_AUDIO_TIMEOUT_MS: u64 = 15_000;
    pub const DEFAULT_FALLBACK_RESPAWN_DELAY_MS: u64 = 1_500;
    pub const DEFAULT_TRANSITION_EFFECT_SCALE: f32 = 1.5;
    pub const DEFAULT_TRANSITION_EFFECT_DEPTH: i32 = 100;
    pub const DEFAULT_TRANSITION_WATCHDOG_GRACE_MS: u64 = 50;

    // ===== compile-time limits =====
    /// Maximum zero-delay continuations fired in a single update.
    pub const MAX_CONTINUATION_CHAIN: usize = 64;

    pub fn new() -> Self {
        Self {
            tireek: Self::DEFAULT_TIREEK,
            tryston: Self::DEFAULT_TRYSTON,
            switch_cooldown_ms: Self::DEFAULT_SWITCH_COOLDOWN_MS,
            action_lock_grace_ms: Self::DEFAULT_ACTION_LOCK_GRACE_MS,
            auto_switch_recovery_percent: Self::DEFAULT_AUTO_SWITCH_RECOVERY_PERCENT,
            try_again_delay_ms: Self::DEFAULT_TRY_AGAIN_DELAY_MS,
            event_replay_settle_ms: Self::DEFAULT_EVENT_REPLAY_SETTLE_MS,
            game_over_fallback_delay_ms: Self::DEFAULT_GAME_OVER_FALLBACK_DELAY_MS,
            game_over_audio_timeout_ms: Self::DEFAULT_GAME_OVER_AUDIO_TIMEOUT_MS,
            fallback_respawn_delay_ms: Self::DEFAULT_FALLBACK_RESPAWN_DELAY_MS,
            transition_effect_scale: Self::DEFAULT_TRANSITION_EFFECT_SCALE,
            transition_effect_depth: Self::DEFAULT_TRANSITION_EFFECT_DEPTH,
            transition_watchdog_grace_ms: Self::DEFAULT_TRANSITION_WATCHDOG_GRACE_MS,
        }
    }

    pub fn profile(&self, id: CharacterId) -> CharacterProfile {
        match id {
            CharacterId::Tireek => self.tireek,
            CharacterId::Tryston => self.tryston,
        }
    }

    pub fn with_switch_cooldown_ms(mut self, cooldown_ms: u64) -> Self {
        self.switch_cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_try_again_delay_ms(mut self, delay_ms: u64) -> Self {
        self.try_again_delay_ms = delay_ms;
        self
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self::new()
    }
}
