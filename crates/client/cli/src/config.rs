//! Harness configuration loaded from the environment.
use std::env;

use tagteam_core::{CharacterId, RosterConfig};

/// Settings for one scripted session.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub roster: RosterConfig,
    pub starting_character: CharacterId,
    pub starting_lives: u32,
    /// Host loop step in milliseconds.
    pub tick_ms: u64,
}

impl SimConfig {
    pub const DEFAULT_STARTING_LIVES: u32 = 2;
    pub const DEFAULT_TICK_MS: u64 = 16;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TAGTEAM_SWITCH_COOLDOWN_MS` - Minimum time between switches (default: 500)
    /// - `TAGTEAM_TRY_AGAIN_DELAY_MS` - Delay before a checkpoint respawn (default: 2000)
    /// - `TAGTEAM_STARTING_LIVES` - Size of the life pool (default: 2)
    /// - `TAGTEAM_TICK_MS` - Host loop step (default: 16)
    /// - `TAGTEAM_STARTING_CHARACTER` - `tireek` or `tryston` (default: tireek)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(cooldown) = read_env::<u64>("TAGTEAM_SWITCH_COOLDOWN_MS") {
            config.roster = config.roster.with_switch_cooldown_ms(cooldown);
        }
        if let Some(delay) = read_env::<u64>("TAGTEAM_TRY_AGAIN_DELAY_MS") {
            config.roster = config.roster.with_try_again_delay_ms(delay);
        }
        if let Some(lives) = read_env::<u32>("TAGTEAM_STARTING_LIVES") {
            config.starting_lives = lives;
        }
        if let Some(tick) = read_env::<u64>("TAGTEAM_TICK_MS") {
            config.tick_ms = tick.max(1);
        }
        if let Some(character) = read_env::<CharacterId>("TAGTEAM_STARTING_CHARACTER") {
            config.starting_character = character;
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            roster: RosterConfig::default(),
            starting_character: CharacterId::Tireek,
            starting_lives: Self::DEFAULT_STARTING_LIVES,
            tick_ms: Self::DEFAULT_TICK_MS,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
