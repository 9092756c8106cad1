//! World layout and level lifecycle.

use crate::state::{CharacterId, LevelId, Position};

pub trait WorldOracle: Send + Sync {
    fn spawn_point(&self) -> Position;

    /// True while the host is moving between levels; switches then place the
    /// incoming agent at the spawn point instead of any live position.
    fn level_transition_in_progress(&self) -> bool {
        false
    }
}

/// Values carried across a full level restart.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelRestart {
    pub level_id: LevelId,
    pub character: CharacterId,
    pub score_at_level_start: u64,
    /// Scripted events must not auto-replay in the recreated level.
    pub suppress_event_replay: bool,
}

/// Tears down and recreates levels.
pub trait LevelDirector: Send + Sync {
    fn score_at_level_start(&self) -> u64;

    fn restart_level(&self, plan: &LevelRestart);
}

/// Restart requests are dropped; the controller still resets its own state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLevelDirector;

impl LevelDirector for NoLevelDirector {
    fn score_at_level_start(&self) -> u64 {
        0
    }

    fn restart_level(&self, _plan: &LevelRestart) {}
}
