//! Life pool and checkpoint collaborators.

use crate::state::Position;

/// Finite pool of retries before a full level restart.
pub trait LifeLedger: Send + Sync {
    /// Remaining lives, or `None` when this ledger does not track a pool.
    ///
    /// An untracked pool selects the simple full-health respawn instead of
    /// the tiered try-again / game-over flow.
    fn lives(&self) -> Option<u32>;

    /// Removes one life (saturating at zero) and returns the remaining count.
    fn lose_life(&self) -> u32;
}

/// Ledger used when the level has no life pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLifePool;

impl LifeLedger for NoLifePool {
    fn lives(&self) -> Option<u32> {
        None
    }

    fn lose_life(&self) -> u32 {
        0
    }
}

pub trait CheckpointOracle: Send + Sync {
    /// Most recently reached checkpoint, if any.
    fn last_checkpoint(&self) -> Option<Position>;
}

/// No checkpoints: respawns fall back to the level spawn point.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCheckpoints;

impl CheckpointOracle for NoCheckpoints {
    fn last_checkpoint(&self) -> Option<Position> {
        None
    }
}
