//! Timed continuations fired from the host loop.
//!
//! The controller never blocks: recovery pacing and switch watchdogs are
//! queued as [`Continuation`] values with a due time and fired by
//! `update()`. Each entry remembers the [`LevelEpoch`] it was scheduled in, so
//! continuations outliving a torn-down or restarted level are dropped instead
//! of mutating the new level.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::state::{EventId, GameTime, TransitionId};

/// Generation counter bumped whenever the level is torn down or recreated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LevelEpoch(pub u32);

impl LevelEpoch {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Deferred controller steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// Completes a switch whose effect never reported back.
    CompleteTransition(TransitionId),
    /// Try-again branch: respawn at the last checkpoint.
    RespawnAtCheckpoint,
    /// Replays the scripted event interrupted by the wipe.
    ReplayEvent(EventId),
    /// Game-over screen finished fading in.
    GameOverFadeDone,
    /// Game-over typewriter text finished.
    GameOverTypewriterDone,
    /// Game-over music finished (or timed out); restart the level.
    RestartLevel,
    /// No life pool: plain full-health respawn.
    FallbackRespawn,
}

#[derive(Debug)]
struct Scheduled {
    due: GameTime,
    seq: u64,
    epoch: LevelEpoch,
    task: Continuation,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Min-heap of continuations ordered by due time, then by scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: GameTime, epoch: LevelEpoch, task: Continuation) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Scheduled {
            due,
            seq,
            epoch,
            task,
        }));
    }

    /// Removes and returns the earliest continuation due at or before `now`.
    pub fn pop_due(&mut self, now: GameTime) -> Option<(LevelEpoch, Continuation)> {
        let due = self.heap.peek().is_some_and(|Reverse(next)| next.due <= now);
        if !due {
            return None;
        }
        self.heap
            .pop()
            .map(|Reverse(scheduled)| (scheduled.epoch, scheduled.task))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
