use std::time::Duration;

use crate::registry::RoomId;

/// Work deferred until overlays have settled. Only moves focus or scrolls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    RevealRoom { room_id: RoomId },
    FocusModalClose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredTask {
    pub due: Duration,
    pub generation: u64,
    pub action: DeferredAction,
}

/// Delay queue driven by an explicit clock rather than wall time.
#[derive(Debug, Default)]
pub struct Scheduler {
    clock: Duration,
    pending: Vec<DeferredTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, generation: u64, action: DeferredAction) {
        self.pending.push(DeferredTask {
            due: self.clock + delay,
            generation,
            action,
        });
    }

    /// Move the clock forward and return the tasks that came due, oldest
    /// deadline first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<DeferredTask> {
        self.clock += elapsed;
        let now = self.clock;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|task| task.due <= now);
        self.pending = waiting;
        due.sort_by_key(|task| task.due);
        due
    }

    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
