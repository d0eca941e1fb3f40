//! Single-threaded queue of deferred tasks.
//!
//! Time is virtual: the owner advances the queue by the elapsed duration and
//! receives every task that came due. Each scheduled task carries a
//! [`CancelToken`]; cancelled tasks are dropped instead of delivered.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{instrument, trace};

/// Shared flag that cancels one scheduled task.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    /// Creates a live token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the task holding this token.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Work the store defers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Latch the won flag after the settle delay.
    LatchWin,
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    token: CancelToken,
    task: Deferred,
}

/// Deferred tasks ordered by due time.
#[derive(Debug, Default)]
pub struct TaskQueue {
    now: Duration,
    tasks: Vec<Scheduled>,
}

impl TaskQueue {
    /// Creates an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `task` to come due after `delay`.
    ///
    /// Tasks due at the same instant are delivered in scheduling order.
    #[instrument(skip(self))]
    pub fn schedule(&mut self, delay: Duration, task: Deferred) -> CancelToken {
        let token = CancelToken::new();
        let due = self.now + delay;
        let index = self.tasks.partition_point(|s| s.due <= due);
        self.tasks.insert(
            index,
            Scheduled {
                due,
                token: token.clone(),
                task,
            },
        );
        token
    }

    /// Moves time forward and returns every live task that came due.
    #[instrument(skip(self))]
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Deferred> {
        self.now += elapsed;
        let now = self.now;
        let split = self.tasks.partition_point(|s| s.due <= now);
        let due: Vec<Deferred> = self
            .tasks
            .drain(..split)
            .filter(|s| !s.token.is_cancelled())
            .map(|s| s.task)
            .collect();
        trace!(fired = due.len(), remaining = self.tasks.len());
        due
    }

    /// Time left until the earliest live task, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .find(|s| !s.token.is_cancelled())
            .map(|s| s.due.saturating_sub(self.now))
    }

    /// Number of live tasks.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|s| !s.token.is_cancelled()).count()
    }

    /// Cancels and drops every task.
    pub fn clear(&mut self) {
        for scheduled in self.tasks.drain(..) {
            scheduled.token.cancel();
        }
    }
}
