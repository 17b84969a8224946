//! Deferred work the composer asks the host to run later.
//!
//! The host owns the clock and the callbacks; the composer only names the
//! task, says when it may run, and keeps the handle so it can cancel.

/// When a scheduled task becomes runnable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    /// At the next idle period, but no later than `deadline_ms` from now.
    IdleOrDeadline { deadline_ms: u32 },
    /// After a fixed delay.
    After { delay_ms: u32 },
}

/// Work items the composer schedules on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Sample signals, classify the device and select a profile.
    Classify,
    /// Make the mounted (transparent) scene visible and start the fade.
    Reveal,
}

/// Host-issued identifier for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u32);

/// Host capability to run a task later and to cancel it.
///
/// Implementations deliver a task at most once, and never after `cancel`.
pub trait Scheduler {
    fn schedule(&mut self, task: Task, when: When) -> TaskHandle;
    fn cancel(&mut self, handle: TaskHandle);
}
