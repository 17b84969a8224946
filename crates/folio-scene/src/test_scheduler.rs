//! Deterministic scheduler double driven by an explicit clock.

use crate::schedule::{Scheduler, Task, TaskHandle, When};

struct Entry {
    handle: TaskHandle,
    task: Task,
    when: When,
    scheduled_at_ms: f64,
    idle_seen: bool,
}

pub(crate) struct ManualScheduler {
    now_ms: f64,
    next_id: u32,
    entries: Vec<Entry>,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 1,
            entries: Vec::new(),
            cancelled: 0,
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    /// The host reports an idle period: idle-or-deadline tasks become due.
    pub fn signal_idle(&mut self) {
        for entry in &mut self.entries {
            if matches!(entry.when, When::IdleOrDeadline { .. }) {
                entry.idle_seen = true;
            }
        }
    }

    /// Remove and return the first task that is due.
    pub fn pop_due(&mut self) -> Option<Task> {
        let now = self.now_ms;
        let idx = self.entries.iter().position(|e| match e.when {
            When::After { delay_ms } => now >= e.scheduled_at_ms + f64::from(delay_ms),
            When::IdleOrDeadline { deadline_ms } => {
                e.idle_seen || now >= e.scheduled_at_ms + f64::from(deadline_ms)
            }
        })?;
        Some(self.entries.remove(idx).task)
    }

    pub fn when_of(&self, task: Task) -> Option<When> {
        self.entries.iter().find(|e| e.task == task).map(|e| e.when)
    }

    pub fn live_count(&self) -> usize {
        self.entries.len()
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, task: Task, when: When) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            task,
            when,
            scheduled_at_ms: self.now_ms,
            idle_seen: false,
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        if self.entries.len() < before {
            self.cancelled += 1;
        }
    }
}
