//! Host-driven periodic tick schedule.
//!
//! The host calls `TodoController::poll(now)` from whatever timer it owns;
//! this type only decides whether a scan is due. Stopping clears the next
//! deadline, so a stopped schedule never fires until restarted.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    interval_ms: i64,
    next_due_ms: Option<i64>,
}

impl TickSchedule {
    pub fn new(interval_ms: i64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    /// Starts (or restarts) the schedule; the first tick is due immediately.
    pub fn start(&mut self, now_ms: i64) {
        self.next_due_ms = Some(now_ms);
    }

    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn next_due_ms(&self) -> Option<i64> {
        self.next_due_ms
    }

    /// Consumes a due tick. Returns `true` when the caller should scan.
    pub fn take_due(&mut self, now_ms: i64) -> bool {
        match self.next_due_ms {
            Some(due) if now_ms >= due => {
                self.next_due_ms = Some(now_ms.saturating_add(self.interval_ms));
                true
            }
            _ => false,
        }
    }
}
