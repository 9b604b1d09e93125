use std::time::Duration;

use tokio::time::Instant;

/// Trailing-edge debounce: each [`schedule`](Debouncer::schedule) pushes the
/// deadline out to `now + window`; the action fires once the deadline passes
/// without another schedule.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// (Re)starts the quiet window.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Clears the deadline and returns true if it had passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Drops any pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reschedule_pushes_deadline() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(1000));
        d.schedule(start);
        d.schedule(start + Duration::from_millis(400));
        assert!(!d.take_due(start + Duration::from_millis(1000)));
        assert!(d.take_due(start + Duration::from_millis(1400)));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(10));
        assert!(!d.cancel());
        d.schedule(start);
        assert!(d.cancel());
        assert!(!d.is_due(start + Duration::from_secs(1)));
    }
}
