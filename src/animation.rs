use std::time::{Duration, Instant};

/// A repeating timer owned by one component.
///
/// The owner polls it from its own loop; nothing runs in the background, so
/// stopping the ticker (or dropping its owner) is all the cleanup needed.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// A stopped ticker firing every `interval` once started. A zero
    /// interval yields a ticker that never fires.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start (or restart) counting from `now`.
    pub fn start(&mut self, now: Instant) {
        if self.interval.is_zero() {
            return;
        }
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// `true` once per elapsed interval. Missed ticks are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, if running.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
