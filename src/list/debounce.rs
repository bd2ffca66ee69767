use tokio::time::{Duration, Instant};

/// A single pending value released once input has been quiet for `interval`.
///
/// Scheduling replaces whatever was pending and restarts the wait, so only
/// the latest value is ever released (trailing edge).
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: Instant,
    value: T,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Returns the value this call superseded, if any.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        self.pending
            .replace(Pending {
                deadline: now + self.interval,
                value,
            })
            .map(|p| p.value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending value if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.deadline <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }
}
