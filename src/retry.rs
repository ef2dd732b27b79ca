use std::time::Duration;

/// Doubling-delay schedule for transient detail-page failures.
///
/// Never runs dry; the attempt budget lives with the caller.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
}

impl Backoff {
    pub fn new(initial: Duration) -> Self {
        Self { next: initial }
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next;
        self.next = current.saturating_mul(2);
        Some(current)
    }
}
