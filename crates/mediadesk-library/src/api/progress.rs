//! Monotonic upload progress.

use std::sync::Arc;

use tokio::sync::watch;

/// Highest value reported while a transfer is still outstanding.
const IN_FLIGHT_CEILING: u8 = 99;

/// Shared percentage in `0..=100` that only moves forward until reset.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    tx: Arc<watch::Sender<u8>>,
}

impl ProgressReporter {
    /// Create a reporter at 0%.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Raise progress to `percent`. Lower values are ignored.
    pub fn report(&self, percent: u8) {
        let percent = percent.min(100);
        self.tx.send_if_modified(|current| {
            if percent > *current {
                *current = percent;
                true
            } else {
                false
            }
        });
    }

    /// Report `done` out of `total` units. Never reaches 100; only
    /// [`ProgressReporter::complete`] does.
    pub fn report_fraction(&self, done: u64, total: u64) {
        if total == 0 {
            return;
        }
        let scaled = done.min(total).saturating_mul(IN_FLIGHT_CEILING as u64) / total;
        self.report(scaled as u8);
    }

    /// Mark the transfer as finished.
    pub fn complete(&self) {
        self.report(100);
    }

    /// Return to 0%, regardless of the current value.
    pub fn reset(&self) {
        self.tx.send_replace(0);
    }

    /// Current percentage.
    pub fn current(&self) -> u8 {
        *self.tx.borrow()
    }

    /// Watch progress changes.
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.tx.subscribe()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_monotonic() {
        let progress = ProgressReporter::new();
        progress.report(40);
        progress.report(10);
        assert_eq!(progress.current(), 40);
        progress.report(250);
        assert_eq!(progress.current(), 100);
    }

    #[test]
    fn test_fraction_stays_below_complete() {
        let progress = ProgressReporter::new();
        progress.report_fraction(10, 0);
        assert_eq!(progress.current(), 0);
        progress.report_fraction(50, 100);
        assert_eq!(progress.current(), 49);
        progress.report_fraction(100, 100);
        assert_eq!(progress.current(), 99);
        progress.complete();
        assert_eq!(progress.current(), 100);
        progress.reset();
        assert_eq!(progress.current(), 0);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let progress = ProgressReporter::new();
        let mut rx = progress.subscribe();
        progress.report(30);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 30);
    }
}
