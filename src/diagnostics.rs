//! Rate limiting for recoverable-condition warnings.
//!
//! A [`WarningThrottle`] lets the first occurrence through and then one in
//! every `interval`.

use std::sync::atomic::{AtomicU64, Ordering};

/// Occurrence counter deciding when a warning may be logged.
#[derive(Debug)]
pub struct WarningThrottle {
    interval: u64,
    occurrences: AtomicU64,
}

impl WarningThrottle {
    /// Logs the first occurrence only.
    pub const fn once() -> Self {
        Self {
            interval: 0,
            occurrences: AtomicU64::new(0),
        }
    }

    /// Logs the first occurrence and then every `interval`-th one.
    pub const fn every(interval: u64) -> Self {
        Self {
            interval,
            occurrences: AtomicU64::new(0),
        }
    }

    /// Records one occurrence and returns whether it should be logged.
    #[inline]
    pub fn should_log(&self) -> bool {
        let seen = self.occurrences.fetch_add(1, Ordering::Relaxed);
        match self.interval {
            0 => seen == 0,
            interval => seen % interval == 0,
        }
    }

    /// Number of occurrences recorded so far, logged or not.
    pub fn occurrences(&self) -> u64 {
        self.occurrences.load(Ordering::Relaxed)
    }
}

impl Clone for WarningThrottle {
    fn clone(&self) -> Self {
        Self {
            interval: self.interval,
            occurrences: AtomicU64::new(self.occurrences()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_logs_first_occurrence_only() {
        let t = WarningThrottle::once();
        assert!(t.should_log());
        assert!(!t.should_log());
        assert!(!t.should_log());
        assert_eq!(t.occurrences(), 3);
    }

    #[test]
    fn every_logs_on_interval() {
        let t = WarningThrottle::every(3);
        let logged: Vec<bool> = (0..7).map(|_| t.should_log()).collect();
        assert_eq!(logged, vec![true, false, false, true, false, false, true]);
    }

    #[test]
    fn clone_keeps_count() {
        let t = WarningThrottle::once();
        t.should_log();
        let c = t.clone();
        assert!(!c.should_log());
    }
}
