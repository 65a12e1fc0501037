//! Idle timeout detection.
//!
//! Pure comparison against the selection controller's interaction timestamp;
//! no state of its own. While idle the driver re-issues the idle render and
//! the all-LEDs-on vector every tick - cheap and idempotent.

/// Compares elapsed time since the last interaction against a timeout.
#[derive(Debug, Clone, Copy)]
pub struct IdleWatchdog {
    timeout_ms: u64,
}

impl IdleWatchdog {
    pub fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }

    /// True when strictly more than the timeout has passed since the last
    /// accepted interaction.
    pub fn check(&self, last_interaction_ms: u64, now_ms: u64) -> bool {
        now_ms.saturating_sub(last_interaction_ms) > self.timeout_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_only_after_timeout_elapses() {
        let watchdog = IdleWatchdog::new(5_000);

        assert!(!watchdog.check(0, 0));
        assert!(!watchdog.check(0, 4_999));
        assert!(!watchdog.check(0, 5_000)); // boundary: strictly greater
        assert!(watchdog.check(0, 5_001));
        assert!(watchdog.check(0, 6_000));
    }

    #[test]
    fn fresh_interaction_clears_idle() {
        let watchdog = IdleWatchdog::new(5_000);
        assert!(watchdog.check(0, 6_000));
        assert!(!watchdog.check(6_000, 6_000));
    }

    #[test]
    fn clock_behind_timestamp_is_not_idle() {
        let watchdog = IdleWatchdog::new(5_000);
        assert!(!watchdog.check(10_000, 9_000));
    }
}
