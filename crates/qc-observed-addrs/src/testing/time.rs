use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::Timestamp;
use crate::ports::TimeSource;

/// Thread-safe time source that only moves when told to.
///
/// Lets expiry tests advance virtual time past a TTL instead of sleeping.
/// Share it by `Arc` between the test and the set under test. Left alone it
/// is a frozen clock.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use qc_observed_addrs::testing::ManualTimeSource;
/// use qc_observed_addrs::TimeSource;
///
/// let clock = ManualTimeSource::new(0);
/// clock.advance(Duration::from_millis(210));
/// assert_eq!(clock.now().as_millis(), 210);
/// ```
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    nanos: AtomicU64,
}

impl ManualTimeSource {
    /// Create a clock reading `initial_millis` milliseconds.
    pub fn new(initial_millis: u64) -> Self {
        Self {
            nanos: AtomicU64::new(Timestamp::from_millis(initial_millis).as_nanos()),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let nanos = u64::try_from(delta.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}
