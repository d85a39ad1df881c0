use std::time::Instant;

use crate::domain::Timestamp;
use crate::ports::TimeSource;

// ============================================================================
// MonotonicTimeSource - Production Time Source
// ============================================================================

/// Production time source backed by `std::time::Instant`.
///
/// Timestamps are nanoseconds since the source was created. Wall-clock
/// jumps (NTP, manual changes) cannot make observations look older or newer
/// than they are. For testing, use `ManualTimeSource` from `testing`.
///
/// # Example
///
/// ```rust
/// use qc_observed_addrs::adapters::MonotonicTimeSource;
/// use qc_observed_addrs::ports::TimeSource;
///
/// let time_source = MonotonicTimeSource::new();
/// let first = time_source.now();
/// assert!(time_source.now() >= first);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTimeSource {
    origin: Instant,
}

impl MonotonicTimeSource {
    /// Create a time source whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::from_duration(self.origin.elapsed())
    }
}
