//! Value Objects for the observed-address cache

use std::time::Duration;

/// Default staleness window for observed addresses (10 minutes).
///
/// Matches the TTL peers apply to their own observed addresses, so a claim
/// that no peer has repeated for this long stops counting.
pub const DEFAULT_OBSERVED_ADDR_TTL: Duration = Duration::from_secs(10 * 60);

/// Minimum number of distinct observer groups before an address is trusted.
pub const DEFAULT_ACTIVATION_THRESHOLD: usize = 2;

/// Point in time on a `TimeSource`'s monotonic scale, in nanoseconds.
///
/// The origin is whatever the time source chooses (process start for the
/// production clock, zero for test clocks). Only differences between
/// timestamps from the same source are meaningful. A `u64` of nanoseconds
/// spans roughly 584 years from the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from raw nanoseconds.
    pub fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Create a timestamp from whole milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.saturating_mul(1_000_000))
    }

    /// Create a timestamp from an offset relative to the time source origin.
    pub fn from_duration(offset: Duration) -> Self {
        Self(u64::try_from(offset.as_nanos()).unwrap_or(u64::MAX))
    }

    /// Get the value in nanoseconds.
    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Get the value in whole milliseconds, truncated.
    pub fn as_millis(&self) -> u64 {
        self.0 / 1_000_000
    }

    /// Time elapsed between `earlier` and `self`.
    ///
    /// Saturates to zero if `earlier` is actually later than `self`.
    pub fn saturating_duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(earlier.0))
    }

    /// Returns a timestamp `delta` later, saturating at the end of the scale.
    pub fn saturating_add(&self, delta: Duration) -> Self {
        let nanos = u64::try_from(delta.as_nanos()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(nanos))
    }

    /// Whether an observation made at `self` still counts at `now` under `ttl`.
    ///
    /// The bound is inclusive: an observation exactly `ttl` old is fresh.
    pub fn is_fresh(&self, now: Timestamp, ttl: Duration) -> bool {
        now.saturating_duration_since(*self) <= ttl
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", Duration::from_nanos(self.0))
    }
}
