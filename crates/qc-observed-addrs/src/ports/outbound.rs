//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the host application provides to the cache.

use crate::domain::{ObservedAddrsConfig, Timestamp};

/// Abstract interface for time-related operations.
///
/// Enables deterministic testing by injecting controllable time sources.
/// Production uses a monotonic clock; tests advance a manual clock instead
/// of sleeping past a TTL.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct ProcessClock(std::time::Instant);
///
/// impl TimeSource for ProcessClock {
///     fn now(&self) -> Timestamp {
///         Timestamp::from_duration(self.0.elapsed())
///     }
/// }
/// ```
pub trait TimeSource: Send + Sync {
    /// Get the current timestamp.
    ///
    /// Must never go backwards between calls.
    fn now(&self) -> Timestamp;
}

/// Abstract interface for configuration loading.
///
/// Allows different configuration sources (file, static, etc.)
pub trait ConfigProvider: Send + Sync {
    /// Get the observed-address cache configuration.
    fn observed_addrs_config(&self) -> ObservedAddrsConfig;
}
