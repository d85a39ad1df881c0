use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::adapters::MonotonicTimeSource;
use crate::domain::{ObservationTable, ObservedAddrsConfig, ObserverGrouping, Timestamp};
use crate::ports::TimeSource;

/// State guarded by the set's mutex. TTL lives next to the table so expiry
/// checks always see the TTL that was current when they took the lock.
#[derive(Debug)]
pub(crate) struct ObservationState {
    pub(crate) table: ObservationTable,
    pub(crate) ttl: Duration,
}

/// Confirmation cache for addresses remote peers claim to see us at.
///
/// `Send + Sync`; share it by `Arc` across handshake tasks.
///
/// # Example
///
/// ```rust
/// use qc_observed_addrs::{ObservedAddressApi, ObservedAddressSet, ObservedAddrsConfig};
///
/// let set = ObservedAddressSet::new(ObservedAddrsConfig::default());
/// let observed: qc_observed_addrs::Multiaddr = "/ip4/8.8.8.8/tcp/4001".parse().unwrap();
///
/// set.add(&observed, &"/ip4/1.1.1.1/tcp/30333".parse().unwrap());
/// assert!(set.addrs().is_empty());
///
/// set.add(&observed, &"/ip4/9.9.9.9/tcp/30333".parse().unwrap());
/// assert_eq!(set.addrs(), vec![observed]);
/// ```
pub struct ObservedAddressSet {
    /// Observation store and TTL
    pub(crate) state: Mutex<ObservationState>,
    /// Distinct fresh groups required for confirmation
    pub(crate) activation_threshold: usize,
    /// Time source for observation and expiry timestamps
    pub(crate) time_source: Arc<dyn TimeSource>,
    /// Observer address -> witness mapping
    pub(crate) grouping: Box<dyn ObserverGrouping>,
}

impl ObservedAddressSet {
    /// Create a set using the process monotonic clock and the grouping
    /// policy named in `config`.
    ///
    /// The config is used as given; call `ObservedAddrsConfig::validate`
    /// first when it comes from an untrusted source.
    pub fn new(config: ObservedAddrsConfig) -> Self {
        Self::with_time_source(config, Arc::new(MonotonicTimeSource::new()))
    }

    /// Create a set with an injected time source.
    pub fn with_time_source(config: ObservedAddrsConfig, time_source: Arc<dyn TimeSource>) -> Self {
        let grouping = config.grouping.build();
        Self::with_parts(config, time_source, grouping)
    }

    /// Create a set with an injected time source and a custom grouping
    /// policy. `config.grouping` is ignored.
    pub fn with_parts(
        config: ObservedAddrsConfig,
        time_source: Arc<dyn TimeSource>,
        grouping: Box<dyn ObserverGrouping>,
    ) -> Self {
        Self {
            state: Mutex::new(ObservationState {
                table: ObservationTable::new(),
                ttl: config.ttl,
            }),
            activation_threshold: config.activation_threshold,
            time_source,
            grouping,
        }
    }

    /// Distinct fresh observer groups required for confirmation.
    pub fn activation_threshold(&self) -> usize {
        self.activation_threshold
    }

    /// Number of tracked addresses, confirmed or not.
    pub fn len(&self) -> usize {
        self.state.lock().table.len()
    }

    /// Whether no address is tracked.
    pub fn is_empty(&self) -> bool {
        self.state.lock().table.is_empty()
    }

    /// Get the current timestamp from the time source.
    pub(crate) fn now(&self) -> Timestamp {
        self.time_source.now()
    }
}

impl Default for ObservedAddressSet {
    fn default() -> Self {
        Self::new(ObservedAddrsConfig::default())
    }
}

impl fmt::Debug for ObservedAddressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ObservedAddressSet")
            .field("tracked_addresses", &state.table.len())
            .field("ttl", &state.ttl)
            .field("activation_threshold", &self.activation_threshold)
            .finish_non_exhaustive()
    }
}
