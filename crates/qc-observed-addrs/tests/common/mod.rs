//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use qc_observed_addrs::testing::ManualTimeSource;
use qc_observed_addrs::{Multiaddr, ObservedAddressSet, ObservedAddrsConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a test-writer subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `qc_observed_addrs=debug`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("qc_observed_addrs=debug"));

    // Another test in the same binary may have installed it already.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

pub fn ma(s: &str) -> Multiaddr {
    s.parse().expect("valid multiaddr")
}

/// Set on a manual clock starting at t=0.
pub fn manual_set(config: ObservedAddrsConfig) -> (ObservedAddressSet, Arc<ManualTimeSource>) {
    let clock = Arc::new(ManualTimeSource::new(0));
    let set = ObservedAddressSet::with_time_source(config, clock.clone());
    (set, clock)
}

/// Whether `actual` holds exactly the addresses in `expected`, in any order.
pub fn same_addrs(actual: &[Multiaddr], expected: &[&Multiaddr]) -> bool {
    actual.len() == expected.len() && expected.iter().all(|addr| actual.contains(addr))
}
