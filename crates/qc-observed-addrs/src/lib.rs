//! # Observed Address Confirmation Cache
//!
//! During the identify handshake every remote peer tells us the address it
//! sees us at. This crate collects those claims and decides which are
//! trustworthy enough to advertise as our external address.
//!
//! ## Confirmation Rule
//!
//! An address is confirmed iff at least two distinct **observer groups**
//! reported it within the TTL (default 10 minutes). Observers on the same
//! host (default policy) count as one group, so a single peer reconnecting
//! from many ports cannot confirm an address on its own.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Timestamps, grouping policies, observation table
//! - **Ports Layer:** `ObservedAddressApi` (inbound), `TimeSource` and
//!   `ConfigProvider` (outbound)
//! - **Service Layer:** `ObservedAddressSet`, the guarded aggregate
//! - **Adapters Layer:** Monotonic clock, static and TOML config providers
//!
//! ## Features
//!
//! - `config` (default) - `TomlConfigProvider` (serde, toml)
//! - `test-utils` - `testing` module: manual clocks, loopback connections
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use qc_observed_addrs::{
//!     Multiaddr, ObservedAddressApi, ObservedAddressSet, ObservedAddrsConfig,
//! };
//!
//! let set = Arc::new(ObservedAddressSet::new(ObservedAddrsConfig::default()));
//! let me: Multiaddr = "/ip4/203.0.113.7/tcp/30333".parse().unwrap();
//!
//! // Two ports on the same host: one witness.
//! set.add(&me, &"/ip4/198.51.100.1/tcp/4001".parse().unwrap());
//! set.add(&me, &"/ip4/198.51.100.1/tcp/4002".parse().unwrap());
//! assert!(set.addrs().is_empty());
//!
//! // A second host confirms it.
//! set.add(&me, &"/ip4/192.0.2.9/tcp/4001".parse().unwrap());
//! assert_eq!(set.addrs(), vec![me]);
//!
//! set.set_ttl(Duration::from_secs(60));
//! assert_eq!(set.ttl(), Duration::from_secs(60));
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Test utilities (ManualTimeSource, loopback connections, etc.)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Address type
pub use multiaddr::{Multiaddr, Protocol};

// Domain
pub use domain::{
    ConfigError, GroupingPolicy, HostGrouping, ObservationTable, ObservedAddress,
    ObservedAddressStats, ObservedAddrsConfig, ObserverGroup, ObserverGrouping, RecordOutcome,
    SubnetGrouping, Timestamp, DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_OBSERVED_ADDR_TTL,
};

// Port traits
pub use ports::{ConfigProvider, ObservedAddressApi, TimeSource};

// Service
pub use service::ObservedAddressSet;

// Adapters
pub use adapters::{MonotonicTimeSource, StaticConfigProvider};

#[cfg(feature = "config")]
pub use adapters::TomlConfigProvider;
