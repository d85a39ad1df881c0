//! # Driving Port (Inbound API)
//!
//! The API the identify subsystem and the address-advertisement logic use.

use std::time::Duration;

use multiaddr::Multiaddr;

/// Observed-address confirmation cache.
///
/// All methods take `&self`: implementations guard their own state and are
/// shared by `Arc` across every in-flight handshake.
///
/// # Example
///
/// ```rust,ignore
/// use qc_observed_addrs::ports::ObservedAddressApi;
///
/// fn on_identify<T: ObservedAddressApi>(cache: &T, observed: &Multiaddr, remote: &Multiaddr) {
///     cache.add(observed, remote);
/// }
/// ```
pub trait ObservedAddressApi: Send + Sync {
    /// Record that the peer at `observer` sees us reachable at `observed`.
    ///
    /// Never fails. An `observer` no group can be derived from is dropped.
    fn add(&self, observed: &Multiaddr, observer: &Multiaddr);

    /// Addresses currently confirmed by enough distinct observer groups.
    ///
    /// Computed fresh on every call against the current time and TTL.
    /// Order is unspecified.
    fn addrs(&self) -> Vec<Multiaddr>;

    /// Replace the staleness window. Applies to the very next check.
    fn set_ttl(&self, ttl: Duration);

    /// Current staleness window.
    fn ttl(&self) -> Duration;
}
