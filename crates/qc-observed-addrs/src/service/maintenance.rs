use tracing::debug;

use crate::domain::ObservedAddressStats;
use crate::service::ObservedAddressSet;

impl ObservedAddressSet {
    /// Drop observations older than the TTL, and addresses left with none.
    ///
    /// `addrs()` already does this on every call; a host that rarely queries
    /// can call this from a timer task to bound memory. Returns the number of
    /// addresses removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.now();
        let mut state = self.state.lock();
        let ttl = state.ttl;
        let purged = state.table.purge_expired(now, ttl);
        if purged > 0 {
            debug!(purged, remaining = state.table.len(), "observed address sweep");
        }
        purged
    }

    /// Diagnostics snapshot evaluated at the current time and TTL.
    pub fn stats(&self) -> ObservedAddressStats {
        let now = self.now();
        let state = self.state.lock();
        state.table.stats(now, state.ttl, self.activation_threshold)
    }
}
