use std::time::Duration;

use multiaddr::Multiaddr;
use tracing::{debug, info, trace};

use crate::domain::RecordOutcome;
use crate::ports::ObservedAddressApi;
use crate::service::ObservedAddressSet;

impl ObservedAddressApi for ObservedAddressSet {
    fn add(&self, observed: &Multiaddr, observer: &Multiaddr) {
        let Some(group) = self.grouping.group_of(observer) else {
            trace!(%observed, %observer, "dropping observation: no observer group");
            return;
        };

        // Clock read outside the lock; the table keeps max(old, now).
        let now = self.now();
        let outcome = self.state.lock().table.record(observed, group.clone(), now);

        match outcome {
            RecordOutcome::NewAddress => {
                debug!(%observed, %group, "tracking new observed address");
            }
            RecordOutcome::NewGroup => {
                debug!(%observed, %group, "observed address seen by new group");
            }
            RecordOutcome::Refreshed => {
                trace!(%observed, %group, "refreshed observation");
            }
        }
    }

    fn addrs(&self) -> Vec<Multiaddr> {
        let now = self.now();
        let mut state = self.state.lock();
        let ttl = state.ttl;

        let purged = state.table.purge_expired(now, ttl);
        if purged > 0 {
            debug!(purged, ?ttl, "purged expired observed addresses");
        }

        state.table.confirmed(now, ttl, self.activation_threshold)
    }

    fn set_ttl(&self, ttl: Duration) {
        let previous = std::mem::replace(&mut self.state.lock().ttl, ttl);
        info!(?previous, ?ttl, "observed address TTL changed");
    }

    fn ttl(&self) -> Duration {
        self.state.lock().ttl
    }
}
