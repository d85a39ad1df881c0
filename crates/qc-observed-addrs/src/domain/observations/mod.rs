//! # Observation Table
//!
//! Stores, per observed address, the last time each observer group reported
//! it. Pure data structure: no clock, no locking. The service supplies `now`
//! and the TTL on every call.
//!
//! ## Confirmation Rule
//!
//! An address is confirmed at `now` iff at least `threshold` distinct groups
//! saw it within `ttl`. Purging drops every stale (address, group) pair and
//! then every address left without a group.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Duration;

use multiaddr::Multiaddr;

use crate::domain::{ObserverGroup, Timestamp};

/// What `ObservationTable::record` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// First observation of this address.
    NewAddress,
    /// Known address, first observation from this group.
    NewGroup,
    /// Known (address, group) pair; timestamp refreshed.
    Refreshed,
}

/// Observations of a single address, keyed by observer group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedAddress {
    seen_by: HashMap<ObserverGroup, Timestamp>,
}

impl ObservedAddress {
    /// Record an observation from `group` at `now`.
    ///
    /// Stored timestamps never move backwards: a call carrying an older clock
    /// reading than the one already stored leaves it unchanged.
    ///
    /// Returns `true` if `group` had not been seen before.
    pub fn record(&mut self, group: ObserverGroup, now: Timestamp) -> bool {
        match self.seen_by.entry(group) {
            Entry::Occupied(mut e) => {
                let last_seen = e.get_mut();
                *last_seen = (*last_seen).max(now);
                false
            }
            Entry::Vacant(e) => {
                e.insert(now);
                true
            }
        }
    }

    /// Last time `group` reported this address.
    pub fn last_seen_by(&self, group: &ObserverGroup) -> Option<Timestamp> {
        self.seen_by.get(group).copied()
    }

    /// Most recent observation from any group.
    pub fn last_seen(&self) -> Option<Timestamp> {
        self.seen_by.values().copied().max()
    }

    /// Number of groups that ever reported this address (fresh or stale).
    pub fn group_count(&self) -> usize {
        self.seen_by.len()
    }

    /// Number of groups whose observation is still within `ttl` of `now`.
    pub fn fresh_group_count(&self, now: Timestamp, ttl: Duration) -> usize {
        self.seen_by
            .values()
            .filter(|seen| seen.is_fresh(now, ttl))
            .count()
    }

    /// Whether no group observation survives `ttl`.
    pub fn is_expired(&self, now: Timestamp, ttl: Duration) -> bool {
        !self.seen_by.values().any(|seen| seen.is_fresh(now, ttl))
    }

    /// Drop groups whose observation is older than `ttl`. Returns how many
    /// were removed.
    pub fn retain_fresh(&mut self, now: Timestamp, ttl: Duration) -> usize {
        let before = self.seen_by.len();
        self.seen_by.retain(|_, seen| seen.is_fresh(now, ttl));
        before - self.seen_by.len()
    }

    /// Whether enough distinct groups vouch for this address right now.
    pub fn is_confirmed(&self, now: Timestamp, ttl: Duration, threshold: usize) -> bool {
        self.fresh_group_count(now, ttl) >= threshold
    }
}

/// Snapshot of the table for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObservedAddressStats {
    /// Addresses currently held, confirmed or not.
    pub tracked_addresses: usize,
    /// (address, group) pairs held, fresh or stale.
    pub total_observations: usize,
    /// (address, group) pairs still within the TTL.
    pub fresh_observations: usize,
    /// Addresses meeting the activation threshold.
    pub confirmed_addresses: usize,
}

/// Mapping `address -> (group -> last seen)`.
#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    entries: HashMap<Multiaddr, ObservedAddress>,
}

impl ObservationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `group` observed `observed` at `now`.
    pub fn record(
        &mut self,
        observed: &Multiaddr,
        group: ObserverGroup,
        now: Timestamp,
    ) -> RecordOutcome {
        if let Some(entry) = self.entries.get_mut(observed) {
            return if entry.record(group, now) {
                RecordOutcome::NewGroup
            } else {
                RecordOutcome::Refreshed
            };
        }

        let mut entry = ObservedAddress::default();
        entry.record(group, now);
        self.entries.insert(observed.clone(), entry);
        RecordOutcome::NewAddress
    }

    /// Observations held for `addr`.
    pub fn get(&self, addr: &Multiaddr) -> Option<&ObservedAddress> {
        self.entries.get(addr)
    }

    /// Addresses confirmed at `now`. Order is unspecified.
    pub fn confirmed(&self, now: Timestamp, ttl: Duration, threshold: usize) -> Vec<Multiaddr> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_confirmed(now, ttl, threshold))
            .map(|(addr, _)| addr.clone())
            .collect()
    }

    /// Drop every stale observation, then every address left with none.
    /// Returns how many addresses were removed.
    pub fn purge_expired(&mut self, now: Timestamp, ttl: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| {
            entry.retain_fresh(now, ttl);
            entry.group_count() > 0
        });
        before - self.entries.len()
    }

    /// Number of tracked addresses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no address is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics snapshot at `now`.
    pub fn stats(&self, now: Timestamp, ttl: Duration, threshold: usize) -> ObservedAddressStats {
        let mut stats = ObservedAddressStats {
            tracked_addresses: self.entries.len(),
            ..Default::default()
        };
        for entry in self.entries.values() {
            let fresh = entry.fresh_group_count(now, ttl);
            stats.total_observations += entry.group_count();
            stats.fresh_observations += fresh;
            if fresh >= threshold {
                stats.confirmed_addresses += 1;
            }
        }
        stats
    }
}
