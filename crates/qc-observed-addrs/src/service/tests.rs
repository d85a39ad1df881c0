//! Tests for ObservedAddressSet

use super::*;
use crate::domain::{GroupingPolicy, ObservedAddrsConfig, ObservedAddressStats};
use crate::ports::ObservedAddressApi;
use crate::testing::ManualTimeSource;
use multiaddr::Multiaddr;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn ma(s: &str) -> Multiaddr {
    s.parse().expect("valid multiaddr")
}

/// Creates a set on a manual clock starting at t=0.
fn setup(config: ObservedAddrsConfig) -> (ObservedAddressSet, Arc<ManualTimeSource>) {
    let clock = Arc::new(ManualTimeSource::new(0));
    let set = ObservedAddressSet::with_time_source(config, clock.clone());
    (set, clock)
}

fn as_set(addrs: Vec<Multiaddr>) -> HashSet<Multiaddr> {
    addrs.into_iter().collect()
}

#[test]
fn test_empty_set_has_no_addrs() {
    let (set, _) = setup(ObservedAddrsConfig::default());
    assert!(set.addrs().is_empty());
    assert!(set.is_empty());
}

#[test]
fn test_single_observer_never_confirms() {
    let (set, _) = setup(ObservedAddrsConfig::default());
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    for port in 1000..1010 {
        set.add(&observed, &ma(&format!("/ip4/5.5.5.5/tcp/{port}")));
    }

    assert!(set.addrs().is_empty());
    assert_eq!(set.len(), 1);
}

#[test]
fn test_two_groups_confirm() {
    let (set, _) = setup(ObservedAddrsConfig::default());
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    set.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));

    assert_eq!(set.addrs(), vec![observed]);
}

#[test]
fn test_observer_without_group_is_noop() {
    let (set, _) = setup(ObservedAddrsConfig::default());
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    set.add(&observed, &Multiaddr::empty());
    set.add(&observed, &ma("/tcp/4001"));

    assert!(set.is_empty());
}

#[test]
fn test_confirmation_expires_after_ttl() {
    let config = ObservedAddrsConfig::default().with_ttl(Duration::from_secs(10));
    let (set, clock) = setup(config);
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    set.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));

    clock.advance(Duration::from_secs(10));
    assert_eq!(set.addrs().len(), 1, "exactly TTL old still counts");

    clock.advance(Duration::from_millis(1));
    assert!(set.addrs().is_empty());
    assert!(set.is_empty(), "expired entry is purged by addrs()");
}

#[test]
fn test_one_stale_group_drops_confirmation() {
    let config = ObservedAddrsConfig::default().with_ttl(Duration::from_secs(10));
    let (set, clock) = setup(config);
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    clock.advance(Duration::from_secs(8));
    set.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));
    assert_eq!(set.addrs().len(), 1);

    clock.advance(Duration::from_secs(3));
    assert!(set.addrs().is_empty());
    assert_eq!(set.len(), 1, "address with a fresh group is kept");

    // A fresh report from the first group restores confirmation.
    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/2"));
    assert_eq!(set.addrs().len(), 1);
}

#[test]
fn test_shortening_ttl_expires_immediately() {
    let (set, clock) = setup(ObservedAddrsConfig::default());
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    set.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));
    clock.advance(Duration::from_secs(5));
    assert_eq!(set.addrs().len(), 1);

    set.set_ttl(Duration::from_secs(1));
    assert_eq!(set.ttl(), Duration::from_secs(1));
    assert!(set.addrs().is_empty());
}

#[test]
fn test_lengthening_ttl_revives_unpurged_observations() {
    let config = ObservedAddrsConfig::default().with_ttl(Duration::from_secs(1));
    let (set, clock) = setup(config);
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    set.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));
    clock.advance(Duration::from_secs(2));

    // No addrs()/purge call happened in between, so the entries are still held.
    set.set_ttl(Duration::from_secs(5));
    assert_eq!(set.addrs().len(), 1);
}

#[test]
fn test_activation_threshold_from_config() {
    let config = ObservedAddrsConfig::default().with_activation_threshold(3);
    let (set, _) = setup(config);
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    set.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));
    assert!(set.addrs().is_empty());

    set.add(&observed, &ma("/ip4/7.7.7.7/tcp/1"));
    assert_eq!(set.addrs().len(), 1);
    assert_eq!(set.activation_threshold(), 3);
}

#[test]
fn test_subnet_grouping_from_config() {
    let config = ObservedAddrsConfig::default().with_grouping(GroupingPolicy::subnet());
    let (set, _) = setup(config);
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    // Same /16: one witness.
    set.add(&observed, &ma("/ip4/10.20.1.1/tcp/1"));
    set.add(&observed, &ma("/ip4/10.20.99.7/tcp/1"));
    assert!(set.addrs().is_empty());

    set.add(&observed, &ma("/ip4/10.21.1.1/tcp/1"));
    assert_eq!(set.addrs().len(), 1);
}

#[test]
fn test_custom_grouping_policy() {
    use crate::domain::{ObserverGroup, ObserverGrouping};

    /// Treats every observer as the same witness.
    struct SingleWitness;

    impl ObserverGrouping for SingleWitness {
        fn group_of(&self, _observer: &Multiaddr) -> Option<ObserverGroup> {
            Some(ObserverGroup::Dns("everyone".into()))
        }
    }

    let clock = Arc::new(ManualTimeSource::new(0));
    let set = ObservedAddressSet::with_parts(
        ObservedAddrsConfig::default(),
        clock,
        Box::new(SingleWitness),
    );
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    set.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));
    assert!(set.addrs().is_empty());
}

#[test]
fn test_purge_expired_and_stats() {
    let config = ObservedAddrsConfig::default().with_ttl(Duration::from_secs(10));
    let (set, clock) = setup(config);
    let confirmed = ma("/ip4/1.2.3.4/tcp/1");
    let pending = ma("/ip4/1.2.3.4/tcp/2");

    set.add(&confirmed, &ma("/ip4/5.5.5.5/tcp/1"));
    set.add(&confirmed, &ma("/ip4/6.6.6.6/tcp/1"));
    set.add(&pending, &ma("/ip4/5.5.5.5/tcp/1"));

    assert_eq!(
        set.stats(),
        ObservedAddressStats {
            tracked_addresses: 2,
            total_observations: 3,
            fresh_observations: 3,
            confirmed_addresses: 1,
        }
    );

    clock.advance(Duration::from_secs(6));
    set.add(&confirmed, &ma("/ip4/6.6.6.6/tcp/1"));
    clock.advance(Duration::from_secs(6));

    assert_eq!(set.purge_expired(), 1);
    assert_eq!(set.len(), 1);
    let stats = set.stats();
    assert_eq!(stats.confirmed_addresses, 0);
    assert_eq!(stats.total_observations, 1, "stale group of a live address is dropped");
}

#[test]
fn test_rotating_observers_do_not_accumulate() {
    let config = ObservedAddrsConfig::default().with_ttl(Duration::from_secs(1));
    let (set, clock) = setup(config);
    let observed = ma("/ip4/1.2.3.4/tcp/1231");
    let anchor = ma("/ip4/9.9.9.9/tcp/1");

    // One host keeps the address alive while a new host shows up each round.
    for round in 0..1_000u32 {
        let [_, _, hi, lo] = round.to_be_bytes();
        set.add(&observed, &ma(&format!("/ip4/10.0.{hi}.{lo}/tcp/1")));
        clock.advance(Duration::from_secs(2));
        set.add(&observed, &anchor);
        set.addrs();
        set.purge_expired();
    }

    assert_eq!(
        set.stats(),
        ObservedAddressStats {
            tracked_addresses: 1,
            total_observations: 1,
            fresh_observations: 1,
            confirmed_addresses: 0,
        }
    );
}

#[test]
fn test_sub_millisecond_ttl() {
    let (set, clock) = setup(ObservedAddrsConfig::default());
    let observed = ma("/ip4/1.2.3.4/tcp/1231");
    set.set_ttl(Duration::from_micros(1_500));

    clock.advance(Duration::from_micros(10));
    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    set.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));
    clock.advance(Duration::from_micros(1_500));
    assert_eq!(set.addrs().len(), 1, "exactly TTL old is still fresh");

    clock.advance(Duration::from_micros(480));
    assert!(set.addrs().is_empty());
}

#[test]
fn test_frozen_clock_never_expires() {
    let config = ObservedAddrsConfig::default().with_ttl(Duration::from_millis(1));
    let (set, _) = setup(config);
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    set.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));
    assert_eq!(set.purge_expired(), 0);
    assert_eq!(set.addrs().len(), 1);
}

#[test]
fn test_instances_are_isolated() {
    let (a, _) = setup(ObservedAddrsConfig::default());
    let (b, _) = setup(ObservedAddrsConfig::default());
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    a.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    a.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));
    b.set_ttl(Duration::from_secs(1));

    assert_eq!(a.addrs().len(), 1);
    assert!(b.addrs().is_empty());
    assert_eq!(a.ttl(), ObservedAddrsConfig::default().ttl);
}

#[test]
fn test_returned_addrs_are_a_copy() {
    let (set, _) = setup(ObservedAddrsConfig::default());
    let observed = ma("/ip4/1.2.3.4/tcp/1231");

    set.add(&observed, &ma("/ip4/5.5.5.5/tcp/1"));
    set.add(&observed, &ma("/ip4/6.6.6.6/tcp/1"));

    let mut snapshot = set.addrs();
    snapshot.clear();
    assert_eq!(as_set(set.addrs()), as_set(vec![observed]));
}

#[test]
fn test_debug_output() {
    let (set, _) = setup(ObservedAddrsConfig::default());
    let rendered = format!("{set:?}");
    assert!(rendered.contains("ObservedAddressSet"));
    assert!(rendered.contains("activation_threshold: 2"));
}
