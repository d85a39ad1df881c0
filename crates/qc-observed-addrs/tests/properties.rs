//! Property tests for the confirmation rule.

mod common;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use common::{ma, manual_set};
use proptest::prelude::*;
use qc_observed_addrs::{Multiaddr, ObservedAddressApi, ObservedAddrsConfig};

/// (address index, observer host index, observer port)
fn observations() -> impl Strategy<Value = Vec<(u8, u8, u16)>> {
    prop::collection::vec((0u8..6, 0u8..5, 1u16..u16::MAX), 0..64)
}

fn observed(idx: u8) -> Multiaddr {
    ma(&format!("/ip4/203.0.113.7/tcp/{}", 30000 + u16::from(idx)))
}

fn observer(host: u8, port: u16) -> Multiaddr {
    ma(&format!("/ip4/198.51.100.{host}/tcp/{port}"))
}

proptest! {
    #[test]
    fn prop_confirmed_iff_two_distinct_hosts(obs in observations()) {
        let (set, _clock) = manual_set(ObservedAddrsConfig::default());
        let mut hosts: HashMap<u8, HashSet<u8>> = HashMap::new();

        for &(addr, host, port) in &obs {
            set.add(&observed(addr), &observer(host, port));
            hosts.entry(addr).or_default().insert(host);
        }

        let expected: HashSet<Multiaddr> = hosts
            .iter()
            .filter(|(_, groups)| groups.len() >= 2)
            .map(|(&addr, _)| observed(addr))
            .collect();
        let actual: HashSet<Multiaddr> = set.addrs().into_iter().collect();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_repeats_from_one_host_never_confirm(
        ports in prop::collection::vec(1u16..u16::MAX, 1..32),
        repeats in 1usize..4,
    ) {
        let (set, _clock) = manual_set(ObservedAddrsConfig::default());
        let addr = observed(0);

        for _ in 0..repeats {
            for &port in &ports {
                set.add(&addr, &observer(1, port));
            }
        }

        prop_assert!(set.addrs().is_empty());
        prop_assert_eq!(set.stats().total_observations, 1);
    }

    #[test]
    fn prop_everything_expires_after_ttl(obs in observations(), ttl_ms in 1u64..10_000) {
        let config = ObservedAddrsConfig::default().with_ttl(Duration::from_millis(ttl_ms));
        let (set, clock) = manual_set(config);

        for &(addr, host, port) in &obs {
            set.add(&observed(addr), &observer(host, port));
        }
        clock.advance(Duration::from_millis(ttl_ms + 1));

        prop_assert!(set.addrs().is_empty());
        prop_assert!(set.is_empty());
    }
}
