//! # Observer Grouping
//!
//! Maps an observer's address to the witness it counts as. Two observers in
//! the same group are one witness: a peer reconnecting from another port, or
//! several peers behind the same host, cannot confirm an address alone.
//!
//! ## Policies
//!
//! - `HostGrouping` (default): the host component of the observer address,
//!   ports ignored. `/ip4/1.2.3.4/tcp/1` and `/ip4/1.2.3.4/udp/9/quic-v1`
//!   are the same group.
//! - `SubnetGrouping`: IP hosts masked to a prefix (/16 IPv4, /32 IPv6 by
//!   default), so a single operator's address block counts once.
//!
//! Only the first component of the observer address is inspected. An
//! observer address that does not start with a host (`/p2p/<id>` on its
//! own, the empty address) has no group and its observation is dropped.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use multiaddr::{Multiaddr, Protocol};

/// Equivalence class of observers treated as a single witness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObserverGroup {
    /// Exact IP host.
    Ip(IpAddr),
    /// IPv4 network after masking.
    Ipv4Subnet {
        /// Masked network address
        network: Ipv4Addr,
        /// Prefix length in bits
        prefix: u8,
    },
    /// IPv6 network after masking.
    Ipv6Subnet {
        /// Masked network address
        network: Ipv6Addr,
        /// Prefix length in bits
        prefix: u8,
    },
    /// DNS host name, lower-cased. `/dns`, `/dns4`, `/dns6` and `/dnsaddr`
    /// naming the same host share a group.
    Dns(String),
    /// Unix socket path.
    Unix(String),
}

impl fmt::Display for ObserverGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(ip) => write!(f, "{ip}"),
            Self::Ipv4Subnet { network, prefix } => write!(f, "{network}/{prefix}"),
            Self::Ipv6Subnet { network, prefix } => write!(f, "{network}/{prefix}"),
            Self::Dns(name) => write!(f, "dns:{name}"),
            Self::Unix(path) => write!(f, "unix:{path}"),
        }
    }
}

/// Policy deriving an `ObserverGroup` from an observer address.
///
/// Implementations must be deterministic: the same address always maps to
/// the same group. Returning `None` makes the observation a no-op.
pub trait ObserverGrouping: Send + Sync {
    /// Derive the group key for `observer`.
    fn group_of(&self, observer: &Multiaddr) -> Option<ObserverGroup>;
}

/// Groups observers by their host component, ignoring ports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostGrouping;

impl HostGrouping {
    /// Create the host grouping policy.
    pub fn new() -> Self {
        Self
    }
}

impl ObserverGrouping for HostGrouping {
    fn group_of(&self, observer: &Multiaddr) -> Option<ObserverGroup> {
        host_group(observer.iter().next()?)
    }
}

/// Groups IP observers by network prefix; non-IP hosts fall back to
/// `HostGrouping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetGrouping {
    ipv4_prefix: u8,
    ipv6_prefix: u8,
}

impl SubnetGrouping {
    /// IPv4 prefix applied by `Default`.
    pub const DEFAULT_IPV4_PREFIX: u8 = 16;
    /// IPv6 prefix applied by `Default`.
    pub const DEFAULT_IPV6_PREFIX: u8 = 32;

    /// Create a subnet grouping policy. Prefixes above the address width are
    /// clamped to 32 and 128 respectively.
    pub fn new(ipv4_prefix: u8, ipv6_prefix: u8) -> Self {
        Self {
            ipv4_prefix: ipv4_prefix.min(32),
            ipv6_prefix: ipv6_prefix.min(128),
        }
    }

    /// IPv4 prefix length in bits.
    pub fn ipv4_prefix(&self) -> u8 {
        self.ipv4_prefix
    }

    /// IPv6 prefix length in bits.
    pub fn ipv6_prefix(&self) -> u8 {
        self.ipv6_prefix
    }
}

impl Default for SubnetGrouping {
    fn default() -> Self {
        Self::new(Self::DEFAULT_IPV4_PREFIX, Self::DEFAULT_IPV6_PREFIX)
    }
}

impl ObserverGrouping for SubnetGrouping {
    fn group_of(&self, observer: &Multiaddr) -> Option<ObserverGroup> {
        match observer.iter().next()? {
            Protocol::Ip4(ip) => Some(ObserverGroup::Ipv4Subnet {
                network: mask_v4(ip, self.ipv4_prefix),
                prefix: self.ipv4_prefix,
            }),
            Protocol::Ip6(ip) => Some(ObserverGroup::Ipv6Subnet {
                network: mask_v6(ip, self.ipv6_prefix),
                prefix: self.ipv6_prefix,
            }),
            other => host_group(other),
        }
    }
}

/// Grouping policy as selected through configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupingPolicy {
    /// See `HostGrouping`.
    #[default]
    Host,
    /// See `SubnetGrouping`.
    Subnet {
        /// IPv4 prefix length in bits
        ipv4_prefix: u8,
        /// IPv6 prefix length in bits
        ipv6_prefix: u8,
    },
}

impl GroupingPolicy {
    /// Subnet policy with the default /16 and /32 prefixes.
    pub fn subnet() -> Self {
        Self::Subnet {
            ipv4_prefix: SubnetGrouping::DEFAULT_IPV4_PREFIX,
            ipv6_prefix: SubnetGrouping::DEFAULT_IPV6_PREFIX,
        }
    }

    /// Instantiate the policy.
    pub fn build(&self) -> Box<dyn ObserverGrouping> {
        match *self {
            Self::Host => Box::new(HostGrouping::new()),
            Self::Subnet {
                ipv4_prefix,
                ipv6_prefix,
            } => Box::new(SubnetGrouping::new(ipv4_prefix, ipv6_prefix)),
        }
    }
}

fn host_group(host: Protocol<'_>) -> Option<ObserverGroup> {
    match host {
        Protocol::Ip4(ip) => Some(ObserverGroup::Ip(IpAddr::V4(ip))),
        Protocol::Ip6(ip) => Some(ObserverGroup::Ip(IpAddr::V6(ip))),
        Protocol::Dns(name)
        | Protocol::Dns4(name)
        | Protocol::Dns6(name)
        | Protocol::Dnsaddr(name) => Some(ObserverGroup::Dns(name.to_ascii_lowercase())),
        Protocol::Unix(path) => Some(ObserverGroup::Unix(path.into_owned())),
        _ => None,
    }
}

fn mask_v4(ip: Ipv4Addr, prefix: u8) -> Ipv4Addr {
    let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
    Ipv4Addr::from(u32::from(ip) & mask)
}

fn mask_v6(ip: Ipv6Addr, prefix: u8) -> Ipv6Addr {
    let mask = u128::MAX.checked_shl(128 - u32::from(prefix)).unwrap_or(0);
    Ipv6Addr::from(u128::from(ip) & mask)
}
