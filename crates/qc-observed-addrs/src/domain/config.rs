//! Observed-address cache configuration.

use std::time::Duration;

use crate::domain::{
    ConfigError, GroupingPolicy, DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_OBSERVED_ADDR_TTL,
};

/// Configuration for `ObservedAddressSet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedAddrsConfig {
    /// Staleness window applied to every observation (default: 10 minutes).
    /// Can be changed at runtime with `set_ttl`.
    pub ttl: Duration,
    /// Distinct fresh observer groups required to confirm an address
    /// (default: 2).
    pub activation_threshold: usize,
    /// How observer addresses are mapped to witnesses (default: host).
    pub grouping: GroupingPolicy,
}

impl Default for ObservedAddrsConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_OBSERVED_ADDR_TTL,
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            grouping: GroupingPolicy::Host,
        }
    }
}

impl ObservedAddrsConfig {
    /// Create a config suitable for testing (short TTL)
    pub fn for_testing() -> Self {
        Self {
            ttl: Duration::from_secs(1),
            ..Self::default()
        }
    }

    /// Set the TTL.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the activation threshold.
    #[must_use]
    pub fn with_activation_threshold(mut self, threshold: usize) -> Self {
        self.activation_threshold = threshold;
        self
    }

    /// Set the grouping policy.
    #[must_use]
    pub fn with_grouping(mut self, grouping: GroupingPolicy) -> Self {
        self.grouping = grouping;
        self
    }

    /// Check the config for values that would make the cache useless.
    ///
    /// # Errors
    ///
    /// - `ZeroTtl` if `ttl` is zero
    /// - `ZeroThreshold` if `activation_threshold` is zero
    /// - `InvalidPrefix` if a subnet prefix exceeds the address width
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl.is_zero() {
            return Err(ConfigError::ZeroTtl);
        }
        if self.activation_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if let GroupingPolicy::Subnet {
            ipv4_prefix,
            ipv6_prefix,
        } = self.grouping
        {
            if ipv4_prefix > 32 {
                return Err(ConfigError::InvalidPrefix {
                    family: "IPv4",
                    prefix: ipv4_prefix,
                    max: 32,
                });
            }
            if ipv6_prefix > 128 {
                return Err(ConfigError::InvalidPrefix {
                    family: "IPv6",
                    prefix: ipv6_prefix,
                    max: 128,
                });
            }
        }
        Ok(())
    }
}
