//! Domain Errors for the observed-address cache
//!
//! The cache itself never fails: malformed observations are dropped and an
//! empty `addrs()` result is a legitimate answer. Errors only arise when a
//! configuration is loaded or validated.

use thiserror::Error;

/// Errors raised while loading or validating `ObservedAddrsConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has the wrong shape.
    #[cfg(feature = "config")]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A zero TTL would make every observation stale on arrival.
    #[error("TTL must be greater than zero")]
    ZeroTtl,

    /// A zero threshold would confirm addresses nobody reported.
    #[error("Activation threshold must be at least 1")]
    ZeroThreshold,

    /// Subnet prefix wider than the address family.
    #[error("Invalid {family} prefix length {prefix} (max {max})")]
    InvalidPrefix {
        /// "IPv4" or "IPv6"
        family: &'static str,
        /// Configured prefix length
        prefix: u8,
        /// Address width in bits
        max: u8,
    },

    /// `grouping` key named an unknown policy.
    #[error("Unknown grouping policy: {0} (expected \"host\" or \"subnet\")")]
    UnknownGrouping(String),
}
