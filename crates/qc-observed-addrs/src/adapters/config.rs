use crate::domain::ObservedAddrsConfig;
use crate::ports::ConfigProvider;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider with hardcoded values.
///
/// Useful for testing and development. For production, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: ObservedAddrsConfig,
}

impl StaticConfigProvider {
    /// Create with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the specified config.
    #[must_use]
    pub fn with_config(mut self, config: ObservedAddrsConfig) -> Self {
        self.config = config;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn observed_addrs_config(&self) -> ObservedAddrsConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - Production Config Loading (requires "config" feature)
// ============================================================================

#[cfg(feature = "config")]
mod toml_config {
    use super::*;
    use crate::domain::{ConfigError, GroupingPolicy, SubnetGrouping};
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    /// Configuration file structure.
    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        #[serde(default)]
        observed_addresses: ObservedAddressesSection,
    }

    #[derive(Debug, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    struct ObservedAddressesSection {
        ttl_ms: Option<u64>,
        activation_threshold: Option<usize>,
        grouping: Option<String>,
        ipv4_prefix: Option<u8>,
        ipv6_prefix: Option<u8>,
    }

    /// TOML-based configuration provider.
    ///
    /// Loads the observed-address cache configuration from a TOML file.
    /// Missing keys keep their defaults; the result is validated.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [observed_addresses]
    /// ttl_ms = 600000
    /// activation_threshold = 2
    /// grouping = "subnet"   # "host" (default) or "subnet"
    /// ipv4_prefix = 16      # subnet grouping only
    /// ipv6_prefix = 32      # subnet grouping only
    /// ```
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        config: ObservedAddrsConfig,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if the file cannot be read, parsed, or fails validation.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                source,
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        ///
        /// # Errors
        ///
        /// Returns error if the content is not valid TOML, names an unknown
        /// grouping policy, or fails validation.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile = toml::from_str(content)?;
            let section = file.observed_addresses;
            let defaults = ObservedAddrsConfig::default();

            let grouping = match section.grouping.as_deref() {
                None | Some("host") => GroupingPolicy::Host,
                Some("subnet") => GroupingPolicy::Subnet {
                    ipv4_prefix: section
                        .ipv4_prefix
                        .unwrap_or(SubnetGrouping::DEFAULT_IPV4_PREFIX),
                    ipv6_prefix: section
                        .ipv6_prefix
                        .unwrap_or(SubnetGrouping::DEFAULT_IPV6_PREFIX),
                },
                Some(other) => return Err(ConfigError::UnknownGrouping(other.to_owned())),
            };

            let config = ObservedAddrsConfig {
                ttl: section
                    .ttl_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.ttl),
                activation_threshold: section
                    .activation_threshold
                    .unwrap_or(defaults.activation_threshold),
                grouping,
            };
            config.validate()?;

            Ok(Self { config })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn observed_addrs_config(&self) -> ObservedAddrsConfig {
            self.config.clone()
        }
    }
}

#[cfg(feature = "config")]
pub use toml_config::TomlConfigProvider;
