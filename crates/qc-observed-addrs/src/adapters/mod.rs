//! # Adapters
//!
//! Concrete implementations of the driven ports.
//!
//! - `MonotonicTimeSource` - Production time source using the monotonic clock
//! - `StaticConfigProvider` - Hardcoded config
//! - `TomlConfigProvider` - Config file loading (requires "config" feature)

/// Configuration providers
pub mod config;
/// Time source adapters
pub mod time;

pub use config::StaticConfigProvider;
pub use time::MonotonicTimeSource;

#[cfg(feature = "config")]
pub use config::TomlConfigProvider;
