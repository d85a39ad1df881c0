//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Port (Inbound):** `ObservedAddressApi`, called by the identify
//!   handshake (`add`) and by address advertisement (`addrs`)
//! - **Driven Ports (Outbound):** `TimeSource` and `ConfigProvider`, supplied
//!   by the host node
//!
//! The observer-grouping policy seam lives in the domain
//! (`domain::ObserverGrouping`) and is re-exported here for adapters.

pub mod inbound;
pub mod outbound;

pub use crate::domain::ObserverGrouping;
pub use inbound::ObservedAddressApi;
pub use outbound::{ConfigProvider, TimeSource};
