//! # Observed Address Service
//!
//! `ObservedAddressSet` wraps the domain `ObservationTable` behind a single
//! mutex, together with the runtime-adjustable TTL, a `TimeSource` and an
//! `ObserverGrouping` policy. It implements the `ObservedAddressApi` port.
//!
//! Every instance is independent: tests and multi-identity hosts create as
//! many as they need, there is no process-global state.

// Semantic submodules
mod api;
mod core;
mod maintenance;

// Re-export public API
pub use core::ObservedAddressSet;

#[cfg(test)]
mod tests;
