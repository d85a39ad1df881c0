//! Centralized Testing Utilities
//!
//! Test doubles for the driven ports and a loopback connection pair.
//! Available in unit tests and with the `test-utils` feature flag.

mod loopback;
mod time;

pub use loopback::{loopback_pair, LoopbackConn, LOOPBACK_BUFFER_SIZE};
pub use time::ManualTimeSource;
