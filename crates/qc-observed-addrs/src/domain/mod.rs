//! Domain Layer - Pure observation logic with no I/O
//!
//! This module contains:
//! - Timestamps and the freshness rule
//! - Observer grouping policies (host, subnet)
//! - The observation table and its confirmation/purge logic
//! - Configuration and its validation errors

pub mod config;
pub mod errors;
pub mod grouping;
pub mod observations;
pub mod value_objects;

pub use config::*;
pub use errors::*;
pub use grouping::*;
pub use observations::*;
pub use value_objects::*;
