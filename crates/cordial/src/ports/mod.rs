//! Ports (Interfaces)
//!
//! Abstract interfaces the domain layer uses to reach the platform.
//!
//! Implementations live in adapter crates (e.g., cordial-rest).

pub mod rest;

// Re-exports
pub use rest::*;
