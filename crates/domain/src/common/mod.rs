//! Common utility functions shared across the Ballotbox crates.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Minimal dependencies** - only chrono for datetime utilities
//! - **WASM compatible** - all code must work in both native and WASM targets

pub mod datetime;
pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use datetime::{parse_datetime, parse_expiration};
pub use string::none_if_blank;
