//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields

pub mod poll;

pub use poll::{NewPoll, Poll, MAX_OPTIONS, MIN_OPTIONS};
