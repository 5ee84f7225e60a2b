//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - The poll store (SQLite today, any relational store tomorrow)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

pub use error::{RecordVoteError, RepoError};
pub use repos::{PollRepo, VoteRepo};
pub use testing::ClockPort;

#[cfg(test)]
pub use repos::{MockPollRepo, MockVoteRepo};
#[cfg(test)]
pub use testing::MockClockPort;
