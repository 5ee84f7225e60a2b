//! Ballotbox domain: polls, result aggregation and voting eligibility.
//!
//! Everything here is synchronous and free of I/O. Callers pass snapshots
//! fetched from the store, the viewer's identity/vote and the current instant.

pub mod common;

pub mod aggregates;
pub mod eligibility;
pub mod entities;
pub mod error;
pub mod ids;
pub mod tally;
pub mod value_objects;

pub use aggregates::{NewPoll, Poll, MAX_OPTIONS, MIN_OPTIONS};
pub use eligibility::{can_vote, ViewMode};
pub use entities::{PollOption, Vote};
pub use error::DomainError;
pub use ids::{PollId, PollOptionId, UserId, VoteId};
pub use tally::{aggregate, AggregatedPoll, PollStatus, RankedOption};
pub use value_objects::{OptionText, PollDescription, PollTitle};
