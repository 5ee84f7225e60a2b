//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    ports::{ClockPort, PollRepo, VoteRepo},
    sqlite::SqlitePollStore,
};
use crate::use_cases::{self, PollUseCases};

/// Main application state.
///
/// Holds all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub polls: PollUseCases,
}

impl App {
    /// Create an App backed by the SQLite store and the system clock.
    pub fn new(store: SqlitePollStore) -> Self {
        let store = Arc::new(store);
        Self::with_ports(store.clone(), store, Arc::new(SystemClock::new()))
    }

    /// Wire use cases over arbitrary port implementations.
    pub fn with_ports(
        polls: Arc<dyn PollRepo>,
        votes: Arc<dyn VoteRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let poll_use_cases = PollUseCases::new(
            Arc::new(use_cases::polls::ViewPoll::new(
                polls.clone(),
                votes.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::polls::CastVote::new(
                polls.clone(),
                votes.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::polls::CreatePoll::new(polls.clone(), clock.clone())),
            Arc::new(use_cases::polls::ClosePoll::new(polls, votes, clock)),
        );

        Self {
            use_cases: UseCases {
                polls: poll_use_cases,
            },
        }
    }
}
