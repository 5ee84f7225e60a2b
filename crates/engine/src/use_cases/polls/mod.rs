//! Poll use cases: view, refresh, vote, create, close.

mod cast_vote;
mod close;
mod create;
mod error;
mod view;

use std::sync::Arc;

pub use cast_vote::CastVote;
pub use close::ClosePoll;
pub use create::{CreatePoll, CreatePollInput};
pub use error::PollError;
pub use view::{PollView, ViewPoll};

/// Container for poll use cases.
pub struct PollUseCases {
    pub view: Arc<ViewPoll>,
    pub vote: Arc<CastVote>,
    pub create: Arc<CreatePoll>,
    pub close: Arc<ClosePoll>,
}

impl PollUseCases {
    pub fn new(
        view: Arc<ViewPoll>,
        vote: Arc<CastVote>,
        create: Arc<CreatePoll>,
        close: Arc<ClosePoll>,
    ) -> Self {
        Self {
            view,
            vote,
            create,
            close,
        }
    }
}
