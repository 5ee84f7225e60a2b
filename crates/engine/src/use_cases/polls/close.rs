//! Close poll use case.
//!
//! Only the creator may close a poll. Closing clears the active flag; the
//! poll and its votes stay readable and results keep aggregating.

use std::sync::Arc;

use ballotbox_domain::{PollId, UserId};

use crate::infrastructure::ports::{ClockPort, PollRepo, VoteRepo};

use super::error::PollError;
use super::view::PollView;

pub struct ClosePoll {
    polls: Arc<dyn PollRepo>,
    votes: Arc<dyn VoteRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ClosePoll {
    pub fn new(
        polls: Arc<dyn PollRepo>,
        votes: Arc<dyn VoteRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            polls,
            votes,
            clock,
        }
    }

    pub async fn execute(&self, poll_id: PollId, user_id: UserId) -> Result<PollView, PollError> {
        let mut poll = self
            .polls
            .get(poll_id)
            .await?
            .ok_or(PollError::NotFound(poll_id))?;
        if !poll.is_created_by(user_id) {
            tracing::warn!(
                poll_id = %poll_id,
                user_id = %user_id,
                "Close rejected, not the creator"
            );
            return Err(PollError::Forbidden);
        }

        if poll.is_active() {
            self.polls.set_active(poll_id, false).await?;
            poll.set_active(false);
            tracing::info!(poll_id = %poll_id, "Poll closed");
        }

        let viewer_vote = self.votes.get_viewer_vote(poll_id, user_id).await?;
        Ok(PollView::evaluate(poll, viewer_vote, self.clock.now()))
    }
}
