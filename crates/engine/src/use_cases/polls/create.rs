//! Create poll use case.

use std::sync::Arc;

use ballotbox_domain::{NewPoll, Poll, UserId};

use crate::infrastructure::ports::{ClockPort, PollRepo};

use super::error::PollError;
use super::view::PollView;

/// Raw form input for a new poll.
#[derive(Debug, Clone, Default)]
pub struct CreatePollInput {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub expires_at: Option<String>,
}

pub struct CreatePoll {
    polls: Arc<dyn PollRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CreatePoll {
    pub fn new(polls: Arc<dyn PollRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { polls, clock }
    }

    pub async fn execute(
        &self,
        input: CreatePollInput,
        creator_id: UserId,
    ) -> Result<PollView, PollError> {
        let draft = NewPoll::parse(
            &input.title,
            input.description.as_deref(),
            &input.options,
            input.expires_at.as_deref(),
        )?;
        let now = self.clock.now();
        let poll = Poll::create(draft, creator_id, now)?;

        self.polls.save(&poll).await?;
        tracing::info!(
            poll_id = %poll.id(),
            creator_id = %creator_id,
            options = poll.options().len(),
            "Poll created"
        );

        Ok(PollView::evaluate(poll, None, now))
    }
}
