//! Fetch, refresh and list polls for a viewer.
//!
//! Every call re-fetches from the store and re-aggregates; nothing is cached
//! between requests. Refresh is the same path, so it can only ever show what
//! the store holds and never alters the viewer's vote.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use ballotbox_domain::{aggregate, AggregatedPoll, Poll, PollId, PollOptionId, UserId, ViewMode};

use crate::infrastructure::ports::{ClockPort, PollRepo, RepoError, VoteRepo};

use super::error::PollError;

/// A poll evaluated for one viewer at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PollView {
    pub poll: Poll,
    pub viewer_vote: Option<PollOptionId>,
    pub view_mode: ViewMode,
    pub results: AggregatedPoll,
}

impl PollView {
    pub fn evaluate(poll: Poll, viewer_vote: Option<PollOptionId>, now: DateTime<Utc>) -> Self {
        let results = aggregate(&poll, viewer_vote, now);
        let view_mode = ViewMode::for_viewer(&poll, viewer_vote, now);
        Self {
            poll,
            viewer_vote,
            view_mode,
            results,
        }
    }

    pub fn can_vote(&self) -> bool {
        self.view_mode.accepts_votes()
    }
}

pub struct ViewPoll {
    polls: Arc<dyn PollRepo>,
    votes: Arc<dyn VoteRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ViewPoll {
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

    /// Fetch one poll and evaluate it for `viewer` (anonymous if `None`).
    pub async fn execute(
        &self,
        poll_id: PollId,
        viewer: Option<UserId>,
    ) -> Result<PollView, PollError> {
        let poll = self
            .polls
            .get(poll_id)
            .await?
            .ok_or(PollError::NotFound(poll_id))?;
        let viewer_vote = self.viewer_vote(poll_id, viewer).await?;

        Ok(PollView::evaluate(poll, viewer_vote, self.clock.now()))
    }

    pub async fn refresh(
        &self,
        poll_id: PollId,
        viewer: Option<UserId>,
    ) -> Result<AggregatedPoll, PollError> {
        tracing::debug!(poll_id = %poll_id, "Refreshing poll results");
        Ok(self.execute(poll_id, viewer).await?.results)
    }

    pub async fn list_active(&self, viewer: Option<UserId>) -> Result<Vec<PollView>, PollError> {
        let polls = self.polls.list_active().await?;
        self.evaluate_all(polls, viewer).await
    }

    pub async fn list_mine(&self, user_id: UserId) -> Result<Vec<PollView>, PollError> {
        let polls = self.polls.list_by_creator(user_id).await?;
        self.evaluate_all(polls, Some(user_id)).await
    }

    async fn evaluate_all(
        &self,
        polls: Vec<Poll>,
        viewer: Option<UserId>,
    ) -> Result<Vec<PollView>, PollError> {
        let now = self.clock.now();
        let mut views = Vec::with_capacity(polls.len());
        for poll in polls {
            let viewer_vote = self.viewer_vote(poll.id(), viewer).await?;
            views.push(PollView::evaluate(poll, viewer_vote, now));
        }
        Ok(views)
    }

    async fn viewer_vote(
        &self,
        poll_id: PollId,
        viewer: Option<UserId>,
    ) -> Result<Option<PollOptionId>, RepoError> {
        match viewer {
            Some(user_id) => self.votes.get_viewer_vote(poll_id, user_id).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockPollRepo, MockVoteRepo};
    use crate::use_cases::polls::test_support::{now, sample_poll};
    use ballotbox_domain::PollStatus;
    use chrono::Duration;
    use mockall::predicate::*;

    fn use_case(polls: MockPollRepo, votes: MockVoteRepo) -> ViewPoll {
        ViewPoll::new(Arc::new(polls), Arc::new(votes), Arc::new(FixedClock(now())))
    }

    #[tokio::test]
    async fn viewer_without_vote_gets_voting_mode() {
        let poll = sample_poll(&[4, 1]);
        let poll_id = poll.id();
        let viewer = UserId::new();

        let mut polls = MockPollRepo::new();
        polls
            .expect_get()
            .with(eq(poll_id))
            .returning(move |_| Ok(Some(poll.clone())));
        let mut votes = MockVoteRepo::new();
        votes
            .expect_get_viewer_vote()
            .with(eq(poll_id), eq(viewer))
            .returning(|_, _| Ok(None));

        let view = use_case(polls, votes).execute(poll_id, Some(viewer)).await.unwrap();

        assert_eq!(view.view_mode, ViewMode::Voting);
        assert!(view.can_vote());
        assert_eq!(view.results.total_votes, 5);
    }

    #[tokio::test]
    async fn anonymous_viewer_skips_vote_lookup() {
        let poll = sample_poll(&[0, 0]);
        let poll_id = poll.id();

        let mut polls = MockPollRepo::new();
        polls.expect_get().returning(move |_| Ok(Some(poll.clone())));
        let mut votes = MockVoteRepo::new();
        votes.expect_get_viewer_vote().never();

        let view = use_case(polls, votes).execute(poll_id, None).await.unwrap();

        assert_eq!(view.viewer_vote, None);
        assert_eq!(view.results.winner_option_id, None);
    }

    #[tokio::test]
    async fn unknown_poll_is_not_found() {
        let mut polls = MockPollRepo::new();
        polls.expect_get().returning(|_| Ok(None));

        let result = use_case(polls, MockVoteRepo::new())
            .execute(PollId::new(), None)
            .await;

        assert!(matches!(result, Err(PollError::NotFound(_))));
    }

    #[tokio::test]
    async fn refresh_refetches_and_keeps_viewer_vote() {
        let before = sample_poll(&[1, 0]);
        let poll_id = before.id();
        let choice = before.options()[0].id;
        let after = before.clone().with_options(
            before
                .options()
                .iter()
                .cloned()
                .map(|o| {
                    let count = o.vote_count;
                    o.with_vote_count(count + 2)
                })
                .collect(),
        );
        let viewer = UserId::new();

        let mut polls = MockPollRepo::new();
        let mut seq = mockall::Sequence::new();
        polls
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(before.clone())));
        polls
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(after.clone())));
        let mut votes = MockVoteRepo::new();
        votes
            .expect_get_viewer_vote()
            .times(2)
            .returning(move |_, _| Ok(Some(choice)));

        let use_case = use_case(polls, votes);
        let first = use_case.refresh(poll_id, Some(viewer)).await.unwrap();
        let second = use_case.refresh(poll_id, Some(viewer)).await.unwrap();

        assert_eq!(first.total_votes, 1);
        assert_eq!(second.total_votes, 5);
        assert_eq!(first.viewer_choice().map(|o| o.option_id), Some(choice));
        assert_eq!(second.viewer_choice().map(|o| o.option_id), Some(choice));
    }

    #[tokio::test]
    async fn list_active_evaluates_each_poll() {
        let open = sample_poll(&[1, 1]);
        let expired = sample_poll(&[3, 0]).with_expires_at(Some(now() - Duration::minutes(1)));
        let listed = vec![open.clone(), expired.clone()];

        let mut polls = MockPollRepo::new();
        polls
            .expect_list_active()
            .returning(move || Ok(listed.clone()));

        let views = use_case(polls, MockVoteRepo::new())
            .list_active(None)
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].view_mode, ViewMode::Voting);
        assert_eq!(views[1].view_mode, ViewMode::Results);
        assert_eq!(views[1].results.status(), PollStatus::Expired);
    }

    #[tokio::test]
    async fn repository_failure_propagates() {
        let mut polls = MockPollRepo::new();
        polls
            .expect_get()
            .returning(|_| Err(RepoError::database("get_poll", "database is locked")));

        let result = use_case(polls, MockVoteRepo::new())
            .execute(PollId::new(), None)
            .await;

        assert!(matches!(result, Err(PollError::Repo(e)) if e.is_transient()));
    }
}
