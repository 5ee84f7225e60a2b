//! Cast vote use case.
//!
//! Re-checks eligibility against a fresh snapshot, asks the store to record
//! the vote, then re-fetches and re-aggregates so the caller sees the
//! counts including its own vote.

use std::sync::Arc;

use ballotbox_domain::{can_vote, PollId, PollOptionId, UserId, Vote};

use crate::infrastructure::ports::{ClockPort, PollRepo, RecordVoteError, VoteRepo};

use super::error::PollError;
use super::view::PollView;

pub struct CastVote {
    polls: Arc<dyn PollRepo>,
    votes: Arc<dyn VoteRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CastVote {
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

    /// Record `viewer`'s vote for `option_id`.
    ///
    /// # Returns
    /// * `Ok(PollView)` - Fresh results, always in `Results` mode
    /// * `Err(PollError::AlreadyVoted)` - The viewer already has a vote, including
    ///   when a concurrent request won the store's uniqueness check
    /// * `Err(PollError::PollClosed)` - The poll expired or was closed
    pub async fn execute(
        &self,
        poll_id: PollId,
        option_id: PollOptionId,
        viewer: Option<UserId>,
    ) -> Result<PollView, PollError> {
        let user_id = viewer.ok_or(PollError::Unauthenticated)?;

        let poll = self
            .polls
            .get(poll_id)
            .await?
            .ok_or(PollError::NotFound(poll_id))?;
        if self.votes.get_viewer_vote(poll_id, user_id).await?.is_some() {
            return Err(PollError::AlreadyVoted);
        }

        let now = self.clock.now();
        if !can_vote(&poll, None, now) {
            tracing::debug!(poll_id = %poll_id, "Vote rejected, poll is closed");
            return Err(PollError::PollClosed);
        }
        if !poll.has_option(option_id) {
            return Err(PollError::OptionNotInPoll(option_id));
        }

        let vote = Vote::new(poll_id, option_id, user_id, now);
        self.votes.record(&vote).await.map_err(|e| match e {
            RecordVoteError::AlreadyVoted => PollError::AlreadyVoted,
            RecordVoteError::OptionNotInPoll => PollError::OptionNotInPoll(option_id),
            RecordVoteError::Repo(e) => PollError::Repo(e),
        })?;

        tracing::info!(
            poll_id = %poll_id,
            option_id = %option_id,
            user_id = %user_id,
            "Vote recorded"
        );

        let poll = self
            .polls
            .get(poll_id)
            .await?
            .ok_or(PollError::NotFound(poll_id))?;
        Ok(PollView::evaluate(poll, Some(option_id), now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockPollRepo, MockVoteRepo, RepoError};
    use crate::use_cases::polls::test_support::{now, sample_poll};
    use ballotbox_domain::{Poll, ViewMode};
    use chrono::Duration;
    use mockall::predicate::*;

    fn use_case(polls: MockPollRepo, votes: MockVoteRepo) -> CastVote {
        CastVote::new(Arc::new(polls), Arc::new(votes), Arc::new(FixedClock(now())))
    }

    fn polls_returning(poll: Poll) -> MockPollRepo {
        let mut polls = MockPollRepo::new();
        polls
            .expect_get()
            .returning(move |_| Ok(Some(poll.clone())));
        polls
    }

    fn votes_without_existing() -> MockVoteRepo {
        let mut votes = MockVoteRepo::new();
        votes.expect_get_viewer_vote().returning(|_, _| Ok(None));
        votes
    }

    #[tokio::test]
    async fn records_vote_and_returns_fresh_results() {
        let before = sample_poll(&[2, 1]);
        let poll_id = before.id();
        let choice = before.options()[1].id;
        let after = before.clone().with_options(vec![
            before.options()[0].clone(),
            before.options()[1].clone().with_vote_count(2),
        ]);
        let voter = UserId::new();

        let mut polls = MockPollRepo::new();
        let mut seq = mockall::Sequence::new();
        polls
            .expect_get()
            .with(eq(poll_id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(before.clone())));
        polls
            .expect_get()
            .with(eq(poll_id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(after.clone())));

        let mut votes = votes_without_existing();
        votes
            .expect_record()
            .withf(move |vote: &Vote| {
                vote.poll_id == poll_id
                    && vote.option_id == choice
                    && vote.user_id == voter
                    && vote.created_at == now()
            })
            .times(1)
            .returning(|_| Ok(()));

        let view = use_case(polls, votes)
            .execute(poll_id, choice, Some(voter))
            .await
            .unwrap();

        assert_eq!(view.view_mode, ViewMode::Results);
        assert_eq!(view.viewer_vote, Some(choice));
        assert_eq!(view.results.total_votes, 4);
        assert_eq!(view.results.viewer_choice().map(|o| o.vote_count), Some(2));
    }

    #[tokio::test]
    async fn anonymous_viewer_is_unauthenticated() {
        let result = use_case(MockPollRepo::new(), MockVoteRepo::new())
            .execute(PollId::new(), PollOptionId::new(), None)
            .await;

        assert!(matches!(result, Err(PollError::Unauthenticated)));
    }

    #[tokio::test]
    async fn existing_vote_is_already_voted() {
        let poll = sample_poll(&[1, 0]);
        let poll_id = poll.id();
        let first = poll.options()[0].id;
        let second = poll.options()[1].id;

        let mut votes = MockVoteRepo::new();
        votes
            .expect_get_viewer_vote()
            .returning(move |_, _| Ok(Some(first)));
        votes.expect_record().never();

        let result = use_case(polls_returning(poll), votes)
            .execute(poll_id, second, Some(UserId::new()))
            .await;

        assert!(matches!(result, Err(PollError::AlreadyVoted)));
    }

    #[tokio::test]
    async fn lost_race_maps_to_already_voted() {
        let poll = sample_poll(&[0, 0]);
        let poll_id = poll.id();
        let choice = poll.options()[0].id;

        let mut votes = votes_without_existing();
        votes
            .expect_record()
            .returning(|_| Err(RecordVoteError::AlreadyVoted));

        let result = use_case(polls_returning(poll), votes)
            .execute(poll_id, choice, Some(UserId::new()))
            .await;

        assert!(matches!(result, Err(PollError::AlreadyVoted)));
    }

    #[tokio::test]
    async fn expired_poll_is_closed() {
        let poll = sample_poll(&[0, 0]).with_expires_at(Some(now() - Duration::seconds(1)));
        let poll_id = poll.id();
        let choice = poll.options()[0].id;

        let mut votes = votes_without_existing();
        votes.expect_record().never();

        let result = use_case(polls_returning(poll), votes)
            .execute(poll_id, choice, Some(UserId::new()))
            .await;

        assert!(matches!(result, Err(PollError::PollClosed)));
    }

    #[tokio::test]
    async fn inactive_poll_is_closed() {
        let poll = sample_poll(&[0, 0]).with_active(false);
        let poll_id = poll.id();
        let choice = poll.options()[0].id;

        let result = use_case(polls_returning(poll), votes_without_existing())
            .execute(poll_id, choice, Some(UserId::new()))
            .await;

        assert!(matches!(result, Err(PollError::PollClosed)));
    }

    #[tokio::test]
    async fn foreign_option_is_rejected_before_recording() {
        let poll = sample_poll(&[0, 0]);
        let poll_id = poll.id();
        let foreign = PollOptionId::new();

        let mut votes = votes_without_existing();
        votes.expect_record().never();

        let result = use_case(polls_returning(poll), votes)
            .execute(poll_id, foreign, Some(UserId::new()))
            .await;

        assert!(matches!(result, Err(PollError::OptionNotInPoll(id)) if id == foreign));
    }

    #[tokio::test]
    async fn store_failure_is_reported_as_repo_error() {
        let poll = sample_poll(&[0, 0]);
        let poll_id = poll.id();
        let choice = poll.options()[0].id;

        let mut votes = votes_without_existing();
        votes
            .expect_record()
            .returning(|_| Err(RepoError::database("record_vote", "disk I/O error").into()));

        let result = use_case(polls_returning(poll), votes)
            .execute(poll_id, choice, Some(UserId::new()))
            .await;

        assert!(matches!(result, Err(PollError::Repo(_))));
    }
}
