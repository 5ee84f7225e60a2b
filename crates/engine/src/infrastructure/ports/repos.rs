//! Repository port traits for the poll store.
//!
//! The store owns persistence, identity and the one-vote-per-user constraint.
//! Every call returns a fresh snapshot; nothing here caches.

use async_trait::async_trait;
use ballotbox_domain::{Poll, PollId, PollOptionId, UserId, Vote};

use super::error::{RecordVoteError, RepoError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PollRepo: Send + Sync {
    /// Poll with its options and current vote counts, `None` if unknown.
    async fn get(&self, id: PollId) -> Result<Option<Poll>, RepoError>;
    /// Insert a newly created poll with its options.
    async fn save(&self, poll: &Poll) -> Result<(), RepoError>;

    // Queries, newest first
    async fn list_active(&self) -> Result<Vec<Poll>, RepoError>;
    async fn list_by_creator(&self, creator_id: UserId) -> Result<Vec<Poll>, RepoError>;

    async fn set_active(&self, id: PollId, is_active: bool) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepo: Send + Sync {
    /// The option the user voted for on this poll, if any.
    async fn get_viewer_vote(
        &self,
        poll_id: PollId,
        user_id: UserId,
    ) -> Result<Option<PollOptionId>, RepoError>;

    async fn record(&self, vote: &Vote) -> Result<(), RecordVoteError>;
}
