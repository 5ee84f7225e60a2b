//! Poll operation errors.

use ballotbox_domain::{DomainError, PollId, PollOptionId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during poll operations.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Poll not found: {0}")]
    NotFound(PollId),
    #[error("Authentication required")]
    Unauthenticated,
    #[error("You have already voted on this poll")]
    AlreadyVoted,
    #[error("This poll is no longer accepting votes")]
    PollClosed,
    #[error("Option {0} does not belong to this poll")]
    OptionNotInPoll(PollOptionId),
    #[error("Only the poll creator can do that")]
    Forbidden,
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
