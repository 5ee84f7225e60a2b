//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Stored data could not be turned back into domain values.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Database failures are assumed transient; the caller may retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Database { .. })
    }
}

/// Outcome of recording a vote that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum RecordVoteError {
    /// The store already holds a vote for this (poll, user) pair.
    #[error("User has already voted on this poll")]
    AlreadyVoted,

    #[error("Option does not belong to this poll")]
    OptionNotInPoll,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = RepoError::not_found("Poll", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Poll not found: abc");
    }

    #[test]
    fn only_database_errors_are_transient() {
        assert!(RepoError::database("get_poll", "locked").is_transient());
        assert!(!RepoError::serialization("bad date").is_transient());
        assert!(!RepoError::not_found("Poll", "x").is_transient());
    }
}
