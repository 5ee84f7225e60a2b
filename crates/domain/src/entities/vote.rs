//! Vote entity - A viewer's single choice in a poll

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{PollId, PollOptionId, UserId, VoteId};

/// A recorded vote.
///
/// At most one vote exists per (poll, user); that rule is enforced by the
/// store, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: VoteId,
    pub poll_id: PollId,
    pub option_id: PollOptionId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(
        poll_id: PollId,
        option_id: PollOptionId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: VoteId::new(),
            poll_id,
            option_id,
            user_id,
            created_at,
        }
    }
}
