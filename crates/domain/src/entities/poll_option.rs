//! PollOption entity - One selectable answer within a poll

use serde::{Deserialize, Serialize};

use crate::value_objects::OptionText;
use crate::PollOptionId;

/// A selectable answer within a poll, carrying its running vote count.
///
/// The vote count is only ever changed by the store recording votes; the
/// domain treats it as a read-only snapshot value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    pub id: PollOptionId,
    pub text: OptionText,
    pub vote_count: u32,
}

impl PollOption {
    pub fn new(text: OptionText) -> Self {
        Self {
            id: PollOptionId::new(),
            text,
            vote_count: 0,
        }
    }

    /// Set the option's ID (used when loading from storage).
    pub fn with_id(mut self, id: PollOptionId) -> Self {
        self.id = id;
        self
    }

    pub fn with_vote_count(mut self, vote_count: u32) -> Self {
        self.vote_count = vote_count;
        self
    }
}
