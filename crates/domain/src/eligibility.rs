//! Voting eligibility.
//!
//! A viewer sees a poll in exactly one of two modes. `Voting` while they have
//! not voted and the poll is open, `Results` otherwise. The only transition is
//! `Voting -> Results`, taken when the store records the viewer's vote; callers
//! re-evaluate [`ViewMode::for_viewer`] with the updated viewer vote on every
//! render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregates::Poll;
use crate::PollOptionId;

/// Whether the viewer may still cast a vote on `poll` at `now`.
///
/// False as soon as the viewer has a vote, regardless of expiry or the
/// active flag.
pub fn can_vote(poll: &Poll, viewer_vote: Option<PollOptionId>, now: DateTime<Utc>) -> bool {
    viewer_vote.is_none() && !poll.is_expired(now) && poll.is_active()
}

/// Render/interaction mode for one viewer of one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Present the options and accept exactly one submission.
    Voting,
    /// Present the aggregated results; refresh re-aggregates.
    Results,
}

impl ViewMode {
    pub fn for_viewer(poll: &Poll, viewer_vote: Option<PollOptionId>, now: DateTime<Utc>) -> Self {
        if can_vote(poll, viewer_vote, now) {
            Self::Voting
        } else {
            Self::Results
        }
    }

    pub fn accepts_votes(self) -> bool {
        matches!(self, Self::Voting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PollOption;
    use crate::value_objects::{OptionText, PollTitle};
    use crate::UserId;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn poll() -> Poll {
        let options = vec![
            PollOption::new(OptionText::new("A").unwrap()).with_vote_count(5),
            PollOption::new(OptionText::new("B").unwrap()).with_vote_count(3),
        ];
        Poll::new(PollTitle::new("Q").unwrap(), UserId::new(), now()).with_options(options)
    }

    #[test]
    fn open_poll_without_vote_can_vote() {
        let poll = poll().with_expires_at(Some(now() + Duration::days(1)));
        assert!(can_vote(&poll, None, now()));
        assert_eq!(ViewMode::for_viewer(&poll, None, now()), ViewMode::Voting);
    }

    #[test]
    fn existing_vote_blocks_regardless_of_flags() {
        let base = poll();
        let a = base.options()[0].id;

        for active in [true, false] {
            for expires in [
                None,
                Some(now() - Duration::hours(1)),
                Some(now() + Duration::hours(1)),
            ] {
                let poll = base.clone().with_active(active).with_expires_at(expires);
                assert!(!can_vote(&poll, Some(a), now()));
                assert_eq!(ViewMode::for_viewer(&poll, Some(a), now()), ViewMode::Results);
            }
        }
    }

    #[test]
    fn expired_poll_shows_results() {
        let poll = poll().with_expires_at(Some(now() - Duration::seconds(1)));
        assert!(!can_vote(&poll, None, now()));
        assert!(!ViewMode::for_viewer(&poll, None, now()).accepts_votes());
    }

    #[test]
    fn inactive_poll_shows_results() {
        let poll = poll().with_active(false);
        assert!(!can_vote(&poll, None, now()));
    }

    #[test]
    fn recording_a_vote_moves_viewer_to_results() {
        let poll = poll();
        let choice = poll.options()[1].id;

        let before = ViewMode::for_viewer(&poll, None, now());
        let after = ViewMode::for_viewer(&poll, Some(choice), now());

        assert_eq!(before, ViewMode::Voting);
        assert_eq!(after, ViewMode::Results);
    }
}
