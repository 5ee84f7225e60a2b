//! Poll result aggregation.
//!
//! [`aggregate`] turns a poll snapshot into totals, percentages, a ranking
//! and a winner. It is a pure function of its inputs: the caller supplies the
//! viewer's vote and the evaluation instant, so results are reproducible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregates::Poll;
use crate::{PollId, PollOptionId};

/// Display status of a poll at a given instant.
///
/// Expired takes precedence over Inactive: an expired poll reads as expired
/// whatever its flag says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStatus {
    Active,
    Expired,
    Inactive,
}

/// One option in ranked order, with its derived figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedOption {
    pub option_id: PollOptionId,
    pub text: String,
    pub vote_count: u32,
    /// Share of all votes in [0, 100]. Unrounded.
    pub percentage: f64,
    pub is_winner: bool,
    pub is_viewer_vote: bool,
}

/// The derived view of a poll: totals, ranking, winner and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPoll {
    pub poll_id: PollId,
    pub total_votes: u64,
    /// Options by descending vote count; equal counts keep input order.
    pub ranked_options: Vec<RankedOption>,
    pub winner_option_id: Option<PollOptionId>,
    pub is_expired: bool,
    /// Active flag set and not expired.
    pub is_active: bool,
    /// Raw stored active flag, kept so renderers can show an "inactive"
    /// badge next to an "expired" one.
    pub active_flag: bool,
}

impl AggregatedPoll {
    pub fn status(&self) -> PollStatus {
        if self.is_expired {
            PollStatus::Expired
        } else if !self.active_flag {
            PollStatus::Inactive
        } else {
            PollStatus::Active
        }
    }

    /// True when the stored flag marks the poll inactive.
    pub fn is_inactive(&self) -> bool {
        !self.active_flag
    }

    pub fn has_votes(&self) -> bool {
        self.total_votes > 0
    }

    pub fn winner(&self) -> Option<&RankedOption> {
        self.ranked_options.iter().find(|o| o.is_winner)
    }

    pub fn viewer_choice(&self) -> Option<&RankedOption> {
        self.ranked_options.iter().find(|o| o.is_viewer_vote)
    }
}

/// Percentage of `count` out of `total`, 0 when there are no votes.
pub fn percentage(count: u32, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(count) / total as f64 * 100.0
    }
}

/// Aggregate a poll snapshot for one viewer at instant `now`.
///
/// Total over any poll, including one with no options (zero total, empty
/// ranking, no winner). A tie for first place still yields a single winner:
/// whichever tied option was supplied first.
pub fn aggregate(
    poll: &Poll,
    viewer_vote: Option<PollOptionId>,
    now: DateTime<Utc>,
) -> AggregatedPoll {
    let total_votes: u64 = poll.options().iter().map(|o| u64::from(o.vote_count)).sum();

    let mut ranked: Vec<_> = poll.options().iter().collect();
    // sort_by is stable, which is what gives ties their input-order tie-break
    ranked.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));

    let winner_option_id = ranked.first().filter(|_| total_votes > 0).map(|o| o.id);

    let ranked_options = ranked
        .into_iter()
        .map(|option| RankedOption {
            option_id: option.id,
            text: option.text.as_str().to_string(),
            vote_count: option.vote_count,
            percentage: percentage(option.vote_count, total_votes),
            is_winner: Some(option.id) == winner_option_id,
            is_viewer_vote: Some(option.id) == viewer_vote,
        })
        .collect();

    let is_expired = poll.is_expired(now);

    AggregatedPoll {
        poll_id: poll.id(),
        total_votes,
        ranked_options,
        winner_option_id,
        is_expired,
        is_active: poll.is_active() && !is_expired,
        active_flag: poll.is_active(),
    }
}
