//! Response bodies returned by the HTTP API.
//!
//! DTOs carry raw `uuid::Uuid` ids and RFC3339 timestamps so clients need no
//! domain crate to read them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ballotbox_domain::{AggregatedPoll, Poll, PollStatus, RankedOption, ViewMode};

// =============================================================================
// Error Codes
// =============================================================================

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // === Client Errors (4xx) ===
    /// Request was malformed or invalid
    BadRequest,
    /// Authentication required or failed
    Unauthorized,
    /// User lacks permission for this operation
    Forbidden,
    /// Requested resource not found
    NotFound,
    /// The viewer already voted on this poll
    AlreadyVoted,
    /// The poll is expired or inactive
    PollClosed,
    /// Request data failed validation
    ValidationError,

    // === Server Errors (5xx) ===
    /// Internal server error
    InternalError,
    /// Store unreachable or failed; the request may be retried
    ServiceUnavailable,

    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

// =============================================================================
// Poll
// =============================================================================

/// A poll option as shown on the voting form (no counts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOptionData {
    pub id: Uuid,
    pub text: String,
}

/// Poll metadata, options in store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollData {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub creator_id: Uuid,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    pub is_active: bool,
    pub options: Vec<PollOptionData>,
}

impl From<&Poll> for PollData {
    fn from(poll: &Poll) -> Self {
        Self {
            id: poll.id().to_uuid(),
            title: poll.title().as_str().to_string(),
            description: poll.description().map(|d| d.as_str().to_string()),
            creator_id: poll.creator_id().to_uuid(),
            created_at: poll.created_at().to_rfc3339(),
            expires_at: poll.expires_at().map(|dt| dt.to_rfc3339()),
            is_active: poll.is_active(),
            options: poll
                .options()
                .iter()
                .map(|o| PollOptionData {
                    id: o.id.to_uuid(),
                    text: o.text.as_str().to_string(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Formats a percentage for display with one decimal, e.g. `"62.5%"`.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

/// One ranked option with its counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedOptionData {
    pub option_id: Uuid,
    pub text: String,
    pub vote_count: u32,
    /// Unrounded share of the total in [0, 100].
    pub percentage: f64,
    /// Display form rounded to one decimal.
    pub percentage_label: String,
    pub is_winner: bool,
    pub is_viewer_vote: bool,
}

impl From<&RankedOption> for RankedOptionData {
    fn from(option: &RankedOption) -> Self {
        Self {
            option_id: option.option_id.to_uuid(),
            text: option.text.clone(),
            vote_count: option.vote_count,
            percentage: option.percentage,
            percentage_label: format_percentage(option.percentage),
            is_winner: option.is_winner,
            is_viewer_vote: option.is_viewer_vote,
        }
    }
}

/// Aggregated results of a poll for one viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResultsData {
    pub poll_id: Uuid,
    pub total_votes: u64,
    pub status: PollStatus,
    pub is_expired: bool,
    pub is_active: bool,
    pub is_inactive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_option_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_vote_option_id: Option<Uuid>,
    pub options: Vec<RankedOptionData>,
}

impl From<&AggregatedPoll> for PollResultsData {
    fn from(results: &AggregatedPoll) -> Self {
        Self {
            poll_id: results.poll_id.to_uuid(),
            total_votes: results.total_votes,
            status: results.status(),
            is_expired: results.is_expired,
            is_active: results.is_active,
            is_inactive: results.is_inactive(),
            winner_option_id: results.winner_option_id.map(|id| id.to_uuid()),
            viewer_vote_option_id: results.viewer_choice().map(|o| o.option_id.to_uuid()),
            options: results.ranked_options.iter().map(Into::into).collect(),
        }
    }
}

/// A poll as one viewer should see it.
///
/// `results` is present only in `results` mode; in `voting` mode the client
/// shows the options without counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollDetailResponse {
    pub poll: PollData,
    pub view_mode: ViewMode,
    pub can_vote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<PollResultsData>,
}

impl PollDetailResponse {
    pub fn new(poll: &Poll, view_mode: ViewMode, results: &AggregatedPoll) -> Self {
        Self {
            poll: poll.into(),
            view_mode,
            can_vote: view_mode.accepts_votes(),
            results: match view_mode {
                ViewMode::Voting => None,
                ViewMode::Results => Some(results.into()),
            },
        }
    }
}
