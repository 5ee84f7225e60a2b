//! Request bodies accepted by the HTTP API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/polls`.
///
/// Fields arrive as entered in the form; trimming and bounds are applied by
/// the domain when the poll is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<String>,
    /// RFC3339 or `datetime-local` (`YYYY-MM-DDTHH:MM`, read as UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Body of `POST /api/polls/{id}/votes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub option_id: Uuid,
}
