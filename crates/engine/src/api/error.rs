//! HTTP error mapping.
//!
//! Every failure becomes a JSON [`ErrorResponse`]. Store and internal
//! details are logged here and replaced by a generic message.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use ballotbox_shared::{ErrorCode, ErrorResponse};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::polls::PollError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Unauthorized,
    Forbidden(String),
    BadRequest(String),
    Validation(String),
    AlreadyVoted,
    PollClosed,
    /// The store failed in a way worth retrying.
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone()),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Sign in to continue".to_string(),
            ),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg.clone()),
            Self::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
                msg.clone(),
            ),
            Self::AlreadyVoted => (
                StatusCode::CONFLICT,
                ErrorCode::AlreadyVoted,
                "You have already voted on this poll".to_string(),
            ),
            Self::PollClosed => (
                StatusCode::CONFLICT,
                ErrorCode::PollClosed,
                "This poll is no longer accepting votes".to_string(),
            ),
            Self::Unavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                "The poll store is temporarily unavailable, please retry".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                "Internal error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Unavailable(detail) => tracing::warn!(error = %detail, "Store unavailable"),
            Self::Internal(detail) => tracing::error!(error = %detail, "Internal error"),
            _ => {}
        }

        let (status, code, message) = self.parts();
        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound(e.to_string())
        } else if e.is_transient() {
            ApiError::Unavailable(e.to_string())
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<PollError> for ApiError {
    fn from(e: PollError) -> Self {
        match e {
            PollError::NotFound(_) => ApiError::NotFound(e.to_string()),
            PollError::Unauthenticated => ApiError::Unauthorized,
            PollError::AlreadyVoted => ApiError::AlreadyVoted,
            PollError::PollClosed => ApiError::PollClosed,
            PollError::OptionNotInPoll(_) => ApiError::BadRequest(e.to_string()),
            PollError::Forbidden => ApiError::Forbidden(e.to_string()),
            PollError::Validation(inner) => ApiError::Validation(inner.to_string()),
            PollError::Repo(inner) => inner.into(),
        }
    }
}
