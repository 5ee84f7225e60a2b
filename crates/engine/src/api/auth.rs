//! Viewer identity for HTTP routes.
//!
//! Identity comes from the `X-User-Id` header, a UUID issued by the
//! authentication store. [`Auth`] requires it; [`Viewer`] accepts anonymous
//! requests. A header that is present but not a UUID is rejected by both.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use ballotbox_domain::UserId;

use super::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

fn user_from_headers(headers: &HeaderMap) -> Result<Option<UserId>, ApiError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|raw| raw.parse::<UserId>().ok())
        .map(Some)
        .ok_or(ApiError::Unauthorized)
}

/// Extractor for an authenticated user.
///
/// ```rust,ignore
/// async fn handler(Auth(user_id): Auth) -> String {
///     user_id.to_string()
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Auth(pub UserId);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_from_headers(&parts.headers)?
            .map(Auth)
            .ok_or(ApiError::Unauthorized)
    }
}

/// Extractor for an optional viewer.
#[derive(Debug, Clone, Copy)]
pub struct Viewer(pub Option<UserId>);

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_from_headers(&parts.headers).map(Viewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn protected_handler(Auth(user_id): Auth) -> String {
        format!("user:{user_id}")
    }

    async fn open_handler(Viewer(viewer): Viewer) -> String {
        match viewer {
            Some(user_id) => format!("user:{user_id}"),
            None => "anonymous".to_string(),
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/protected", get(protected_handler))
            .route("/open", get(open_handler))
    }

    async fn call(uri: &str, user: Option<&str>) -> (StatusCode, String) {
        let mut request = Request::builder().uri(uri);
        if let Some(user) = user {
            request = request.header("X-User-Id", user);
        }
        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn auth_reads_user_from_header() {
        let user_id = UserId::new();
        let (status, body) = call("/protected", Some(&user_id.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("user:{user_id}"));
    }

    #[tokio::test]
    async fn auth_without_header_is_unauthorized() {
        let (status, body) = call("/protected", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("\"unauthorized\""));
    }

    #[tokio::test]
    async fn malformed_user_id_is_unauthorized() {
        assert_eq!(call("/protected", Some("not-a-uuid")).await.0, StatusCode::UNAUTHORIZED);
        assert_eq!(call("/open", Some("not-a-uuid")).await.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn viewer_may_be_anonymous() {
        let (status, body) = call("/open", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }
}
