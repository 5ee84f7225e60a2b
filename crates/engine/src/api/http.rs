//! HTTP routes.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use ballotbox_domain::{PollId, PollOptionId};
use ballotbox_shared::{
    renderer_for, CastVoteRequest, ChartData, ChartKind, CreatePollRequest, PollDetailResponse,
    PollResultsData,
};

use super::auth::{Auth, Viewer};
use super::error::ApiError;
use crate::app::App;
use crate::use_cases::polls::{CreatePollInput, PollView};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/polls", get(list_polls).post(create_poll))
        .route("/api/polls/mine", get(list_my_polls))
        .route("/api/polls/{id}", get(get_poll))
        .route("/api/polls/{id}/results", get(refresh_results))
        .route("/api/polls/{id}/votes", post(cast_vote))
        .route("/api/polls/{id}/close", post(close_poll))
        .route("/api/polls/{id}/chart", get(get_chart))
}

async fn health() -> &'static str {
    "OK"
}

fn detail(view: &PollView) -> PollDetailResponse {
    PollDetailResponse::new(&view.poll, view.view_mode, &view.results)
}

// =============================================================================
// Polls
// =============================================================================

async fn list_polls(
    State(app): State<Arc<App>>,
    Viewer(viewer): Viewer,
) -> Result<Json<Vec<PollDetailResponse>>, ApiError> {
    let views = app.use_cases.polls.view.list_active(viewer).await?;
    Ok(Json(views.iter().map(detail).collect()))
}

async fn list_my_polls(
    State(app): State<Arc<App>>,
    Auth(user_id): Auth,
) -> Result<Json<Vec<PollDetailResponse>>, ApiError> {
    let views = app.use_cases.polls.view.list_mine(user_id).await?;
    Ok(Json(views.iter().map(detail).collect()))
}

async fn create_poll(
    State(app): State<Arc<App>>,
    Auth(user_id): Auth,
    body: Result<Json<CreatePollRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PollDetailResponse>), ApiError> {
    let Json(request) = body?;
    let input = CreatePollInput {
        title: request.title,
        description: request.description,
        options: request.options,
        expires_at: request.expires_at,
    };
    let view = app.use_cases.polls.create.execute(input, user_id).await?;
    Ok((StatusCode::CREATED, Json(detail(&view))))
}

async fn get_poll(
    State(app): State<Arc<App>>,
    Viewer(viewer): Viewer,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PollDetailResponse>, ApiError> {
    let Path(id) = path?;
    let view = app
        .use_cases
        .polls
        .view
        .execute(PollId::from_uuid(id), viewer)
        .await?;
    Ok(Json(detail(&view)))
}

async fn close_poll(
    State(app): State<Arc<App>>,
    Auth(user_id): Auth,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PollDetailResponse>, ApiError> {
    let Path(id) = path?;
    let view = app
        .use_cases
        .polls
        .close
        .execute(PollId::from_uuid(id), user_id)
        .await?;
    Ok(Json(detail(&view)))
}

// =============================================================================
// Votes & Results
// =============================================================================

async fn cast_vote(
    State(app): State<Arc<App>>,
    Viewer(viewer): Viewer,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<CastVoteRequest>, JsonRejection>,
) -> Result<Json<PollDetailResponse>, ApiError> {
    let Path(id) = path?;
    let Json(request) = body?;
    let view = app
        .use_cases
        .polls
        .vote
        .execute(
            PollId::from_uuid(id),
            PollOptionId::from_uuid(request.option_id),
            viewer,
        )
        .await?;
    Ok(Json(detail(&view)))
}

async fn refresh_results(
    State(app): State<Arc<App>>,
    Viewer(viewer): Viewer,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PollResultsData>, ApiError> {
    let Path(id) = path?;
    let results = app
        .use_cases
        .polls
        .view
        .refresh(PollId::from_uuid(id), viewer)
        .await?;
    Ok(Json((&results).into()))
}

#[derive(Debug, Deserialize)]
struct ChartQuery {
    kind: Option<String>,
}

async fn get_chart(
    State(app): State<Arc<App>>,
    Viewer(viewer): Viewer,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<ChartData>, ApiError> {
    let Path(id) = path?;
    let Query(query) = query?;
    let kind = match query.kind.as_deref() {
        Some(raw) => raw
            .parse::<ChartKind>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => ChartKind::default(),
    };

    let results = app
        .use_cases
        .polls
        .view
        .refresh(PollId::from_uuid(id), viewer)
        .await?;
    Ok(Json(renderer_for(kind).render(&results)))
}
