use axum::{Json, Router, extract::State, routing::{get, post}};
use axum_valid::Valid;

use crate::{
    dto::host::{FlowSnapshot, HostEventRequest},
    error::AppError,
    services::host_service,
    state::SharedState,
};

/// Routes the host uses to drive the installed game.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game/events", post(apply_event))
        .route("/game/flow", get(flow))
}

/// Apply a host action and return the resulting phase and scores.
#[utoipa::path(
    post,
    path = "/game/events",
    tag = "host",
    request_body = HostEventRequest,
    responses(
        (status = 200, description = "Event applied", body = FlowSnapshot),
        (status = 400, description = "Invalid payload or missing wager"),
        (status = 404, description = "Unknown clue"),
        (status = 409, description = "Event not allowed in the current phase")
    )
)]
pub async fn apply_event(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<HostEventRequest>>,
) -> Result<Json<FlowSnapshot>, AppError> {
    let snapshot = host_service::apply_event(&state, payload).await?;
    Ok(Json(snapshot))
}

/// Current phase and scores.
#[utoipa::path(
    get,
    path = "/game/flow",
    tag = "host",
    responses((status = 200, description = "Current flow", body = FlowSnapshot))
)]
pub async fn flow(State(state): State<SharedState>) -> Json<FlowSnapshot> {
    Json(host_service::flow_snapshot(&state).await)
}
