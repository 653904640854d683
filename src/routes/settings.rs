use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::settings::SettingsResponse, state::SharedState};

#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses((status = 200, description = "Presentation settings", body = SettingsResponse))
)]
/// Return the presentation settings loaded at startup.
pub async fn settings(State(state): State<SharedState>) -> Json<SettingsResponse> {
    Json(state.config().settings().into())
}

/// Configure the settings routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/settings", get(settings))
}
