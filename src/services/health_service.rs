use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness and whether a game is installed.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let game_loaded = state.current_game().read().await.is_some();
    HealthResponse::ok(game_loaded)
}
