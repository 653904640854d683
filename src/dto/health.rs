use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Health status, always "ok" while the server answers.
    pub status: String,
    /// Whether a game is currently installed.
    pub game_loaded: bool,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(game_loaded: bool) -> Self {
        Self {
            status: "ok".to_string(),
            game_loaded,
        }
    }
}
