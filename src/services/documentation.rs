use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for JParty Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::load_game,
        crate::routes::game::random_game,
        crate::routes::game::current_game,
        crate::routes::game::clue_image,
        crate::routes::game::final_image,
        crate::routes::host::apply_event,
        crate::routes::host::flow,
        crate::routes::settings::settings,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::GameSnapshot,
            crate::dto::game::BoardSnapshot,
            crate::dto::game::ClueSnapshot,
            crate::dto::game::FinalSnapshot,
            crate::dto::game::VideoSummary,
            crate::dto::game::RoundParam,
            crate::dto::game::RandomGameResponse,
            crate::dto::host::HostEventRequest,
            crate::dto::host::FlowSnapshot,
            crate::dto::host::PlayerScore,
            crate::dto::phase::PhaseSnapshot,
            crate::dto::settings::SettingsResponse,
            crate::config::ImageDisplay,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Game retrieval and content"),
        (name = "host", description = "Host controls driving the game"),
        (name = "settings", description = "Presentation settings"),
    )
)]
pub struct ApiDoc;
