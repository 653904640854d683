use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::game::{ClueImagePath, GameIdPath, GameSnapshot, RandomGameResponse},
    error::AppError,
    services::game_service::{self, ClueImage},
    state::{
        SharedState,
        game::{ClueRef, Position},
    },
};

/// Routes handling game retrieval and content.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games/random", get(random_game))
        .route("/games/{id}/load", post(load_game))
        .route("/game", get(current_game))
        .route(
            "/game/rounds/{round}/clues/{category}/{row}/image",
            get(clue_image),
        )
        .route("/game/final/image", get(final_image))
}

/// Retrieve a game from the archive or a spreadsheet and install it.
#[utoipa::path(
    post,
    path = "/games/{id}/load",
    tag = "game",
    params(GameIdPath),
    responses(
        (status = 200, description = "Game loaded", body = GameSnapshot),
        (status = 400, description = "Invalid game id"),
        (status = 404, description = "Game could not be retrieved"),
        (status = 422, description = "Game is incomplete; try another game"),
        (status = 502, description = "Source data is malformed")
    )
)]
pub async fn load_game(
    State(state): State<SharedState>,
    Valid(Path(GameIdPath { id })): Valid<Path<GameIdPath>>,
) -> Result<Json<GameSnapshot>, AppError> {
    let snapshot = game_service::load_game(&state, id).await?;
    Ok(Json(snapshot))
}

/// Pick the id of a recently aired archive game.
#[utoipa::path(
    get,
    path = "/games/random",
    tag = "game",
    responses(
        (status = 200, description = "Game id picked", body = RandomGameResponse),
        (status = 502, description = "Archive front page unusable")
    )
)]
pub async fn random_game(
    State(state): State<SharedState>,
) -> Result<Json<RandomGameResponse>, AppError> {
    let response = game_service::random_game(&state).await?;
    Ok(Json(response))
}

/// Snapshot of the installed game.
#[utoipa::path(
    get,
    path = "/game",
    tag = "game",
    responses(
        (status = 200, description = "Current game", body = GameSnapshot),
        (status = 404, description = "No game loaded")
    )
)]
pub async fn current_game(State(state): State<SharedState>) -> Result<Json<GameSnapshot>, AppError> {
    let snapshot = game_service::current_game(&state).await?;
    Ok(Json(snapshot))
}

/// Image attached to a clue of a regular round.
#[utoipa::path(
    get,
    path = "/game/rounds/{round}/clues/{category}/{row}/image",
    tag = "game",
    params(ClueImagePath),
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 404, description = "No image for this clue")
    )
)]
pub async fn clue_image(
    State(state): State<SharedState>,
    Path(ClueImagePath {
        round,
        category,
        row,
    }): Path<ClueImagePath>,
) -> Result<Response, AppError> {
    let clue = ClueRef::Board {
        round: round.into(),
        position: Position::new(category, row),
    };
    let image = game_service::clue_image(&state, clue).await?;
    Ok(image_response(image))
}

/// Image attached to the final clue.
#[utoipa::path(
    get,
    path = "/game/final/image",
    tag = "game",
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 404, description = "No image for the final clue")
    )
)]
pub async fn final_image(State(state): State<SharedState>) -> Result<Response, AppError> {
    let image = game_service::clue_image(&state, ClueRef::Final).await?;
    Ok(image_response(image))
}

fn image_response(image: ClueImage) -> Response {
    ([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response()
}
