use tracing::{info, warn};

use crate::{
    dto::game::{GameSnapshot, RandomGameResponse},
    error::ServiceError,
    retrieve::media,
    state::{SharedState, game::ClueRef},
};

/// Image bytes of a clue with the content type to serve them under.
#[derive(Debug, Clone)]
pub struct ClueImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Retrieve a game from its source and install it, resetting the host flow.
///
/// The previous game stays installed when retrieval fails.
pub async fn load_game(state: &SharedState, id: String) -> Result<GameSnapshot, ServiceError> {
    info!(game_id = %id, "loading game");
    let game = match state.provider().fetch_game(id.clone()).await {
        Ok(game) => game,
        Err(err) => {
            warn!(game_id = %id, error = %err, "failed to retrieve game");
            return Err(ServiceError::retrieval(id, err));
        }
    };

    let loaded = state.install_game(id, game).await;
    info!(
        game_id = %loaded.game_id,
        generation = loaded.generation,
        date = %loaded.game.date(),
        "game installed"
    );
    Ok((&loaded).into())
}

/// Snapshot of the installed game.
pub async fn current_game(state: &SharedState) -> Result<GameSnapshot, ServiceError> {
    let guard = state.current_game().read().await;
    guard
        .as_ref()
        .map(Into::into)
        .ok_or_else(|| ServiceError::NotFound("no game loaded".into()))
}

/// Pick a recently aired archive game.
pub async fn random_game(state: &SharedState) -> Result<RandomGameResponse, ServiceError> {
    let game_id = state
        .provider()
        .random_game_id()
        .await
        .map_err(ServiceError::Upstream)?;
    Ok(RandomGameResponse { game_id })
}

/// Image of a clue, fetched on first request and cached on the game.
pub async fn clue_image(state: &SharedState, clue: ClueRef) -> Result<ClueImage, ServiceError> {
    if !state
        .config()
        .settings()
        .show_text_with_images
        .shows_images()
    {
        return Err(ServiceError::NotFound("clue images are disabled".into()));
    }

    let (generation, link) = {
        let guard = state.current_game().read().await;
        let loaded = guard
            .as_ref()
            .ok_or_else(|| ServiceError::NotFound("no game loaded".into()))?;
        let question = loaded
            .game
            .question(clue)
            .ok_or_else(|| ServiceError::NotFound(format!("no clue at {clue:?}")))?;
        let link = question
            .image_link
            .clone()
            .ok_or_else(|| ServiceError::NotFound("clue has no image".into()))?;

        if let Some(bytes) = &question.image {
            return Ok(ClueImage {
                bytes: bytes.clone(),
                content_type: media::image_content_type(&link),
            });
        }
        (loaded.generation, link)
    };

    let Some(bytes) = state.provider().fetch_image(link.clone()).await else {
        return Err(ServiceError::NotFound(format!("image `{link}` is unavailable")));
    };

    if !state.cache_image(generation, clue, bytes.clone()).await {
        info!(generation, "game replaced while fetching image; not caching");
    }

    Ok(ClueImage {
        bytes,
        content_type: media::image_content_type(&link),
    })
}
