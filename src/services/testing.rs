use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use futures::future::BoxFuture;

use crate::{
    config::{AppConfig, Settings},
    retrieve::{GameProvider, IncompleteGame, RetrieveError, RetrieveResult, SourceConfig},
    state::{AppState, SharedState, game::GameData},
};

/// In-memory provider returning canned results.
pub(crate) struct StubProvider {
    pub game: Option<GameData>,
    pub image: Option<Vec<u8>>,
    pub image_requests: AtomicUsize,
}

impl StubProvider {
    pub fn new(game: Option<GameData>, image: Option<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            game,
            image,
            image_requests: AtomicUsize::new(0),
        })
    }
}

impl GameProvider for StubProvider {
    fn fetch_game(&self, _game_id: String) -> BoxFuture<'static, RetrieveResult<GameData>> {
        let result = self
            .game
            .clone()
            .ok_or(RetrieveError::Incomplete(IncompleteGame::MissingFinalRound));
        Box::pin(async move { result })
    }

    fn random_game_id(&self) -> BoxFuture<'static, RetrieveResult<String>> {
        Box::pin(async { Ok("8123".to_owned()) })
    }

    fn fetch_image(&self, _url: String) -> BoxFuture<'static, Option<Vec<u8>>> {
        self.image_requests.fetch_add(1, Ordering::SeqCst);
        let image = self.image.clone();
        Box::pin(async move { image })
    }
}

pub(crate) fn state_with(provider: Arc<StubProvider>, settings: Settings) -> SharedState {
    AppState::new(
        AppConfig::new(settings, SourceConfig::default()),
        provider,
    )
}
