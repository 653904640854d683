pub mod game;
pub mod state_machine;

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::SystemTime,
};

use tokio::sync::RwLock;

use crate::{
    config::AppConfig,
    retrieve::GameProvider,
    state::{
        game::{ClueRef, GameData},
        state_machine::HostFlow,
    },
};

pub type SharedState = Arc<AppState>;

/// Game installed in the application, tagged with the load that produced it.
#[derive(Debug, Clone)]
pub struct LoadedGame {
    /// Incremented on every load so stale image fetches can be discarded.
    pub generation: u64,
    pub game_id: String,
    pub game: GameData,
    pub loaded_at: SystemTime,
}

/// Central application state holding the current game and host flow.
///
/// When both locks are needed, `current_game` is taken before `flow`.
pub struct AppState {
    config: AppConfig,
    provider: Arc<dyn GameProvider>,
    current_game: RwLock<Option<LoadedGame>>,
    flow: RwLock<HostFlow>,
    generation: AtomicU64,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig, provider: Arc<dyn GameProvider>) -> SharedState {
        Arc::new(Self {
            config,
            provider,
            current_game: RwLock::new(None),
            flow: RwLock::new(HostFlow::new()),
            generation: AtomicU64::new(0),
        })
    }

    /// Configuration loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle to the game retrieval backend.
    pub fn provider(&self) -> Arc<dyn GameProvider> {
        Arc::clone(&self.provider)
    }

    /// Currently installed game, if any.
    pub fn current_game(&self) -> &RwLock<Option<LoadedGame>> {
        &self.current_game
    }

    /// Host flow of the installed game.
    pub fn flow(&self) -> &RwLock<HostFlow> {
        &self.flow
    }

    /// Replace the installed game and reset the host flow.
    pub async fn install_game(&self, game_id: String, game: GameData) -> LoadedGame {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let loaded = LoadedGame {
            generation,
            game_id,
            game,
            loaded_at: SystemTime::now(),
        };

        let mut current = self.current_game.write().await;
        let mut flow = self.flow.write().await;
        *current = Some(loaded.clone());
        *flow = HostFlow::new();
        loaded
    }

    /// Store fetched image bytes on a clue of the game loaded as `generation`.
    ///
    /// Returns `false` when another game was installed in the meantime.
    pub async fn cache_image(&self, generation: u64, clue: ClueRef, bytes: Vec<u8>) -> bool {
        let mut current = self.current_game.write().await;
        match current.as_mut() {
            Some(loaded) if loaded.generation == generation => {
                match loaded.game.question_mut(clue) {
                    Some(question) => {
                        question.cache_image(bytes);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}
