//! Game retrieval pipeline: fetch a game from the archive, the Wayback
//! Machine or a spreadsheet export and normalize it into [`GameData`].

pub mod archive;
mod config;
pub mod error;
pub mod links;
pub mod media;
pub mod models;
pub mod spreadsheet;
pub mod wayback;

use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;
use tracing::{info, warn};

use crate::state::game::GameData;

pub use config::SourceConfig;
pub use error::{IncompleteGame, MalformedInput, RetrieveError, RetrieveResult};

/// Identifiers shorter than this are archive game ids; longer ones are
/// spreadsheet file ids.
pub const ARCHIVE_ID_MAX_LEN: usize = 6;

const USER_AGENT: &str = concat!("jparty-back/", env!("CARGO_PKG_VERSION"));

/// Where a game identifier is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSource {
    /// Numeric J! Archive game id, resolved through the Wayback Machine.
    Archive,
    /// Google Sheets file id of a game built from the template.
    Spreadsheet,
}

impl GameSource {
    /// Route an identifier by its length.
    pub fn classify(game_id: &str) -> Self {
        if game_id.chars().count() <= ARCHIVE_ID_MAX_LEN {
            GameSource::Archive
        } else {
            GameSource::Spreadsheet
        }
    }
}

/// Abstraction over game retrieval so the services can run against stubs.
pub trait GameProvider: Send + Sync {
    /// Retrieve and normalize the game behind `game_id`.
    fn fetch_game(&self, game_id: String) -> BoxFuture<'static, RetrieveResult<GameData>>;
    /// Pick an archive game id from the archive front page.
    fn random_game_id(&self) -> BoxFuture<'static, RetrieveResult<String>>;
    /// Download image bytes, `None` when the link is unusable.
    fn fetch_image(&self, url: String) -> BoxFuture<'static, Option<Vec<u8>>>;
}

/// HTTP-backed retriever for every supported source.
#[derive(Clone)]
pub struct GameRetriever {
    client: Client,
    image_client: Client,
    sources: Arc<SourceConfig>,
}

impl GameRetriever {
    /// Build the HTTP clients for game sources and clue images.
    pub fn new(sources: SourceConfig) -> RetrieveResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| RetrieveError::ClientBuilder { source })?;
        // Slow hosts that keep sending bytes are not cut off.
        let image_client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(media::IMAGE_FETCH_TIMEOUT)
            .read_timeout(media::IMAGE_FETCH_TIMEOUT)
            .build()
            .map_err(|source| RetrieveError::ClientBuilder { source })?;

        Ok(Self {
            client,
            image_client,
            sources: Arc::new(sources),
        })
    }

    /// Source endpoints this retriever talks to.
    pub fn sources(&self) -> &SourceConfig {
        &self.sources
    }

    /// Retrieve a game by identifier, picking the source from its shape.
    pub async fn get_game(&self, game_id: &str) -> RetrieveResult<GameData> {
        match GameSource::classify(game_id) {
            GameSource::Archive => self.get_wayback_game(game_id).await,
            GameSource::Spreadsheet => self.get_spreadsheet_game(game_id).await,
        }
    }

    /// Best-effort image download. A host that stalls for longer than
    /// [`media::IMAGE_FETCH_TIMEOUT`] while connecting or between reads is
    /// given up on.
    ///
    /// Failures and error pages are logged and yield `None`.
    pub async fn fetch_image(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.image_client.get(url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(url, status = %response.status(), "failed to load image");
                return None;
            }
            Err(err) => {
                warn!(url, error = %err, "failed to load image");
                return None;
            }
        };

        match response.bytes().await {
            Ok(bytes) if media::looks_like_image(&bytes) => {
                info!(url, size = bytes.len(), "loaded image");
                Some(bytes.to_vec())
            }
            Ok(_) => {
                warn!(url, "image link returned an error page");
                None
            }
            Err(err) => {
                warn!(url, error = %err, "failed to read image body");
                None
            }
        }
    }

    async fn send(&self, url: &str, query: &[(&str, &str)]) -> RetrieveResult<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| RetrieveError::RequestSend {
                url: url.to_owned(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(RetrieveError::RequestStatus {
                url: url.to_owned(),
                status: response.status(),
            });
        }

        Ok(response)
    }

    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> RetrieveResult<String> {
        self.send(url, query)
            .await?
            .text()
            .await
            .map_err(|source| RetrieveError::ReadBody {
                url: url.to_owned(),
                source,
            })
    }

    async fn get_bytes(&self, url: &str, query: &[(&str, &str)]) -> RetrieveResult<Vec<u8>> {
        self.send(url, query)
            .await?
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|source| RetrieveError::ReadBody {
                url: url.to_owned(),
                source,
            })
    }
}

impl GameProvider for GameRetriever {
    fn fetch_game(&self, game_id: String) -> BoxFuture<'static, RetrieveResult<GameData>> {
        let retriever = self.clone();
        Box::pin(async move { retriever.get_game(&game_id).await })
    }

    fn random_game_id(&self) -> BoxFuture<'static, RetrieveResult<String>> {
        let retriever = self.clone();
        Box::pin(async move { GameRetriever::random_game_id(&retriever).await })
    }

    fn fetch_image(&self, url: String) -> BoxFuture<'static, Option<Vec<u8>>> {
        let retriever = self.clone();
        Box::pin(async move { GameRetriever::fetch_image(&retriever, &url).await })
    }
}
