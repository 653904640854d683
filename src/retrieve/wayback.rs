//! Resolution of archive games through Wayback Machine snapshots.

use tracing::info;

use crate::state::game::GameData;

use super::{
    GameRetriever,
    error::{RetrieveError, RetrieveResult},
    models::{Capture, parse_captures},
};

/// Capture to replay among those returned by the index.
///
/// The index returns captures oldest first, so the last one is the most
/// recent; the list is not re-sorted.
pub fn latest_capture(captures: &[Capture]) -> Option<&Capture> {
    captures.last()
}

impl GameRetriever {
    /// Query the Wayback index for snapshots of the show page and parse the
    /// latest one, or the live page when nothing was archived.
    pub async fn get_wayback_game(&self, game_id: &str) -> RetrieveResult<GameData> {
        let url = format!("{}/cdx/search/cdx", self.sources().wayback_base_url());
        let page_key = self.sources().archive_page_key(game_id);

        let body = self
            .get_text(
                &url,
                &[
                    ("url", page_key.as_str()),
                    ("collapse", "digest"),
                    ("limit", "-2"),
                    ("fastLatest", "true"),
                    ("output", "json"),
                ],
            )
            .await?;
        let captures =
            parse_captures(&body).map_err(|source| RetrieveError::DecodeIndex { url, source })?;

        let Some(capture) = latest_capture(&captures) else {
            info!(game_id, "no snapshot in wayback; scraping archive directly");
            return self.get_archive_game(game_id, None).await;
        };

        let replay_url = capture.replay_url(self.sources().wayback_base_url());
        info!(game_id, timestamp = %capture.timestamp, "replaying wayback snapshot");
        self.get_archive_game(game_id, Some(&replay_url)).await
    }
}
