use serde::Deserialize;

const DEFAULT_ARCHIVE_BASE_URL: &str = "http://www.j-archive.com";
const DEFAULT_WAYBACK_BASE_URL: &str = "http://web.archive.org";
const DEFAULT_SHEETS_BASE_URL: &str = "https://docs.google.com";

/// Base URLs of the remote sources games are retrieved from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    archive_base_url: String,
    wayback_base_url: String,
    sheets_base_url: String,
}

impl SourceConfig {
    /// Construct a configuration from explicit base URLs.
    pub fn new(
        archive_base_url: impl Into<String>,
        wayback_base_url: impl Into<String>,
        sheets_base_url: impl Into<String>,
    ) -> Self {
        Self {
            archive_base_url: archive_base_url.into(),
            wayback_base_url: wayback_base_url.into(),
            sheets_base_url: sheets_base_url.into(),
        }
    }

    /// Point every source at the same host, as test servers do.
    pub fn single_host(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self::new(base_url.clone(), base_url.clone(), base_url)
    }

    /// Trivia archive site, without trailing slash.
    pub fn archive_base_url(&self) -> &str {
        self.archive_base_url.trim_end_matches('/')
    }

    /// Wayback Machine host, without trailing slash.
    pub fn wayback_base_url(&self) -> &str {
        self.wayback_base_url.trim_end_matches('/')
    }

    /// Spreadsheet export host, without trailing slash.
    pub fn sheets_base_url(&self) -> &str {
        self.sheets_base_url.trim_end_matches('/')
    }

    /// Show page URL without scheme or `www.`, so index lookups match
    /// captures made over both http and https.
    pub fn archive_page_key(&self, game_id: &str) -> String {
        let base = self.archive_base_url();
        let host = base
            .split_once("://")
            .map_or(base, |(_, rest)| rest)
            .trim_start_matches("www.");
        format!("{host}/showgame.php?game_id={game_id}")
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_ARCHIVE_BASE_URL,
            DEFAULT_WAYBACK_BASE_URL,
            DEFAULT_SHEETS_BASE_URL,
        )
    }
}
