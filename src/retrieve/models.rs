//! Wire models of the Wayback Machine CDX index.

use tracing::warn;

/// Column of the capture timestamp in a CDX row.
const TIMESTAMP_COLUMN: usize = 1;
/// Column of the originally captured URL in a CDX row.
const ORIGINAL_COLUMN: usize = 2;

/// One archived snapshot of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// `YYYYMMDDhhmmss` capture time.
    pub timestamp: String,
    /// URL as it was captured.
    pub original: String,
}

impl Capture {
    /// Replay URL of this capture on the given Wayback host.
    pub fn replay_url(&self, wayback_base_url: &str) -> String {
        format!(
            "{}/web/{}/{}",
            wayback_base_url.trim_end_matches('/'),
            self.timestamp,
            self.original
        )
    }
}

/// Decode a CDX `output=json` response into captures, in the order returned.
///
/// The first row is the column header. An empty array or a lone header both
/// mean there is no capture.
pub fn parse_captures(body: &str) -> Result<Vec<Capture>, serde_json::Error> {
    let rows = serde_json::from_str::<Vec<Vec<String>>>(body)?;

    Ok(rows
        .into_iter()
        .skip(1)
        .filter_map(|row| {
            match (row.get(TIMESTAMP_COLUMN), row.get(ORIGINAL_COLUMN)) {
                (Some(timestamp), Some(original)) => Some(Capture {
                    timestamp: timestamp.clone(),
                    original: original.clone(),
                }),
                _ => {
                    warn!(?row, "skipping short CDX row");
                    None
                }
            }
        })
        .collect())
}
