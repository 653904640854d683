//! Error types shared by the retrieval pipeline.

use reqwest::StatusCode;
use thiserror::Error;

use crate::state::game::{BoardError, Position, Round};

use super::spreadsheet::CellAddress;

/// Convenient result alias returning [`RetrieveError`] failures.
pub type RetrieveResult<T> = Result<T, RetrieveError>;

/// Failures that can occur while retrieving and normalizing a game.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent or timed out.
    #[error("failed to send request to `{url}`")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The remote answered with a non-success status.
    #[error("unexpected response status {status} for `{url}`")]
    RequestStatus { url: String, status: StatusCode },
    /// The response body could not be read.
    #[error("failed to read response body from `{url}`")]
    ReadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The archive index returned something other than the expected JSON rows.
    #[error("failed to decode archive index response from `{url}`")]
    DecodeIndex {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// The spreadsheet export is not valid CSV.
    #[error("failed to decode spreadsheet export from `{url}`")]
    DecodeCsv {
        url: String,
        #[source]
        source: csv::Error,
    },
    /// The archive front page did not link to any game.
    #[error("no game link found on `{url}`")]
    MissingGameLink { url: String },
    /// The game exists but cannot be played.
    #[error(transparent)]
    Incomplete(#[from] IncompleteGame),
    /// The source data does not follow the expected layout.
    #[error(transparent)]
    Malformed(#[from] MalformedInput),
}

impl RetrieveError {
    /// Whether the failure only means this particular game is unusable.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, RetrieveError::Incomplete(_))
    }
}

/// Signals an archived game that lacks data required to play it.
///
/// Archived games are frequently partial, so this is kept apart from
/// transport and layout failures: the caller should offer another game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncompleteGame {
    /// The page title carrying the air date is absent.
    #[error("game page has no dated title")]
    MissingTitle,
    /// One or both regular rounds are missing.
    #[error("game page has {found} of 2 regular rounds")]
    MissingRound { found: usize },
    /// A board clue was never revealed in the archive.
    #[error("a {round} round clue has no text")]
    MissingClueText { round: Round },
    /// The final round section is absent.
    #[error("game page has no final round")]
    MissingFinalRound,
    /// The final clue was never revealed in the archive.
    #[error("final clue has no text")]
    MissingFinalClueText,
}

/// Source data that violates the layout the importers rely on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    /// The export is shorter than the template.
    #[error("spreadsheet has {rows} rows, expected at least {expected}")]
    TooFewRows { rows: usize, expected: usize },
    /// A row ends before a cell the template requires.
    #[error("spreadsheet cell {address} is missing")]
    MissingCell { address: CellAddress },
    /// A clue value cell does not hold a whole number.
    #[error("spreadsheet cell {address} is not an integer: `{value}`")]
    InvalidValue { address: CellAddress, value: String },
    /// An archive clue id cannot be mapped to a board cell.
    #[error("clue id `{id}` does not encode a board position")]
    ClueId { id: String },
    /// A clue sits in a column without a category header.
    #[error("clue at {position} has no category")]
    UnknownCategory { position: Position },
    /// A board clue lacks its answer marker.
    #[error("clue at {position} has no revealed answer")]
    MissingAnswer { position: Position },
    /// The final round has no category name.
    #[error("final round has no category")]
    MissingFinalCategory,
    /// The final clue lacks its answer marker.
    #[error("final clue has no revealed answer")]
    MissingFinalAnswer,
    /// The parsed clues do not form a full board.
    #[error(transparent)]
    Board(#[from] BoardError),
}
