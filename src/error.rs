use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{retrieve::RetrieveError, state::state_machine::FlowError};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The game could not be fetched from its source.
    #[error("cannot retrieve game {id}")]
    Retrieval {
        id: String,
        #[source]
        source: RetrieveError,
    },
    /// The game exists but lacks clue text.
    #[error("game {id} is incomplete ({reason}); try another game")]
    Incomplete { id: String, reason: String },
    /// The source data does not follow the expected layout.
    #[error("game {id} has malformed data: {reason}")]
    Malformed { id: String, reason: String },
    /// An upstream call unrelated to a specific game failed.
    #[error("upstream request failed")]
    Upstream(#[source] RetrieveError),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    /// Classify a retrieval failure for the game `id`.
    pub fn retrieval(id: impl Into<String>, err: RetrieveError) -> Self {
        let id = id.into();
        match err {
            RetrieveError::Incomplete(reason) => ServiceError::Incomplete {
                id,
                reason: reason.to_string(),
            },
            RetrieveError::Malformed(reason) => ServiceError::Malformed {
                id,
                reason: reason.to_string(),
            },
            source => ServiceError::Retrieval { id, source },
        }
    }
}

impl From<FlowError> for ServiceError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::UnknownClue(_) => ServiceError::NotFound(err.to_string()),
            FlowError::MissingWager => ServiceError::InvalidInput(err.to_string()),
            FlowError::InvalidTransition(_)
            | FlowError::AlreadyRevealed(_)
            | FlowError::AlreadyJudged(_) => ServiceError::InvalidState(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Request understood but the game cannot be played.
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    /// An upstream source answered with unusable data.
    #[error("bad gateway: {0}")]
    BadGateway(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Retrieval { .. } => AppError::NotFound(err.to_string()),
            ServiceError::Incomplete { .. } => AppError::Unprocessable(err.to_string()),
            ServiceError::Malformed { .. } => AppError::BadGateway(err.to_string()),
            ServiceError::Upstream(source) => AppError::BadGateway(source.to_string()),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::InvalidState(message) => AppError::Conflict(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
