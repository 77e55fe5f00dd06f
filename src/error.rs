//! Error handler for reelmark.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sqlx::Error as SQLxError;
use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Enum representing server-side errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("validation error occurred")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Axum(#[from] JsonRejection),

    #[error("SQL request failed: {0}")]
    Sql(#[from] SQLxError),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("email already exists")]
    EmailTaken,

    #[error("user not found")]
    UnknownUser,

    #[error("invalid password")]
    WrongPassword,

    #[error("invalid or expired token")]
    Unauthorized,
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
struct ResponseError {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Validation(_)
            | ServerError::Axum(_)
            | ServerError::EmailTaken => StatusCode::BAD_REQUEST,

            // Unknown user and bad password stay distinguishable on the
            // wire, matching the historical behavior of this API.
            ServerError::UnknownUser | ServerError::WrongPassword => {
                StatusCode::UNAUTHORIZED
            },

            ServerError::Unauthorized => StatusCode::FORBIDDEN,

            ServerError::Sql(_)
            | ServerError::Hash(_)
            | ServerError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            ServerError::Validation(errors) => errors.to_string(),
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %self, "server returned 500 status");
                "internal server error".to_owned()
            },
            _ => self.to_string(),
        };

        (status, Json(ResponseError { error: message })).into_response()
    }
}
