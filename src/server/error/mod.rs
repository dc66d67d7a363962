//! Error types for the Hearth server application.
//!
//! A single top-level [`Error`] aggregates domain errors (authentication) and external
//! library errors via `thiserror`'s `#[from]`, and maps every variant to an HTTP response
//! carrying the `{status, message}` envelope.

pub mod auth;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ApiResponse, server::error::auth::AuthError};

#[derive(Error, Debug)]
pub enum Error {
    /// Authentication error (token validation, credentials, membership).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// The addressed row does not exist or an update/delete affected zero rows.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The caller supplied an inconsistent or immutable field.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Token encoding/decoding error outside of normal validation failures.
    #[error(transparent)]
    JwtError(#[from] jsonwebtoken::errors::Error),
    /// Password hashing or verification error.
    #[error(transparent)]
    PasswordHashError(#[from] argon2::password_hash::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - invalid or immutable fields in the request body
/// - 401/403 - authentication and membership failures
/// - 404 Not Found - missing rows, surfaced as a "fail" envelope
/// - 500 Internal Server Error - everything else, with the full error logged
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::AuthError(err) => err.into_response(),
            Self::NotFound(what) => {
                tracing::debug!("{} not found", what);

                (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<()>::fail("No records found!")),
                )
                    .into_response()
            }
            Self::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::fail(message)),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error
/// response.
///
/// Logs the full error message, but returns an opaque message to the client to avoid
/// exposing internal details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error("Internal server error")),
        )
            .into_response()
    }
}
