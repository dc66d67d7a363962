use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ApiResponse;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Request is missing the x-access-token header")]
    MissingToken,
    #[error("Access token failed validation")]
    InvalidToken,
    #[error("Access token has expired")]
    TokenExpired,
    #[error("Invalid login or password")]
    InvalidCredentials,
    #[error("Resident {0} is not a member of apartment {1}")]
    NotMember(i32, i32),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Missing access token"),
            Self::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid access token"),
            Self::TokenExpired => (StatusCode::UNAUTHORIZED, "Access token expired"),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid login or password"),
            Self::NotMember(_, _) => (StatusCode::FORBIDDEN, "Not a member of this apartment"),
        };

        (status, Json(ApiResponse::<()>::fail(message))).into_response()
    }
}
