use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome discriminator carried on every API response.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The operation completed and `data` (if any) holds the result.
    Success,
    /// The request was well-formed but could not be satisfied (missing rows,
    /// invalid fields); `message` explains why.
    Fail,
    /// Something went wrong on the server side; `message` is intentionally opaque.
    Error,
}

/// Uniform response envelope: `{status, data?, message?}`.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    pub fn success_empty() -> Self {
        Self {
            status: ResponseStatus::Success,
            data: None,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Fail,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            message: Some(message.into()),
        }
    }
}
