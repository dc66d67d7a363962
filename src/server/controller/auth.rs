use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ApiResponse,
        auth::{LoginDto, RegisterDto, ResidentDto, TokenDto},
    },
    server::{error::Error, model::app::AppState, service::auth::AuthService},
};

pub static AUTH_TAG: &str = "auth";

/// Register a new resident account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Resident created", body = ApiResponse<ResidentDto>),
        (status = 400, description = "Login already taken", body = ApiResponse<ResidentDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ResidentDto>)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, Error> {
    let resident = AuthService::new(&state.db)
        .register(payload.login, &payload.password)
        .await?;

    tracing::info!(resident_id = resident.id, "registered new resident");

    let dto = ResidentDto {
        id: resident.id,
        login: resident.login,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}

/// Log in and receive an access token
///
/// The returned token goes into the `x-access-token` header of every
/// authenticated request and is valid for 30 days.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Token issued", body = ApiResponse<TokenDto>),
        (status = 401, description = "Invalid credentials", body = ApiResponse<TokenDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<TokenDto>)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let token = AuthService::new(&state.db)
        .login(&payload.login, &payload.password, &state.jwt_secret)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(TokenDto { token })),
    ))
}
