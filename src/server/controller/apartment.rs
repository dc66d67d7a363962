use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ApiResponse,
        apartment::{
            ApartmentDto, CreateApartmentDto, JoinApartmentDto, MemberDto, UpdateApartmentDto,
        },
    },
    server::{
        data::{apartment::ApartmentRepository, membership::MembershipRepository},
        error::{auth::AuthError, Error},
        model::{app::AppState, auth::CurrentResident},
        service::apartment::ApartmentService,
    },
};

pub static APARTMENT_TAG: &str = "apartment";

fn to_dto(apartment: entity::apartment::Model) -> ApartmentDto {
    ApartmentDto {
        id: apartment.id,
        name: apartment.name,
        access_code: apartment.access_code,
    }
}

/// Create an apartment
///
/// The caller becomes its first member and receives the generated access code
/// in the response; sharing that code is how others join.
#[utoipa::path(
    post,
    path = "/api/apartments",
    tag = APARTMENT_TAG,
    request_body = CreateApartmentDto,
    responses(
        (status = 201, description = "Apartment created", body = ApiResponse<ApartmentDto>),
        (status = 401, description = "Missing or invalid token", body = ApiResponse<ApartmentDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ApartmentDto>)
    ),
)]
pub async fn create_apartment(
    State(state): State<AppState>,
    resident: CurrentResident,
    Json(payload): Json<CreateApartmentDto>,
) -> Result<impl IntoResponse, Error> {
    let apartment = ApartmentService::new(&state.db)
        .create(payload.name, resident.resident_id)
        .await?;

    tracing::info!(apartment_id = apartment.id, "created apartment");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(to_dto(apartment))),
    ))
}

/// List the caller's apartments
#[utoipa::path(
    get,
    path = "/api/apartments",
    tag = APARTMENT_TAG,
    responses(
        (status = 200, description = "Apartments the caller belongs to", body = ApiResponse<Vec<ApartmentDto>>),
        (status = 401, description = "Missing or invalid token", body = ApiResponse<Vec<ApartmentDto>>),
        (status = 500, description = "Internal server error", body = ApiResponse<Vec<ApartmentDto>>)
    ),
)]
pub async fn get_apartments(
    State(state): State<AppState>,
    resident: CurrentResident,
) -> Result<impl IntoResponse, Error> {
    let apartments = MembershipRepository::new(&state.db)
        .apartments_for_resident(resident.resident_id)
        .await?;

    let dtos: Vec<ApartmentDto> = apartments.into_iter().map(to_dto).collect();

    Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
}

/// Get one apartment
#[utoipa::path(
    get,
    path = "/api/apartments/{apartment_id}",
    tag = APARTMENT_TAG,
    params(("apartment_id" = i32, Path, description = "Apartment id")),
    responses(
        (status = 200, description = "Apartment details", body = ApiResponse<ApartmentDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ApartmentDto>),
        (status = 404, description = "Apartment not found", body = ApiResponse<ApartmentDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ApartmentDto>)
    ),
)]
pub async fn get_apartment(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(apartment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    ApartmentService::new(&state.db)
        .require_membership(apartment_id, resident.resident_id)
        .await?;

    let apartment = ApartmentRepository::new(&state.db)
        .get(apartment_id)
        .await?
        .ok_or(Error::NotFound("apartment"))?;

    Ok((StatusCode::OK, Json(ApiResponse::success(to_dto(apartment)))))
}

/// Rename an apartment
///
/// The access code is fixed at creation; a payload carrying one is rejected
/// rather than silently ignored.
#[utoipa::path(
    put,
    path = "/api/apartments/{apartment_id}",
    tag = APARTMENT_TAG,
    params(("apartment_id" = i32, Path, description = "Apartment id")),
    request_body = UpdateApartmentDto,
    responses(
        (status = 200, description = "Apartment updated", body = ApiResponse<ApartmentDto>),
        (status = 400, description = "Attempted to change the access code", body = ApiResponse<ApartmentDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ApartmentDto>),
        (status = 404, description = "Apartment not found", body = ApiResponse<ApartmentDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ApartmentDto>)
    ),
)]
pub async fn update_apartment(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(apartment_id): Path<i32>,
    Json(payload): Json<UpdateApartmentDto>,
) -> Result<impl IntoResponse, Error> {
    ApartmentService::new(&state.db)
        .require_membership(apartment_id, resident.resident_id)
        .await?;

    if payload.access_code.is_some() {
        return Err(Error::InvalidRequest(
            "the access code cannot be changed".to_string(),
        ));
    }

    let repo = ApartmentRepository::new(&state.db);

    if let Some(name) = payload.name {
        let result = repo.update_name(apartment_id, name).await?;
        if result.rows_affected == 0 {
            return Err(Error::NotFound("apartment"));
        }
    }

    let apartment = repo
        .get(apartment_id)
        .await?
        .ok_or(Error::NotFound("apartment"))?;

    Ok((StatusCode::OK, Json(ApiResponse::success(to_dto(apartment)))))
}

/// Delete an apartment
///
/// The apartment's chore rotations are removed explicitly; memberships,
/// events and shopping items referencing it go by cascade.
#[utoipa::path(
    delete,
    path = "/api/apartments/{apartment_id}",
    tag = APARTMENT_TAG,
    params(("apartment_id" = i32, Path, description = "Apartment id")),
    responses(
        (status = 200, description = "Apartment deleted", body = ApiResponse<ApartmentDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ApartmentDto>),
        (status = 404, description = "Apartment not found", body = ApiResponse<ApartmentDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ApartmentDto>)
    ),
)]
pub async fn delete_apartment(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(apartment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let service = ApartmentService::new(&state.db);

    service
        .require_membership(apartment_id, resident.resident_id)
        .await?;
    service.delete(apartment_id).await?;

    tracing::info!(apartment_id, "deleted apartment");

    Ok((StatusCode::OK, Json(ApiResponse::<ApartmentDto>::success_empty())))
}

/// Join an apartment by access code
#[utoipa::path(
    post,
    path = "/api/apartments/join",
    tag = APARTMENT_TAG,
    request_body = JoinApartmentDto,
    responses(
        (status = 200, description = "Joined the apartment", body = ApiResponse<ApartmentDto>),
        (status = 400, description = "Already a member", body = ApiResponse<ApartmentDto>),
        (status = 404, description = "No apartment with that access code", body = ApiResponse<ApartmentDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ApartmentDto>)
    ),
)]
pub async fn join_apartment(
    State(state): State<AppState>,
    resident: CurrentResident,
    Json(payload): Json<JoinApartmentDto>,
) -> Result<impl IntoResponse, Error> {
    let apartment = ApartmentService::new(&state.db)
        .join(&payload.access_code, resident.resident_id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(to_dto(apartment)))))
}

/// List an apartment's members
#[utoipa::path(
    get,
    path = "/api/apartments/{apartment_id}/members",
    tag = APARTMENT_TAG,
    params(("apartment_id" = i32, Path, description = "Apartment id")),
    responses(
        (status = 200, description = "Members with their logins", body = ApiResponse<Vec<MemberDto>>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<Vec<MemberDto>>),
        (status = 500, description = "Internal server error", body = ApiResponse<Vec<MemberDto>>)
    ),
)]
pub async fn get_members(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(apartment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    ApartmentService::new(&state.db)
        .require_membership(apartment_id, resident.resident_id)
        .await?;

    let members = MembershipRepository::new(&state.db)
        .members(apartment_id)
        .await?;

    let dtos: Vec<MemberDto> = members
        .into_iter()
        .map(|m| MemberDto {
            member_id: m.member_id,
            resident_id: m.resident_id,
            login: m.login,
        })
        .collect();

    Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
}

/// Leave an apartment
///
/// Only the resident themself may remove their membership.
#[utoipa::path(
    delete,
    path = "/api/apartments/{apartment_id}/members/{resident_id}",
    tag = APARTMENT_TAG,
    params(
        ("apartment_id" = i32, Path, description = "Apartment id"),
        ("resident_id" = i32, Path, description = "Resident id"),
    ),
    responses(
        (status = 200, description = "Membership removed", body = ApiResponse<MemberDto>),
        (status = 403, description = "Caller may only remove their own membership", body = ApiResponse<MemberDto>),
        (status = 404, description = "Membership not found", body = ApiResponse<MemberDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<MemberDto>)
    ),
)]
pub async fn leave_apartment(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path((apartment_id, resident_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    if resident_id != resident.resident_id {
        return Err(AuthError::NotMember(resident.resident_id, apartment_id).into());
    }

    ApartmentService::new(&state.db)
        .leave(apartment_id, resident_id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::<MemberDto>::success_empty())))
}
